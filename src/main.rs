use anyhow::Result;
use clap::{Parser, Subcommand};
use fitlog::analyzer::{FitnessLogAnalyzer, RuleBasedAnalyzer};
use fitlog::parser_config::ParserConfig;
use fitlog::workout_parser::format_parsed_workout;
use log::info;

/// Turn free-text workout and meal logs into structured records
#[derive(Debug, Parser)]
#[command(name = "fitlog", version, about)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse a workout description, e.g. "3 sets of bench press at 60kg, 10 reps each"
    Workout {
        /// The workout text
        text: Vec<String>,
    },
    /// Estimate calories and macros for a meal, e.g. "100g chicken breast and 1 banana"
    Nutrition {
        /// The meal text
        text: Vec<String>,
    },
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();
    let config = ParserConfig::from_env();
    let analyzer = RuleBasedAnalyzer::from_config(&config)?;
    info!("Using {} analyzer", analyzer.name());

    match cli.command {
        Command::Workout { text } => {
            let result = analyzer.parse_workout(&text.join(" "));
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", format_parsed_workout(&result));
                println!("Confidence: {} ({})", result.confidence, result.confidence.hint());
            }
        }
        Command::Nutrition { text } => {
            let result = analyzer.analyze_nutrition(&text.join(" "));
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{result}");
                println!("Confidence: {}", result.confidence.hint());
            }
        }
    }

    Ok(())
}
