//! # Log Parser Example
//!
//! This example runs typical workout and meal log entries through the
//! rule-based analyzer and prints what comes out, including how confidence
//! drops when parts of an entry are not recognized.

use fitlog::analyzer::{FitnessLogAnalyzer, RuleBasedAnalyzer};
use fitlog::entity_resolver::EntityResolver;
use fitlog::format_parsed_workout;
use fitlog::nutrition_analyzer::NutritionAnalyzer;
use fitlog::parser_config::ParserConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🏋️ Fitness Log Parser Example");
    println!("==============================\n");

    let analyzer = RuleBasedAnalyzer::from_config(&ParserConfig::from_env())?;

    // Example 1: Workout entries
    println!("📖 Example 1: Workout Entries");
    println!("-----------------------------");

    let workouts = [
        "3 sets of bench press at 60kg, 10 reps each",
        "squat set 1:8 reps, set 2:6 reps, set 3:5 reps at 100kg",
        "deadlift 5x5 @ 315lbs then pull ups 3 sets",
        "flubber curls 50kg 3x10",
    ];

    for entry in workouts {
        let result = analyzer.parse_workout(entry);
        println!("📝 \"{}\"", entry);
        println!("   {}", format_parsed_workout(&result));
        println!(
            "   {} matched, {} custom → {} ({})\n",
            result.matched_count(),
            result.unmatched_count(),
            result.confidence,
            result.confidence.hint()
        );
    }

    // Example 2: Meal entries
    println!("🥗 Example 2: Meal Entries");
    println!("--------------------------");

    let meals = [
        "100g chicken breast and 1 cup rice",
        "2 eggs, toast with peanut butter",
        "1 banana",
        "xyzzy qwerty",
    ];

    for entry in meals {
        let result = analyzer.analyze_nutrition(entry);
        println!("📝 \"{}\"", entry);
        for line in result.to_string().lines() {
            println!("   {}", line);
        }
        if result.confidence.needs_manual_entry() {
            println!("   ⚠️  {}", result.confidence.hint());
        }
        println!();
    }

    // Example 3: Name resolution on its own
    println!("🔎 Example 3: Food Name Resolution");
    println!("----------------------------------");

    let nutrition = NutritionAnalyzer::builtin();
    let resolver = EntityResolver::for_foods(
        nutrition.catalog(),
        ParserConfig::default().nutrition.resolver,
    );
    for query in ["chiken breast", "spud", "greek yoghurt", "xyzzy qwerty"] {
        match resolver.resolve(query) {
            Some(found) => println!(
                "  ✅ {:<15} → {} ({})",
                query,
                resolver.id_at(found.index).unwrap_or("?"),
                found.stage
            ),
            None => println!("  ❌ {:<15} → no match", query),
        }
    }

    // JSON output, as sent to a client
    println!("\n📦 JSON Output");
    println!("--------------");
    let result = analyzer.parse_workout("bench press 3x10 at 60kg");
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
