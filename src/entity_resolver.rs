//! # Entity Resolver Module
//!
//! Maps a cleaned name fragment to a catalog entry by walking an ordered
//! ladder of matchers, strictest first:
//!
//! 1. exact alias
//! 2. alias containment (query contains alias, then alias contains query)
//! 3. id slug
//! 4. exact name
//! 5. name containment (query contains name, then name contains query)
//! 6. word overlap
//! 7. whole-string edit distance
//!
//! The resolver only knows ids and names; it returns the index of the winning
//! candidate so callers can map it back to their own catalog entries.

use crate::catalog::{ExerciseCatalog, FoodCatalog};
use crate::fuzzy::{
    contains_phrase, distance_threshold, is_plural_of, levenshtein, name_words, overlap_accepted,
    query_words, word_overlap,
};
use crate::parser_config::{ResolverConfig, GYM_QUALIFIERS};
use log::{debug, trace};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// The ladder step that produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchStage {
    AliasExact,
    AliasContainment,
    IdSlug,
    ExactName,
    NameContainment,
    WordOverlap,
    EditDistance,
}

impl MatchStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStage::AliasExact => "alias-exact",
            MatchStage::AliasContainment => "alias-containment",
            MatchStage::IdSlug => "id-slug",
            MatchStage::ExactName => "exact-name",
            MatchStage::NameContainment => "name-containment",
            MatchStage::WordOverlap => "word-overlap",
            MatchStage::EditDistance => "edit-distance",
        }
    }

    /// Stages that tolerate misspellings
    pub fn is_loose(&self) -> bool {
        matches!(self, MatchStage::WordOverlap | MatchStage::EditDistance)
    }
}

impl fmt::Display for MatchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successful resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedMatch {
    /// Position of the candidate in the order it was given to the resolver
    pub index: usize,
    pub stage: MatchStage,
}

#[derive(Debug, Clone)]
struct IndexedName {
    id: String,
    name: String,
    words: Vec<String>,
}

#[derive(Debug, Clone)]
struct IndexedAlias {
    alias: String,
    target: usize,
}

/// Name resolution over a fixed candidate list
#[derive(Debug, Clone)]
pub struct EntityResolver {
    names: Vec<IndexedName>,
    aliases: Vec<IndexedAlias>,
    aliases_longest_first: Vec<usize>,
    aliases_shortest_first: Vec<usize>,
    names_longest_first: Vec<usize>,
    names_shortest_first: Vec<usize>,
    loose_order: Vec<usize>,
    vocabulary: HashSet<String>,
    config: ResolverConfig,
}

/// Indices of `keys` sorted by char length; the sort is stable so ties keep
/// declaration order.
fn order_by_len(keys: &[&str], longest_first: bool) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    if longest_first {
        order.sort_by_key(|&i| std::cmp::Reverse(keys[i].chars().count()));
    } else {
        order.sort_by_key(|&i| keys[i].chars().count());
    }
    order
}

fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

impl EntityResolver {
    /// Build a resolver from `(id, name)` candidates and `(alias, target id)`
    /// pairs. Aliases pointing at unknown ids are skipped.
    pub fn new<C, A>(candidates: C, aliases: A, config: ResolverConfig) -> Self
    where
        C: IntoIterator<Item = (String, String)>,
        A: IntoIterator<Item = (String, String)>,
    {
        let names: Vec<IndexedName> = candidates
            .into_iter()
            .map(|(id, name)| IndexedName {
                words: name_words(&name, config.min_word_len),
                name: normalize(&name),
                id,
            })
            .collect();

        let by_id: HashMap<&str, usize> = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.as_str(), i))
            .collect();
        let aliases: Vec<IndexedAlias> = aliases
            .into_iter()
            .filter_map(|(alias, target)| {
                let alias = normalize(&alias);
                match by_id.get(target.as_str()) {
                    Some(&index) if !alias.is_empty() => Some(IndexedAlias {
                        alias,
                        target: index,
                    }),
                    _ => {
                        trace!("Skipping alias '{alias}' -> '{target}'");
                        None
                    }
                }
            })
            .collect();

        let mut vocabulary: HashSet<String> =
            GYM_QUALIFIERS.iter().map(|w| w.to_string()).collect();
        for name in &names {
            vocabulary.extend(name_words(&name.name, 1));
        }
        for alias in &aliases {
            vocabulary.extend(name_words(&alias.alias, 1));
        }

        let alias_keys: Vec<&str> = aliases.iter().map(|a| a.alias.as_str()).collect();
        let name_keys: Vec<&str> = names.iter().map(|n| n.name.as_str()).collect();
        let loose_order = if config.longest_name_first {
            order_by_len(&name_keys, true)
        } else {
            (0..names.len()).collect()
        };

        Self {
            aliases_longest_first: order_by_len(&alias_keys, true),
            aliases_shortest_first: order_by_len(&alias_keys, false),
            names_longest_first: order_by_len(&name_keys, true),
            names_shortest_first: order_by_len(&name_keys, false),
            loose_order,
            vocabulary,
            names,
            aliases,
            config,
        }
    }

    /// Treat the words of `terms` as known to the unknown-qualifier guard
    pub fn with_vocabulary<I>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        for term in terms {
            self.vocabulary.extend(name_words(&term, 1));
        }
        self
    }

    /// Resolver over an exercise catalog; muscle groups and categories count
    /// as known words
    pub fn for_exercises(catalog: &ExerciseCatalog, config: ResolverConfig) -> Self {
        Self::new(
            catalog
                .entries()
                .iter()
                .map(|e| (e.id.clone(), e.name.clone())),
            catalog
                .aliases()
                .iter()
                .map(|a| (a.alias.clone(), a.target.clone())),
            config,
        )
        .with_vocabulary(
            catalog
                .entries()
                .iter()
                .flat_map(|e| [e.muscle_group.clone(), e.category.clone()]),
        )
    }

    /// Resolver over a food catalog; food ids are slugs of their keys
    pub fn for_foods(catalog: &FoodCatalog, config: ResolverConfig) -> Self {
        let slug = |key: &str| key.split_whitespace().collect::<Vec<_>>().join("-");
        Self::new(
            catalog.entries().iter().map(|e| (e.id(), e.key.clone())),
            catalog
                .aliases()
                .iter()
                .map(|a| (a.alias.clone(), slug(&a.target))),
            config,
        )
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Walk the ladder; `None` when no stage accepts the query
    pub fn resolve(&self, query: &str) -> Option<ResolvedMatch> {
        let query = normalize(query);
        if query.chars().count() < self.config.min_query_len {
            return None;
        }
        let guarded = self.config.guard_unknown_qualifiers && self.has_unknown_qualifier(&query);
        if guarded {
            trace!("Query '{query}' carries an unknown qualifier");
        }

        let found = self
            .alias_exact(&query)
            .or_else(|| self.alias_containment(&query, guarded))
            .or_else(|| self.id_slug(&query))
            .or_else(|| self.exact_name(&query))
            .or_else(|| self.name_containment(&query))
            .or_else(|| {
                if guarded {
                    None
                } else {
                    self.word_overlap(&query)
                }
            })
            .or_else(|| self.edit_distance(&query));

        match found {
            Some(m) if m.stage.is_loose() => debug!(
                "Guessed '{}' for '{query}' via {}",
                self.names[m.index].id,
                m.stage
            ),
            Some(m) => trace!(
                "Resolved '{query}' to '{}' via {}",
                self.names[m.index].id,
                m.stage
            ),
            None => trace!("No catalog match for '{query}'"),
        }
        found
    }

    /// Id of the candidate at `index`
    pub fn id_at(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(|n| n.id.as_str())
    }

    fn hit(index: usize, stage: MatchStage) -> Option<ResolvedMatch> {
        Some(ResolvedMatch { index, stage })
    }

    fn alias_exact(&self, query: &str) -> Option<ResolvedMatch> {
        self.aliases
            .iter()
            .find(|a| a.alias == query)
            .and_then(|a| Self::hit(a.target, MatchStage::AliasExact))
    }

    fn alias_containment(&self, query: &str, guarded: bool) -> Option<ResolvedMatch> {
        if !guarded {
            if let Some(&i) = self
                .aliases_longest_first
                .iter()
                .find(|&&i| contains_phrase(query, &self.aliases[i].alias))
            {
                return Self::hit(self.aliases[i].target, MatchStage::AliasContainment);
            }
        }
        if query.chars().count() < self.config.min_reverse_containment_len {
            return None;
        }
        self.aliases_shortest_first
            .iter()
            .find(|&&i| self.aliases[i].alias.contains(query))
            .and_then(|&i| Self::hit(self.aliases[i].target, MatchStage::AliasContainment))
    }

    fn id_slug(&self, query: &str) -> Option<ResolvedMatch> {
        let slug = query.replace(' ', "-");
        self.names
            .iter()
            .position(|n| n.id == slug)
            .and_then(|i| Self::hit(i, MatchStage::IdSlug))
    }

    fn exact_name(&self, query: &str) -> Option<ResolvedMatch> {
        self.names
            .iter()
            .position(|n| n.name == query)
            .and_then(|i| Self::hit(i, MatchStage::ExactName))
    }

    /// A full canonical name inside the query always counts, extra words or not
    fn name_containment(&self, query: &str) -> Option<ResolvedMatch> {
        if let Some(&i) = self
            .names_longest_first
            .iter()
            .find(|&&i| contains_phrase(query, &self.names[i].name))
        {
            return Self::hit(i, MatchStage::NameContainment);
        }
        if query.chars().count() < self.config.min_reverse_containment_len {
            return None;
        }
        self.names_shortest_first
            .iter()
            .find(|&&i| self.names[i].name.contains(query))
            .and_then(|&i| Self::hit(i, MatchStage::NameContainment))
    }

    fn word_overlap(&self, query: &str) -> Option<ResolvedMatch> {
        let words = query_words(query, self.config.min_word_len);
        if words.is_empty() {
            return None;
        }
        // most matched words wins; ties keep the earlier candidate
        let mut best: Option<(usize, usize)> = None;
        for &i in &self.loose_order {
            let matched = word_overlap(&words, &self.names[i].words, &self.config);
            if !overlap_accepted(matched, words.len(), &self.config) {
                continue;
            }
            if best.map_or(true, |(_, m)| matched > m) {
                best = Some((i, matched));
            }
        }
        best.and_then(|(i, _)| Self::hit(i, MatchStage::WordOverlap))
    }

    fn edit_distance(&self, query: &str) -> Option<ResolvedMatch> {
        let mut best: Option<(usize, usize)> = None;
        for &i in &self.loose_order {
            let name = &self.names[i].name;
            let distance = levenshtein(query, name);
            if distance as f64 > distance_threshold(name.chars().count(), &self.config) {
                continue;
            }
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((i, distance));
            }
        }
        best.and_then(|(i, _)| Self::hit(i, MatchStage::EditDistance))
    }

    /// A query word of qualifier length that nothing in the catalog explains
    fn has_unknown_qualifier(&self, query: &str) -> bool {
        query
            .split_whitespace()
            .filter(|w| w.chars().count() >= self.config.min_qualifier_len)
            .any(|word| !self.is_known_word(word))
    }

    fn is_known_word(&self, word: &str) -> bool {
        self.vocabulary.contains(word)
            || self.vocabulary.iter().any(|known| {
                is_plural_of(word, known) || is_plural_of(known, word) || levenshtein(word, known) <= 1
            })
    }
}
