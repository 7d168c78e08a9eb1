//! Approximate name search over the catalog.
//!
//! Scoring follows a bitap-style model: a query is matched against every
//! substring of a name, allowing edits. The score of a match is
//! `errors / query_len + start / LOCATION_DISTANCE`, so 0.0 is a perfect
//! match at the start of the name and larger values are worse.

use serde::{Deserialize, Serialize};

use super::entry::{Catalog, CatalogEntry};

/// Scores above this value are discarded.
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// How far into a name a match may drift before the position penalty
/// alone reaches 1.0.
const LOCATION_DISTANCE: f64 = 100.0;

/// Longest query prefix that is scored; the rest is ignored.
pub const MAX_PATTERN_LEN: usize = 32;

/// Search tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Maximum accepted score, in `[0.0, 1.0]`.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Result cap; 0 means unlimited.
    #[serde(default)]
    pub max_results: usize,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            max_results: 0,
        }
    }
}

/// Score `name` against `query`; lower is better.
///
/// Returns `None` for a blank query. Comparison is case-insensitive and
/// only the first [`MAX_PATTERN_LEN`] characters of the query count.
pub fn score_name(query: &str, name: &str) -> Option<f64> {
    let pattern: Vec<char> = query
        .trim()
        .to_lowercase()
        .chars()
        .take(MAX_PATTERN_LEN)
        .collect();
    if pattern.is_empty() {
        return None;
    }
    let text: Vec<char> = name.to_lowercase().chars().collect();
    let m = pattern.len() as f64;

    // Inserting every pattern char scores 1.0, which any match can only beat.
    let mut best = 1.0_f64;

    for start in 0..text.len() {
        let location_penalty = start as f64 / LOCATION_DISTANCE;
        if location_penalty >= best {
            break;
        }
        let errors = best_prefix_distance(&pattern, &text[start..]);
        let score = errors as f64 / m + location_penalty;
        if score < best {
            best = score;
        }
    }

    Some(best)
}

/// Smallest edit distance between `pattern` and any prefix of `text`.
fn best_prefix_distance(pattern: &[char], text: &[char]) -> usize {
    // prev[j] = distance between pattern[..i] and text[..j]
    let mut prev: Vec<usize> = (0..=text.len()).collect();
    let mut curr = vec![0; text.len() + 1];

    for (i, &pc) in pattern.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &tc) in text.iter().enumerate() {
            let substitution = prev[j] + usize::from(pc != tc);
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;
            curr[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev.iter().copied().min().unwrap_or(pattern.len())
}

impl Catalog {
    /// Entries whose names approximately match `query`, best first.
    ///
    /// A blank query yields nothing rather than the whole catalog. Equal
    /// scores keep catalog order.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Vec<&CatalogEntry> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(f64, &CatalogEntry)> = self
            .entries()
            .filter_map(|entry| {
                let score = score_name(query, &entry.name)?;
                (score <= options.threshold).then_some((score, entry))
            })
            .collect();

        // sort_by is stable, so ties stay in catalog order
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));

        let limit = if options.max_results == 0 {
            scored.len()
        } else {
            options.max_results
        };

        tracing::trace!(query, matches = scored.len(), "catalog search");
        scored.into_iter().take(limit).map(|(_, e)| e).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<'a>(entries: &[&'a CatalogEntry]) -> Vec<&'a str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_exact_match_scores_zero() {
        assert_eq!(score_name("Kick", "Kick"), Some(0.0));
        assert_eq!(score_name("kick", "KICK"), Some(0.0));
    }

    #[test]
    fn test_long_query_scores_only_its_prefix() {
        let long = "kick".repeat(500);
        let prefix = "kick".repeat(MAX_PATTERN_LEN / 4);
        assert_eq!(score_name(&long, "Kick"), score_name(&prefix, "Kick"));

        let catalog = Catalog::builtin();
        let padded = format!("Bladed_Dive{}", "x".repeat(2000));
        assert_eq!(
            catalog.search(&padded, &SearchOptions::default()),
            catalog.search(&padded[..MAX_PATTERN_LEN], &SearchOptions::default())
        );
    }

    #[test]
    fn test_blank_query_has_no_score() {
        assert_eq!(score_name("", "Kick"), None);
        assert_eq!(score_name("   ", "Kick"), None);
    }

    #[test]
    fn test_location_penalty() {
        let early = score_name("shot", "Snap_Shot").unwrap();
        let late = score_name("shot", "Greater_Dazing_Shot").unwrap();
        assert!(early < late);
        assert!((early - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_typo_tolerance() {
        // one substitution over five characters
        let score = score_name("slyce", "Slice").unwrap();
        assert!((score - 0.2).abs() < 1e-9);
        assert!(score_name("zzzzz", "Slice").unwrap() > DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let catalog = Catalog::builtin();
        assert!(catalog.search("", &SearchOptions::default()).is_empty());
        assert!(catalog.search("  ", &SearchOptions::default()).is_empty());
    }

    #[test]
    fn test_search_ranks_exact_first() {
        let catalog = Catalog::builtin();
        let results = catalog.search("Kick", &SearchOptions::default());
        assert_eq!(results.first().map(|e| e.name.as_str()), Some("Kick"));
    }

    #[test]
    fn test_search_excludes_distant_names() {
        let catalog = Catalog::builtin();
        let results = catalog.search("Kick", &SearchOptions::default());
        assert!(!names(&results).contains(&"Zaros_Godsword"));
        for entry in &results {
            assert!(score_name("Kick", &entry.name).unwrap() <= DEFAULT_THRESHOLD);
        }
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = Catalog::from_toml_str(
            r#"
            [[sections]]
            name = "A"
            abilities = ["Barge", "Bargain"]
            [[sections]]
            name = "B"
            abilities = ["Barges"]
            "#,
        )
        .unwrap();
        let results = catalog.search("barg", &SearchOptions::default());
        assert_eq!(names(&results), vec!["Barge", "Bargain", "Barges"]);
    }

    #[test]
    fn test_max_results_caps_output() {
        let catalog = Catalog::builtin();
        let options = SearchOptions {
            threshold: DEFAULT_THRESHOLD,
            max_results: 2,
        };
        assert_eq!(catalog.search("shot", &options).len(), 2);
    }

    #[test]
    fn test_zero_threshold_requires_exact_prefix_match() {
        let catalog = Catalog::builtin();
        let options = SearchOptions {
            threshold: 0.0,
            max_results: 0,
        };
        let results = catalog.search("Slice", &options);
        assert_eq!(names(&results), vec!["Slice"]);
    }
}
