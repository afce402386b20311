//! Approximate string scoring.
//!
//! A query is scored against a name by the fewest single-character edits
//! (insertions, deletions, substitutions) needed to turn the whole query
//! into some substring of the name, divided by the query length. A name
//! longer or shorter than the query adds a penalty below
//! [`CONTAINMENT_PENALTY`], scaled by the length difference. So `0.0` means
//! the name is the query, a query contained in a longer name scores just
//! above zero, and `1.0` means nothing useful lines up. Both sides are
//! lower-cased and have their whitespace collapsed before scoring.

/// Normalize text for matching: lower-case, trim, collapse whitespace runs.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Upper bound on the score added for a length mismatch.
pub const CONTAINMENT_PENALTY: f64 = 0.1;

/// A query prepared for scoring against many names.
#[derive(Debug, Clone)]
pub struct FuzzyQuery {
    chars: Vec<char>,
}

impl FuzzyQuery {
    /// Prepare a query. Returns `None` if nothing is left after
    /// normalization.
    pub fn new(query: &str) -> Option<Self> {
        let chars: Vec<char> = normalize(query).chars().collect();
        if chars.is_empty() {
            return None;
        }
        Some(Self { chars })
    }

    /// Score a name against this query, in [0, 1], lower is better.
    ///
    /// Zero only when the normalized name equals the normalized query.
    pub fn score(&self, name: &str) -> f64 {
        let text: Vec<char> = normalize(name).chars().collect();
        let errors = substring_edit_distance(&self.chars, &text);

        let gap = text.len().abs_diff(self.chars.len());
        let longest = text.len().max(self.chars.len());
        let penalty = CONTAINMENT_PENALTY * gap as f64 / longest as f64;

        (errors as f64 / self.chars.len() as f64 + penalty).min(1.0)
    }
}

/// Fewest edits to turn `pattern` into any substring of `text`.
///
/// Classic edit-distance table where the first row is all zeros, so the
/// match may start anywhere in `text`, and the answer is the minimum of
/// the last row, so it may end anywhere. Never exceeds `pattern.len()`.
fn substring_edit_distance(pattern: &[char], text: &[char]) -> usize {
    let mut prev = vec![0usize; text.len() + 1];
    let mut cur = vec![0usize; text.len() + 1];

    for (i, pc) in pattern.iter().enumerate() {
        cur[0] = i + 1;
        for (j, tc) in text.iter().enumerate() {
            let substitution = prev[j] + usize::from(pc != tc);
            let deletion = prev[j + 1] + 1;
            let insertion = cur[j] + 1;
            cur[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    prev.into_iter().min().unwrap_or(pattern.len())
}
