//! Text normalization shared by the index and the semantic matcher

use std::collections::BTreeSet;

/// Normalize text to its canonical comparable form: case-folded,
/// punctuation stripped, whitespace collapsed to single spaces.
///
/// # Examples
///
/// ```
/// use dpp_core::ontology::normalize;
///
/// assert_eq!(normalize("  Rated-Torque (Nm) "), "rated torque nm");
/// assert_eq!(normalize("global_ids"), "global ids");
/// ```
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_lowercase().next().unwrap_or(c)
            } else {
                ' '
            }
        })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split text into the set of its normalized tokens.
///
/// The set is ordered so that any iteration over tokens is deterministic.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Token-overlap ratio between two token sets: |shared| / |union|.
///
/// Returns 0.0 when either set is empty.
pub(crate) fn token_overlap(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let shared = a.intersection(b).count();
    let union = a.union(b).count();
    shared as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Torque_Nm"), "torque nm");
        assert_eq!(normalize("  OUTPUT   voltage "), "output voltage");
        assert_eq!(normalize("co2e"), "co2e");
        assert_eq!(normalize("---"), "");
    }

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("Rated torque, rated");
        let expected: Vec<&str> = vec!["rated", "torque"];
        assert_eq!(tokens.iter().map(String::as_str).collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_token_overlap() {
        let a = tokenize("rated torque");
        let b = tokenize("torque");
        assert!((token_overlap(&a, &b) - 0.5).abs() < 1e-9);

        let c = tokenize("rated torque");
        assert!((token_overlap(&a, &c) - 1.0).abs() < 1e-9);

        let empty = tokenize("");
        assert_eq!(token_overlap(&a, &empty), 0.0);
    }
}
