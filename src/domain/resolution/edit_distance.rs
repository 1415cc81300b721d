// src/domain/resolution/edit_distance.rs
//
// Levenshtein edit distance.
//
// Inputs are compared as Unicode scalar values and must already be
// normalized by the caller; the metric itself folds nothing.

/// Minimum number of single-character insertions, deletions and
/// substitutions needed to turn `a` into `b`.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let cols = b.len() + 1;
    let mut table = vec![0usize; (a.len() + 1) * cols];

    // Row 0 and column 0: cost of building from / to the empty string
    for j in 0..cols {
        table[j] = j;
    }
    for i in 0..=a.len() {
        table[i * cols] = i;
    }

    for i in 1..=a.len() {
        for j in 1..cols {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let above = table[(i - 1) * cols + j] + 1;
            let left = table[i * cols + j - 1] + 1;
            let diag = table[(i - 1) * cols + j - 1] + cost;
            table[i * cols + j] = above.min(left).min(diag);
        }
    }

    table[a.len() * cols + b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "a",
        "ab",
        "abc",
        "pug",
        "bgale",
        "beagle",
        "poodle",
        "kitten",
        "sitting",
        "golden retriever",
        "zzzzzzzzzz",
        "schäferhund",
    ];

    #[test]
    fn test_known_values() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("bgale", "beagle"), 2);
        assert_eq!(levenshtein("zzzzzzzzzz", "pug"), 10);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
    }

    #[test]
    fn test_identity_is_zero() {
        for a in SAMPLES {
            assert_eq!(levenshtein(a, a), 0, "distance({a:?}, {a:?})");
        }
    }

    #[test]
    fn test_symmetry_for_asymmetric_lengths() {
        for a in SAMPLES {
            for b in SAMPLES {
                assert_eq!(
                    levenshtein(a, b),
                    levenshtein(b, a),
                    "distance({a:?}, {b:?}) is not symmetric"
                );
            }
        }
    }

    #[test]
    fn test_length_bounds() {
        for a in SAMPLES {
            for b in SAMPLES {
                let (la, lb) = (a.chars().count(), b.chars().count());
                let d = levenshtein(a, b);
                assert!(d <= la + lb, "distance({a:?}, {b:?}) = {d} above upper bound");
                assert!(d >= la.abs_diff(lb), "distance({a:?}, {b:?}) = {d} below lower bound");
            }
        }
    }

    #[test]
    fn test_single_character_strings() {
        assert_eq!(levenshtein("a", "b"), 1);
        assert_eq!(levenshtein("a", "a"), 0);
        assert_eq!(levenshtein("a", "ba"), 1);
        assert_eq!(levenshtein("ab", "a"), 1);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert_eq!(levenshtein("schäferhund", "schaferhund"), 1);
        assert_eq!(levenshtein("ä", ""), 1);
    }
}
