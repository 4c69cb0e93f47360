// src/filter/decision.rs
//
// Interprets the classifier's free-text verdict as a keep/discard decision.
// The AI is asked for a one-word "yes"/"no" but is not bound to it, so the
// verdict is accepted through a similarity band instead of exact equality.

use tracing::debug;

/// Minimum similarity to "yes" for a verdict to count as affirmative.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.7;

const AFFIRMATIVE: &str = "yes";

/// True when the verdict is close enough to "yes".
///
/// The verdict is trimmed and lower-cased before matching, so "Yes.", "YES"
/// and "yess" all pass the default threshold while "no", "nope" and "maybe"
/// stay below it.
pub fn matches_affirmative(verdict: &str, threshold: f64) -> bool {
    let cleaned = verdict.trim().to_lowercase();
    let similarity = similarity_ratio(&cleaned, AFFIRMATIVE);
    debug!(
        "Fuzzy match: '{}' vs '{}' = {:.2} (threshold: {:.2})",
        cleaned, AFFIRMATIVE, similarity, threshold
    );
    similarity >= threshold
}

/// Sequence similarity of two strings in [0, 1].
///
/// This is the `SequenceMatcher.ratio()` metric over character sequences:
/// `2 * M / T` where `M` is the total size of the longest-matching-block
/// decomposition and `T` the combined length. Downstream consumers tune
/// thresholds against this exact metric, so it must not be swapped for a
/// cheaper edit distance.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matches = matching_chars(&a, &b, 0, a.len(), 0, b.len());
    2.0 * matches as f64 / total as f64
}

/// Total matched characters: longest common block, then recurse on both sides.
fn matching_chars(a: &[char], b: &[char], alo: usize, ahi: usize, blo: usize, bhi: usize) -> usize {
    let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
    if size == 0 {
        return 0;
    }
    size + matching_chars(a, b, alo, i, blo, j) + matching_chars(a, b, i + size, ahi, j + size, bhi)
}

/// Longest matching block in `a[alo..ahi]` x `b[blo..bhi]`; ties resolve to
/// the block starting earliest in `a`, then earliest in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best_i = alo;
    let mut best_j = blo;
    let mut best_size = 0usize;

    // run_lengths[j] = length of the common run ending at a[i-1], b[j]
    let mut run_lengths: Vec<usize> = vec![0; b.len()];
    for i in alo..ahi {
        let mut new_runs: Vec<usize> = vec![0; b.len()];
        for j in blo..bhi {
            if a[i] == b[j] {
                let size = if j > blo { run_lengths[j - 1] } else { 0 } + 1;
                new_runs[j] = size;
                if size > best_size {
                    best_i = i + 1 - size;
                    best_j = j + 1 - size;
                    best_size = size;
                }
            }
        }
        run_lengths = new_runs;
    }
    (best_i, best_j, best_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_reference_values() {
        assert!((similarity_ratio("yes", "yes") - 1.0).abs() < 1e-9);
        assert!((similarity_ratio("yess", "yes") - 6.0 / 7.0).abs() < 1e-9);
        assert!((similarity_ratio("yep", "yes") - 4.0 / 6.0).abs() < 1e-9);
        assert!((similarity_ratio("maybe", "yes") - 4.0 / 8.0).abs() < 1e-9);
        assert!((similarity_ratio("no", "yes") - 0.0).abs() < 1e-9);
        assert!((similarity_ratio("", "yes") - 0.0).abs() < 1e-9);
        assert!((similarity_ratio("", "") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn affirmative_variants_pass() {
        for verdict in ["yes", "Yes", "YES", "yess", "yes.", "yes!", "  yes  "] {
            assert!(
                matches_affirmative(verdict, DEFAULT_FUZZY_THRESHOLD),
                "expected '{}' to be affirmative",
                verdict
            );
        }
    }

    #[test]
    fn negative_variants_fail() {
        for verdict in ["no", "No", "nope", "yep", "yeah", "maybe", ""] {
            assert!(
                !matches_affirmative(verdict, DEFAULT_FUZZY_THRESHOLD),
                "expected '{}' to be negative",
                verdict
            );
        }
    }

    #[test]
    fn long_cooperative_sentences_score_low() {
        // The one-word instruction in the prompt is what keeps verdicts
        // short; a full sentence dilutes the ratio well below the band.
        assert!(!matches_affirmative("yes, this is an smb", DEFAULT_FUZZY_THRESHOLD));
        assert!(!matches_affirmative("yes, it is", DEFAULT_FUZZY_THRESHOLD));
    }

    #[test]
    fn threshold_is_monotonic() {
        let verdicts = ["yes", "yess", "yep", "yeah", "no", "maybe", ""];
        for verdict in verdicts {
            let mut previous = true;
            for threshold in [0.0, 0.25, 0.5, 0.7, 0.9, 1.0] {
                let current = matches_affirmative(verdict, threshold);
                assert!(
                    previous || !current,
                    "'{}' flipped back to affirmative at threshold {}",
                    verdict,
                    threshold
                );
                previous = current;
            }
        }
    }
}
