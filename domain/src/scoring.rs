//! Pure scoring services: text normalization, subsequence alignment and
//! per-word grading. No I/O lives here; the grading use case feeds these
//! from the repository and hands the result back to the caller.

use crate::{WordMark, WordResult};

/// Informal forms expanded before tokenization so "don't" and "do not"
/// compare equal. Keys are lowercase; lookup happens after case folding.
const CONTRACTIONS: &[(&str, &str)] = &[
    ("ain't", "am not"),
    ("aren't", "are not"),
    ("can't", "cannot"),
    ("couldn't", "could not"),
    ("didn't", "did not"),
    ("doesn't", "does not"),
    ("don't", "do not"),
    ("hadn't", "had not"),
    ("hasn't", "has not"),
    ("haven't", "have not"),
    ("he's", "he is"),
    ("i'd", "i would"),
    ("i'll", "i will"),
    ("i'm", "i am"),
    ("i've", "i have"),
    ("isn't", "is not"),
    ("it's", "it is"),
    ("let's", "let us"),
    ("mustn't", "must not"),
    ("needn't", "need not"),
    ("shan't", "shall not"),
    ("she's", "she is"),
    ("shouldn't", "should not"),
    ("that's", "that is"),
    ("there's", "there is"),
    ("they'll", "they will"),
    ("they're", "they are"),
    ("they've", "they have"),
    ("wasn't", "was not"),
    ("we'll", "we will"),
    ("we're", "we are"),
    ("we've", "we have"),
    ("weren't", "were not"),
    ("what's", "what is"),
    ("who's", "who is"),
    ("won't", "will not"),
    ("wouldn't", "would not"),
    ("you'd", "you would"),
    ("you'll", "you will"),
    ("you're", "you are"),
    ("you've", "you have"),
];

/// Canonical word-token sequence for one transcript: contractions expanded,
/// everything but letters/digits stripped, case folded, split on whitespace.
pub fn normalize(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    for raw in text.to_lowercase().split_whitespace() {
        match expand_contraction(raw) {
            Some(expansion) => {
                words.extend(expansion.split_whitespace().map(str::to_string));
            }
            None => {
                let cleaned: String = raw.chars().filter(|c| c.is_alphanumeric()).collect();
                if !cleaned.is_empty() {
                    words.push(cleaned);
                }
            }
        }
    }
    words
}

fn expand_contraction(token: &str) -> Option<&'static str> {
    // Curly apostrophes come in from mobile keyboards.
    let key = token
        .replace('\u{2019}', "'")
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_string();
    CONTRACTIONS
        .iter()
        .find(|(from, _)| *from == key)
        .map(|(_, to)| *to)
}

/// Longest common subsequence of the typed and reference token sequences,
/// reconstructed in reference order. O(n·m) time and space.
pub fn longest_common_subsequence(typed: &[String], reference: &[String]) -> Vec<String> {
    let n = typed.len();
    let m = reference.len();
    if n == 0 || m == 0 {
        return Vec::new();
    }

    let mut lengths = vec![vec![0u32; m + 1]; n + 1];
    for i in 1..=n {
        for j in 1..=m {
            lengths[i][j] = if typed[i - 1] == reference[j - 1] {
                lengths[i - 1][j - 1] + 1
            } else {
                lengths[i - 1][j].max(lengths[i][j - 1])
            };
        }
    }

    let mut matched = Vec::with_capacity(lengths[n][m] as usize);
    let (mut i, mut j) = (n, m);
    while i > 0 && j > 0 {
        if typed[i - 1] == reference[j - 1] {
            matched.push(reference[j - 1].clone());
            i -= 1;
            j -= 1;
        } else if lengths[i - 1][j] >= lengths[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    matched.reverse();
    matched
}

/// Per-word classification plus aggregate metrics for one graded attempt.
#[derive(Debug, Clone)]
pub struct AttemptScore {
    pub words: Vec<WordResult>,
    pub matched_count: usize,
    pub correctness_rate: f64,
    pub redundancy: u32,
    pub redundancy_rate: f64,
    pub score: u32,
}

/// Classifies every reference word against the LCS output and derives the
/// aggregate metrics.
///
/// Both rates are rounded to two decimals independently before the
/// subtraction that forms `score`; reordering those steps changes scores at
/// metric boundaries and breaks reproducibility of recorded results.
pub fn score_attempt(reference: &[String], typed: &[String], matched: &[String]) -> AttemptScore {
    let mut cursor = 0usize;
    let mut words = Vec::with_capacity(reference.len());
    for (index, word) in reference.iter().enumerate() {
        let mark = if cursor < matched.len() && matched[cursor] == *word {
            cursor += 1;
            WordMark::Correct
        } else {
            WordMark::MissingOrWrong
        };
        words.push(WordResult {
            word: word.clone(),
            order: index as u32 + 1,
            mark,
        });
    }

    let matched_count = cursor;
    let correctness_rate = if reference.is_empty() {
        0.0
    } else {
        round2(matched_count as f64 / reference.len() as f64 * 100.0)
    };
    let redundancy = typed.len().saturating_sub(reference.len()) as u32;
    // An empty attempt has no words to be redundant about; rate is 0 rather
    // than a division by zero.
    let redundancy_rate = if typed.is_empty() {
        0.0
    } else {
        round2(f64::from(redundancy) / typed.len() as f64 * 100.0)
    };
    let score = (correctness_rate - redundancy_rate).floor().max(0.0) as u32;

    AttemptScore {
        words,
        matched_count,
        correctness_rate,
        redundancy,
        redundancy_rate,
        score,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        normalize(text)
    }

    fn grade(reference: &str, typed: &str) -> AttemptScore {
        let reference = tokens(reference);
        let typed = tokens(typed);
        let matched = longest_common_subsequence(&typed, &reference);
        score_attempt(&reference, &typed, &matched)
    }

    #[test]
    fn normalize_strips_punctuation_and_folds_case() {
        assert_eq!(
            tokens("Hello, World! 42."),
            vec!["hello".to_string(), "world".to_string(), "42".to_string()]
        );
    }

    #[test]
    fn normalize_expands_contractions_case_insensitively() {
        assert_eq!(tokens("Don't"), vec!["do".to_string(), "not".to_string()]);
        assert_eq!(tokens("don't stop"), tokens("do not stop"));
        assert_eq!(tokens("It\u{2019}s fine"), tokens("it is fine"));
    }

    #[test]
    fn normalize_drops_empty_tokens() {
        assert_eq!(tokens("  ...   ---  "), Vec::<String>::new());
    }

    #[test]
    fn lcs_is_a_subsequence_of_both_inputs_in_reference_order() {
        let typed = tokens("the quick red fox jumps high");
        let reference = tokens("a quick brown fox jumps over");
        let matched = longest_common_subsequence(&typed, &reference);
        assert_eq!(matched, vec!["quick", "fox", "jumps"]);

        let mut last = 0usize;
        for word in &matched {
            let at = reference[last..].iter().position(|r| r == word).unwrap();
            last += at + 1;
        }
    }

    #[test]
    fn identical_texts_score_one_hundred() {
        let result = grade("I do not like it", "I do not like it");
        assert_eq!(result.correctness_rate, 100.00);
        assert_eq!(result.redundancy, 0);
        assert_eq!(result.redundancy_rate, 0.00);
        assert_eq!(result.score, 100);
        assert!(result.words.iter().all(|w| w.mark == WordMark::Correct));
    }

    #[test]
    fn fully_disjoint_attempt_scores_zero() {
        let result = grade("alpha beta gamma", "one two three");
        assert_eq!(result.correctness_rate, 0.00);
        assert_eq!(result.score, 0);
        assert!(result
            .words
            .iter()
            .all(|w| w.mark == WordMark::MissingOrWrong));
    }

    #[test]
    fn one_missing_word_scores_eighty() {
        let result = grade("I do not like it", "I do not like");
        assert_eq!(result.matched_count, 4);
        assert_eq!(result.correctness_rate, 80.00);
        assert_eq!(result.redundancy, 0);
        assert_eq!(result.redundancy_rate, 0.00);
        assert_eq!(result.score, 80);
        assert_eq!(result.words[4].mark, WordMark::MissingOrWrong);
    }

    #[test]
    fn one_extra_word_costs_rounded_redundancy() {
        let result = grade("I do not like it", "I do not like it whatsoever");
        assert_eq!(result.correctness_rate, 100.00);
        assert_eq!(result.redundancy, 1);
        assert_eq!(result.redundancy_rate, 16.67);
        assert_eq!(result.score, 83);
    }

    #[test]
    fn contraction_in_attempt_matches_expanded_reference() {
        let result = grade("I do not like it", "I don't like it");
        assert_eq!(result.matched_count, 5);
        assert_eq!(result.correctness_rate, 100.00);
        assert_eq!(result.score, 100);
    }

    #[test]
    fn empty_attempt_grades_to_zero_without_dividing_by_zero() {
        let result = grade("I do not like it", "");
        assert_eq!(result.correctness_rate, 0.00);
        assert_eq!(result.redundancy, 0);
        assert_eq!(result.redundancy_rate, 0.00);
        assert_eq!(result.score, 0);
        assert_eq!(result.words.len(), 5);
    }

    #[test]
    fn word_order_is_one_based_reference_order() {
        let result = grade("one two three", "two");
        let orders: Vec<u32> = result.words.iter().map(|w| w.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        assert_eq!(result.words[1].mark, WordMark::Correct);
    }
}
