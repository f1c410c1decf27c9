//! Deterministic sentence normalization.
//!
//! Prepares translated English text for word resolution: lowercase,
//! strip punctuation, expand numbers into digits, drop stop-words.
//! Pure functions, no I/O.

/// Punctuation stripped from every word.
const PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '"', '\'', '`', '(', ')', '[', ']', '{', '}',
];

/// English stop-words removed before resolution. The vocabulary has no
/// signs for these, so dropping them keeps resolution coverage high.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is", "it",
    "its", "of", "on", "that", "the", "to", "was", "were", "will", "with", "i", "me", "my", "mine",
    "you", "your", "yours", "she", "her", "hers", "him", "his", "they", "them", "their", "theirs",
    "we", "us", "our", "ours", "myself", "yourself", "himself", "herself", "itself", "ourselves",
    "yourselves", "themselves", "what", "which", "who", "whom", "this", "these", "those", "am",
    "being", "been", "have", "had", "having", "do", "does", "did", "doing", "but", "if", "or",
    "because", "so", "than", "too", "very", "s", "t", "can", "cannot", "could", "should", "would",
    "may", "might", "must", "not", "no", "nor", "only", "own", "same", "just", "don", "should've",
    "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "couldn", "didn", "doesn", "hadn",
    "hasn", "haven", "isn", "ma", "mightn", "mustn", "needn", "shan", "shouldn", "wasn", "weren",
    "won", "wouldn", "about", "above", "after", "again", "against", "all", "any", "below",
    "between", "both", "down", "during", "each", "few", "further", "into", "more", "most", "once",
    "other", "out", "over", "some", "such", "then", "there", "through", "under", "until", "up",
    "while",
];

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Clean a raw English sentence into resolvable tokens.
///
/// Lowercases, strips the fixed punctuation set from each word, expands
/// pure-digit tokens into space-separated digits (`"42"` becomes `"4 2"`),
/// drops stop-words and empties, and rejoins with single spaces.
pub fn clean_sentence(raw: &str) -> String {
    let mut out: Vec<String> = Vec::new();

    for word in raw.to_lowercase().split_whitespace() {
        let word: String = word.chars().filter(|c| !PUNCTUATION.contains(c)).collect();
        if word.is_empty() || is_stop_word(&word) {
            continue;
        }

        if word.chars().all(|c| c.is_ascii_digit()) {
            // Individual digit signs exist in the vocabulary; whole numbers do not.
            for digit in word.chars() {
                out.push(digit.to_string());
            }
        } else {
            out.push(word);
        }
    }

    out.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        assert_eq!(clean_sentence("Hello, World!"), "hello world");
    }

    #[test]
    fn test_removes_stop_words() {
        assert_eq!(clean_sentence("the cat is on a mat"), "cat mat");
    }

    #[test]
    fn test_single_digit_passes_through() {
        assert_eq!(clean_sentence("5"), "5");
    }

    #[test]
    fn test_multi_digit_expands() {
        assert_eq!(clean_sentence("42"), "4 2");
        assert_eq!(clean_sentence("room 404"), "room 4 0 4");
    }

    #[test]
    fn test_mixed_alphanumeric_not_expanded() {
        assert_eq!(clean_sentence("b2b"), "b2b");
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert_eq!(clean_sentence(""), "");
        assert_eq!(clean_sentence("   "), "");
    }

    #[test]
    fn test_punctuation_only_words_dropped() {
        assert_eq!(clean_sentence("good !! morning ..."), "good morning");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(clean_sentence("good   \t morning"), "good morning");
    }
}
