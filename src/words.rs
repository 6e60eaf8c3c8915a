use std::collections::BTreeSet;

/// The distinct tokens of one document, kept in sorted order so that
/// anything summed over them comes out the same every time.
pub type WordSet = BTreeSet<String>;

/// Splits `content` on whitespace and collapses repeated tokens.
///
/// Tokens are compared exactly: no case folding, stemming or punctuation
/// stripping.
pub fn unique_words(content: &str) -> WordSet {
    content.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_duplicates() {
        let words = unique_words("a a a b");
        assert_eq!(words, unique_words("a b"));
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn splits_on_any_whitespace() {
        let words = unique_words("  one\ttwo\n\nthree  one ");
        let expected: Vec<_> = words.iter().map(String::as_str).collect();
        assert_eq!(expected, vec!["one", "three", "two"]);
    }

    #[test]
    fn empty_input_is_empty_set() {
        assert!(unique_words("").is_empty());
        assert!(unique_words(" \t\n").is_empty());
    }

    #[test]
    fn keeps_case_and_punctuation() {
        let words = unique_words("Buy buy buy!");
        assert_eq!(words.len(), 3);
        assert!(words.contains("Buy"));
        assert!(words.contains("buy!"));
    }
}
