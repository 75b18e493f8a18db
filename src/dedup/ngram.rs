use std::collections::HashMap;

/// N-gram string to occurrence count within one document.
pub type NgramCounts = HashMap<String, usize>;

/// Extract character shingles of every length in `n_min..=n_max`.
///
/// Windows slide over Unicode scalar values, not bytes, so Hangul syllables
/// count as one character each. Windows running past the end of the text are
/// skipped; whitespace runs are collapsed before shingling.
pub fn extract_char_ngrams(text: &str, n_min: usize, n_max: usize) -> NgramCounts {
    let chars: Vec<char> = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .collect();

    let mut ngrams = NgramCounts::new();
    for n in n_min.max(1)..=n_max {
        if n > chars.len() {
            break;
        }
        for window in chars.windows(n) {
            *ngrams.entry(window.iter().collect()).or_insert(0) += 1;
        }
    }
    ngrams
}

/// Total shingle occurrences, the TF denominator.
pub fn total_count(ngrams: &NgramCounts) -> usize {
    ngrams.values().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_windows() {
        let grams = extract_char_ngrams("abcd", 3, 5);
        assert_eq!(grams.len(), 3);
        assert_eq!(grams["abc"], 1);
        assert_eq!(grams["bcd"], 1);
        assert_eq!(grams["abcd"], 1);
        assert!(!grams.contains_key("abcde"));
    }

    #[test]
    fn test_counts_repeats() {
        let grams = extract_char_ngrams("aaaa", 3, 3);
        assert_eq!(grams["aaa"], 2);
        assert_eq!(total_count(&grams), 2);
    }

    #[test]
    fn test_hangul_is_per_character() {
        let grams = extract_char_ngrams("삼성전자", 3, 5);
        assert_eq!(grams["삼성전"], 1);
        assert_eq!(grams["성전자"], 1);
        assert_eq!(grams["삼성전자"], 1);
        assert_eq!(total_count(&grams), 3);
    }

    #[test]
    fn test_short_and_empty_text() {
        assert!(extract_char_ngrams("ab", 3, 5).is_empty());
        assert!(extract_char_ngrams("", 3, 5).is_empty());
        assert!(extract_char_ngrams("   ", 3, 5).is_empty());
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(
            extract_char_ngrams("a  b\tc", 3, 5),
            extract_char_ngrams("a b c", 3, 5)
        );
    }

    #[test]
    fn test_deterministic() {
        let text = "한화오션 lng선 수주 한화오션 lng선 수주";
        assert_eq!(extract_char_ngrams(text, 3, 5), extract_char_ngrams(text, 3, 5));
    }
}
