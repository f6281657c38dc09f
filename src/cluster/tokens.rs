// src/cluster/tokens.rs
//! Title tokenization shared by TF-IDF, dominance checks and naming.

use regex::Regex;
use std::sync::LazyLock;

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{Nd}]+").unwrap_or_else(|_| panic!("Invalid Regex")));

/// Function words dropped before vectorizing.
const STOP_WORDS: &[&str] = &[
    "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
];

/// Words that appear in many titles without naming a service.
const GENERIC_WORDS: &[&str] = &[
    "com", "net", "org", "www", "http", "https", "login", "account", "user", "password", "sign",
    "auth",
];

/// Chinese particles and function words long enough in UTF-8 to pass the length rule.
const CJK_STOP_WORDS: &[&str] = &[
    "是", "的", "了", "在", "我", "有", "和", "就", "不", "人", "都", "一", "一个",
];

/// Minimum length of a keyword, in UTF-8 bytes.
///
/// Measured in bytes so a two-character CJK word (6 bytes) qualifies while
/// two-letter Latin words do not.
pub const MIN_KEYWORD_LEN: usize = 3;

/// Splits `text` into lowercase letter/digit runs, dropping single characters and stop words.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD_RE
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|word| word.chars().count() > 1 && !STOP_WORDS.contains(word))
        .map(str::to_string)
        .collect()
}

/// Returns the significant tokens of a title, in order of appearance.
#[must_use]
pub fn keywords(title: &str) -> Vec<String> {
    tokenize(title)
        .into_iter()
        .filter(|word| {
            word.len() >= MIN_KEYWORD_LEN
                && !GENERIC_WORDS.contains(&word.as_str())
                && !CJK_STOP_WORDS.contains(&word.as_str())
        })
        .collect()
}

/// Like [`keywords`] with repeats removed, keeping first occurrences.
#[must_use]
pub fn unique_keywords(title: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for word in keywords(title) {
        if !seen.contains(&word) {
            seen.push(word);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_splits_and_filters() {
        assert_eq!(
            tokenize("The GitHub-Enterprise (EU) / x"),
            vec!["github", "enterprise", "eu"]
        );
    }

    #[test]
    fn test_tokenize_keeps_non_latin_runs() {
        assert_eq!(tokenize("腾讯云 控制台"), vec!["腾讯云", "控制台"]);
    }

    #[test]
    fn test_two_character_cjk_words_are_keywords() {
        assert_eq!(keywords("淘宝 买家"), vec!["淘宝", "买家"]);
        assert_eq!(keywords("一个 的 百度 is"), vec!["百度"]);
    }

    #[test]
    fn test_keywords_drop_generic_words() {
        assert_eq!(keywords("Google Account Login"), vec!["google"]);
        assert_eq!(unique_keywords("AWS aws Console"), vec!["aws", "console"]);
    }
}
