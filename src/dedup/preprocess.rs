//! Text canonicalization applied before any similarity comparison.

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::news::NewsItem;

/// Marker some collectors prepend to titles of foreign-language articles.
pub const GLOBAL_MARKER: char = '🌐';

lazy_static! {
    // Bracketed editorial tags, Korean wire conventions and their English
    // equivalents. Matched against lowercased text.
    static ref EDITORIAL_TAGS: Regex = Regex::new(
        r"(?x)
        \[\s*(?:속보|단독|긴급|특징주|포토|영상|종합|breaking|exclusive|urgent|photo|video|update)\s*\]
        | \(\s*(?:영상|포토|종합|종합\d*보|\d+보|combined|video|photo|update\s*\d*|\d+(?:st|nd|rd|th)\s+lead)\s*\)
        "
    )
    .expect("editorial tag pattern");

    // "3 조 원", "3조 원" -> "3조원"
    static ref KRW_AMOUNT: Regex =
        Regex::new(r"(\d+)\s*(조|억|만)\s*원").expect("amount pattern");

    // "3 조" -> "3조"; the currency is not implied ("3만 명" is a headcount)
    static ref NUMBER_UNIT: Regex =
        Regex::new(r"(\d+)\s+(조|억|만)").expect("number unit pattern");

    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("whitespace pattern");
}

/// Normalize a title or description into its canonical comparable form.
///
/// The result is lowercase, stripped of editorial tags and the global marker,
/// with typographic quotes and ellipses in ASCII, Korean amounts in a single
/// `<number><unit>` token (`<number><unit>원` for won) and whitespace
/// collapsed. `preprocess_text` is idempotent.
pub fn preprocess_text(text: &str) -> String {
    let mut current = normalize_pass(text);
    // Removing a tag can expose a new one ("[속[속보]보]"); repeat until stable.
    loop {
        let next = normalize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_pass(text: &str) -> String {
    let lowered: String = text.nfc().collect::<String>().to_lowercase();
    let collapsed = WHITESPACE.replace_all(&lowered, " ");

    let untagged = EDITORIAL_TAGS.replace_all(&collapsed, " ");
    let unmarked = untagged.replace(GLOBAL_MARKER, " ");
    let amounts = KRW_AMOUNT.replace_all(&unmarked, "${1}${2}원");
    let amounts = NUMBER_UNIT.replace_all(&amounts, "${1}${2}");

    let ascii = amounts
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace(['\u{201C}', '\u{201D}'], "\"")
        .replace('\u{2026}', "...");

    WHITESPACE.replace_all(&ascii, " ").trim().to_string()
}

/// Build the text used for similarity scoring: title twice, then description.
///
/// Titles are shorter and less noisy than descriptions, so they are weighted
/// double. Always returns a string, possibly only whitespace.
pub fn comparison_text(item: &NewsItem) -> String {
    let title = preprocess_text(&item.title);
    let description = preprocess_text(&item.description);
    format!("{} {} {}", title, title, description)
}
