//! Checks that the frequency and median figures appear in the text.
//!
//! Matching is by substring over a fixed set of spellings per value.

use crate::domain::format_score;

const NUMBER_WORDS: [&str; 11] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
];

pub fn number_word(n: i64) -> Option<&'static str> {
    usize::try_from(n).ok().and_then(|i| NUMBER_WORDS.get(i).copied())
}

/// Accepted spellings of an entry count.
pub fn frequency_variants(frequency: usize) -> Vec<String> {
    let mut out = vec![frequency.to_string()];
    if let Some(word) = i64::try_from(frequency).ok().and_then(number_word) {
        out.push(word.to_string());
    }
    for suffix in ["time", "entr", "occurrence", "instance"] {
        out.push(format!("{frequency} {suffix}"));
    }
    out
}

/// Accepted spellings of a median score.
pub fn median_variants(median_score: f64) -> Vec<String> {
    let exact = format_score(median_score);
    let rounded = median_score.round() as i64;

    let mut out = vec![
        exact.clone(),
        format!("{median_score:.1}"),
        format!("{exact}/10"),
        format!("{exact} out of 10"),
        rounded.to_string(),
        format!("{rounded}/10"),
        format!("{rounded} out of 10"),
    ];
    if let Some(word) = number_word(rounded) {
        out.push(word.to_string());
    }
    out.dedup();
    out
}

fn mentions_any(lower: &str, variants: &[String]) -> bool {
    variants.iter().any(|v| lower.contains(v.as_str()))
}

pub(crate) fn check(text: &str, frequency: usize, median_score: f64, errors: &mut Vec<String>) {
    let lower = text.to_lowercase();

    if !mentions_any(&lower, &frequency_variants(frequency)) {
        errors.push(format!(
            "Summary does not mention the entry count ({frequency})"
        ));
    }
    if !mentions_any(&lower, &median_variants(median_score)) {
        errors.push(format!(
            "Summary does not mention the median pain level ({}/10)",
            format_score(median_score)
        ));
    }
}
