//! Descriptor/figure consistency (warnings only).
//!
//! Frequency bands: `<= 2` low, `>= 7` high. Severity bands: median `<= 3`
//! mild, `>= 7` severe. Middle bands are not checked.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::format_score;

macro_rules! descriptor_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

descriptor_pattern!(
    RE_HIGH_FREQUENCY,
    r"(?i)\b(frequent|frequently|often|many|numerous|considerable|considerably)\b"
);
descriptor_pattern!(
    RE_LOW_FREQUENCY,
    r"(?i)\b(rare|rarely|infrequent|infrequently|occasional|occasionally|few|minimal)\b"
);
descriptor_pattern!(
    RE_SEVERE,
    r"(?i)\b(severe|severely|intense|extreme|extremely|major|substantial)\b"
);
descriptor_pattern!(RE_MILD, r"(?i)\b(mild|mildly|slight|slightly|minor)\b");

fn first_match(re: &LazyLock<Option<Regex>>, text: &str) -> Option<String> {
    re.as_ref()
        .and_then(|re| re.find(text))
        .map(|m| m.as_str().to_lowercase())
}

pub(crate) fn check(text: &str, frequency: usize, median_score: f64, warnings: &mut Vec<String>) {
    if frequency <= 2 {
        if let Some(word) = first_match(&RE_HIGH_FREQUENCY, text) {
            warnings.push(format!(
                "Entry count is low ({frequency}) but the summary says \"{word}\""
            ));
        }
    } else if frequency >= 7 {
        if let Some(word) = first_match(&RE_LOW_FREQUENCY, text) {
            warnings.push(format!(
                "Entry count is high ({frequency}) but the summary says \"{word}\""
            ));
        }
    }

    if median_score <= 3.0 {
        if let Some(word) = first_match(&RE_SEVERE, text) {
            warnings.push(format!(
                "Median pain level is mild ({}/10) but the summary says \"{word}\"",
                format_score(median_score)
            ));
        }
    } else if median_score >= 7.0 {
        if let Some(word) = first_match(&RE_MILD, text) {
            warnings.push(format!(
                "Median pain level is severe ({}/10) but the summary says \"{word}\"",
                format_score(median_score)
            ));
        }
    }
}
