//! Body-region catalogue and the hallucinated-region check.

use std::sync::LazyLock;

use regex::Regex;

/// Common body-region names, lowercase.
pub const REGION_CATALOGUE: &[&str] = &[
    "head", "forehead", "jaw", "neck", "shoulder", "shoulders", "upper back", "lower back", "back", "spine",
    "chest", "rib", "ribs", "abdomen", "stomach", "pelvis", "groin", "hip", "hips", "arm", "arms", "elbow",
    "elbows", "wrist", "wrists", "hand", "hands", "finger", "fingers", "thigh", "thighs", "leg", "legs", "knee",
    "knees", "calf", "calves", "ankle", "ankles", "foot", "feet", "toe", "toes",
];

static REGION_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    REGION_CATALOGUE
        .iter()
        .filter_map(|name| {
            let pattern = format!(r"\b{}\b", regex::escape(name));
            Regex::new(&pattern).ok().map(|re| (*name, re))
        })
        .collect()
});

/// Catalogued regions named in `text` that are not compatible with `expected`.
///
/// Compatible means equal, or one name contains the other ("back" and
/// "lower back"). A foreign hit nested inside a longer foreign hit is reported
/// once, under the longer name.
pub fn foreign_regions(text: &str, expected: &str) -> Vec<&'static str> {
    let lower = text.to_lowercase();
    let expected = expected.trim().to_lowercase();

    let foreign: Vec<&'static str> = REGION_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(&lower))
        .map(|(name, _)| *name)
        .filter(|name| !is_compatible(name, &expected))
        .collect();

    foreign
        .iter()
        .copied()
        .filter(|name| !foreign.iter().any(|other| other != name && other.contains(name)))
        .collect()
}

fn is_compatible(found: &str, expected: &str) -> bool {
    !expected.is_empty() && (expected.contains(found) || found.contains(expected))
}

pub(crate) fn check(text: &str, expected: &str, errors: &mut Vec<String>) {
    for name in foreign_regions(text, expected) {
        errors.push(format!(
            "Summary mentions body region \"{name}\", but the data is for \"{expected}\""
        ));
    }
}
