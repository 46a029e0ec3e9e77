//! Phrases that read as clinical judgment or advice (warnings only).

pub const MEDICAL_ADVICE_PHRASES: &[&str] = &[
    "should see a doctor",
    "see a doctor",
    "consult a doctor",
    "consult a physician",
    "consult your doctor",
    "seek medical attention",
    "seek medical advice",
    "diagnosis",
    "diagnose",
    "prescribe",
    "prescription",
    "medication",
    "treatment",
    "this indicates",
    "you may have",
    "you might have",
    "could be a sign of",
    "may be a sign of",
    "symptom of",
    "you should take",
];

/// Catalogue phrases present in `text`, case-insensitive, in catalogue order.
pub fn advice_phrases(text: &str) -> Vec<&'static str> {
    let lower = text.to_lowercase();
    MEDICAL_ADVICE_PHRASES
        .iter()
        .copied()
        .filter(|phrase| lower.contains(phrase))
        .collect()
}

pub(crate) fn check(text: &str, warnings: &mut Vec<String>) {
    for phrase in advice_phrases(text) {
        warnings.push(format!("Summary may contain medical advice: \"{phrase}\""));
    }
}
