//! Rule-based validation of generated summaries.
//!
//! Five independent checks run on every candidate; none short-circuits another:
//!
//! 1. foreign body region (error)
//! 2. entry count and median present (error)
//! 3. descriptor/figure consistency (warning)
//! 4. medical-advice phrasing (warning)
//! 5. length: too short (error), too long (warning)

pub mod consistency;
pub mod medical;
pub mod numeric;
pub mod regions;

use crate::domain::ValidationVerdict;

/// Shorter than this (in characters) is rejected.
pub const MIN_LENGTH: usize = 20;
/// Longer than this (in characters) is flagged.
pub const MAX_LENGTH: usize = 1000;

/// Validate a candidate summary against the statistics it should describe.
pub fn validate(text: &str, region: &str, frequency: usize, median_score: f64) -> ValidationVerdict {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    regions::check(text, region, &mut errors);
    numeric::check(text, frequency, median_score, &mut errors);
    consistency::check(text, frequency, median_score, &mut warnings);
    medical::check(text, &mut warnings);
    check_length(text, &mut errors, &mut warnings);

    ValidationVerdict { errors, warnings }
}

fn check_length(text: &str, errors: &mut Vec<String>, warnings: &mut Vec<String>) {
    let len = text.chars().count();
    if len < MIN_LENGTH {
        errors.push(format!("Summary is too short to be meaningful ({len} characters)"));
    } else if len > MAX_LENGTH {
        warnings.push(format!("Summary is possibly too verbose ({len} characters)"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn good_summary_is_valid() {
        let text = "During last week, you logged 7 pain entries for your lower back, with a median pain level of 7/10.";
        let verdict = validate(text, "Lower Back", 7, 7.0);
        assert!(verdict.is_valid(), "{verdict:?}");
        assert!(verdict.warnings.is_empty());
    }

    #[test]
    fn foreign_region_is_an_error_naming_it() {
        let text = "You logged 3 entries for your back, with a median of 4/10.";
        let verdict = validate(text, "Neck", 3, 4.0);
        assert!(!verdict.is_valid());
        assert_eq!(verdict.errors.len(), 1);
        assert!(verdict.errors[0].contains("\"back\""));
    }

    #[test]
    fn number_words_are_accepted() {
        let text = "You logged three entries for your neck, with a median level of four out of ten.";
        assert!(validate(text, "Neck", 3, 4.0).is_valid());
    }

    #[test]
    fn checks_do_not_short_circuit() {
        // Missing figures, inconsistency, advice and short length all at once.
        let text = "Rare. See a doctor.";
        let verdict = validate(text, "Neck", 8, 5.0);
        assert_eq!(verdict.errors.len(), 3, "{:?}", verdict.errors);
        assert!(verdict.errors.iter().any(|e| e.contains("entry count")));
        assert!(verdict.errors.iter().any(|e| e.contains("median")));
        assert!(verdict.errors.iter().any(|e| e.contains("too short")));
        assert_eq!(verdict.warnings.len(), 2, "{:?}", verdict.warnings);
    }

    #[test]
    fn warnings_survive_on_invalid_verdict() {
        let text = "Your knee was frequently sore; this indicates strain.";
        let verdict = validate(text, "Neck", 1, 2.0);
        assert!(!verdict.is_valid());
        assert!(verdict.warnings.iter().any(|w| w.contains("\"frequently\"")));
        assert!(verdict.warnings.iter().any(|w| w.contains("this indicates")));
    }

    #[test]
    fn warnings_do_not_block() {
        let text = "Pain was rare: 8 entries for your hip, median 5/10, no diagnosis implied.";
        let verdict = validate(text, "Hip", 8, 5.0);
        assert!(verdict.is_valid());
        assert_eq!(verdict.warnings.len(), 2);
    }

    #[test]
    fn long_text_is_a_warning_not_an_error() {
        let text = format!("You logged 5 entries for your hip, median 5/10. {}", "Logged. ".repeat(150));
        let verdict = validate(&text, "Hip", 5, 5.0);
        assert!(verdict.is_valid());
        assert!(verdict.warnings.iter().any(|w| w.contains("too verbose")));
    }

    #[test]
    fn length_counts_surrounding_whitespace() {
        let short = "a".repeat(MIN_LENGTH - 1);
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        check_length(&short, &mut errors, &mut warnings);
        assert_eq!(errors.len(), 1);

        errors.clear();
        check_length(&format!("{short}  "), &mut errors, &mut warnings);
        assert!(errors.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn zero_frequency_note_passes() {
        let text = "No data has been logged yet for your knee during last week, so there are 0 entries so far.";
        assert!(validate(text, "Knee", 0, 0.0).is_valid());
    }
}
