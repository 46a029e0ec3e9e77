//! Prompt construction for the text generator.
//!
//! Prompts are pure functions of their inputs: the same statistics, tone and
//! audience always render to the same bytes. Retries reuse the prompt as-is.

pub mod templates;

use crate::domain::{Audience, DateRange, SummaryRequest, Tone, format_score};

pub use templates::{Requirements, requirements_for};

/// Tone- and audience-invariant safety rules.
pub const SAFETY_CLAUSE: &str = "\
Safety rules (always apply):
- Do not diagnose, name conditions, or guess at causes of the pain.
- Do not suggest treatments, medications, exercises, or remedies.
- Do not predict how the pain will change (no prognosis).
- Do not tell the reader what to do; avoid directive language such as \"you should\" or \"make sure to\".
- Describe only the logged data.
";

/// Build the instruction text sent to the generator.
pub fn build_prompt(
    period: &str,
    region: &str,
    frequency: usize,
    median_score: f64,
    tone: Tone,
    audience: Audience,
    date_range: Option<&DateRange>,
) -> String {
    let requirements = requirements_for(tone, audience);
    if frequency == 0 {
        no_data_prompt(period, region, tone, audience, requirements)
    } else {
        standard_prompt(period, region, frequency, median_score, tone, audience, requirements, date_range)
    }
}

/// Convenience wrapper over [`build_prompt`].
pub fn build_prompt_for(request: &SummaryRequest) -> String {
    build_prompt(
        &request.period,
        &request.region,
        request.frequency,
        request.median_score,
        request.tone,
        request.audience,
        request.date_range.as_ref(),
    )
}

#[allow(clippy::too_many_arguments)]
fn standard_prompt(
    period: &str,
    region: &str,
    frequency: usize,
    median_score: f64,
    tone: Tone,
    audience: Audience,
    requirements: &Requirements,
    date_range: Option<&DateRange>,
) -> String {
    let median = format_score(median_score);
    let entry_word = if frequency == 1 { "entry" } else { "entries" };
    let mut out = String::new();

    out.push_str(&format!(
        "Write a {} summary of pain-tracking data for {}.\n\n",
        tone.label(),
        audience.reader()
    ));

    out.push_str("Data:\n");
    out.push_str(&format!("- Period: {period}\n"));
    if let Some(range) = date_range {
        out.push_str(&format!("- Dates: {} to {}\n", range.start_label(), range.end_label()));
    }
    out.push_str(&format!("- Body region: {region}\n"));
    out.push_str(&format!("- Number of pain entries: {frequency}\n"));
    out.push_str(&format!("- Median pain level: {median}/10\n\n"));

    out.push_str("Requirements:\n");
    out.push_str(&requirements.render());
    out.push_str(&format!(
        "- Mention the body region \"{region}\" and no other body region.\n"
    ));
    out.push_str(&format!(
        "- State the number of entries exactly as \"{frequency} {entry_word}\".\n"
    ));
    out.push_str(&format!(
        "- State the median pain level exactly as \"{median}/10\".\n"
    ));
    match date_range {
        Some(range) => out.push_str(&format!(
            "- Refer to the period as \"{}\" and also cite the dates {} to {}.\n",
            period.to_lowercase(),
            range.start_label(),
            range.end_label()
        )),
        None => out.push_str(&format!(
            "- Refer to the period as \"{}\".\n",
            period.to_lowercase()
        )),
    }
    out.push('\n');

    out.push_str(SAFETY_CLAUSE);
    out.push('\n');
    out.push_str("Return only the summary text, with no heading or preamble.\n");
    out
}

fn no_data_prompt(
    period: &str,
    region: &str,
    tone: Tone,
    audience: Audience,
    requirements: &Requirements,
) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Write a {} note for {} explaining that no pain data has been logged yet.\n\n",
        tone.label(),
        audience.reader()
    ));

    out.push_str("Data:\n");
    out.push_str(&format!("- Period: {period}\n"));
    out.push_str(&format!("- Body region: {region}\n"));
    out.push_str("- Number of pain entries: 0 (nothing has been logged yet)\n\n");

    out.push_str("Requirements:\n");
    out.push_str(&requirements.render());
    out.push_str(&format!(
        "- State that no data has been logged yet for the {region} during {}, and that this means 0 entries were recorded.\n",
        period.to_lowercase()
    ));
    out.push_str("- Missing entries are not the same as having no pain. Never say or imply the reader was pain-free.\n");
    out.push_str("- Do not use phrases such as \"pain-free\", \"no pain\", \"that's wonderful\", or \"great news\".\n");
    out.push_str(&format!(
        "- Mention the body region \"{region}\" and no other body region.\n\n"
    ));

    out.push_str(SAFETY_CLAUSE);
    out.push('\n');
    out.push_str("Return only the note text, with no heading or preamble.\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn range() -> DateRange {
        DateRange {
            start: Utc.with_ymd_and_hms(2025, 3, 3, 8, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2025, 3, 9, 20, 0, 0).unwrap(),
        }
    }

    #[test]
    fn standard_prompt_embeds_figures() {
        let prompt = build_prompt("Last Week", "Lower Back", 7, 7.0, Tone::Neutral, Audience::Patient, None);
        assert!(prompt.contains("- Body region: Lower Back"));
        assert!(prompt.contains("\"7 entries\""));
        assert!(prompt.contains("\"7/10\""));
        assert!(prompt.contains("\"last week\""));
        assert!(prompt.contains(SAFETY_CLAUSE));
        assert!(!prompt.contains("Dates:"));
    }

    #[test]
    fn singular_entry_and_fractional_median() {
        let prompt = build_prompt("Last Month", "Neck", 1, 6.5, Tone::Professional, Audience::Clinician, None);
        assert!(prompt.contains("\"1 entry\""));
        assert!(prompt.contains("\"6.5/10\""));
    }

    #[test]
    fn date_range_is_cited() {
        let r = range();
        let prompt = build_prompt("Last Week", "Knee", 3, 4.0, Tone::Encouraging, Audience::Family, Some(&r));
        assert!(prompt.contains("- Dates: March 3, 2025 to March 9, 2025"));
        assert!(prompt.contains("also cite the dates March 3, 2025 to March 9, 2025"));
    }

    #[test]
    fn zero_frequency_uses_no_data_template() {
        let prompt = build_prompt("Last Week", "Knee", 0, 0.0, Tone::Compassionate, Audience::Patient, None);
        assert!(prompt.contains("no data has been logged yet for the Knee during last week"));
        assert!(prompt.contains("pain-free"));
        assert!(prompt.contains("that's wonderful"));
        assert!(prompt.contains(SAFETY_CLAUSE));
        assert!(!prompt.contains("Median pain level"));
    }

    #[test]
    fn safety_clause_is_present_for_every_pair() {
        for tone in Tone::ALL {
            for audience in Audience::ALL {
                for frequency in [0, 4] {
                    let prompt = build_prompt("Last Week", "Hip", frequency, 5.0, tone, audience, None);
                    assert!(prompt.contains(SAFETY_CLAUSE), "{tone:?}/{audience:?}");
                    assert!(prompt.contains(&requirements_for(tone, audience).render()));
                }
            }
        }
    }

    #[test]
    fn prompts_are_deterministic_and_request_wrapper_matches() {
        let r = range();
        let a = build_prompt("Last Week", "Hip", 5, 5.5, Tone::Reassuring, Audience::Caregiver, Some(&r));
        let b = build_prompt("Last Week", "Hip", 5, 5.5, Tone::Reassuring, Audience::Caregiver, Some(&r));
        assert_eq!(a, b);

        let request = SummaryRequest {
            period: "Last Week".to_string(),
            region: "Hip".to_string(),
            frequency: 5,
            median_score: 5.5,
            tone: Tone::Reassuring,
            audience: Audience::Caregiver,
            date_range: Some(r),
        };
        assert_eq!(build_prompt_for(&request), a);
    }

    #[test]
    fn different_pairs_produce_different_prompts() {
        let a = build_prompt("Last Week", "Hip", 5, 5.0, Tone::Neutral, Audience::Clinician, None);
        let b = build_prompt("Last Week", "Hip", 5, 5.0, Tone::Neutral, Audience::Researcher, None);
        assert_ne!(a, b);
    }
}
