//! Tone × audience requirement blocks.
//!
//! One entry per pair. `requirements_for` never fails: an absent pair resolves
//! to the compassionate/patient entry.

use crate::domain::{Audience, Tone};

/// Register, length and phrasing rules for one tone/audience pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirements {
    pub register: &'static str,
    pub length: &'static str,
    pub phrasing: &'static str,
}

impl Requirements {
    /// Render as prompt bullet lines.
    pub fn render(&self) -> String {
        format!("- {}\n- {}\n- {}\n", self.register, self.length, self.phrasing)
    }
}

const fn req(register: &'static str, length: &'static str, phrasing: &'static str) -> Requirements {
    Requirements {
        register,
        length,
        phrasing,
    }
}

pub const DEFAULT_REQUIREMENTS: Requirements = req(
    "Write warmly, acknowledging that living with pain can be hard.",
    "Use 2-3 short sentences.",
    "Speak directly to the reader as \"you\" and use everyday words.",
);

pub static REQUIREMENTS: [(Tone, Audience, Requirements); 25] = [
    // Compassionate
    (Tone::Compassionate, Audience::Patient, DEFAULT_REQUIREMENTS),
    (
        Tone::Compassionate,
        Audience::Caregiver,
        req(
            "Write with warmth for someone who cares for the person in pain.",
            "Use 2-3 sentences.",
            "Refer to the person as \"they\" and acknowledge the caregiver's attention to the log.",
        ),
    ),
    (
        Tone::Compassionate,
        Audience::Clinician,
        req(
            "Stay kind but precise; the reader is a clinician reading patient-reported data.",
            "Use 2 sentences.",
            "Refer to \"the patient\" and label every figure as self-reported.",
        ),
    ),
    (
        Tone::Compassionate,
        Audience::Family,
        req(
            "Write gently for a family member who may be worried.",
            "Use 2-3 sentences.",
            "Refer to \"your loved one\" and avoid any alarming words.",
        ),
    ),
    (
        Tone::Compassionate,
        Audience::Researcher,
        req(
            "Keep a considerate, respectful register suitable for research notes.",
            "Use 2 sentences.",
            "Refer to \"the participant\" and report figures without interpretation.",
        ),
    ),
    // Encouraging
    (
        Tone::Encouraging,
        Audience::Patient,
        req(
            "Be upbeat about the effort of keeping a log, without minimising the pain.",
            "Use 2-3 short sentences.",
            "Speak to the reader as \"you\" and thank them for tracking.",
        ),
    ),
    (
        Tone::Encouraging,
        Audience::Caregiver,
        req(
            "Be supportive of the caregiver's role in helping keep the log.",
            "Use 2-3 sentences.",
            "Refer to the person as \"they\" and recognise the tracking effort.",
        ),
    ),
    (
        Tone::Encouraging,
        Audience::Clinician,
        req(
            "Be positive about data completeness while staying factual.",
            "Use 2 sentences.",
            "Refer to \"the patient\" and note that the log was kept consistently if entries exist.",
        ),
    ),
    (
        Tone::Encouraging,
        Audience::Family,
        req(
            "Be hopeful and supportive for a family member.",
            "Use 2-3 sentences.",
            "Refer to \"your loved one\" and highlight their commitment to tracking.",
        ),
    ),
    (
        Tone::Encouraging,
        Audience::Researcher,
        req(
            "Be constructive about data quality in a research register.",
            "Use 2 sentences.",
            "Refer to \"the participant\" and comment only on logging completeness.",
        ),
    ),
    // Neutral
    (
        Tone::Neutral,
        Audience::Patient,
        req(
            "Use a plain, even register with no emotional framing.",
            "Use 2 sentences.",
            "Speak to the reader as \"you\" and state the figures plainly.",
        ),
    ),
    (
        Tone::Neutral,
        Audience::Caregiver,
        req(
            "Use a plain, matter-of-fact register for a caregiver.",
            "Use 2 sentences.",
            "Refer to the person as \"they\" and state the figures plainly.",
        ),
    ),
    (
        Tone::Neutral,
        Audience::Clinician,
        req(
            "Use a neutral, chart-note register.",
            "Use 1-2 sentences.",
            "Refer to \"the patient\"; figures only, no adjectives beyond the data.",
        ),
    ),
    (
        Tone::Neutral,
        Audience::Family,
        req(
            "Use a calm, plain register for a family member.",
            "Use 2 sentences.",
            "Refer to \"your family member\" and state the figures plainly.",
        ),
    ),
    (
        Tone::Neutral,
        Audience::Researcher,
        req(
            "Use a neutral, descriptive-statistics register.",
            "Use 1-2 sentences.",
            "Refer to \"the participant\" and report count and median only.",
        ),
    ),
    // Professional
    (
        Tone::Professional,
        Audience::Patient,
        req(
            "Use a courteous, professional register addressed to the person who logged the data.",
            "Use 2-3 sentences.",
            "Speak to the reader as \"you\" and avoid jargon.",
        ),
    ),
    (
        Tone::Professional,
        Audience::Caregiver,
        req(
            "Use a professional register suited to a care report.",
            "Use 2-3 sentences.",
            "Refer to \"the person you care for\" and keep wording precise.",
        ),
    ),
    (
        Tone::Professional,
        Audience::Clinician,
        req(
            "Use a concise professional register suitable for a referral summary.",
            "Use 2 sentences.",
            "Refer to \"the patient\", use standard terms such as \"self-reported\" and \"median\".",
        ),
    ),
    (
        Tone::Professional,
        Audience::Family,
        req(
            "Use a clear, professional register that a family member can follow.",
            "Use 2-3 sentences.",
            "Refer to \"your family member\" and explain the median in plain words.",
        ),
    ),
    (
        Tone::Professional,
        Audience::Researcher,
        req(
            "Use a formal reporting register.",
            "Use 2 sentences.",
            "Refer to \"the participant\" and use terms such as \"n\" and \"median\".",
        ),
    ),
    // Reassuring
    (
        Tone::Reassuring,
        Audience::Patient,
        req(
            "Be calm and steadying without downplaying what was logged.",
            "Use 2-3 short sentences.",
            "Speak to the reader as \"you\" and remind them the summary only reflects their own log.",
        ),
    ),
    (
        Tone::Reassuring,
        Audience::Caregiver,
        req(
            "Be calm and steadying for a caregiver.",
            "Use 2-3 sentences.",
            "Refer to the person as \"they\" and keep the focus on what was recorded.",
        ),
    ),
    (
        Tone::Reassuring,
        Audience::Clinician,
        req(
            "Be measured and calm; avoid urgency words.",
            "Use 2 sentences.",
            "Refer to \"the patient\" and present the figures without commentary.",
        ),
    ),
    (
        Tone::Reassuring,
        Audience::Family,
        req(
            "Be calm and comforting for a family member.",
            "Use 2-3 sentences.",
            "Refer to \"your loved one\" and avoid any dramatic wording.",
        ),
    ),
    (
        Tone::Reassuring,
        Audience::Researcher,
        req(
            "Be measured and even-handed in a research register.",
            "Use 2 sentences.",
            "Refer to \"the participant\" and avoid speculative language.",
        ),
    ),
];

/// Requirement block for a tone/audience pair.
pub fn requirements_for(tone: Tone, audience: Audience) -> &'static Requirements {
    REQUIREMENTS
        .iter()
        .find(|(t, a, _)| *t == tone && *a == audience)
        .map(|(_, _, r)| r)
        .unwrap_or(&DEFAULT_REQUIREMENTS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_is_total_and_distinct() {
        let mut seen = HashSet::new();
        for tone in Tone::ALL {
            for audience in Audience::ALL {
                let found = REQUIREMENTS
                    .iter()
                    .filter(|(t, a, _)| *t == tone && *a == audience)
                    .count();
                assert_eq!(found, 1, "{tone:?}/{audience:?}");
                assert!(seen.insert(requirements_for(tone, audience).render()));
            }
        }
        assert_eq!(seen.len(), 25);
    }

    #[test]
    fn default_is_compassionate_patient() {
        assert_eq!(
            requirements_for(Tone::Compassionate, Audience::Patient),
            &DEFAULT_REQUIREMENTS
        );
    }
}
