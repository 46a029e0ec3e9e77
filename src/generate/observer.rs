//! Structured events emitted while producing a summary.
//!
//! The orchestrator never logs on its own; callers inject an observer.

use std::time::Duration;

use crate::domain::ValidationVerdict;
use crate::error::{GenerationError, SummaryError};

#[derive(Debug, Clone, Copy)]
pub enum GenerationEvent<'a> {
    AttemptStarted { attempt: u32, max_attempts: u32 },
    TransportFailed { attempt: u32, error: &'a GenerationError },
    Validated { attempt: u32, verdict: &'a ValidationVerdict },
    BackingOff { attempt: u32, delay: Duration },
    Accepted { attempt: u32, warnings: &'a [String] },
    FellBack { attempts: u32, reason: &'a str },
    Failed { attempts: u32, error: &'a SummaryError },
}

pub trait GenerationObserver: Send + Sync {
    fn on_event(&self, event: &GenerationEvent<'_>);
}

impl<T: GenerationObserver> GenerationObserver for &T {
    fn on_event(&self, event: &GenerationEvent<'_>) {
        (**self).on_event(event);
    }
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl GenerationObserver for TracingObserver {
    fn on_event(&self, event: &GenerationEvent<'_>) {
        match *event {
            GenerationEvent::AttemptStarted { attempt, max_attempts } => {
                tracing::debug!(attempt, max_attempts, "requesting summary");
            }
            GenerationEvent::TransportFailed { attempt, error } => {
                tracing::warn!(attempt, %error, "generator call failed");
            }
            GenerationEvent::Validated { attempt, verdict } => {
                tracing::debug!(
                    attempt,
                    valid = verdict.is_valid(),
                    errors = verdict.errors.len(),
                    warnings = verdict.warnings.len(),
                    "validated candidate"
                );
                for error in &verdict.errors {
                    tracing::warn!(attempt, %error, "validation error");
                }
            }
            GenerationEvent::BackingOff { attempt, delay } => {
                tracing::debug!(attempt, delay_ms = delay.as_millis() as u64, "backing off");
            }
            GenerationEvent::Accepted { attempt, warnings } => {
                for warning in warnings {
                    tracing::warn!(attempt, %warning, "validation warning");
                }
                tracing::info!(attempt, "accepted generated summary");
            }
            GenerationEvent::FellBack { attempts, reason } => {
                tracing::info!(attempts, reason, "using fallback summary");
            }
            GenerationEvent::Failed { attempts, error } => {
                tracing::error!(attempts, %error, "summary generation failed");
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl GenerationObserver for NoopObserver {
    fn on_event(&self, _event: &GenerationEvent<'_>) {}
}
