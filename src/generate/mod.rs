//! Generation orchestration: attempt → validate → accept / retry / fall back.
//!
//! Per attempt `i` (1-indexed, up to `max_attempts`):
//!
//! - generator error or blank text: wait `base_delay × i`, retry
//! - candidate with validation errors: wait `base_delay`, retry with the same prompt
//! - candidate without errors (or validation disabled): accept verbatim
//!
//! When attempts run out the request falls back to the deterministic template,
//! or fails with `SummaryError` if fallback is disabled. An optional deadline
//! bounds the whole request with the same fallback/fail rule.

pub mod client;
pub mod observer;

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use rand::Rng;

use crate::domain::{GenerationOptions, GenerationOutcome, Provenance, SummaryRequest};
use crate::error::{FailureCause, GenerationError, SummaryError};
use crate::fallback::fallback_for;
use crate::prompt::build_prompt_for;
use crate::validate::validate;

pub use client::{HttpGenerator, HttpGeneratorConfig, TextGenerator};
pub use observer::{GenerationEvent, GenerationObserver, NoopObserver, TracingObserver};

/// How the attempt loop ended, before fallback policy is applied.
enum AttemptResult {
    Accepted {
        text: String,
        attempt: u32,
        warnings: Vec<String>,
    },
    Exhausted {
        attempts: u32,
        cause: FailureCause,
    },
}

pub struct Orchestrator<G, O = TracingObserver> {
    generator: G,
    options: GenerationOptions,
    observer: O,
}

impl<G: TextGenerator> Orchestrator<G> {
    pub fn new(generator: G, options: GenerationOptions) -> Self {
        Self {
            generator,
            options,
            observer: TracingObserver,
        }
    }
}

impl<G: TextGenerator, O: GenerationObserver> Orchestrator<G, O> {
    pub fn with_observer<P: GenerationObserver>(self, observer: P) -> Orchestrator<G, P> {
        Orchestrator {
            generator: self.generator,
            options: self.options,
            observer,
        }
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// Produce a summary for `request`, reporting how the text was obtained.
    pub async fn produce(&self, request: &SummaryRequest) -> Result<GenerationOutcome, SummaryError> {
        let prompt = build_prompt_for(request);
        let attempts = AtomicU32::new(0);

        let result = match self.options.deadline {
            Some(deadline) => {
                match tokio::time::timeout(deadline, self.run_attempts(request, &prompt, &attempts)).await {
                    Ok(result) => result,
                    Err(_) => {
                        let attempts = attempts.load(Ordering::SeqCst);
                        return self.settle(request, "deadline elapsed", SummaryError::DeadlineElapsed { attempts }, attempts);
                    }
                }
            }
            None => self.run_attempts(request, &prompt, &attempts).await,
        };

        match result {
            AttemptResult::Accepted { text, attempt, warnings } => Ok(GenerationOutcome {
                text,
                provenance: Provenance::Generated { attempt, warnings },
            }),
            AttemptResult::Exhausted { attempts, cause } => {
                let reason = cause.to_string();
                self.settle(request, &reason, SummaryError::Exhausted { attempts, cause }, attempts)
            }
        }
    }

    /// Apply the fallback policy to a request that produced no usable text.
    fn settle(
        &self,
        request: &SummaryRequest,
        reason: &str,
        error: SummaryError,
        attempts: u32,
    ) -> Result<GenerationOutcome, SummaryError> {
        if !self.options.fallback_enabled {
            self.observer.on_event(&GenerationEvent::Failed { attempts, error: &error });
            return Err(error);
        }

        self.observer.on_event(&GenerationEvent::FellBack { attempts, reason });
        Ok(GenerationOutcome {
            text: fallback_for(request),
            provenance: Provenance::Fallback {
                attempts,
                reason: reason.to_string(),
            },
        })
    }

    async fn run_attempts(&self, request: &SummaryRequest, prompt: &str, counter: &AtomicU32) -> AttemptResult {
        let max_attempts = self.options.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            counter.store(attempt, Ordering::SeqCst);
            self.observer.on_event(&GenerationEvent::AttemptStarted { attempt, max_attempts });

            let cause = match self.generator.generate(prompt).await {
                Ok(text) if text.trim().is_empty() => self.transport_failure(attempt, GenerationError::Empty),
                Err(error) => self.transport_failure(attempt, error),
                Ok(text) => {
                    if !self.options.validation_enabled {
                        self.observer.on_event(&GenerationEvent::Accepted { attempt, warnings: &[] });
                        return AttemptResult::Accepted {
                            text,
                            attempt,
                            warnings: Vec::new(),
                        };
                    }

                    let verdict = validate(&text, &request.region, request.frequency, request.median_score);
                    self.observer.on_event(&GenerationEvent::Validated { attempt, verdict: &verdict });
                    if verdict.is_valid() {
                        self.observer.on_event(&GenerationEvent::Accepted {
                            attempt,
                            warnings: &verdict.warnings,
                        });
                        return AttemptResult::Accepted {
                            text,
                            attempt,
                            warnings: verdict.warnings,
                        };
                    }
                    FailureCause::Validation(verdict.errors)
                }
            };

            if attempt >= max_attempts {
                return AttemptResult::Exhausted { attempts: attempt, cause };
            }

            let delay = self.backoff(&cause, attempt);
            self.observer.on_event(&GenerationEvent::BackingOff { attempt, delay });
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    fn transport_failure(&self, attempt: u32, error: GenerationError) -> FailureCause {
        self.observer.on_event(&GenerationEvent::TransportFailed { attempt, error: &error });
        FailureCause::Transport(error)
    }

    /// Linear in `attempt` for transport failures, flat for validation failures.
    fn backoff(&self, cause: &FailureCause, attempt: u32) -> Duration {
        let base = self.options.base_delay;
        let delay = match cause {
            FailureCause::Transport(_) => base.saturating_mul(attempt),
            FailureCause::Validation(_) => base,
        };
        if !self.options.jitter {
            return delay;
        }
        let max_jitter_ms = (base.as_millis() / 4) as u64;
        delay + Duration::from_millis(rand::thread_rng().gen_range(0..=max_jitter_ms))
    }
}

/// Produce summary text for `request`; fails only when fallback is disabled.
pub async fn produce_summary<G: TextGenerator>(
    generator: &G,
    request: &SummaryRequest,
    options: &GenerationOptions,
) -> Result<String, SummaryError> {
    Orchestrator::new(generator, options.clone())
        .produce(request)
        .await
        .map(|outcome| outcome.text)
}
