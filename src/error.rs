//! Error types.
//!
//! - `AppError`: what the binary reports (message + process exit code)
//! - `GenerationError`: a single failed call to the text-generation service
//! - `SummaryError`: terminal failure of a summary request after all attempts

use thiserror::Error;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<SummaryError> for AppError {
    fn from(err: SummaryError) -> Self {
        AppError::new(4, format!("Summary generation failed: {err}"))
    }
}

/// A failed call to the external text generator.
///
/// Every variant is treated the same by the orchestrator (retry, then fall back);
/// the split only exists for diagnostics.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("service responded with status {0}")]
    Status(u16),

    #[error("could not decode service response: {0}")]
    Decode(String),

    #[error("service returned an empty response")]
    Empty,
}

/// The last thing that went wrong before attempts ran out.
#[derive(Debug, Clone, Error)]
pub enum FailureCause {
    #[error("{0}")]
    Transport(GenerationError),

    #[error("output failed validation: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Terminal failure of a summary request. Only produced when fallback is disabled.
#[derive(Debug, Clone, Error)]
pub enum SummaryError {
    #[error("no usable output after {attempts} attempt(s); last failure: {cause}")]
    Exhausted { attempts: u32, cause: FailureCause },

    #[error("deadline elapsed after {attempts} attempt(s)")]
    DeadlineElapsed { attempts: u32 },
}

impl SummaryError {
    /// Number of generator calls made before giving up.
    pub fn attempts(&self) -> u32 {
        match self {
            SummaryError::Exhausted { attempts, .. } | SummaryError::DeadlineElapsed { attempts } => *attempts,
        }
    }
}
