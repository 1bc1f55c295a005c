// PriceGrid CLI - command implementations
//
// The binary in main.rs parses arguments and dispatches here; commands live
// in library modules so integration tests can drive them directly.

pub mod compare;
pub mod exit_codes;
pub mod update;
pub mod util;
pub mod validate;

use exit_codes::{EXIT_CONFIG, EXIT_IO, EXIT_USAGE, EXIT_WINDOW};
use pricegrid_recon::ReconError;

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_USAGE,
            message: msg.into(),
            hint: None,
        }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_IO,
            message: msg.into(),
            hint: None,
        }
    }

    /// Create an error from a pipeline error with the matching exit code.
    pub fn recon(err: ReconError) -> Self {
        let code = match &err {
            ReconError::ConfigParse(_)
            | ReconError::ConfigValidation(_)
            | ReconError::InvalidColumn(_) => EXIT_CONFIG,
            ReconError::InvalidWindow { .. } | ReconError::WindowOutOfBounds { .. } => EXIT_WINDOW,
            ReconError::Io(_) => EXIT_IO,
        };
        let hint = match &err {
            ReconError::WindowOutOfBounds { .. } => {
                Some("shrink the rows window to the document extent".to_string())
            }
            _ => None,
        };
        Self {
            code,
            message: err.to_string(),
            hint,
        }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
