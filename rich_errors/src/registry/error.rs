//! Error types for code registration

use super::code::Code;
use crate::data;
use crate::error::RichError;
use crate::logging::codes;
use crate::logging::EventCode;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Reasons a registration is rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("code {code} already registered as '{existing_label}' ({existing_status})")]
    AlreadyRegistered {
        code: Code,
        existing_status: i32,
        existing_label: String,
    },
}

impl RegistryError {
    pub fn already_registered(code: Code, existing_status: i32, existing_label: &str) -> Self {
        Self::AlreadyRegistered {
            code,
            existing_status,
            existing_label: existing_label.to_string(),
        }
    }

    /// The code whose registration was rejected
    pub fn code(&self) -> Code {
        match self {
            Self::AlreadyRegistered { code, .. } => *code,
        }
    }

    /// Log event code used when reporting this rejection
    pub fn event_code(&self) -> EventCode {
        match self {
            Self::AlreadyRegistered { .. } => codes::registry::DUPLICATE_REGISTRATION,
        }
    }
}

impl From<RegistryError> for RichError {
    #[track_caller]
    fn from(err: RegistryError) -> Self {
        let code = err.code();
        RichError::wrap(Code::INVALID_ARGS, err, "code registration rejected", data![code])
    }
}
