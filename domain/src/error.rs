use thiserror::Error;

/// Error taxonomy shared by every port and domain service.
///
/// Each variant carries a stable machine-readable code (`code()`) next to
/// the human-readable message, so transport layers can map failures without
/// string sniffing.
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error("range {order} is invalid: start {start_secs}s, end {end_secs}s")]
    InvalidRange {
        order: u32,
        start_secs: f64,
        end_secs: f64,
    },

    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("conflict: {message}")]
    Conflict { message: String },

    #[error("audio conversion failed: {message}")]
    Conversion { message: String },

    #[error("storage operation failed: {message}")]
    Storage { message: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn invalid_input(message: &str) -> Self {
        Self::InvalidInput {
            message: message.to_string(),
        }
    }

    pub fn invalid_range(order: u32, start_secs: f64, end_secs: f64) -> Self {
        Self::InvalidRange {
            order,
            start_secs,
            end_secs,
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::NotFound {
            message: message.to_string(),
        }
    }

    pub fn conflict(message: &str) -> Self {
        Self::Conflict {
            message: message.to_string(),
        }
    }

    pub fn conversion(message: &str) -> Self {
        Self::Conversion {
            message: message.to_string(),
        }
    }

    pub fn storage(message: &str) -> Self {
        Self::Storage {
            message: message.to_string(),
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self::Internal {
            message: message.to_string(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "invalid_input",
            Self::InvalidRange { .. } => "invalid_range",
            Self::NotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::Conversion { .. } => "conversion_failed",
            Self::Storage { .. } => "storage_failed",
            Self::Internal { .. } => "internal_error",
        }
    }
}
