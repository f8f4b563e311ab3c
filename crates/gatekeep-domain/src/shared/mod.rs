use serde::{Deserialize, Serialize};

/// Error codes for structured error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authorization (1xxx)
    Unauthorized = 1001,

    // Infrastructure (5xxx)
    InfrastructureError = 5001,
    TimeoutError = 5002,

    // Validation (6xxx)
    ValidationError = 6001,

    // Composition (7xxx)
    HandlerNotRegistered = 7001,
    ServiceNotRegistered = 7002,
}

impl ErrorCode {
    /// Get error code as integer
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ErrorCode::Unauthorized | ErrorCode::TimeoutError => ErrorSeverity::Warning,

            ErrorCode::ValidationError => ErrorSeverity::Info,

            ErrorCode::InfrastructureError => ErrorSeverity::Error,

            ErrorCode::HandlerNotRegistered | ErrorCode::ServiceNotRegistered => {
                ErrorSeverity::Critical
            }
        }
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ErrorCode::TimeoutError | ErrorCode::InfrastructureError
        )
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// Raised by the authorization decorators when the authorization manager rejects a message.
    #[error("Unauthorized: {message_type}{}", format_reason(.reason))]
    Unauthorized {
        message_type: &'static str,
        reason: Option<String>,
    },

    #[error("No handler registered for {0}")]
    HandlerNotRegistered(String),

    #[error("No service registered for {0}")]
    ServiceNotRegistered(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

fn format_reason(reason: &Option<String>) -> String {
    match reason {
        Some(reason) => format!(" ({})", reason),
        None => String::new(),
    }
}

impl DomainError {
    /// Build the rejection error for a message type
    pub fn unauthorized(message_type: &'static str, reason: Option<String>) -> Self {
        DomainError::Unauthorized {
            message_type,
            reason,
        }
    }

    /// Get error code
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Unauthorized { .. } => ErrorCode::Unauthorized,
            DomainError::HandlerNotRegistered(_) => ErrorCode::HandlerNotRegistered,
            DomainError::ServiceNotRegistered(_) => ErrorCode::ServiceNotRegistered,
            DomainError::Timeout(_) => ErrorCode::TimeoutError,
            DomainError::Infrastructure(_) => ErrorCode::InfrastructureError,
            DomainError::Validation(_) => ErrorCode::ValidationError,
        }
    }

    /// Get error message
    ///
    /// For rejections this is the reason attached by the authorization manager,
    /// falling back to the rejected message type.
    pub fn message(&self) -> &str {
        match self {
            DomainError::Unauthorized {
                message_type,
                reason,
            } => reason.as_deref().unwrap_or(message_type),
            DomainError::HandlerNotRegistered(msg)
            | DomainError::ServiceNotRegistered(msg)
            | DomainError::Timeout(msg)
            | DomainError::Infrastructure(msg)
            | DomainError::Validation(msg) => msg,
        }
    }

    /// True only for rejections raised by an authorization decorator
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, DomainError::Unauthorized { .. })
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        self.code().severity()
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        self.code().is_recoverable()
    }

    /// Format error with code
    pub fn format_with_code(&self) -> String {
        format!("[{}] {}", self.code().code(), self)
    }
}
