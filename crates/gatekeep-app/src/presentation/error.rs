use gatekeep_domain::shared::{DomainError, ErrorCode, ErrorSeverity};
use serde::{Deserialize, Serialize};

/// What a caller of the dispatcher gets back when a message fails
///
/// `code` distinguishes an authorization rejection (1001) from failures raised
/// by the handler or the authorization manager itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
    pub severity: ErrorSeverity,
    /// Retrying the same message may succeed
    pub recoverable: bool,
}

impl ErrorResponse {
    pub fn is_access_denied(&self) -> bool {
        self.code == ErrorCode::Unauthorized.code()
    }
}

impl From<DomainError> for ErrorResponse {
    fn from(err: DomainError) -> Self {
        let code = err.code();
        Self {
            code: code.code(),
            message: err.message().to_string(),
            severity: code.severity(),
            recoverable: code.is_recoverable(),
        }
    }
}
