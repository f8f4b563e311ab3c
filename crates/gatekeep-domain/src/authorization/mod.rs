use async_trait::async_trait;

use crate::messages::Message;
use crate::shared::DomainError;

/// Verdict of an authorization check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationOutcome {
    Authorized,
    /// The message failed policy. The reason, if any, is surfaced to the caller verbatim.
    Rejected { reason: Option<String> },
}

impl AuthorizationOutcome {
    pub fn rejected(reason: impl Into<String>) -> Self {
        AuthorizationOutcome::Rejected {
            reason: Some(reason.into()),
        }
    }

    pub fn is_authorized(&self) -> bool {
        matches!(self, AuthorizationOutcome::Authorized)
    }
}

/// Authorization manager trait
///
/// Receives the exact message instance that will be executed. A rejection is
/// reported through [`AuthorizationOutcome::Rejected`]; an `Err` means the check
/// itself could not be evaluated and is passed to the caller unchanged.
#[async_trait]
pub trait AuthorizationManager: Send + Sync {
    async fn authorize(&self, message: &dyn Message) -> Result<AuthorizationOutcome, DomainError>;
}
