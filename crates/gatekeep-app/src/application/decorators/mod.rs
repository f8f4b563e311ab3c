//! Authorization decorators
//!
//! Each decorator implements the same handler contract as the handler it wraps,
//! so the registry and the dispatcher cannot tell a decorated handler from the
//! original. The authorization manager always sees the exact message that is
//! about to run, and a rejected message never reaches the decorated handler.

mod command;
mod query;


pub use command::AuthorizationCommandDecorator;
pub use query::AuthorizationQueryDecorator;

use gatekeep_domain::authorization::{AuthorizationManager, AuthorizationOutcome};
use gatekeep_domain::messages::Message;
use gatekeep_domain::shared::DomainError;

/// Name recorded by the registry for authorization decoration layers
pub const AUTHORIZATION_DECORATOR: &str = "authorization";

/// Turn a rejection into [`DomainError::Unauthorized`]; evaluation failures pass through as-is
async fn ensure_authorized(
    manager: &dyn AuthorizationManager,
    message: &dyn Message,
) -> Result<(), DomainError> {
    match manager.authorize(message).await? {
        AuthorizationOutcome::Authorized => Ok(()),
        AuthorizationOutcome::Rejected { reason } => {
            Err(DomainError::unauthorized(message.message_name(), reason))
        }
    }
}
