use async_trait::async_trait;
use std::sync::Arc;

use super::ensure_authorized;
use gatekeep_domain::authorization::AuthorizationManager;
use gatekeep_domain::messages::{Command, CommandHandler};
use gatekeep_domain::shared::DomainError;

/// Authorizes a command before handing it to the decorated handler
pub struct AuthorizationCommandDecorator<C: Command> {
    decorated: Arc<dyn CommandHandler<C>>,
    authorization_manager: Arc<dyn AuthorizationManager>,
}

impl<C: Command> AuthorizationCommandDecorator<C> {
    pub fn new(
        decorated: Arc<dyn CommandHandler<C>>,
        authorization_manager: Arc<dyn AuthorizationManager>,
    ) -> Self {
        Self {
            decorated,
            authorization_manager,
        }
    }
}

#[async_trait]
impl<C: Command> CommandHandler<C> for AuthorizationCommandDecorator<C> {
    async fn handle(&self, command: C) -> Result<(), DomainError> {
        ensure_authorized(self.authorization_manager.as_ref(), &command).await?;
        self.decorated.handle(command).await
    }
}
