use async_trait::async_trait;
use std::sync::Arc;

use crate::application::decorators::{
    AuthorizationCommandDecorator, AuthorizationQueryDecorator, AUTHORIZATION_DECORATOR,
};
use gatekeep_domain::authorization::AuthorizationManager;
use gatekeep_domain::messages::{Command, CommandHandler, Query, QueryHandler};
use gatekeep_domain::registry::HandlerRegistry;
use gatekeep_domain::shared::DomainError;


/// Interposes authorization in front of already-registered handlers
///
/// The authorization manager is taken from the registry's services, so an
/// `Arc<dyn AuthorizationManager>` must be provided before decorating.
/// A missing base handler surfaces as the registry's
/// [`DomainError::HandlerNotRegistered`].
///
/// Decorating the same type twice is allowed. Each layer runs its own check.
#[async_trait]
pub trait AuthorizationDecoration: HandlerRegistry {
    async fn decorate_command_handler_with_authorization<C: Command>(
        &self,
    ) -> Result<(), DomainError>;

    async fn decorate_query_handler_with_authorization<Q: Query>(
        &self,
    ) -> Result<(), DomainError>;
}

#[async_trait]
impl<T: HandlerRegistry> AuthorizationDecoration for T {
    async fn decorate_command_handler_with_authorization<C: Command>(
        &self,
    ) -> Result<(), DomainError> {
        let manager = self.service::<Arc<dyn AuthorizationManager>>().await?;

        self.decorate_command_handler::<C>(
            AUTHORIZATION_DECORATOR,
            Arc::new(
                move |inner: Arc<dyn CommandHandler<C>>| -> Arc<dyn CommandHandler<C>> {
                    Arc::new(AuthorizationCommandDecorator::new(inner, manager.clone()))
                },
            ),
        )
        .await
    }

    async fn decorate_query_handler_with_authorization<Q: Query>(
        &self,
    ) -> Result<(), DomainError> {
        let manager = self.service::<Arc<dyn AuthorizationManager>>().await?;

        self.decorate_query_handler::<Q>(
            AUTHORIZATION_DECORATOR,
            Arc::new(
                move |inner: Arc<dyn QueryHandler<Q>>| -> Arc<dyn QueryHandler<Q>> {
                    Arc::new(AuthorizationQueryDecorator::new(inner, manager.clone()))
                },
            ),
        )
        .await
    }
}
