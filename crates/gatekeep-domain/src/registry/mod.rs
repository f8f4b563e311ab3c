use async_trait::async_trait;
use std::sync::Arc;

use crate::messages::{Command, CommandHandler, Query, QueryHandler};
use crate::shared::DomainError;

/// Builds a fresh handler on every resolution
pub type HandlerFactory<H> = Arc<dyn Fn() -> Arc<H> + Send + Sync>;

/// Wraps a handler in another one that honours the same contract
pub type HandlerDecorator<H> = Arc<dyn Fn(Arc<H>) -> Arc<H> + Send + Sync>;

/// Handler registry trait
///
/// Keeps a single slot per message type. Registering replaces the slot;
/// decorating reads the slot, wraps it and writes it back under the same key,
/// so the previous handler stays reachable only through its decorator.
#[async_trait]
pub trait HandlerRegistry: Send + Sync {
    /// Register a shared handler instance for `C`, replacing any previous registration
    async fn register_command_handler<C: Command>(&self, handler: Arc<dyn CommandHandler<C>>);

    /// Register a factory for `C`, replacing any previous registration
    async fn register_command_handler_factory<C: Command>(
        &self,
        factory: HandlerFactory<dyn CommandHandler<C>>,
    );

    /// Wrap the handler currently registered for `C`
    ///
    /// Fails with [`DomainError::HandlerNotRegistered`] when nothing is registered yet.
    async fn decorate_command_handler<C: Command>(
        &self,
        decorator_name: &'static str,
        decorator: HandlerDecorator<dyn CommandHandler<C>>,
    ) -> Result<(), DomainError>;

    async fn resolve_command_handler<C: Command>(
        &self,
    ) -> Result<Arc<dyn CommandHandler<C>>, DomainError>;

    /// Names of the decorators applied to `C`, outermost last
    async fn command_decorators<C: Command>(&self) -> Vec<&'static str>;

    async fn register_query_handler<Q: Query>(
        &self,
        handler: Arc<dyn QueryHandler<Q>>,
    );

    async fn register_query_handler_factory<Q: Query>(
        &self,
        factory: HandlerFactory<dyn QueryHandler<Q>>,
    );

    async fn decorate_query_handler<Q: Query>(
        &self,
        decorator_name: &'static str,
        decorator: HandlerDecorator<dyn QueryHandler<Q>>,
    ) -> Result<(), DomainError>;

    async fn resolve_query_handler<Q: Query>(
        &self,
    ) -> Result<Arc<dyn QueryHandler<Q>>, DomainError>;

    async fn query_decorators<Q: Query>(&self) -> Vec<&'static str>;

    /// Register a singleton collaborator, keyed by its type
    async fn provide_service<S: Clone + Send + Sync + 'static>(&self, service: S);

    /// Look up a singleton collaborator
    ///
    /// Fails with [`DomainError::ServiceNotRegistered`] when it was never provided.
    async fn service<S: Clone + Send + Sync + 'static>(&self) -> Result<S, DomainError>;
}
