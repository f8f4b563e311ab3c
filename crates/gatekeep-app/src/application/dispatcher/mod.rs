use log::{debug, info, warn};
use std::any::type_name;
use std::future::Future;
use std::sync::Arc;

use gatekeep_domain::messages::{Command, Query};
use gatekeep_domain::registry::HandlerRegistry;
use gatekeep_domain::shared::DomainError;
use gatekeep_infrastructure::config::DispatchConfig;


/// In-process dispatch pipeline
///
/// Resolves the handler registered for a message type and invokes it. Callers
/// never see whether that handler was decorated.
pub struct Dispatcher<Reg: HandlerRegistry> {
    registry: Arc<Reg>,
    config: DispatchConfig,
}

impl<Reg: HandlerRegistry> Dispatcher<Reg> {
    pub fn new(registry: Arc<Reg>, config: DispatchConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &Arc<Reg> {
        &self.registry
    }

    /// Dispatch a command to its registered handler
    pub async fn send<C: Command>(&self, command: C) -> Result<(), DomainError> {
        let message_name = type_name::<C>();
        debug!("Dispatching command: {}", message_name);

        let handler = self.registry.resolve_command_handler::<C>().await?;
        self.run(message_name, handler.handle(command)).await
    }

    /// Dispatch a query to its registered handler and return the result
    pub async fn ask<Q: Query>(&self, query: Q) -> Result<Q::Result, DomainError> {
        let message_name = type_name::<Q>();
        debug!("Dispatching query: {}", message_name);

        let handler = self.registry.resolve_query_handler::<Q>().await?;
        self.run(message_name, handler.read(query)).await
    }

    /// Await an invocation, dropping it if the configured deadline elapses first
    async fn run<T>(
        &self,
        message_name: &'static str,
        invocation: impl Future<Output = Result<T, DomainError>>,
    ) -> Result<T, DomainError> {
        let result = match self.config.handler_timeout {
            Some(limit) => match tokio::time::timeout(limit, invocation).await {
                Ok(result) => result,
                Err(_) => {
                    warn!("{} did not complete within {:?}", message_name, limit);
                    Err(DomainError::Timeout(format!(
                        "{} did not complete within {:?}",
                        message_name, limit
                    )))
                }
            },
            None => invocation.await,
        };

        match &result {
            Ok(_) => debug!("Dispatched {} successfully", message_name),
            Err(e) if e.is_unauthorized() => info!("Access denied for {}: {}", message_name, e),
            Err(e) => debug!("Dispatch of {} failed: {}", message_name, e),
        }

        result
    }
}
