use async_trait::async_trait;
use log::{debug, info, warn};
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use gatekeep_domain::messages::{Command, CommandHandler, Query, QueryHandler};
use gatekeep_domain::registry::{HandlerDecorator, HandlerFactory, HandlerRegistry};
use gatekeep_domain::shared::DomainError;


/// What a registry slot resolves to
enum HandlerSlot<H: ?Sized> {
    /// Shared instance, built once at registration or decoration time
    Instance(Arc<H>),
    /// Invoked on every resolution
    Factory(HandlerFactory<H>),
}

impl<H: ?Sized> Clone for HandlerSlot<H> {
    fn clone(&self) -> Self {
        match self {
            HandlerSlot::Instance(handler) => HandlerSlot::Instance(handler.clone()),
            HandlerSlot::Factory(factory) => HandlerSlot::Factory(factory.clone()),
        }
    }
}

impl<H: ?Sized + Send + Sync + 'static> HandlerSlot<H> {
    fn build(&self) -> Arc<H> {
        match self {
            HandlerSlot::Instance(handler) => handler.clone(),
            HandlerSlot::Factory(factory) => factory(),
        }
    }

    fn decorate(self, decorator: HandlerDecorator<H>) -> Self {
        match self {
            HandlerSlot::Instance(handler) => HandlerSlot::Instance(decorator(handler)),
            HandlerSlot::Factory(inner) => {
                HandlerSlot::Factory(Arc::new(move || decorator(inner())))
            }
        }
    }
}

struct RegistryEntry<H: ?Sized> {
    slot: HandlerSlot<H>,
    decorators: Vec<&'static str>,
}

type AnyMap = HashMap<TypeId, Box<dyn Any + Send + Sync>>;

/// In-memory handler registry
///
/// Slots are keyed by the handler contract type (`dyn CommandHandler<C>` or
/// `dyn QueryHandler<Q>`), so each message type owns exactly one slot.
pub struct InMemoryHandlerRegistry {
    handlers: Arc<RwLock<AnyMap>>,
    services: Arc<RwLock<AnyMap>>,
}

impl InMemoryHandlerRegistry {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
            services: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get the number of message types with a registered handler
    pub async fn count(&self) -> usize {
        let handlers = self.handlers.read().await;
        handlers.len()
    }

    async fn register_slot<H>(&self, message_name: &'static str, slot: HandlerSlot<H>)
    where
        H: ?Sized + Send + Sync + 'static,
    {
        let entry = RegistryEntry {
            slot,
            decorators: Vec::new(),
        };

        let mut handlers = self.handlers.write().await;
        if handlers.insert(TypeId::of::<H>(), Box::new(entry)).is_some() {
            debug!("Replaced existing handler registration for: {}", message_name);
        }

        info!("Registered handler for message type: {}", message_name);
    }

    async fn decorate_slot<H>(
        &self,
        message_name: &'static str,
        decorator_name: &'static str,
        decorator: HandlerDecorator<H>,
    ) -> Result<(), DomainError>
    where
        H: ?Sized + Send + Sync + 'static,
    {
        let mut handlers = self.handlers.write().await;
        let entry = handlers
            .get_mut(&TypeId::of::<H>())
            .and_then(|entry| entry.downcast_mut::<RegistryEntry<H>>())
            .ok_or_else(|| DomainError::HandlerNotRegistered(message_name.to_string()))?;

        if entry.decorators.contains(&decorator_name) {
            warn!(
                "Handler for {} is already decorated with {}; it will run once per layer",
                message_name, decorator_name
            );
        }

        entry.slot = entry.slot.clone().decorate(decorator);
        entry.decorators.push(decorator_name);

        info!(
            "Decorated handler for {} with {} ({} layer(s))",
            message_name,
            decorator_name,
            entry.decorators.len()
        );
        Ok(())
    }

    async fn resolve_slot<H>(&self, message_name: &'static str) -> Result<Arc<H>, DomainError>
    where
        H: ?Sized + Send + Sync + 'static,
    {
        let slot = {
            let handlers = self.handlers.read().await;
            handlers
                .get(&TypeId::of::<H>())
                .and_then(|entry| entry.downcast_ref::<RegistryEntry<H>>())
                .map(|entry| entry.slot.clone())
        };

        match slot {
            Some(slot) => Ok(slot.build()),
            None => Err(DomainError::HandlerNotRegistered(message_name.to_string())),
        }
    }

    async fn decorators_of<H>(&self) -> Vec<&'static str>
    where
        H: ?Sized + Send + Sync + 'static,
    {
        let handlers = self.handlers.read().await;
        handlers
            .get(&TypeId::of::<H>())
            .and_then(|entry| entry.downcast_ref::<RegistryEntry<H>>())
            .map(|entry| entry.decorators.clone())
            .unwrap_or_default()
    }
}

impl Default for InMemoryHandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HandlerRegistry for InMemoryHandlerRegistry {
    async fn register_command_handler<C: Command>(&self, handler: Arc<dyn CommandHandler<C>>) {
        self.register_slot(type_name::<C>(), HandlerSlot::Instance(handler))
            .await;
    }

    async fn register_command_handler_factory<C: Command>(
        &self,
        factory: HandlerFactory<dyn CommandHandler<C>>,
    ) {
        self.register_slot(type_name::<C>(), HandlerSlot::Factory(factory))
            .await;
    }

    async fn decorate_command_handler<C: Command>(
        &self,
        decorator_name: &'static str,
        decorator: HandlerDecorator<dyn CommandHandler<C>>,
    ) -> Result<(), DomainError> {
        self.decorate_slot(type_name::<C>(), decorator_name, decorator)
            .await
    }

    async fn resolve_command_handler<C: Command>(
        &self,
    ) -> Result<Arc<dyn CommandHandler<C>>, DomainError> {
        self.resolve_slot::<dyn CommandHandler<C>>(type_name::<C>())
            .await
    }

    async fn command_decorators<C: Command>(&self) -> Vec<&'static str> {
        self.decorators_of::<dyn CommandHandler<C>>().await
    }

    async fn register_query_handler<Q: Query>(
        &self,
        handler: Arc<dyn QueryHandler<Q>>,
    ) {
        self.register_slot(type_name::<Q>(), HandlerSlot::Instance(handler))
            .await;
    }

    async fn register_query_handler_factory<Q: Query>(
        &self,
        factory: HandlerFactory<dyn QueryHandler<Q>>,
    ) {
        self.register_slot(type_name::<Q>(), HandlerSlot::Factory(factory))
            .await;
    }

    async fn decorate_query_handler<Q: Query>(
        &self,
        decorator_name: &'static str,
        decorator: HandlerDecorator<dyn QueryHandler<Q>>,
    ) -> Result<(), DomainError> {
        self.decorate_slot(type_name::<Q>(), decorator_name, decorator)
            .await
    }

    async fn resolve_query_handler<Q: Query>(
        &self,
    ) -> Result<Arc<dyn QueryHandler<Q>>, DomainError> {
        self.resolve_slot::<dyn QueryHandler<Q>>(type_name::<Q>())
            .await
    }

    async fn query_decorators<Q: Query>(&self) -> Vec<&'static str> {
        self.decorators_of::<dyn QueryHandler<Q>>().await
    }

    async fn provide_service<S: Clone + Send + Sync + 'static>(&self, service: S) {
        let mut services = self.services.write().await;
        services.insert(TypeId::of::<S>(), Box::new(service));
        info!("Provided service: {}", type_name::<S>());
    }

    async fn service<S: Clone + Send + Sync + 'static>(&self) -> Result<S, DomainError> {
        let services = self.services.read().await;
        services
            .get(&TypeId::of::<S>())
            .and_then(|service| service.downcast_ref::<S>())
            .cloned()
            .ok_or_else(|| DomainError::ServiceNotRegistered(type_name::<S>().to_string()))
    }
}
