use async_trait::async_trait;
use std::any::Any;

use crate::shared::DomainError;

/// Anything that can travel through the dispatch pipeline.
///
/// Implemented for every `'static + Send + Sync` type, so commands and queries
/// only need to opt into [`Command`] or [`Query`].
pub trait Message: Any + Send + Sync {
    /// Fully qualified type name of the message
    fn message_name(&self) -> &'static str;

    /// Type-erased view, used by authorization managers to inspect the concrete message
    fn as_any(&self) -> &(dyn Any + Send + Sync);
}

impl<T: Any + Send + Sync> Message for T {
    fn message_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn as_any(&self) -> &(dyn Any + Send + Sync) {
        self
    }
}

impl<'a> dyn Message + 'a {
    /// Downcast to a concrete message type
    pub fn downcast_ref<T: Message>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: Message>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

/// Command trait - marker trait for all commands
pub trait Command: Message {}

/// Query trait
///
/// A query names its own result type, so one query type maps to exactly one
/// handler contract.
pub trait Query: Message {
    type Result: Send + 'static;
}

/// Command handler trait
///
/// Exactly one handler is registered per command type.
#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync {
    async fn handle(&self, command: C) -> Result<(), DomainError>;
}

/// Query handler trait
#[async_trait]
pub trait QueryHandler<Q: Query>: Send + Sync {
    async fn read(&self, query: Q) -> Result<Q::Result, DomainError>;
}
