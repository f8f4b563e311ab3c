// Domain layer - Handler, authorization and registry contracts
// No dependencies on infrastructure or application layers

pub mod authorization;
pub mod messages;
pub mod registry;
pub mod shared;

// Re-exports for convenience
pub use authorization::{AuthorizationManager, AuthorizationOutcome};
pub use messages::{Command, CommandHandler, Message, Query, QueryHandler};
pub use registry::{HandlerDecorator, HandlerFactory, HandlerRegistry};
pub use shared::{DomainError, ErrorCode, ErrorSeverity};
