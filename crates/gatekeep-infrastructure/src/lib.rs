// Infrastructure layer - Technical implementations
// Depends on domain layer, implements its interfaces

pub mod config;
pub mod logging;
pub mod registry;

pub use config::{DispatchConfig, LoggingConfig};
pub use registry::InMemoryHandlerRegistry;
