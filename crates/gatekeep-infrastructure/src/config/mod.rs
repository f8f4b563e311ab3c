pub mod dispatch;
pub mod logging;

pub use dispatch::DispatchConfig;
pub use logging::LoggingConfig;
