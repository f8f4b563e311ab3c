use std::time::Duration;

/// Configuration for the in-process dispatcher
#[derive(Debug, Clone, Default)]
pub struct DispatchConfig {
    /// Deadline for one resolved invocation, authorization included.
    /// `None` lets invocations run to completion.
    pub handler_timeout: Option<Duration>,
}

impl DispatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handler_timeout(mut self, timeout: Duration) -> Self {
        self.handler_timeout = Some(timeout);
        self
    }
}
