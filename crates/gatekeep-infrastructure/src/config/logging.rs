use std::path::PathBuf;

/// Configuration for the logging bootstrap
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,

    /// Directory for daily-rolling JSON logs. No file output when `None`.
    pub log_dir: Option<PathBuf>,

    /// File name prefix inside `log_dir`
    pub json_file_name: String,

    /// Human-readable output on stdout
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: if cfg!(debug_assertions) {
                "debug,gatekeep=trace".to_string()
            } else {
                "info".to_string()
            },
            log_dir: None,
            json_file_name: "gatekeep.log".to_string(),
            stdout: true,
        }
    }
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(log_dir.into());
        self
    }

    pub fn with_stdout(mut self, stdout: bool) -> Self {
        self.stdout = stdout;
        self
    }
}
