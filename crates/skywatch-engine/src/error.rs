//! Error types for the engine binary.

use crate::scheduler::SchedulerError;

/// Errors that can abort engine startup.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration could not be loaded.
    #[error("config error: {source}")]
    Config {
        /// The underlying configuration error.
        #[from]
        source: skywatch_core::config::ConfigError,
    },

    /// The scheduler could not be armed.
    #[error("scheduler error: {source}")]
    Scheduler {
        /// The underlying scheduler error.
        #[from]
        source: SchedulerError,
    },

    /// The observer server could not be spawned.
    #[error("observer error: {source}")]
    Observer {
        /// The underlying startup error.
        #[from]
        source: skywatch_observer::startup::StartupError,
    },
}
