//! Error types for the console binary.
//!
//! [`ConsoleError`] is the top-level error that `main` propagates with `?`.

/// Top-level error for the console binary.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: fizzbuzz_core::config::ConfigError,
    },

    /// Reading commands or writing output failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// A snapshot could not be serialized.
    #[error("JSON error: {source}")]
    Json {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },

    /// The renderer task panicked or was cancelled.
    #[error("renderer task failed: {source}")]
    Task {
        /// The underlying join error.
        #[from]
        source: tokio::task::JoinError,
    },
}
