//! Error types for virtual scroll configuration.

/// Errors reported by [`VirtualScrollConfig::validate`](crate::VirtualScrollConfig::validate)
/// and by parsing scroll targets.
///
/// The engine itself never returns these from its imperative methods: an
/// invalid configuration is logged and sanitized instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A configuration field holds a value the engine cannot work with.
    #[error("invalid virtual scroll config: `{field}` {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// A scroll edge string was not one of `start`, `center`, `end`
    /// (optionally suffixed with `-force`).
    #[error("unknown scroll edge: {0}")]
    UnknownEdge(String),
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;
