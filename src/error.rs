use thiserror::Error;

/// Result alias for `reciprocal`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the clustering engine and its collaborators.
#[derive(Debug, Error)]
pub enum Error {
    /// Input was empty.
    #[error("empty input provided")]
    EmptyInput,

    /// A best-match search needs at least one candidate besides the item itself.
    #[error("at least 2 items are required for best-match clustering, found {found}")]
    TooFewItems {
        /// Number of items supplied.
        found: usize,
    },

    /// Two items share an identifier.
    #[error("duplicate item id {id}")]
    DuplicateId {
        /// The repeated identifier.
        id: u64,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: String,
    },

    /// A dataset row could not be parsed.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// The abstract source has nothing for this identifier.
    #[error("no abstract found for id {id}")]
    MissingAbstract {
        /// The identifier that was requested.
        id: u64,
    },

    /// Dataset file I/O.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
