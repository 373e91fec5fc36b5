use thiserror::Error;

use crate::transport::TransportError;

/// Exit status for argument errors, including offsets past the end of the feed.
pub const EXIT_USAGE: i32 = 1;
/// Exit status when the request itself failed.
pub const EXIT_TRANSPORT: i32 = 2;
/// Exit status when the feed could not be turned into entries.
pub const EXIT_FEED: i32 = 3;
/// Exit status for a broken environment configuration.
pub const EXIT_CONFIG: i32 = 4;

/// Why the argument list was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    #[error("unknown option {0}")]
    UnknownOption(String),

    #[error("{0} is an invalid argument for -b, --back")]
    InvalidBack(String),

    #[error("{0} is out of integer range")]
    BackOutOfRange(String),

    #[error("Invalid argument {0} for -b, --back. Specified value must be positive")]
    NegativeBack(String),
}

/// Why the retrieved feed could not be turned into entries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("Feed parsing failed: {0}")]
    Parse(String),

    #[error("Feed item {index} has no <{field}>")]
    MissingField { index: usize, field: &'static str },

    #[error("Feed item {index} has no image in its description")]
    MissingImage { index: usize },

    #[error("Feed item {index} image has no {attribute} attribute")]
    MissingImageAttribute {
        index: usize,
        attribute: &'static str,
    },
}

#[derive(Error, Debug)]
pub enum XkcdError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Argument errors
    #[error(transparent)]
    Args(#[from] ArgError),

    #[error("Can only go back at most {max} strips, not {requested} strips")]
    TooFarBack { max: usize, requested: u32 },

    // Network errors
    #[error("transport error {code}: {reason}")]
    Transport { code: i32, reason: String },

    // Feed errors
    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error("Couldn't find any one-liners in RSS feed!")]
    NoEntries,

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl XkcdError {
    /// Process exit status for this error class.
    pub fn exit_code(&self) -> i32 {
        match self {
            XkcdError::Args(_) | XkcdError::TooFarBack { .. } | XkcdError::Io(_) => EXIT_USAGE,
            XkcdError::Transport { .. } => EXIT_TRANSPORT,
            XkcdError::Feed(_) | XkcdError::NoEntries => EXIT_FEED,
            XkcdError::Config(_) => EXIT_CONFIG,
        }
    }
}

impl From<TransportError> for XkcdError {
    fn from(err: TransportError) -> Self {
        XkcdError::Transport {
            code: err.code().as_i32(),
            reason: err.diagnostic().to_string(),
        }
    }
}

pub type XkcdResult<T> = Result<T, XkcdError>;
