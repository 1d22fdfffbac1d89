// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Config(String),
}

/// Failures reported by the adaptive-streaming engine.
///
/// Only [`StreamError::Network`] is recovered automatically; every other
/// variant leaves the session unplayable until a new source is selected.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamError {
    /// Manifest or segment fetch failed (transient).
    Network(String),

    /// The media pipeline could not decode or buffer the stream.
    Media(String),

    /// Key system / license negotiation failed.
    KeySystem(String),

    /// Transmuxing the stream into a playable container failed.
    Mux(String),

    /// Any other engine failure.
    Other(String),
}

impl StreamError {
    /// Returns true if the session recovers from this error on its own.
    pub fn is_transient(&self) -> bool {
        matches!(self, StreamError::Network(_))
    }

    /// Short machine-readable category, used by diagnostics.
    pub fn kind_key(&self) -> &'static str {
        match self {
            StreamError::Network(_) => "network",
            StreamError::Media(_) => "media",
            StreamError::KeySystem(_) => "key_system",
            StreamError::Mux(_) => "mux",
            StreamError::Other(_) => "other",
        }
    }

    /// Returns the engine-provided details.
    pub fn details(&self) -> &str {
        match self {
            StreamError::Network(msg)
            | StreamError::Media(msg)
            | StreamError::KeySystem(msg)
            | StreamError::Mux(msg)
            | StreamError::Other(msg) => msg,
        }
    }
}

/// Rejections of asynchronous commands issued to the playback element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementError {
    /// The runtime refused the command (e.g. autoplay policy).
    NotAllowed(String),

    /// The command was interrupted by a later one (e.g. play() then pause()).
    Aborted,

    /// The element does not support the requested capability.
    Unsupported,
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::Network(msg) => write!(f, "Network error: {}", msg),
            StreamError::Media(msg) => write!(f, "Media error: {}", msg),
            StreamError::KeySystem(msg) => write!(f, "Key system error: {}", msg),
            StreamError::Mux(msg) => write!(f, "Mux error: {}", msg),
            StreamError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for ElementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementError::NotAllowed(msg) => write!(f, "Command not allowed: {}", msg),
            ElementError::Aborted => write!(f, "Command aborted"),
            ElementError::Unsupported => write!(f, "Capability not supported"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
