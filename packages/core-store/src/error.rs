//! Error types shared by every backing.

use std::io;
use std::path::PathBuf;

use crate::KeyError;

/// Errors raised by backings and the layers above them.
///
/// Key validation always happens before any storage access, so
/// `InvalidKey` never comes with side effects.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The key failed validation.
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: KeyError },

    /// Nothing is stored at the key, and it is not a container.
    #[error("key not found: {key}")]
    NotFound { key: String },

    /// The key names a container where a leaf was required.
    #[error("key is a container: {key}")]
    Container { key: String },

    /// The key holds a value where a container was required, either
    /// listed directly or as the ancestor of a key being stored.
    #[error("key holds a value, not a container: {key}")]
    Leaf { key: String },

    /// The backing can't perform this operation.
    #[error("operation not supported: {operation}")]
    Unsupported { operation: String },

    /// The configured store root is missing or is not a directory.
    #[error("store root {} is invalid: {source}", path.display())]
    RootInvalid {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Any other filesystem failure.
    #[error("i/o error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A value could not be serialized.
    #[error("encode error: {message}")]
    Encode { message: String },

    /// Stored bytes could not be deserialized.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// A fault that crossed the network and could not be mapped back onto
    /// one of the variants above, or a transport failure.
    #[error("remote fault ({code}): {message}")]
    RemoteFault { code: String, message: String },
}

impl Error {
    pub fn invalid_key(key: impl Into<String>, reason: KeyError) -> Self {
        Error::InvalidKey {
            key: key.into(),
            reason,
        }
    }

    pub fn not_found(key: impl ToString) -> Self {
        Error::NotFound {
            key: key.to_string(),
        }
    }

    pub fn container(key: impl ToString) -> Self {
        Error::Container {
            key: key.to_string(),
        }
    }

    pub fn leaf(key: impl ToString) -> Self {
        Error::Leaf {
            key: key.to_string(),
        }
    }

    pub fn unsupported(operation: impl Into<String>) -> Self {
        Error::Unsupported {
            operation: operation.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    pub fn is_invalid_key(&self) -> bool {
        matches!(self, Error::InvalidKey { .. })
    }
}
