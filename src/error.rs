//! Error types

use thiserror::Error;

/// Errors surfaced by the view-model builder, the listing accumulator and
/// the content sources.
#[derive(Debug, Error)]
pub enum Error {
    /// A raw document is missing a required field or carries an
    /// unparseable timestamp. Fatal for that single post render.
    #[error("Malformed document {}: {reason}", .uid.as_deref().unwrap_or("<no uid>"))]
    MalformedDocument {
        uid: Option<String>,
        reason: String,
    },

    /// `append_page` was called after the listing cursor ran out.
    #[error("No more pages: the listing cursor is exhausted")]
    NoMorePages,

    /// The content API has no document with this uid (or cursor).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network, server or decoding failure while talking to the content API.
    #[error("Fetch failed: {0}")]
    TransientFetch(String),

    /// Invalid configuration value or unreadable config file.
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn malformed(uid: Option<&str>, reason: impl Into<String>) -> Self {
        Error::MalformedDocument {
            uid: uid.map(str::to_string),
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::TransientFetch(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message() {
        let err = Error::malformed(Some("my-post"), "bad timestamp");
        assert_eq!(err.to_string(), "Malformed document my-post: bad timestamp");

        let err = Error::malformed(None, "missing uid");
        assert_eq!(err.to_string(), "Malformed document <no uid>: missing uid");
    }
}
