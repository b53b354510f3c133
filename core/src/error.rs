//! Error types for the JSONPlaceholder client.
//!
//! # Design
//! `NotFound` gets a dedicated variant so callers can tell "the resource does
//! not exist" apart from "the server returned an unexpected status." Absence
//! that the API models as a normal outcome (unknown user id, no username
//! match, a user without posts) never reaches this type; it is returned as
//! `None` or an empty `Vec` instead.

/// Errors returned by `PlaceholderClient`, `Transport` and `JsonPlaceholderApi`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404 for a resource that was expected to exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status the operation does not accept.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// An update was requested for a user record that carries no id.
    #[error("user record has no id")]
    MissingId,

    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("transport failed: {0}")]
    Transport(String),

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
