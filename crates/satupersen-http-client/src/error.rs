//! Error types for the HTTP client helpers.

use std::io;

use crate::response::Response;

/// HTTP helper errors.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// A sequence was asked for a response after running dry.
    #[error("A request was made, but the response sequence is empty.")]
    EmptySequence,

    /// Status code outside `100..=999`.
    #[error("invalid status code: {0}")]
    InvalidStatus(u16),

    /// Header name or value that cannot go on the wire.
    #[error("invalid header {name:?}")]
    InvalidHeader { name: String },

    /// A structured body could not be turned into JSON text.
    #[error("failed to encode JSON body: {0}")]
    JsonEncode(#[source] serde_json::Error),

    /// A response body is not the JSON the caller asked for.
    #[error("failed to decode JSON body: {0}")]
    JsonDecode(#[source] serde_json::Error),

    /// Reading a body from disk failed; the original error is kept as is.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The underlying client failed to complete a live request.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Result type alias using [`HttpError`].
pub type Result<T> = std::result::Result<T, HttpError>;

/// A request completed, but its response is one the caller treats as failed.
///
/// Nothing in this crate decides what counts as a failure; callers build
/// this themselves or go through [`Response::error_for_status`].
#[derive(Debug, thiserror::Error)]
#[error("HTTP request returned status code {}", .response.status().as_u16())]
pub struct RequestError {
    response: Response,
}

impl RequestError {
    /// Wrap the response that triggered the failure.
    pub fn new(response: Response) -> Self {
        Self { response }
    }

    /// The response that triggered the failure.
    pub fn response(&self) -> &Response {
        &self.response
    }

    /// Take the response back out.
    pub fn into_response(self) -> Response {
        self.response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Factory;

    #[test]
    fn test_request_error_carries_response() {
        let response = Factory::response("gone", 410, &[("X-Trace", "abc")]).unwrap();
        let error = RequestError::new(response);

        assert_eq!(error.response().status().as_u16(), 410);
        assert_eq!(error.response().header("x-trace"), Some("abc"));
        assert_eq!(error.to_string(), "HTTP request returned status code 410");
        assert_eq!(error.into_response().text(), "gone");
    }

    #[test]
    fn test_empty_sequence_message() {
        assert_eq!(
            HttpError::EmptySequence.to_string(),
            "A request was made, but the response sequence is empty."
        );
    }

    #[test]
    fn test_json_errors_name_their_direction() {
        let source = || serde_json::from_str::<u8>("x").unwrap_err();

        let encode = HttpError::JsonEncode(source()).to_string();
        let decode = HttpError::JsonDecode(source()).to_string();
        assert!(encode.starts_with("failed to encode JSON body: "), "{}", encode);
        assert!(decode.starts_with("failed to decode JSON body: "), "{}", decode);
    }

    #[test]
    fn test_io_error_is_transparent() {
        let error = HttpError::from(io::Error::new(io::ErrorKind::NotFound, "no such file"));
        assert_eq!(error.to_string(), "no such file");
    }
}
