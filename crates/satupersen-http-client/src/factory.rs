//! Builds fake responses.

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;

use crate::error::{HttpError, Result};
use crate::response::Response;
use crate::sequence::ResponseSequence;

/// Entry point for building fake responses and sequences.
#[derive(Debug, Clone, Copy, Default)]
pub struct Factory;

impl Factory {
    /// Build a response from a body, status code and headers.
    ///
    /// A header name given more than once keeps every value, in order.
    pub fn response(
        body: impl Into<Bytes>,
        status: u16,
        headers: &[(&str, &str)],
    ) -> Result<Response> {
        let status = StatusCode::from_u16(status).map_err(|_| HttpError::InvalidStatus(status))?;

        let mut map = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers {
            let invalid = || HttpError::InvalidHeader {
                name: name.to_string(),
            };
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
            let value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            map.append(name, value);
        }

        Ok(Response::new(status, map, body))
    }

    /// Start an empty response sequence.
    pub fn sequence() -> ResponseSequence {
        ResponseSequence::default()
    }
}
