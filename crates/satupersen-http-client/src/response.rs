//! Client-side HTTP response values.

use std::borrow::Cow;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{HttpError, RequestError, Result};

/// A fully buffered HTTP response.
///
/// Built by [`crate::Factory`] for fakes, or captured from a live
/// `reqwest::Response` with [`Response::from_reqwest`].
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    /// Create a response from its parts.
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Buffer a live response.
    pub async fn from_reqwest(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        tracing::debug!(status = status.as_u16(), len = body.len(), "buffered response");
        Ok(Self {
            status,
            headers,
            body,
        })
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// First value of the named header, if it is present and visible ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(HttpError::JsonDecode)
    }

    /// Status is exactly 200.
    pub fn ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    pub fn successful(&self) -> bool {
        self.status.is_success()
    }

    pub fn redirect(&self) -> bool {
        self.status.is_redirection()
    }

    pub fn client_error(&self) -> bool {
        self.status.is_client_error()
    }

    pub fn server_error(&self) -> bool {
        self.status.is_server_error()
    }

    /// A client or server error.
    pub fn failed(&self) -> bool {
        self.client_error() || self.server_error()
    }

    /// Hand the response back, or wrap it in a [`RequestError`] when it failed.
    pub fn error_for_status(self) -> std::result::Result<Self, RequestError> {
        if self.failed() {
            tracing::debug!(status = self.status.as_u16(), "response failed");
            return Err(RequestError::new(self));
        }

        Ok(self)
    }
}
