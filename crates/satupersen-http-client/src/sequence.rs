//! Scripted response sequences.
//!
//! A [`ResponseSequence`] stands in for a real transport in tests: every
//! simulated request takes the response at the front of the queue. Responses
//! come back in the order they were added, whichever `push*` method added
//! them.

use std::collections::VecDeque;
use std::path::Path;

use bytes::Bytes;

use crate::body::Body;
use crate::error::{HttpError, Result};
use crate::factory::Factory;
use crate::response::Response;

/// FIFO queue of canned responses.
///
/// By default, asking an empty sequence for a response is an error, so a
/// test that makes more requests than it scripted fails loudly. Call
/// [`dont_fail_when_empty`](Self::dont_fail_when_empty) to get `Ok(None)`
/// instead.
///
/// The sequence is not synchronized; wrap it in a `Mutex` to share it
/// across threads.
#[derive(Debug, Clone)]
pub struct ResponseSequence<R = Response> {
    responses: VecDeque<R>,
    fail_when_empty: bool,
}

impl<R> ResponseSequence<R> {
    /// Create a sequence that hands out `responses` in iteration order.
    pub fn new(responses: impl IntoIterator<Item = R>) -> Self {
        Self {
            responses: responses.into_iter().collect(),
            fail_when_empty: true,
        }
    }

    /// Append an already built response.
    pub fn push_response(&mut self, response: R) -> &mut Self {
        self.responses.push_back(response);
        tracing::trace!(remaining = self.responses.len(), "pushed response");
        self
    }

    /// Return `Ok(None)` instead of failing once the sequence runs dry.
    ///
    /// There is no way to turn failing back on.
    pub fn dont_fail_when_empty(&mut self) -> &mut Self {
        self.fail_when_empty = false;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    /// Take the next response.
    ///
    /// # Errors
    ///
    /// [`HttpError::EmptySequence`] when nothing is left and the sequence
    /// has not been told to [`dont_fail_when_empty`](Self::dont_fail_when_empty).
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Option<R>> {
        match self.responses.pop_front() {
            Some(response) => {
                tracing::debug!(remaining = self.responses.len(), "serving scripted response");
                Ok(Some(response))
            }
            None if self.fail_when_empty => {
                tracing::debug!("response sequence exhausted");
                Err(HttpError::EmptySequence)
            }
            None => Ok(None),
        }
    }
}

impl<R: From<Response>> ResponseSequence<R> {
    /// Append a response built from `body`, `status` and `headers`.
    ///
    /// [`Body::Json`] values are encoded to JSON text first.
    pub fn push(
        &mut self,
        body: impl Into<Body>,
        status: u16,
        headers: &[(&str, &str)],
    ) -> Result<&mut Self> {
        let body = body.into().into_bytes().map_err(HttpError::JsonEncode)?;
        let response = Factory::response(body, status, headers)?;
        Ok(self.push_response(R::from(response)))
    }

    /// Append a response with an empty body.
    pub fn push_status(&mut self, status: u16, headers: &[(&str, &str)]) -> Result<&mut Self> {
        self.push(Bytes::new(), status, headers)
    }

    /// Append a response whose body is the whole file at `path`.
    ///
    /// The file is read immediately, with a blocking read. Read failures
    /// come back as [`HttpError::Io`] wrapping the original error.
    pub fn push_file(
        &mut self,
        path: impl AsRef<Path>,
        status: u16,
        headers: &[(&str, &str)],
    ) -> Result<&mut Self> {
        let path = path.as_ref();
        let contents = std::fs::read(path)?;
        tracing::trace!(path = %path.display(), len = contents.len(), "read response body from file");
        self.push(contents, status, headers)
    }
}

impl<R> Default for ResponseSequence<R> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<R> Extend<R> for ResponseSequence<R> {
    fn extend<I: IntoIterator<Item = R>>(&mut self, iter: I) {
        for response in iter {
            self.push_response(response);
        }
    }
}

impl<R> FromIterator<R> for ResponseSequence<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::new(iter)
    }
}
