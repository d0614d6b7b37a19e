//! Middleware that answers conditional GETs with `304 Not Modified`.

use http::Request;

use crate::conditional::{Conditions, MaybeConditional};

/// Runs the rest of the pipeline, then lets the response compare itself
/// with the request's cache validators.
///
/// The response returned is the one `next` produced, possibly reduced to a
/// 304 in place. Errors from `next` are returned as they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckResponseForModifications;

impl CheckResponseForModifications {
    pub fn new() -> Self {
        Self
    }

    /// Handle an incoming request.
    pub fn handle<B, R, E, F>(&self, request: Request<B>, next: F) -> Result<R, E>
    where
        F: FnOnce(Request<B>) -> Result<R, E>,
        R: MaybeConditional,
    {
        let conditions = Conditions::from_request(&request);
        let mut response = next(request)?;

        if let Some(conditional) = response.as_conditional() {
            conditional.check_not_modified(&conditions);
        }

        Ok(response)
    }
}
