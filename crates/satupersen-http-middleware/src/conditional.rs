//! Conditional GET evaluation.
//!
//! A response that knows its own validators (`ETag`, `Last-Modified`) can
//! compare them against the request's `If-None-Match` / `If-Modified-Since`
//! and shrink itself to a `304 Not Modified`.

use std::time::SystemTime;

use http::header::{HeaderMap, ETAG, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED};
use http::{Method, Request, Response, StatusCode};

/// Headers a 304 must not carry.
const NOT_MODIFIED_STRIPPED: [&str; 7] = [
    "allow",
    "content-encoding",
    "content-language",
    "content-length",
    "content-md5",
    "content-type",
    "last-modified",
];

/// Cache validators captured from a request.
#[derive(Debug, Clone, Default)]
pub struct Conditions {
    method: Method,
    etags: Vec<String>,
    if_modified_since: Option<String>,
}

impl Conditions {
    pub fn from_request<B>(request: &Request<B>) -> Self {
        Self::from_parts(request.method(), request.headers())
    }

    pub fn from_parts(method: &Method, headers: &HeaderMap) -> Self {
        let etags = headers
            .get_all(IF_NONE_MATCH)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(','))
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();

        let if_modified_since = headers
            .get(IF_MODIFIED_SINCE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Self {
            method: method.clone(),
            etags,
            if_modified_since,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Only GET and HEAD responses may be answered with a 304.
    pub fn is_cacheable(&self) -> bool {
        self.method == Method::GET || self.method == Method::HEAD
    }

    /// Entity tags from `If-None-Match`, in header order.
    pub fn etags(&self) -> &[String] {
        &self.etags
    }

    /// `If-Modified-Since`, when present and a valid HTTP date.
    pub fn if_modified_since(&self) -> Option<SystemTime> {
        self.if_modified_since
            .as_deref()
            .and_then(|v| httpdate::parse_http_date(v).ok())
    }
}

/// A response that can evaluate itself against request validators.
pub trait ConditionalResponse {
    /// Turn the response into a 304 in place when the validators match.
    ///
    /// Returns whether the response is now not-modified.
    fn check_not_modified(&mut self, conditions: &Conditions) -> bool;
}

/// Anything a handler may return.
///
/// Types that can do conditional evaluation hand out a
/// [`ConditionalResponse`]; everything else keeps the default and passes
/// through middleware untouched.
pub trait MaybeConditional {
    fn as_conditional(&mut self) -> Option<&mut dyn ConditionalResponse> {
        None
    }
}

impl<B: Default> ConditionalResponse for Response<B> {
    fn check_not_modified(&mut self, conditions: &Conditions) -> bool {
        if !conditions.is_cacheable() {
            return false;
        }

        let etag = self.headers().get(ETAG).and_then(|v| v.to_str().ok());

        // Dates only count when there is no entity tag pair to compare.
        let not_modified = match etag {
            Some(etag) if !conditions.etags().is_empty() => etag_matches(etag, conditions.etags()),
            _ => match (conditions.if_modified_since(), last_modified(self.headers())) {
                (Some(since), Some(modified)) => since >= modified,
                _ => false,
            },
        };

        if not_modified {
            tracing::debug!(method = %conditions.method(), "validators match, sending 304");
            mark_not_modified(self);
        }

        not_modified
    }
}

impl<B: Default> MaybeConditional for Response<B> {
    fn as_conditional(&mut self) -> Option<&mut dyn ConditionalResponse> {
        Some(self)
    }
}

impl MaybeConditional for String {}

impl MaybeConditional for &'static str {}

impl MaybeConditional for Vec<u8> {}

fn strip_weak(tag: &str) -> &str {
    tag.strip_prefix("W/").unwrap_or(tag)
}

fn etag_matches(etag: &str, candidates: &[String]) -> bool {
    let etag = strip_weak(etag);
    candidates
        .iter()
        .any(|candidate| candidate == "*" || strip_weak(candidate) == etag)
}

fn last_modified(headers: &HeaderMap) -> Option<SystemTime> {
    headers
        .get(LAST_MODIFIED)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| httpdate::parse_http_date(v).ok())
}

fn mark_not_modified<B: Default>(response: &mut Response<B>) {
    *response.status_mut() = StatusCode::NOT_MODIFIED;
    *response.body_mut() = B::default();

    let headers = response.headers_mut();
    for name in NOT_MODIFIED_STRIPPED {
        headers.remove(name);
    }
}
