use std::convert::Infallible;
use std::time::{Duration, SystemTime};

use bytes::Bytes;
use http::{Method, Request, Response, StatusCode};
use proptest::prelude::*;
use satupersen_http_middleware::{
    CheckResponseForModifications, ConditionalResponse, Conditions, MaybeConditional,
};

/// A handler result that tracks whether anyone asked it to evaluate validators.
#[derive(Debug, Default)]
struct Recording {
    checks: usize,
}

impl ConditionalResponse for Recording {
    fn check_not_modified(&mut self, _conditions: &Conditions) -> bool {
        self.checks += 1;
        false
    }
}

impl MaybeConditional for Recording {
    fn as_conditional(&mut self) -> Option<&mut dyn ConditionalResponse> {
        Some(self)
    }
}

/// A handler result that never opts into evaluation.
#[derive(Debug, PartialEq)]
struct Opaque(&'static str);

impl MaybeConditional for Opaque {}

fn resource(etag: &str, last_modified: SystemTime) -> Response<Bytes> {
    Response::builder()
        .status(StatusCode::OK)
        .header("ETag", etag)
        .header("Last-Modified", httpdate::fmt_http_date(last_modified))
        .header("Content-Type", "application/json")
        .header("Content-Length", "13")
        .header("Cache-Control", "max-age=60")
        .body(Bytes::from_static(b"{\"ok\":true}\r\n"))
        .unwrap()
}

#[test]
fn test_opaque_response_is_untouched() {
    satupersen_common_log::init_for_tests();

    let request = Request::get("/").header("If-None-Match", "*").body(()).unwrap();
    let response = CheckResponseForModifications::new()
        .handle(request, |_| Ok::<_, Infallible>(Opaque("as-is")))
        .unwrap();

    assert_eq!(response, Opaque("as-is"));
}

#[test]
fn test_custom_conditional_type_is_consulted_once() {
    let request = Request::get("/").body(()).unwrap();
    let response = CheckResponseForModifications::new()
        .handle(request, |_| Ok::<_, Infallible>(Recording::default()))
        .unwrap();

    assert_eq!(response.checks, 1);
}

#[test]
fn test_etag_match_produces_304() {
    satupersen_common_log::init_for_tests();

    let request = Request::get("/report")
        .header("If-None-Match", "\"other\", W/\"rev-3\"")
        .body(())
        .unwrap();

    let response = CheckResponseForModifications::new()
        .handle(request, |_| {
            Ok::<_, Infallible>(resource("\"rev-3\"", SystemTime::UNIX_EPOCH))
        })
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
    assert!(response.body().is_empty());
    for stripped in ["content-type", "content-length", "last-modified"] {
        assert!(response.headers().get(stripped).is_none(), "{} kept", stripped);
    }
    assert_eq!(response.headers().get("etag").unwrap(), "\"rev-3\"");
    assert_eq!(response.headers().get("cache-control").unwrap(), "max-age=60");
}

#[test]
fn test_stale_copy_gets_full_response() {
    let modified = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    let request = Request::get("/report")
        .header(
            "If-Modified-Since",
            httpdate::fmt_http_date(modified - Duration::from_secs(1)),
        )
        .body(())
        .unwrap();

    let response = CheckResponseForModifications::new()
        .handle(request, |_| Ok::<_, Infallible>(resource("\"rev-4\"", modified)))
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.body().as_ref(), b"{\"ok\":true}\r\n");
}

#[test]
fn test_head_request_is_evaluated() {
    let modified = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    let request = Request::head("/report")
        .header("If-Modified-Since", httpdate::fmt_http_date(modified))
        .body(())
        .unwrap();

    let response = CheckResponseForModifications::new()
        .handle(request, |_| {
            let mut res = resource("\"rev-5\"", modified);
            res.headers_mut().remove("etag");
            Ok::<_, Infallible>(res)
        })
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
}

proptest! {
    #[test]
    fn test_only_safe_methods_get_304(
        method in prop::sample::select(vec![
            Method::GET, Method::HEAD, Method::POST, Method::PUT, Method::DELETE, Method::PATCH,
        ])
    ) {
        let request = Request::builder()
            .method(method.clone())
            .uri("/report")
            .header("If-None-Match", "\"rev-6\"")
            .body(())
            .unwrap();

        let response = CheckResponseForModifications::new()
            .handle(request, |_| Ok::<_, Infallible>(resource("\"rev-6\"", SystemTime::UNIX_EPOCH)))
            .unwrap();

        let safe = method == Method::GET || method == Method::HEAD;
        prop_assert_eq!(response.status() == StatusCode::NOT_MODIFIED, safe);
    }
}
