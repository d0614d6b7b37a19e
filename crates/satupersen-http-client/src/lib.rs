//! HTTP client helpers for Satupersen.
//!
//! - [`ResponseSequence`] scripts the responses a fake transport hands out,
//!   one per request, in the order they were pushed.
//! - [`Factory`] builds the [`Response`] values those sequences carry.
//! - [`RequestError`] wraps a response the caller decided is a failure.

pub mod body;
pub mod error;
pub mod factory;
pub mod response;
pub mod sequence;

pub use body::Body;
pub use error::{HttpError, RequestError, Result};
pub use factory::Factory;
pub use response::Response;
pub use sequence::ResponseSequence;
