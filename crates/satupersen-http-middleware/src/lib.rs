//! HTTP middleware for Satupersen.

pub mod conditional;
pub mod modifications;

pub use conditional::{ConditionalResponse, Conditions, MaybeConditional};
pub use modifications::CheckResponseForModifications;
