//! # Domain Layer
//!
//! Error taxonomy and the closed set of node methods.

pub mod errors;
pub mod method;

pub use errors::{ClientError, RpcCode, RpcError, TranslationError, TranslationErrorKind};
pub use method::RpcMethod;
