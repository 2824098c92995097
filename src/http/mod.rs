//! HTTP request wrappers
//!
//! [`HttpClient`] returns body text or an [`HttpError`]; [`ApiClient`]
//! prefixes a base URL and folds every outcome into a
//! [`ResponseMsg`](crate::response::ResponseMsg).

pub mod api;
pub mod client;
pub mod error;

pub use api::ApiClient;
pub use client::HttpClient;
pub use error::HttpError;
