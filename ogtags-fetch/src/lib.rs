#![forbid(unsafe_code)]

//! Fetches a page behind the URL validator and extracts its Open Graph tags.

pub mod client;
mod config;
mod decode;
mod error;
mod pipeline;

pub use crate::client::{HttpClient, HttpError, HttpRequestParts, HttpResponseParts, ReqwestHttpClient};
pub use crate::config::{FetchConfig, DEFAULT_USER_AGENT};
pub use crate::decode::decode_html;
pub use crate::error::FetchError;
pub use crate::pipeline::{OgFetcher, OgPage};
