#![forbid(unsafe_code)]

//! SSRF-safe URL validation and Open Graph extraction.
//!
//! The HTTP fetch lives in `ogtags-fetch`; this crate only decides whether a
//! URL may be fetched and turns an HTML body into a tag map.

pub mod address;
pub mod error;
pub mod extract;
pub mod resolve;
pub mod validate;

pub use crate::address::{classify_ip, AddressClass};
pub use crate::error::{DenyReason, InternalRule};
pub use crate::extract::{extract_og_tags, OgTags, OG_PREFIX};
pub use crate::resolve::{Resolve, StaticResolver, SystemResolver};
pub use crate::validate::{ValidatedUrl, Validator, ValidatorConfig, Verdict};
