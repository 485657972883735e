mod config;
mod validator;

pub use config::ValidatorConfig;
pub use validator::{ValidatedUrl, Validator, Verdict};
