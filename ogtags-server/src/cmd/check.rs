use std::path::Path;

use ogtags_core::Validator;

use crate::cmd::config::build_service_config;
use crate::exit_codes;
use crate::output::{print_error, print_report, CheckReport};
use crate::{OutputArgs, PolicyArgs};

/// Runs the validator alone: resolves and classifies, never fetches.
pub async fn check_cmd(url: &str, config: Option<&Path>, policy: &PolicyArgs, output: &OutputArgs) -> i32 {
    let cfg = match build_service_config(config, policy) {
        Ok(cfg) => cfg,
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::RUNTIME_ERROR;
        }
    };

    let (report, code) = match Validator::new(cfg.validator).validate(url).await {
        Ok(v) => (
            CheckReport {
                allowed: true,
                url: v.url.to_string(),
                addrs: v.addrs.iter().map(|ip| ip.to_string()).collect(),
                host: Some(v.host),
                port: v.port,
                reason: None,
            },
            exit_codes::SUCCESS,
        ),
        Err(reason) => (
            CheckReport {
                allowed: false,
                url: url.to_string(),
                host: None,
                port: None,
                addrs: vec![],
                reason: Some(reason.to_string()),
            },
            exit_codes::VALIDATION_FAILED,
        ),
    };
    print_report(output.format, output.quiet, &report);
    code
}
