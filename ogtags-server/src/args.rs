use clap::Args;
use ipnet::IpNet;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// Overrides applied on top of the defaults and the config file.
#[derive(Debug, Args, Clone, Default)]
pub struct PolicyArgs {
    /// Overall fetch budget in milliseconds.
    #[arg(long)]
    pub timeout_ms: Option<u64>,
    #[arg(long)]
    pub dns_timeout_ms: Option<u64>,
    #[arg(long)]
    pub max_redirects: Option<usize>,
    #[arg(long)]
    pub max_response_bytes: Option<usize>,
    /// Follow redirects without validating each target.
    #[arg(long)]
    pub no_revalidate_redirects: bool,
    /// Let the HTTP client resolve hostnames again instead of connecting to the validated addresses.
    #[arg(long)]
    pub no_pin_dns: bool,
    /// Exempt a network from address classification. Repeatable.
    #[arg(long = "allow-network", value_name = "CIDR")]
    pub allow_networks: Vec<IpNet>,
}
