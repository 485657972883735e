use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP service.
    Serve {
        #[arg(long, env = "OGTAGS_LISTEN")]
        listen: Option<SocketAddr>,
        /// JSON or YAML config file.
        #[arg(long, env = "OGTAGS_CONFIG")]
        config: Option<PathBuf>,
        #[command(flatten)]
        policy: PolicyArgs,
    },
    /// Run the URL validator only and print its verdict.
    Check {
        url: String,
        #[arg(long, env = "OGTAGS_CONFIG")]
        config: Option<PathBuf>,
        #[command(flatten)]
        policy: PolicyArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}
