use clap::Parser;

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod output;

pub use args::*;
use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "ogtags", version, about = "Open Graph tag service with SSRF protection")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    ogtags_server::logging::init_logging();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli.command));
    std::process::exit(exit_code);
}

async fn run_command(command: Command) -> i32 {
    match command {
        Command::Serve { listen, config, policy } => {
            cmd::serve::serve_cmd(listen, config.as_deref(), &policy).await
        }
        Command::Check {
            url,
            config,
            policy,
            output,
        } => cmd::check::check_cmd(&url, config.as_deref(), &policy, &output).await,
    }
}
