use std::net::SocketAddr;
use std::path::Path;

use ogtags_core::Validator;
use ogtags_fetch::OgFetcher;
use ogtags_server::AppState;
use tracing::{error, info, warn};

use crate::cmd::config::build_service_config;
use crate::exit_codes;
use crate::PolicyArgs;

pub async fn serve_cmd(listen: Option<SocketAddr>, config: Option<&Path>, policy: &PolicyArgs) -> i32 {
    let mut cfg = match build_service_config(config, policy) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("{e}");
            return exit_codes::RUNTIME_ERROR;
        }
    };
    if let Some(addr) = listen {
        cfg.listen = addr;
    }
    if !cfg.fetch.revalidate_redirects {
        warn!("redirect targets will not be validated");
    }
    if !cfg.fetch.pin_resolved_addrs {
        warn!("DNS pinning disabled; fetches re-resolve validated hostnames");
    }
    if !cfg.validator.allowed_networks.is_empty() {
        warn!(networks = ?cfg.validator.allowed_networks, "address classification exemptions active");
    }

    let fetcher = match OgFetcher::new(Validator::new(cfg.validator), cfg.fetch) {
        Ok(f) => f,
        Err(e) => {
            error!("{e}");
            return exit_codes::RUNTIME_ERROR;
        }
    };

    let listener = match tokio::net::TcpListener::bind(cfg.listen).await {
        Ok(l) => l,
        Err(e) => {
            error!("failed to bind {}: {e}", cfg.listen);
            return exit_codes::RUNTIME_ERROR;
        }
    };
    info!("listening on {}", cfg.listen);

    let app = ogtags_server::app(AppState::new(fetcher));
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("server error: {e}");
        return exit_codes::RUNTIME_ERROR;
    }
    info!("shut down");
    exit_codes::SUCCESS
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
