//! Process bootstrap: logging, wiring, and the serve loop.
//!
//! The server stops on Ctrl-C, SIGTERM, or once `max_lifetime_secs` has
//! elapsed. In-flight requests then get `shutdown_grace_secs` to finish;
//! whatever is still running after that is dropped.

use std::future::{Future, IntoFuture};
use std::io;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::adapters::auth::JwtSessionValidator;
use crate::adapters::http::middleware::AuthState;
use crate::adapters::http::{build_router, CouponAppState};
use crate::adapters::memory::InMemoryCouponRepository;
use crate::config::{AppConfig, ConfigError, ServerConfig, ValidationError};

/// Failures that stop the service.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Server I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Server task failed: {0}")]
    Task(#[from] JoinError),
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides `server.log_level` when set. Production logs are JSON.
pub fn init_tracing(config: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Builds the service from validated config and serves until shutdown.
pub async fn run(config: AppConfig) -> Result<(), ServerError> {
    config.validate()?;
    let addr = config.server.socket_addr()?;

    let state = CouponAppState::new(Arc::new(InMemoryCouponRepository::new()));
    let validator: AuthState = Arc::new(JwtSessionValidator::from_secret(&config.auth.jwt_secret));
    let router = build_router(&config.server, state, validator)?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        environment = ?config.server.environment,
        "coupon service listening"
    );

    serve(
        listener,
        router,
        shutdown_signal(config.server.max_lifetime()),
        config.server.shutdown_grace(),
    )
    .await
}

/// Serves `router` until `shutdown` resolves, then drains for at most `grace`.
pub async fn serve<F>(
    listener: TcpListener,
    router: Router,
    shutdown: F,
    grace: Duration,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (draining_tx, draining_rx) = tokio::sync::oneshot::channel::<()>();

    let server = axum::serve(listener, router).with_graceful_shutdown(async move {
        shutdown.await;
        tracing::info!(grace_secs = grace.as_secs_f64(), "shutting down, draining requests");
        let _ = draining_tx.send(());
    });
    let mut server = tokio::spawn(server.into_future());

    tokio::select! {
        biased;
        result = &mut server => return Ok(result??),
        _ = draining_rx => {}
    }

    match tokio::time::timeout(grace, &mut server).await {
        Ok(result) => {
            result??;
            tracing::info!("server stopped");
            Ok(())
        }
        Err(_) => {
            tracing::warn!("grace period elapsed, dropping in-flight requests");
            server.abort();
            Ok(())
        }
    }
}

/// Resolves on Ctrl-C, SIGTERM, or after `max_lifetime`.
pub async fn shutdown_signal(max_lifetime: Duration) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl-C"),
        _ = terminate => tracing::info!("received SIGTERM"),
        _ = tokio::time::sleep(max_lifetime) => tracing::info!("maximum lifetime reached"),
    }
}
