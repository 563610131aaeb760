//! Process wiring: database, migrations, modules and the HTTP stack.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use axum::body::Body;
use clients::ClientsModule;
use http::{HeaderName, Request, Response, StatusCode};
use identity::IdentityModule;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::field::Empty;
use tracing::{Span, info};

use crate::config::{AppConfig, DatabaseConfig, ServerConfig};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// # Errors
/// Fails if the database cannot be reached.
pub async fn connect_db(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_conns)
        .min_connections(cfg.min_conns)
        .sqlx_logging(false);

    let db = Database::connect(opts)
        .await
        .context("failed to connect to database")?;
    info!(backend = ?db.get_database_backend(), "Database connected");
    Ok(db)
}

/// Apply every module's migrations. Each module keeps its own bookkeeping
/// table, so the order only matters for readability.
///
/// # Errors
/// Propagates the first migration failure.
pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
    IdentityModule::migrate(db)
        .await
        .context("identity migrations failed")?;
    ClientsModule::migrate(db)
        .await
        .context("clients migrations failed")?;
    Ok(())
}

/// Initialize the modules on a migrated database and return the complete
/// router with middleware applied.
///
/// # Errors
/// Fails if a module rejects its configuration.
pub fn build_router(cfg: &AppConfig, db: DatabaseConnection) -> anyhow::Result<Router> {
    let identity = IdentityModule::init(&cfg.identity, db.clone())?;
    let clients = ClientsModule::init(&cfg.clients, db, identity.client())?;
    Ok(apply_middleware(clients.router(), &cfg.server))
}

/// Layers, innermost first: timeout, tracing, request id.
#[must_use]
pub fn apply_middleware(router: Router, cfg: &ServerConfig) -> Router {
    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(cfg.request_timeout_secs),
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request<Body>| {
                    let rid = req
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("n/a");

                    tracing::info_span!(
                        "http_request",
                        method = %req.method(),
                        uri = %req.uri().path(),
                        request_id = %rid,
                        status = Empty,
                        latency_ms = Empty,
                    )
                })
                .on_response(|res: &Response<Body>, latency: Duration, span: &Span| {
                    span.record("status", res.status().as_u16());
                    span.record("latency_ms", latency.as_millis());
                }),
        )
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
}

/// Bind and serve until Ctrl+C or SIGTERM.
///
/// # Errors
/// Fails if the address cannot be bound or the server stops with an error.
pub async fn serve(cfg: &ServerConfig, router: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = cfg
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address '{}'", cfg.bind_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "HTTP server bound");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

/// Connect, migrate, wire and serve.
///
/// # Errors
/// Any startup failure, or a fatal server error.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = connect_db(&cfg.database).await?;
    migrate(&db).await?;
    let router = build_router(&cfg, db)?;
    serve(&cfg.server, router).await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Graceful shutdown initiated");
}
