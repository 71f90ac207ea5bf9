//! Composition root for the demo services.
//!
//! Connects the database, walks every registered module through
//! `migrate` -> `init` -> `register_rest`, freezes the collected permission
//! declarations and wraps the router in the HTTP middleware stack.

pub mod config;
pub mod registered_modules;

use std::time::Duration;

use anyhow::Context;
use axum::Router;
use axum::middleware::from_fn_with_state;
use demo_kit::{ModuleCtx, ModuleEntry, connect_db};
use http::HeaderName;
use role_guard::{PermissionRegistry, RoleGuardState, role_guard_middleware};
use sea_orm::DatabaseConnection;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::field::Empty;

use crate::config::{AppConfig, ServerConfig};
use crate::registered_modules::registered_modules;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the full application over `db` from the given modules.
///
/// # Errors
/// Fails when a module fails to migrate, initialize or register its routes,
/// when two handlers claim the same route or operation id, or when the role
/// guard configuration is invalid.
pub async fn build_router(
    cfg: &AppConfig,
    db: &DatabaseConnection,
    modules: &[ModuleEntry],
) -> anyhow::Result<Router> {
    for name in cfg.modules.keys() {
        if !modules.iter().any(|m| m.name() == name) {
            tracing::warn!(module = %name, "Config section for unknown module is ignored");
        }
    }

    for entry in modules {
        entry
            .db
            .migrate(db)
            .await
            .with_context(|| format!("migration of module '{}' failed", entry.name()))?;
    }

    for entry in modules {
        let ctx = ModuleCtx::new(entry.name(), db.clone(), cfg.module_config(entry.name()));
        entry
            .module
            .init(&ctx)
            .await
            .with_context(|| format!("init of module '{}' failed", entry.name()))?;
    }

    let registry = PermissionRegistry::new();
    let mut router = Router::new();
    for entry in modules {
        router = entry
            .rest
            .register_rest(router, &registry)
            .with_context(|| format!("route registration of module '{}' failed", entry.name()))?;
    }

    let policy = registry.freeze()?;
    let guard = RoleGuardState::new(policy, &cfg.role_guard)?;
    if !cfg.role_guard.enabled {
        tracing::warn!("Role guard is DISABLED: permission declarations are not enforced");
    }

    // `route_layer` panics on a router without routes.
    if !registry.is_empty() {
        router = router.route_layer(from_fn_with_state(guard, role_guard_middleware));
    }

    Ok(apply_middleware_stack(router, &cfg.server))
}

/// Wrap the routed app in request-id, tracing and timeout layers.
///
/// Execution order (outermost first): `SetRequestId` -> `PropagateRequestId`
/// -> `Trace` -> `Timeout` -> role guard -> handler. Layers are added in reverse.
fn apply_middleware_stack(mut router: Router, server: &ServerConfig) -> Router {
    router = router.layer(TimeoutLayer::with_status_code(
        http::StatusCode::GATEWAY_TIMEOUT,
        Duration::from_secs(server.request_timeout_secs),
    ));

    router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &http::Request<axum::body::Body>| {
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
            .on_response(
                |res: &http::Response<axum::body::Body>,
                 latency: Duration,
                 span: &tracing::Span| {
                    span.record("status", res.status().as_u16());
                    span.record("latency_ms", latency.as_millis());
                },
            ),
    );

    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
    router.layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
}

/// Connect, build and serve until Ctrl-C or SIGTERM.
///
/// # Errors
/// Fails on database, module, bind or server errors.
pub async fn run(cfg: &AppConfig) -> anyhow::Result<()> {
    let addr = cfg.bind_addr()?;
    let db = connect_db(&cfg.database).await?;
    let modules = registered_modules();
    let router = build_router(cfg, &db, &modules).await?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server bound on {addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    if let Err(e) = db.close().await {
        tracing::warn!(error = %e, "Failed to close database cleanly");
    }
    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
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
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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
    tracing::info!("HTTP server shutting down gracefully");
}
