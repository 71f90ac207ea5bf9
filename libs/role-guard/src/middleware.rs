//! Axum middleware applying the role decision to every routed request.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{MatchedPath, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;

use crate::config::RoleGuardConfig;
use crate::decision::{Decision, decide};
use crate::error::RoleGuardConfigError;
use crate::params::{RequestParams, is_form_urlencoded};
use crate::registry::RolePolicy;
use crate::response::deny_response;

#[derive(Debug)]
struct GuardSettings {
    enabled: bool,
    deny_message: String,
    deny_status: StatusCode,
    role_param: String,
    read_form_body: bool,
    form_body_limit_bytes: usize,
}

/// Shared state for [`role_guard_middleware`].
#[derive(Debug, Clone)]
pub struct RoleGuardState {
    policy: RolePolicy,
    settings: Arc<GuardSettings>,
}

impl RoleGuardState {
    /// # Errors
    /// Returns [`RoleGuardConfigError`] if the configuration is invalid.
    pub fn new(policy: RolePolicy, cfg: &RoleGuardConfig) -> Result<Self, RoleGuardConfigError> {
        cfg.validate()?;
        Ok(Self {
            policy,
            settings: Arc::new(GuardSettings {
                enabled: cfg.enabled,
                deny_message: cfg.deny_message.clone(),
                deny_status: cfg.deny_status()?,
                role_param: cfg.role_param.clone(),
                read_form_body: cfg.read_form_body,
                form_body_limit_bytes: cfg.form_body_limit_bytes,
            }),
        })
    }
}

/// Role guard middleware.
///
/// Must be installed with `Router::route_layer` (or `layer`) so that axum has
/// already resolved the [`MatchedPath`]. For each request:
/// 1. Looks up the handler declaration by method and matched route pattern
/// 2. Undeclared handlers run unconditionally; a matched route missing from the registry
///    (added outside [`crate::OperationBuilder`], nested under a prefix, or called with a
///    method it does not serve) is logged at `warn` and passed on to the router
/// 3. Declared handlers run only if [`decide`] allows; otherwise the fixed deny body is returned
pub async fn role_guard_middleware(
    State(state): State<RoleGuardState>,
    req: Request,
    next: Next,
) -> Response {
    if !state.settings.enabled {
        return next.run(req).await;
    }

    let method = req.method().clone();
    let Some(route) = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
    else {
        return next.run(req).await;
    };

    let Some(entry) = state.policy.lookup(&method, &route) else {
        tracing::warn!(
            method = %method,
            route = %route,
            "No handler declaration for matched route; passing through"
        );
        return next.run(req).await;
    };

    let Some(declaration) = entry.permission.as_ref() else {
        return next.run(req).await;
    };

    let (req, params) = if declaration.has_roles() {
        collect_params(req, &state.settings).await
    } else {
        (req, RequestParams::new())
    };

    match decide(Some(declaration), &params, &state.settings.role_param) {
        Decision::Allow => {
            tracing::debug!(
                method = %method,
                route = %route,
                operation_id = %entry.operation_id,
                "Role check passed"
            );
            next.run(req).await
        }
        Decision::Deny(reason) => {
            tracing::warn!(
                method = %method,
                route = %route,
                operation_id = %entry.operation_id,
                reason = reason.as_str(),
                detail = %reason,
                "Request denied by role guard"
            );
            deny_response(&state.settings.deny_message, state.settings.deny_status)
        }
    }
}

/// Gather query parameters and, when configured and still needed, url-encoded form parameters.
///
/// A form body that was read is put back on the request for the handler.
async fn collect_params(req: Request, settings: &GuardSettings) -> (Request, RequestParams) {
    let mut params = RequestParams::from_request(&req);

    let wants_body = settings.read_form_body
        && !params.contains(&settings.role_param)
        && is_form_urlencoded(&req);
    if !wants_body {
        return (req, params);
    }

    let declared_len = req
        .headers()
        .get(http::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    if declared_len.is_some_and(|len| len > settings.form_body_limit_bytes) {
        tracing::debug!(
            limit = settings.form_body_limit_bytes,
            "Form body exceeds inspection limit; not reading role from it"
        );
        return (req, params);
    }

    let (parts, body) = req.into_parts();
    match axum::body::to_bytes(body, settings.form_body_limit_bytes).await {
        Ok(bytes) => {
            params.extend_urlencoded(&bytes);
            (Request::from_parts(parts, Body::from(bytes)), params)
        }
        Err(e) => {
            // The body is gone; without a role parameter the request is denied anyway.
            tracing::debug!(error = %e, "Failed to read form body for role lookup");
            (Request::from_parts(parts, Body::empty()), params)
        }
    }
}
