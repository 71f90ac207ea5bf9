#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for the role guard middleware
//!
//! These tests verify that:
//! 1. Undeclared handlers are always reachable
//! 2. Declared handlers run only for permitted roles
//! 3. Denied requests get the fixed JSON body and never reach the handler
//! 4. Missing and malformed roles are denied

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use axum::{
    Extension, Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
    middleware::from_fn_with_state,
    routing::get as get_route,
};
use role_guard::{
    OperationBuilder, PermissionDeclaration, PermissionRegistry, RoleGuardConfig, RoleGuardState,
    deny_body, role_guard_middleware,
};
use tower::ServiceExt;
use tracing_test::traced_test;

#[derive(Clone, Default)]
struct Hits(Arc<AtomicUsize>);

impl Hits {
    fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

async fn counted(Extension(hits): Extension<Hits>) -> &'static str {
    hits.0.fetch_add(1, Ordering::SeqCst);
    "handled"
}

async fn echo_body(Extension(hits): Extension<Hits>, body: String) -> String {
    hits.0.fetch_add(1, Ordering::SeqCst);
    body
}

fn build_app(cfg: &RoleGuardConfig, hits: &Hits) -> Router {
    let registry = PermissionRegistry::new();

    let router = OperationBuilder::get("/tests/v1/staff")
        .operation_id("tests.staff")
        .permission(PermissionDeclaration::roles([2, 3, 4]))
        .handler(counted)
        .register(Router::new(), &registry)
        .unwrap();

    let router = OperationBuilder::get("/tests/v1/locked")
        .operation_id("tests.locked")
        .permission(PermissionDeclaration::deny_all())
        .handler(counted)
        .register(router, &registry)
        .unwrap();

    let router = OperationBuilder::get("/tests/v1/open")
        .operation_id("tests.open")
        .handler(counted)
        .register(router, &registry)
        .unwrap();

    let router = OperationBuilder::get("/tests/v1/staff/{id}")
        .operation_id("tests.staff_member")
        .permission(PermissionDeclaration::roles([2]))
        .handler(counted)
        .register(router, &registry)
        .unwrap();

    let router = OperationBuilder::post("/tests/v1/forms")
        .operation_id("tests.forms")
        .permission(PermissionDeclaration::roles([3]))
        .handler(echo_body)
        .register(router, &registry)
        .unwrap();

    let router = OperationBuilder::new(Method::OPTIONS, "/tests/v1/admin")
        .operation_id("tests.admin")
        .permission(PermissionDeclaration::deny_all())
        .handler(counted)
        .register(router, &registry)
        .unwrap();

    // Mounted without a declaration record.
    let router = router.route("/tests/v1/raw", get_route(counted));

    let state = RoleGuardState::new(registry.freeze().unwrap(), cfg).unwrap();

    router
        .route_layer(from_fn_with_state(state, role_guard_middleware))
        .layer(Extension(hits.clone()))
}

async fn get(app: &Router, uri: &str) -> Result<(StatusCode, Option<String>, String)> {
    let res = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty())?)
        .await?;
    let status = res.status();
    let ct = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned);
    let body = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
    Ok((status, ct, String::from_utf8(body.to_vec())?))
}

#[tokio::test]
async fn permitted_role_reaches_handler() -> Result<()> {
    let hits = Hits::default();
    let app = build_app(&RoleGuardConfig::default(), &hits);

    let (status, _, body) = get(&app, "/tests/v1/staff?role=3").await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "handled");
    assert_eq!(hits.count(), 1);
    Ok(())
}

#[tokio::test]
async fn every_declared_role_passes() -> Result<()> {
    let hits = Hits::default();
    let app = build_app(&RoleGuardConfig::default(), &hits);

    for role in [2, 3, 4] {
        let (status, _, _) = get(&app, &format!("/tests/v1/staff?role={role}")).await?;
        assert_eq!(status, StatusCode::OK, "role {role}");
    }
    assert_eq!(hits.count(), 3);
    Ok(())
}

#[tokio::test]
#[traced_test]
async fn foreign_role_gets_deny_body_and_handler_is_skipped() -> Result<()> {
    let hits = Hits::default();
    let app = build_app(&RoleGuardConfig::default(), &hits);

    let (status, ct, body) = get(&app, "/tests/v1/staff?role=7").await?;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(ct.as_deref(), Some("application/json; charset=utf-8"));
    assert_eq!(body, deny_body("no permission"));
    let json: serde_json::Value = serde_json::from_str(&body)?;
    assert_eq!(json["code"], 0);
    assert_eq!(json["msg"], "no permission");
    assert_eq!(hits.count(), 0);
    assert!(logs_contain("role_not_allowed"));
    Ok(())
}

#[tokio::test]
async fn empty_role_list_denies_even_valid_roles() -> Result<()> {
    let hits = Hits::default();
    let app = build_app(&RoleGuardConfig::default(), &hits);

    for uri in ["/tests/v1/locked?role=2", "/tests/v1/locked"] {
        let (status, _, body) = get(&app, uri).await?;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        assert_eq!(body, deny_body("no permission"));
    }
    assert_eq!(hits.count(), 0);
    Ok(())
}

#[tokio::test]
async fn undeclared_handler_needs_no_role() -> Result<()> {
    let hits = Hits::default();
    let app = build_app(&RoleGuardConfig::default(), &hits);

    let (status, _, _) = get(&app, "/tests/v1/open").await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = get(&app, "/tests/v1/open?role=not-a-number").await?;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(hits.count(), 2);
    Ok(())
}

#[tokio::test]
#[traced_test]
async fn missing_role_is_denied() -> Result<()> {
    let hits = Hits::default();
    let app = build_app(&RoleGuardConfig::default(), &hits);

    let (status, _, body) = get(&app, "/tests/v1/staff").await?;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, deny_body("no permission"));
    assert_eq!(hits.count(), 0);
    assert!(logs_contain("missing_role"));
    Ok(())
}

#[tokio::test]
#[traced_test]
async fn malformed_role_is_denied() -> Result<()> {
    let hits = Hits::default();
    let app = build_app(&RoleGuardConfig::default(), &hits);

    let (status, _, _) = get(&app, "/tests/v1/staff?role=admin").await?;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(hits.count(), 0);
    assert!(logs_contain("malformed_role"));
    Ok(())
}

#[tokio::test]
async fn path_parameters_resolve_to_route_pattern() -> Result<()> {
    let hits = Hits::default();
    let app = build_app(&RoleGuardConfig::default(), &hits);

    let (ok, _, _) = get(&app, "/tests/v1/staff/42?role=2").await?;
    let (denied, _, _) = get(&app, "/tests/v1/staff/42?role=3").await?;

    assert_eq!(ok, StatusCode::OK);
    assert_eq!(denied, StatusCode::FORBIDDEN);
    assert_eq!(hits.count(), 1);
    Ok(())
}

#[tokio::test]
async fn head_request_is_gated_like_get() -> Result<()> {
    let hits = Hits::default();
    let app = build_app(&RoleGuardConfig::default(), &hits);

    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .method("HEAD")
                .uri("/tests/v1/staff?role=9")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(hits.count(), 0);
    Ok(())
}

#[tokio::test]
async fn unrouted_request_falls_through_to_not_found() -> Result<()> {
    let hits = Hits::default();
    let app = build_app(&RoleGuardConfig::default(), &hits);

    let (status, _, _) = get(&app, "/tests/v1/nowhere").await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn role_in_form_body_is_honored_and_body_reaches_handler() -> Result<()> {
    let hits = Hits::default();
    let app = build_app(&RoleGuardConfig::default(), &hits);

    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/tests/v1/forms")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from("name=x&role=3"))?,
        )
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
    assert_eq!(body.as_ref(), b"name=x&role=3");
    assert_eq!(hits.count(), 1);
    Ok(())
}

#[tokio::test]
async fn form_body_is_ignored_when_disabled() -> Result<()> {
    let hits = Hits::default();
    let cfg = RoleGuardConfig {
        read_form_body: false,
        ..RoleGuardConfig::default()
    };
    let app = build_app(&cfg, &hits);

    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/tests/v1/forms")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from("role=3"))?,
        )
        .await?;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(hits.count(), 0);
    Ok(())
}

#[tokio::test]
async fn query_role_wins_over_form_role() -> Result<()> {
    let hits = Hits::default();
    let app = build_app(&RoleGuardConfig::default(), &hits);

    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/tests/v1/forms?role=1")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from("role=3"))?,
        )
        .await?;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(hits.count(), 0);
    Ok(())
}

#[tokio::test]
async fn configured_message_and_status_are_used() -> Result<()> {
    let hits = Hits::default();
    let cfg = RoleGuardConfig {
        deny_message: "\u{65e0}\u{6743}\u{9650}".to_owned(),
        deny_status: 401,
        ..RoleGuardConfig::default()
    };
    let app = build_app(&cfg, &hits);

    let (status, _, body) = get(&app, "/tests/v1/staff?role=9").await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let json: serde_json::Value = serde_json::from_str(&body)?;
    assert_eq!(json["msg"], "\u{65e0}\u{6743}\u{9650}");
    Ok(())
}

#[tokio::test]
async fn custom_role_parameter_name() -> Result<()> {
    let hits = Hits::default();
    let cfg = RoleGuardConfig {
        role_param: "r".to_owned(),
        ..RoleGuardConfig::default()
    };
    let app = build_app(&cfg, &hits);

    let (ok, _, _) = get(&app, "/tests/v1/staff?r=4").await?;
    let (denied, _, _) = get(&app, "/tests/v1/staff?role=4").await?;

    assert_eq!(ok, StatusCode::OK);
    assert_eq!(denied, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn disabled_guard_lets_everything_through() -> Result<()> {
    let hits = Hits::default();
    let cfg = RoleGuardConfig {
        enabled: false,
        ..RoleGuardConfig::default()
    };
    let app = build_app(&cfg, &hits);

    let (a, _, _) = get(&app, "/tests/v1/locked").await?;
    let (b, _, _) = get(&app, "/tests/v1/staff?role=99").await?;

    assert_eq!(a, StatusCode::OK);
    assert_eq!(b, StatusCode::OK);
    assert_eq!(hits.count(), 2);
    Ok(())
}

#[tokio::test]
async fn identical_requests_get_identical_outcomes() -> Result<()> {
    let hits = Hits::default();
    let app = build_app(&RoleGuardConfig::default(), &hits);

    let first = get(&app, "/tests/v1/staff?role=5").await?;
    let second = get(&app, "/tests/v1/staff?role=5").await?;

    assert_eq!(first, second);
    Ok(())
}

async fn send(app: &Router, req: Request<Body>) -> Result<StatusCode> {
    Ok(app.clone().oneshot(req).await?.status())
}

#[tokio::test]
async fn declared_method_is_the_only_method_served() -> Result<()> {
    let hits = Hits::default();
    let app = build_app(&RoleGuardConfig::default(), &hits);

    let options = Request::builder()
        .method(Method::OPTIONS)
        .uri("/tests/v1/admin?role=2")
        .body(Body::empty())?;
    assert_eq!(send(&app, options).await?, StatusCode::FORBIDDEN);

    for method in [Method::GET, Method::POST] {
        let req = Request::builder()
            .method(method.clone())
            .uri("/tests/v1/admin?role=2")
            .body(Body::empty())?;
        assert_eq!(send(&app, req).await?, StatusCode::METHOD_NOT_ALLOWED, "{method}");
    }

    assert_eq!(hits.count(), 0);
    Ok(())
}

#[tokio::test]
#[traced_test]
async fn route_without_declaration_record_passes_with_warning() -> Result<()> {
    let hits = Hits::default();
    let app = build_app(&RoleGuardConfig::default(), &hits);

    let (status, _, _) = get(&app, "/tests/v1/raw").await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(hits.count(), 1);
    assert!(logs_contain("No handler declaration for matched route"));
    Ok(())
}

fn small_form_limit() -> RoleGuardConfig {
    RoleGuardConfig {
        form_body_limit_bytes: 16,
        ..RoleGuardConfig::default()
    }
}

const OVERSIZED_FORM: &str = "role=3&comment=far-more-than-sixteen-bytes";

#[tokio::test]
#[traced_test]
async fn oversized_form_with_content_length_is_not_inspected() -> Result<()> {
    let hits = Hits::default();
    let app = build_app(&small_form_limit(), &hits);

    let req = Request::builder()
        .method(Method::POST)
        .uri("/tests/v1/forms")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::CONTENT_LENGTH, OVERSIZED_FORM.len())
        .body(Body::from(OVERSIZED_FORM))?;
    let res = app.clone().oneshot(req).await?;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
    assert_eq!(body.as_ref(), deny_body("no permission").as_bytes());
    assert_eq!(hits.count(), 0);
    assert!(logs_contain("missing_role"));
    assert!(logs_contain("Form body exceeds inspection limit"));
    Ok(())
}

#[tokio::test]
#[traced_test]
async fn oversized_form_without_content_length_is_not_inspected() -> Result<()> {
    let hits = Hits::default();
    let app = build_app(&small_form_limit(), &hits);

    let req = Request::builder()
        .method(Method::POST)
        .uri("/tests/v1/forms")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(OVERSIZED_FORM))?;
    assert!(req.headers().get(header::CONTENT_LENGTH).is_none());

    let status = send(&app, req).await?;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(hits.count(), 0);
    assert!(logs_contain("missing_role"));
    assert!(logs_contain("Failed to read form body for role lookup"));
    Ok(())
}
