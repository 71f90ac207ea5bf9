#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end tests over the fully assembled application.

use std::collections::BTreeMap;

use anyhow::Result;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use blog::BlogModule;
use demo_kit::{DbConfig, ModuleEntry, connect_db};
use demo_server::config::AppConfig;
use demo_server::registered_modules::registered_modules;
use demo_server::{REQUEST_ID_HEADER, build_router};
use role_guard::RoleGuardConfig;
use tower::ServiceExt;

fn seeded_config() -> AppConfig {
    let mut modules = BTreeMap::new();
    modules.insert("customer".to_owned(), serde_json::json!({ "seed": true }));
    modules.insert(
        "blog".to_owned(),
        serde_json::json!({
            "seed": true,
            "title": "Blog",
            "banner": { "title": "Warning", "content": "The blog will be down tomorrow." }
        }),
    );
    AppConfig {
        modules,
        ..AppConfig::default()
    }
}

async fn app(cfg: &AppConfig) -> Result<Router> {
    let db = connect_db(&DbConfig::default()).await?;
    build_router(cfg, &db, &registered_modules()).await
}

async fn call(app: &Router, req: Request<Body>) -> Result<(StatusCode, axum::http::HeaderMap, Vec<u8>)> {
    let res = app.clone().oneshot(req).await?;
    let status = res.status();
    let headers = res.headers().clone();
    let body = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
    Ok((status, headers, body.to_vec()))
}

async fn get(app: &Router, uri: &str) -> Result<(StatusCode, Vec<u8>)> {
    let (status, _, body) = call(app, Request::builder().uri(uri).body(Body::empty())?).await?;
    Ok((status, body))
}

#[tokio::test]
async fn gated_customer_listing() -> Result<()> {
    let app = app(&seeded_config()).await?;

    let (status, body) = get(&app, "/customers?role=3").await?;
    assert_eq!(status, StatusCode::OK);
    let rows: serde_json::Value = serde_json::from_slice(&body)?;
    assert_eq!(rows.as_array().unwrap().len(), 5);

    let (status, body) = get(&app, "/customers?role=7").await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        String::from_utf8(body)?,
        "{\n\"code\": 0,\n\"msg\": \"no permission\"\n}"
    );

    let (status, _) = get(&app, "/customers?role=abc").await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn open_routes_need_no_role() -> Result<()> {
    let app = app(&seeded_config()).await?;

    let (status, body) = get(&app, "/customers/Bauer").await?;
    assert_eq!(status, StatusCode::OK);
    let rows: serde_json::Value = serde_json::from_slice(&body)?;
    assert_eq!(rows.as_array().unwrap().len(), 2);

    let (status, body) = get(&app, "/home").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"hello kt.");

    let (status, body) = get(&app, "/").await?;
    assert_eq!(status, StatusCode::OK);
    let articles: serde_json::Value = serde_json::from_slice(&body)?;
    assert_eq!(articles.as_array().unwrap().len(), 2);
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_plain_not_found() -> Result<()> {
    let app = app(&seeded_config()).await?;
    let (status, body) = get(&app, "/nope?role=7").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
    Ok(())
}

#[tokio::test]
async fn request_id_is_generated_and_propagated() -> Result<()> {
    let app = app(&seeded_config()).await?;

    let (_, headers, _) = call(&app, Request::builder().uri("/home").body(Body::empty())?).await?;
    assert!(headers.get(REQUEST_ID_HEADER).is_some());

    let (_, headers, _) = call(
        &app,
        Request::builder()
            .uri("/customers?role=9")
            .header(REQUEST_ID_HEADER, "req-123")
            .body(Body::empty())?,
    )
    .await?;
    assert_eq!(headers.get(REQUEST_ID_HEADER).unwrap(), "req-123");
    Ok(())
}

#[tokio::test]
async fn deny_message_and_status_come_from_config() -> Result<()> {
    let cfg = AppConfig {
        role_guard: RoleGuardConfig {
            deny_message: "forbidden here".to_owned(),
            deny_status: 401,
            ..RoleGuardConfig::default()
        },
        ..seeded_config()
    };
    let app = app(&cfg).await?;

    let (status, body) = get(&app, "/customers?role=1").await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let json: serde_json::Value = serde_json::from_slice(&body)?;
    assert_eq!(json["msg"], "forbidden here");
    Ok(())
}

#[tokio::test]
async fn disabled_guard_serves_gated_route() -> Result<()> {
    let cfg = AppConfig {
        role_guard: RoleGuardConfig {
            enabled: false,
            ..RoleGuardConfig::default()
        },
        ..seeded_config()
    };
    let app = app(&cfg).await?;

    let (status, _) = get(&app, "/customers").await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn invalid_guard_config_fails_startup() -> Result<()> {
    let cfg = AppConfig {
        role_guard: RoleGuardConfig {
            role_param: String::new(),
            ..RoleGuardConfig::default()
        },
        ..AppConfig::default()
    };
    assert!(app(&cfg).await.is_err());
    Ok(())
}

#[tokio::test]
async fn bad_module_config_fails_startup() -> Result<()> {
    let mut cfg = AppConfig::default();
    cfg.modules
        .insert("customer".to_owned(), serde_json::json!({ "seed": "yes please" }));

    let err = app(&cfg).await.unwrap_err();
    assert!(format!("{err:#}").contains("customer"));
    Ok(())
}

#[tokio::test]
async fn route_claimed_twice_fails_startup() -> Result<()> {
    let db = connect_db(&DbConfig::default()).await?;
    let modules = [
        ModuleEntry::new(BlogModule::default()),
        ModuleEntry::new(BlogModule::default()),
    ];

    let err = build_router(&AppConfig::default(), &db, &modules)
        .await
        .unwrap_err();

    let msg = format!("{err:#}");
    assert!(msg.contains("route registration of module 'blog' failed"), "{msg}");
    assert!(msg.contains("is registered more than once"), "{msg}");
    Ok(())
}
