#![cfg(feature = "server")]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, StatusCode};
use axum::middleware::from_fn_with_state;
use serde_json::{Value, json};
use tower::ServiceExt;
use vows_database::Database;
use vows_domain::config::ApiConfig;
use vows_event_bus::EventBus;
use vows_kernel::server::session::session_layer;
use vows_kernel::server::state::ApiState;
use vows_registry::MIGRATIONS;
use vows_registry::server::router::registry_router;

async fn app() -> Router {
    let config = ApiConfig::default();
    let db = Database::builder()
        .url("mem://")
        .session("vows", "registry_http")
        .migrations(MIGRATIONS)
        .init()
        .await
        .unwrap();
    let events = EventBus::new();
    let slice = vows_registry::init(&config, &db, &events).unwrap();
    let state =
        ApiState::builder().config(config).db(db).events(events).register_slice(slice).build().unwrap();

    let (router, _openapi) = registry_router().split_for_parts();
    router.layer(from_fn_with_state(state.sessions.clone(), session_layer)).with_state(state)
}

struct Reply {
    status: StatusCode,
    cookie: Option<String>,
    body: Value,
}

async fn send(app: &Router, method: &str, uri: &str, cookie: Option<&str>, body: Option<&str>) -> Reply {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        request = request.header(COOKIE, cookie);
    }
    if body.is_some() {
        request = request.header(CONTENT_TYPE, "application/json");
    }
    let request = request.body(body.map_or_else(Body::empty, |b| Body::from(b.to_owned()))).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    Reply { status, cookie, body: serde_json::from_slice(&bytes).unwrap() }
}

#[tokio::test]
async fn registry_lists_catalog_in_order() {
    let app = app().await;
    let reply = send(&app, "GET", "/registry", None, None).await;

    assert_eq!(reply.status, StatusCode::OK);
    let items = reply.body.as_array().unwrap();
    assert_eq!(items.len(), 10);
    assert_eq!(items[0]["id"], "dutch-oven");
    assert_eq!(items[0]["claimed"], false);

    let fund = items.iter().find(|i| i["id"] == "honeymoon-fund").unwrap();
    assert_eq!(fund["isFund"], true);
    assert_eq!(fund["claimedBy"], Value::Null);
}

#[tokio::test]
async fn linked_gift_flow_over_http() {
    let app = app().await;
    let body = json!({ "claimerName": "Jo" }).to_string();

    let refused = send(&app, "POST", "/registry/claim/dutch-oven", None, Some(&body)).await;
    assert_eq!(refused.status, StatusCode::OK);
    assert_eq!(
        refused.body,
        json!({
            "success": false,
            "message": "Please open the gift link first, then come back and claim it."
        })
    );
    let cookie = refused.cookie.expect("session cookie");

    let click = send(&app, "POST", "/registry/link-click/dutch-oven", Some(&cookie), None).await;
    assert_eq!(click.body, json!({ "success": true }));

    let claimed = send(&app, "POST", "/registry/claim/dutch-oven", Some(&cookie), Some(&body)).await;
    assert_eq!(
        claimed.body,
        json!({
            "success": true,
            "message": "Thank you! \"Cast Iron Dutch Oven\" has been claimed by Jo."
        })
    );

    let listing = send(&app, "GET", "/registry", None, None).await;
    let oven = &listing.body.as_array().unwrap()[0];
    assert_eq!(oven["claimed"], true);
    assert_eq!(oven["claimedBy"], "Jo");
}

#[tokio::test]
async fn unknown_link_click_is_reported() {
    let app = app().await;
    let reply = send(&app, "POST", "/registry/link-click/yacht", None, None).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, json!({ "success": false, "message": "Item not found." }));
}

#[tokio::test]
async fn unreadable_body_counts_as_empty_name() {
    let app = app().await;

    for body in [None, Some("not json"), Some("{}")] {
        let reply = send(&app, "POST", "/registry/claim/kayak", None, body).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body, json!({ "success": false, "message": "Please enter your name." }));
    }
}
