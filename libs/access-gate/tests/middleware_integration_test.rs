#![cfg(feature = "axum-ext")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use access_gate::{
    CheckOutcome, ContentItem, DisplayMode, GateConfig, RequestContext, SecurityCheck,
    SiteDefinition, UserContext, axum_ext::security_check,
};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

#[derive(Clone)]
struct HostContext {
    user: UserContext,
    item: Option<ContentItem>,
    site: Option<SiteDefinition>,
}

/// Stand-in for the host layer that resolves site, user and item
async fn inject_context(
    axum::extract::State(host): axum::extract::State<HostContext>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let raw_url = req
        .uri()
        .path_and_query()
        .map_or_else(|| req.uri().path().to_owned(), |pq| pq.as_str().to_owned());
    let mut ctx = RequestContext::new(raw_url);
    if let Some(site) = &host.site {
        ctx = ctx.with_site(site.context(DisplayMode::Normal));
    }
    req.extensions_mut().insert(ctx);
    req.extensions_mut().insert(host.user.clone());
    if let Some(item) = host.item.clone() {
        req.extensions_mut().insert(item);
    }
    next.run(req).await
}

async fn page_handler() -> impl IntoResponse {
    "page"
}

fn create_test_check() -> Arc<SecurityCheck> {
    let mut config = GateConfig {
        persist_raw_url: true,
        ..Default::default()
    };
    config.sites.insert(
        "website".to_owned(),
        SiteDefinition::default()
            .with_login_page("/login")
            .with_require_login(true),
    );
    Arc::new(SecurityCheck::from_config(&config))
}

fn app(host: HostContext) -> Router {
    Router::new()
        .route("/home", get(page_handler))
        .route("/login", get(page_handler))
        .layer(middleware::from_fn_with_state(
            create_test_check(),
            security_check,
        ))
        .layer(middleware::from_fn_with_state(host, inject_context))
}

fn website() -> SiteDefinition {
    SiteDefinition::new("website")
        .with_login_page("/login")
        .with_require_login(true)
}

#[tokio::test]
async fn test_anonymous_user_is_redirected_to_login() {
    let app = app(HostContext {
        user: UserContext::anonymous(),
        item: None,
        site: Some(website()),
    });

    let response = app
        .oneshot(Request::builder().uri("/home?tab=1").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap().to_str().unwrap(),
        "/login?returnurl=%2Fhome%3Ftab%3D1"
    );
}

#[tokio::test]
async fn test_login_page_is_reachable_anonymously() {
    let app = app(HostContext {
        user: UserContext::anonymous(),
        item: None,
        site: Some(website()),
    });

    let response = app
        .oneshot(Request::builder().uri("/login").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"page");
}

#[tokio::test]
async fn test_authenticated_user_with_read_access_passes() {
    let app = app(HostContext {
        user: UserContext::authenticated("jdoe"),
        item: Some(ContentItem::new("/content/home", true)),
        site: Some(website()),
    });

    let response = app
        .oneshot(Request::builder().uri("/home").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_login_page_redirects_to_error_page() {
    let app = app(HostContext {
        user: UserContext::authenticated("jdoe"),
        item: Some(ContentItem::new("/content/home", false)),
        site: None,
    });

    let response = app
        .oneshot(Request::builder().uri("/home").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    let location = response.headers().get(header::LOCATION).unwrap();
    assert!(location.to_str().unwrap().starts_with("/error?error="));
}

#[tokio::test]
async fn test_missing_context_returns_500() {
    let app = Router::new()
        .route("/home", get(page_handler))
        .layer(middleware::from_fn_with_state(
            create_test_check(),
            security_check,
        ));

    let response = app
        .oneshot(Request::builder().uri("/home").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], 500);
    assert_eq!(json["error"], "Missing required argument: request");
}

#[tokio::test]
async fn test_outcome_conversion_without_middleware() {
    let response = CheckOutcome::Continue.into_response();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.headers().get(header::LOCATION).is_none());
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(body.is_empty());

    let response = CheckOutcome::Redirect {
        location: "/login".to_owned(),
        permanent: false,
    }
    .into_response();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/login"
    );
}
