//! Request sessions built by the application context, against a mock API.

use nowip_app::commands::{domain_detail, list_domains};
use nowip_app::AppContext;
use nowip_core::RouteTarget;
use nowip_domain::{Config, NowipError};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_api() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/account"))
        .and(header("Authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "id": 3, "username": "mika" }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/domains"))
        .and(header("Authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{ "id": 1, "name": "home" }, { "id": 2, "name": "lab.is-on.net" }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/account"))
        .and(header("Authorization", "Bearer expired"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Session expired"
        })))
        .mount(&server)
        .await;

    server
}

fn context(server: &MockServer) -> AppContext {
    let mut config = Config::default();
    config.api.base_url = server.uri();
    AppContext::new(config).unwrap()
}

#[tokio::test]
async fn signed_in_request_lists_qualified_domains() {
    let server = mock_api().await;
    let ctx = context(&server);
    let request = ctx.session_for_cookie(Some("theme=dark; session_token=tok-1"));

    assert!(request.session.navigate(&RouteTarget::new("/domains")).await.is_allow());

    let views = list_domains(&ctx, &request.session).await.unwrap();
    let names: Vec<_> = views.iter().map(|v| v.full_name.as_str()).collect();
    assert_eq!(names, ["home.is-on.net", "lab.is-on.net"]);
}

#[tokio::test]
async fn detail_page_fetches_missing_domain_once() {
    let server = mock_api().await;
    Mock::given(method("GET"))
        .and(path("/domains/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "id": 9, "name": "shared" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    let ctx = context(&server);
    let request = ctx.session_for_cookie(Some("session_token=tok-1"));
    request.session.navigate(&RouteTarget::new("/domains/9")).await;

    let first = domain_detail(&ctx, &request.session, "9").await.unwrap();
    let again = domain_detail(&ctx, &request.session, "9").await.unwrap();

    assert_eq!(first.full_name, "shared.is-on.net");
    assert_eq!(first, again);
}

#[tokio::test]
async fn expired_session_is_an_error_not_an_empty_list() {
    let server = mock_api().await;
    let ctx = context(&server);
    let request = ctx.session_for_cookie(Some("session_token=expired"));

    let err = list_domains(&ctx, &request.session).await.unwrap_err();

    assert!(matches!(err, NowipError::Auth(_)));
    assert!(request.session.accounts().status().is_failed());
}

#[tokio::test]
async fn malformed_route_param_is_not_found() {
    let server = mock_api().await;
    let ctx = context(&server);
    let request = ctx.session_for_cookie(Some("session_token=tok-1"));

    let err = domain_detail(&ctx, &request.session, "nine").await.unwrap_err();
    assert!(matches!(err, NowipError::NotFound(_)));
}

#[tokio::test]
async fn anonymous_request_is_sent_to_login() {
    let server = mock_api().await;
    let ctx = context(&server);
    let request = ctx.session_for_cookie(None);

    let decision = request.session.navigate(&RouteTarget::new("/domains/9?tab=records")).await;

    assert_eq!(decision.location(), Some("/auth/login?url=%2Fdomains%2F9%3Ftab%3Drecords"));
    assert!(request.set_cookie_header().is_none());
}
