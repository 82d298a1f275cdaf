//! Mock registry helpers
//!
//! Provides wiremock endpoints that behave like the OCI distribution tags API.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::TEST_REPOSITORY;

fn tags_path() -> String {
    format!("/v2/{}/tags/list", TEST_REPOSITORY)
}

fn tags_body(tags: &[&str]) -> serde_json::Value {
    json!({ "name": TEST_REPOSITORY, "tags": tags })
}

/// Serve a single page of tags without authentication
pub async fn mock_tags(server: &MockServer, tags: &[&str]) {
    Mock::given(method("GET"))
        .and(path(tags_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(tags_body(tags)))
        .mount(server)
        .await;
}

/// Serve tags over two pages linked with a relative `Link` header
pub async fn mock_paginated_tags(server: &MockServer, first: &[&str], second: &[&str]) {
    let last = first.last().copied().unwrap_or_default();

    Mock::given(method("GET"))
        .and(path(tags_path()))
        .and(query_param("last", last))
        .respond_with(ResponseTemplate::new(200).set_body_json(tags_body(second)))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(tags_path()))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "link",
                    format!(r#"<{}?n=1000&last={}>; rel="next""#, tags_path(), last).as_str(),
                )
                .set_body_json(tags_body(first)),
        )
        .up_to_n_times(1)
        .mount(server)
        .await;
}

/// Require an anonymous bearer token issued by `/token` before serving tags
pub async fn mock_bearer_protected_tags(server: &MockServer, tags: &[&str], bearer: &str) {
    mock_token_endpoint(
        server,
        None,
        ResponseTemplate::new(200).set_body_json(json!({ "token": bearer })),
    )
    .await;
    mock_challenged_tags(server, tags, bearer).await;
}

/// Token endpoint at `/token` for the test repository's pull scope.
///
/// With `basic_credentials` set, only requests carrying that base64
/// `user:password` pair are answered.
pub async fn mock_token_endpoint(
    server: &MockServer,
    basic_credentials: Option<&str>,
    response: ResponseTemplate,
) {
    let mut mock = Mock::given(method("GET"))
        .and(path("/token"))
        .and(query_param(
            "scope",
            format!("repository:{}:pull", TEST_REPOSITORY).as_str(),
        ))
        .and(query_param("service", "mock-registry"));
    if let Some(credentials) = basic_credentials {
        mock = mock.and(header(
            "authorization",
            format!("Basic {}", credentials).as_str(),
        ));
    }

    mock.respond_with(response).mount(server).await;
}

/// Serve tags only to `bearer`; anything else gets a challenge pointing at `/token`
pub async fn mock_challenged_tags(server: &MockServer, tags: &[&str], bearer: &str) {
    let www_auth = format!(
        r#"Bearer realm="{}/token",service="mock-registry""#,
        server.uri()
    );

    Mock::given(method("GET"))
        .and(path(tags_path()))
        .and(header("authorization", format!("Bearer {}", bearer).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(tags_body(tags)))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(tags_path()))
        .respond_with(ResponseTemplate::new(401).insert_header("www-authenticate", www_auth.as_str()))
        .mount(server)
        .await;
}

/// Serve tags to `token` sent as a bearer, without ever issuing a challenge
pub async fn mock_direct_bearer_tags(server: &MockServer, tags: &[&str], token: &str) {
    Mock::given(method("GET"))
        .and(path(tags_path()))
        .and(header("authorization", format!("Bearer {}", token).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(tags_body(tags)))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(tags_path()))
        .respond_with(ResponseTemplate::new(401))
        .mount(server)
        .await;
}

/// Serve a page whose `Link` header points back at itself
pub async fn mock_self_linked_tags(server: &MockServer, tags: &[&str]) {
    Mock::given(method("GET"))
        .and(path(tags_path()))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "link",
                    format!(r#"<{}?n=1000>; rel="next""#, tags_path()).as_str(),
                )
                .set_body_json(tags_body(tags)),
        )
        .mount(server)
        .await;
}

/// Answer tags requests with a 200 whose body is not a tag list
pub async fn mock_malformed_tags(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path(tags_path()))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Fail every tags request with the given status
pub async fn mock_failing_tags(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(tags_path()))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}
