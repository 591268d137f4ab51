//! End-to-end flow tests: acquire a token, then call the API
//!
//! Both external collaborators (token endpoint, API server) are wiremock
//! instances; assertions cover the cross-component contracts that the
//! per-module unit tests cannot see.

use std::sync::Arc;

use chrono::Utc;
use lattice_client::{ApiClient, AuthClient, CachedTokenSource, ClientConfig, Credentials};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(api: &MockServer, auth: &MockServer) -> ClientConfig {
    ClientConfig::new(
        api.uri(),
        format!("{}/authorize", auth.uri()),
        format!("{}/token", auth.uri()),
    )
    .unwrap()
}

fn credentials() -> Credentials {
    Credentials::new("lattice-cli".to_string(), "operator".to_string(), "secret".to_string())
}

#[tokio::test]
async fn password_grant_then_list() {
    let auth_server = MockServer::start().await;
    let api_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "at-1",
            "refresh_token": "rt-1",
            "token_type": "Bearer",
            "expires_in": 300
        })))
        .expect(1)
        .mount(&auth_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/ci-ids"))
        .and(query_param("apiVersion", "1"))
        .and(header("Authorization", "Bearer at-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(["ci1", "ci2"])))
        .expect(1)
        .mount(&api_server)
        .await;

    let config = config_for(&api_server, &auth_server);
    let auth = AuthClient::new(config.clone(), credentials());

    let tokens = auth.password_grant().await.unwrap();
    assert!(!tokens.access_token.is_empty());

    let client = ApiClient::new(config, Arc::new(CachedTokenSource::new(auth, tokens)));
    let ids = client.list_all_ci_ids("1").await.unwrap();
    assert_eq!(ids, vec!["ci1".to_string(), "ci2".to_string()]);
}

#[tokio::test]
async fn rejected_credentials_never_reach_the_api() {
    let auth_server = MockServer::start().await;
    let api_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "Invalid user credentials"
        })))
        .expect(1)
        .mount(&auth_server)
        .await;

    // The flow stops at acquisition; no request may hit the API server.
    Mock::given(method("GET"))
        .and(path("/ci-ids"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&api_server)
        .await;

    let config = config_for(&api_server, &auth_server);
    let auth = AuthClient::new(config, credentials());

    assert!(auth.password_grant().await.is_err());
}

#[tokio::test]
async fn expired_token_refreshes_without_rerunning_the_password_grant() {
    let auth_server = MockServer::start().await;
    let api_server = MockServer::start().await;

    // The password grant is served exactly once, up front.
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "at-initial",
            "refresh_token": "rt-1",
            "expires_in": 300
        })))
        .expect(1)
        .mount(&auth_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=rt-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "at-refreshed",
            "refresh_token": "rt-2",
            "expires_in": 300
        })))
        .expect(1)
        .mount(&auth_server)
        .await;

    // First call sees the initial token, the call after expiry must carry
    // the refreshed one.
    Mock::given(method("GET"))
        .and(path("/ci-ids"))
        .and(header("Authorization", "Bearer at-initial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(["ci1"])))
        .expect(1)
        .mount(&api_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ci-ids"))
        .and(header("Authorization", "Bearer at-refreshed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(["ci1", "ci2"])))
        .expect(1)
        .mount(&api_server)
        .await;

    let config = config_for(&api_server, &auth_server);
    let auth = AuthClient::new(config.clone(), credentials());

    let tokens = auth.password_grant().await.unwrap();
    let source = Arc::new(CachedTokenSource::new(auth.clone(), tokens.clone()));
    let client = ApiClient::new(config.clone(), source);

    let first = client.list_all_ci_ids("1").await.unwrap();
    assert_eq!(first, vec!["ci1".to_string()]);

    // Simulate the token aging past its expiry between invocations, then
    // call again through a source seeded with the aged set. The refresh
    // grant fires exactly once; the password grant mock's expect(1) proves
    // the original grant is not re-run.
    let mut aged = tokens;
    aged.expires_at = Some(Utc::now() - chrono::Duration::seconds(1));

    let client = ApiClient::new(config, Arc::new(CachedTokenSource::new(auth, aged)));
    let second = client.list_all_ci_ids("1").await.unwrap();
    assert_eq!(second, vec!["ci1".to_string(), "ci2".to_string()]);
}
