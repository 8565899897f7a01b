//! Integration tests for the cidaas client using wiremock.
//!
//! Covers token bootstrap, bearer injection, per-verb status acceptance and
//! the key normalisation applied by individual services.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cidaas_sdk::auth::TokenResponse;
use cidaas_sdk::models::{Role, Scope, TemplateQuery};
use cidaas_sdk::{CidaasClient, ClientConfig, ClientError};

// =============================================================================
// Test Helpers
// =============================================================================

fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new(
        server.uri(),
        format!("{}/token-srv/token", server.uri()),
        "admin-client",
        "admin-secret",
    )
}

fn client(server: &MockServer) -> CidaasClient {
    let token = TokenResponse {
        access_token: "tok-123".to_string(),
        ..TokenResponse::default()
    };
    CidaasClient::with_token(config(server), token).unwrap()
}

// =============================================================================
// Token Bootstrap
// =============================================================================

#[tokio::test]
async fn test_connect_posts_client_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token-srv/token"))
        .and(body_json(json!({
            "client_id": "admin-client",
            "client_secret": "admin-secret",
            "grant_type": "client_credentials"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-abc",
            "token_type": "Bearer",
            "expires_in": 86400
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = CidaasClient::connect(config(&server)).await.unwrap();
    assert_eq!(client.access_token(), "tok-abc");
    assert!(client.http().has_token());
}

#[tokio::test]
async fn test_connect_rejected_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token-srv/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid_client"))
        .mount(&server)
        .await;

    match CidaasClient::connect(config(&server)).await {
        Err(ClientError::Transport { status, body }) => {
            assert_eq!(status, 401);
            assert_eq!(body, "invalid_client");
        }
        other => panic!("expected transport error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_connect_empty_token_is_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token-srv/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": ""})))
        .mount(&server)
        .await;

    let result = CidaasClient::connect(config(&server)).await;
    assert!(matches!(result, Err(ClientError::Authentication(_))));
}

// =============================================================================
// Transport
// =============================================================================

#[tokio::test]
async fn test_requests_carry_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/roles-srv/role"))
        .and(query_param("role", "admin"))
        .and(header("Authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "status": 200,
            "data": {"role": "admin", "name": "Administrator"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let role = client(&server)
        .roles()
        .get("admin")
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(role.name, "Administrator");
}

#[tokio::test]
async fn test_post_accepts_created() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/roles-srv/role"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "status": 201,
            "data": {"role": "auditor"}
        })))
        .mount(&server)
        .await;

    let role = Role {
        role: "auditor".to_string(),
        ..Role::default()
    };
    let created = client(&server).roles().upsert(&role).await.unwrap();
    assert!(created.success);
}

#[tokio::test]
async fn test_get_rejects_created() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/roles-srv/role"))
        .respond_with(ResponseTemplate::new(201).set_body_string("{}"))
        .mount(&server)
        .await;

    let result = client(&server).roles().get("admin").await;
    assert!(matches!(
        result,
        Err(ClientError::Transport { status: 201, .. })
    ));
}

#[tokio::test]
async fn test_status_acceptance_per_verb() {
    let server = MockServer::start().await;
    let http = client(&server).http().clone();
    let url = format!("{}/roles-srv/role", server.uri());
    let statuses = [200u16, 201, 202, 204, 400, 401, 404, 500];
    let table: [(&str, &[u16]); 4] = [
        ("GET", &[200]),
        ("POST", &[200, 201, 204]),
        ("PUT", &[200]),
        ("DELETE", &[200, 201, 202, 204]),
    ];

    for (verb, accepted) in table {
        for status in statuses {
            server.reset().await;
            let template = if status == 204 {
                ResponseTemplate::new(status)
            } else {
                ResponseTemplate::new(status).set_body_string("{}")
            };
            Mock::given(method(verb))
                .and(path("/roles-srv/role"))
                .respond_with(template)
                .expect(1)
                .mount(&server)
                .await;

            let result = match verb {
                "GET" => http.get(&url).await,
                "POST" => http.post(&url, &json!({"role": "auditor"})).await,
                "PUT" => http.put(&url, &json!({"role": "auditor"})).await,
                _ => http.delete(&url).await,
            };
            if accepted.contains(&status) {
                let response = result.unwrap_or_else(|e| panic!("{} {}: {:?}", verb, status, e));
                assert_eq!(response.status, status);
            } else {
                assert!(
                    matches!(result, Err(ClientError::Transport { status: s, .. }) if s == status),
                    "{} {} should be rejected",
                    verb,
                    status
                );
            }
            server.verify().await;
        }
    }
}

#[tokio::test]
async fn test_server_error_keeps_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/groups-srv/usergroups/g1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    match client(&server).user_groups().get("g1").await {
        Err(ClientError::Transport { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_accepts_no_content() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/webhook-srv/webhook/wh-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).webhooks().delete("wh-1").await.unwrap();
}

#[tokio::test]
async fn test_unreachable_host_is_connectivity_error() {
    let config = ClientConfig::new("http://127.0.0.1:1", "http://127.0.0.1:1/token", "id", "secret");
    let result = CidaasClient::connect(config).await;
    assert!(matches!(result, Err(ClientError::Connectivity(_))));
}

// =============================================================================
// Service Key Normalisation
// =============================================================================

#[tokio::test]
async fn test_scope_key_lowercased_on_read() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/scopes-srv/scope"))
        .and(query_param("scopekey", "myscope"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "status": 200,
            "data": {"scopeKey": "myscope", "securityLevel": "PUBLIC"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let scope: Scope = client(&server)
        .scopes()
        .get("MyScope")
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(scope.scope_key, "myscope");
}

#[tokio::test]
async fn test_custom_provider_name_lowercased_on_delete() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/providers-srv/custom/myidp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "status": 200,
            "data": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .custom_providers()
        .delete("MyIdp")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_template_find_posts_query() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/templates-srv/template/custom/find"))
        .and(body_json(json!({
            "template_key": "welcome",
            "template_type": "EMAIL",
            "locale": "en-us"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "status": 200,
            "data": {
                "_id": "t1",
                "template_key": "welcome",
                "template_type": "EMAIL",
                "locale": "en-us",
                "content": "Hello"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = TemplateQuery {
        template_key: "welcome".to_string(),
        template_type: "EMAIL".to_string(),
        locale: "en-us".to_string(),
    };
    let template = client(&server)
        .templates()
        .find(&query)
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(template.content, "Hello");
}

#[tokio::test]
async fn test_template_delete_uppercases_key_and_type() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/templates-srv/template/custom/WELCOME/EMAIL"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .templates()
        .delete("welcome", "email")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unsuccessful_envelope_surfaces_service_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hostedpages-srv/hpgroup/mygroup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "status": 404,
            "error": {"code": 404, "type": "NotFound", "status": 404, "error": "no such group"}
        })))
        .mount(&server)
        .await;

    let envelope = client(&server).hosted_pages().get("MyGroup").await.unwrap();
    match envelope.into_data() {
        Err(ClientError::Service(e)) => assert_eq!(e.error, "no such group"),
        other => panic!("expected service error, got {:?}", other),
    }
}
