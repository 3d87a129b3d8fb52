use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use quickadmin_api::app::services::AppServices;
use quickadmin_auth::{JwtClaims, PrincipalId, Role};
use quickadmin_users::{InMemoryUserService, STATE_ACTIVE, UserService};
use reqwest::StatusCode;
use serde_json::json;

const JWT_SECRET: &str = "test-secret";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        Self::spawn_with(AppServices::in_memory()).await
    }

    async fn spawn_with(services: AppServices) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = quickadmin_api::app::build_app_with(JWT_SECRET, services);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn mint_jwt(roles: Vec<Role>) -> String {
    mint_jwt_for(PrincipalId::new(), roles)
}

fn mint_jwt_for(sub: PrincipalId, roles: Vec<Role>) -> String {
    let now = Utc::now();
    let claims = JwtClaims {
        sub,
        roles,
        issued_at: now,
        expires_at: now + ChronoDuration::minutes(10),
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("failed to encode jwt")
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn auth_required_for_protected_endpoints() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/whoami")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .post(srv.url("/userManage/insert"))
        .form(&[("username", "alice")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(srv.url("/whoami"))
        .bearer_auth("not-a-jwt")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn whoami_reflects_token() {
    let srv = TestServer::spawn().await;
    let sub = PrincipalId::new();
    let token = mint_jwt_for(sub, vec![Role::ADMIN]);

    let res = reqwest::Client::new()
        .get(srv.url("/whoami"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], 0);
    let principal_id: PrincipalId = body["data"]["principal_id"].as_str().unwrap().parse().unwrap();
    assert_eq!(principal_id, sub);
    assert!(body["data"]["roles"].as_array().unwrap().iter().any(|r| r == "admin"));
}

#[tokio::test]
async fn non_admin_cannot_insert_users() {
    let users = Arc::new(InMemoryUserService::new());
    let srv = TestServer::spawn_with(AppServices::new(users.clone())).await;
    let token = mint_jwt(vec![Role::new("viewer")]);

    let res = reqwest::Client::new()
        .post(srv.url("/userManage/insert"))
        .bearer_auth(token)
        .form(&[("username", "mallory"), ("password", "pw")])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "forbidden");
    assert!(users.list().is_empty());
}

#[tokio::test]
async fn admin_insert_then_duplicate() {
    let users = Arc::new(InMemoryUserService::new());
    let srv = TestServer::spawn_with(AppServices::new(users.clone())).await;
    let token = mint_jwt(vec![Role::ADMIN]);
    let client = reqwest::Client::new();

    let insert = || {
        client
            .post(srv.url("/userManage/insert"))
            .bearer_auth(&token)
            .form(&[
                ("username", "alice"),
                ("password", "pw"),
                ("state", "0"),
                ("createTime", "1999-01-01T00:00:00Z"),
            ])
            .send()
    };

    let res = insert().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({"status": 1, "message": "用户添加成功"}));

    // Audit fields come from the server, not the form.
    let stored = users.find_by_username("alice").unwrap();
    assert_eq!(stored.state.as_deref(), Some(STATE_ACTIVE));
    assert!(stored.create_time.unwrap() > Utc::now() - ChronoDuration::minutes(1));
    assert_eq!(stored.password.as_deref(), Some("pw"));

    let res = insert().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({"status": -1, "message": "用户添加失败!"}));
    assert_eq!(users.list().len(), 1);
}

#[tokio::test]
async fn insert_accepts_query_string_and_empty_password() {
    let users = Arc::new(InMemoryUserService::new());
    let srv = TestServer::spawn_with(AppServices::new(users.clone())).await;
    let token = mint_jwt(vec![Role::ADMIN]);

    let res = reqwest::Client::new()
        .get(srv.url("/userManage/insert?username=bob&password="))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], 1);
    assert_eq!(users.find_by_username("bob").unwrap().password, None);
}
