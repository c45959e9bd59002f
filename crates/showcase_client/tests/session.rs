use pretty_assertions::assert_eq;
use showcase_client::{ApiError, ApiSettings, ReqwestApi, SessionManager};
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestApi {
    let base = Url::parse(&server.uri()).expect("server url");
    ReqwestApi::new(base, ApiSettings::default()).expect("client")
}

#[tokio::test]
async fn login_success_yields_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(serde_json::json!({
            "username": "admin",
            "password": "hunter2",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "Login successful",
        })))
        .mount(&server)
        .await;

    let base = Url::parse(&format!("{}/api", server.uri())).expect("base url");
    let api = ReqwestApi::new(base, ApiSettings::default()).expect("client");
    let mut sessions = SessionManager::new();

    sessions
        .login(&api, "admin", "hunter2")
        .await
        .expect("login ok");

    assert!(sessions.is_authenticated());
    assert_eq!(
        sessions.authorization_header().expect("header"),
        "Basic YWRtaW46aHVudGVyMg=="
    );
}

#[tokio::test]
async fn rejected_login_yields_auth_error_and_no_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "success": false,
            "message": "Invalid credentials",
        })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let mut sessions = SessionManager::new();

    let err = sessions
        .login(&api, "admin", "wrong")
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::Auth("Invalid credentials".to_string()));
    assert!(sessions.current_session().is_none());
    assert_eq!(
        sessions.authorization_header().unwrap_err(),
        ApiError::NoSession
    );
}

#[tokio::test]
async fn rejected_login_without_body_uses_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let mut sessions = SessionManager::new();

    let err = sessions.login(&api, "admin", "wrong").await.unwrap_err();
    assert_eq!(err, ApiError::Auth("invalid credentials".to_string()));
}

#[tokio::test]
async fn login_server_error_is_a_network_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let mut sessions = SessionManager::new();

    let err = sessions.login(&api, "admin", "hunter2").await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert!(!sessions.is_authenticated());
}

#[tokio::test]
async fn restored_token_is_trusted_without_a_wire_call() {
    let sessions = SessionManager::restore("c3RvcmVkOnRva2Vu");

    assert!(sessions.is_authenticated());
    assert_eq!(
        sessions.authorization_header().expect("header"),
        "Basic c3RvcmVkOnRva2Vu"
    );
}

#[tokio::test]
async fn invalidate_is_idempotent() {
    let mut sessions = SessionManager::restore("c3RvcmVkOnRva2Vu");

    sessions.invalidate();
    sessions.invalidate();

    assert!(sessions.current_session().is_none());
    assert_eq!(
        sessions.authorization_header().unwrap_err(),
        ApiError::NoSession
    );
}
