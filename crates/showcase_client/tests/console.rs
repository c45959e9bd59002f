use pretty_assertions::assert_eq;
use showcase_client::{AdminConsole, ApiError, ApiSettings, ReqwestApi};
use tokio_util::sync::CancellationToken;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestApi {
    let base = Url::parse(&server.uri()).expect("server url");
    ReqwestApi::new(base, ApiSettings::default()).expect("client")
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(serde_json::json!({
            "username": "admin",
            "password": "hunter2",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "Login successful",
        })))
        .mount(server)
        .await;
}

async fn mount_catalog(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/repos"))
        .and(query_param("include_forks", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 1, "name": "spam-repo", "description": "noise", "url": "https://example.com/spam-repo"},
            {"id": 2, "name": "cool-app", "description": "signal", "url": "https://example.com/cool-app"},
        ])))
        .mount(server)
        .await;
}

async fn mount_messages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/contact/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "name": "Ada",
            "email": "ada@example.com",
            "subject": "Hello",
            "message": "Nice catalog.",
            "timestamp": "2023-09-15T12:00:00",
        }])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn full_admin_round_trip() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_catalog(&server).await;
    mount_messages(&server).await;
    // First sync sees one excluded name; once this mock is spent, the
    // follow-up below answers 401.
    Mock::given(method("GET"))
        .and(path("/blacklist"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!(["spam-repo"])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/blacklist"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/blacklist"))
        .and(body_json(serde_json::json!({"name": "cool-app"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "message": "Project 'cool-app' added to blacklist",
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/blacklist/spam-repo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Project 'spam-repo' removed from blacklist",
        })))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let mut console = AdminConsole::new(api_for(&server), true);

    console.login("admin", "hunter2").await.expect("login ok");
    let warnings = console.refresh(&cancel).await.expect("sync ok");
    assert!(warnings.is_empty());

    let annotated = console.annotated();
    assert_eq!(annotated.len(), 2);
    assert_eq!(annotated[0].entry.name, "spam-repo");
    assert!(annotated[0].excluded);
    assert_eq!(annotated[1].entry.name, "cool-app");
    assert!(!annotated[1].excluded);
    assert_eq!(console.messages()[0].subject, "Hello");

    let message = console
        .add_entry("cool-app", &cancel)
        .await
        .expect("add ok");
    assert_eq!(message, "Project 'cool-app' added to blacklist");
    assert_eq!(
        console.exclusions().names(),
        ["spam-repo".to_string(), "cool-app".to_string()]
    );

    console
        .remove_entry("spam-repo", &cancel)
        .await
        .expect("remove ok");
    assert_eq!(console.exclusions().names(), ["cool-app".to_string()]);

    // The exclusion fetch now answers 401: session gone, caches cleared.
    let err = console.refresh(&cancel).await.unwrap_err();
    assert_eq!(err, ApiError::SessionExpired);
    assert!(!console.is_authenticated());
    assert!(console.annotated().is_empty());
    assert!(console.exclusions().is_empty());
    assert!(console.messages().is_empty());

    // A fresh login is required before the next sync.
    assert_eq!(
        console.refresh(&cancel).await.unwrap_err(),
        ApiError::NoSession
    );
}

#[tokio::test]
async fn logout_clears_cached_collections() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_catalog(&server).await;
    mount_messages(&server).await;
    Mock::given(method("GET"))
        .and(path("/blacklist"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let mut console = AdminConsole::new(api_for(&server), true);

    console.login("admin", "hunter2").await.expect("login ok");
    console.refresh(&cancel).await.expect("sync ok");
    assert_eq!(console.catalog().len(), 2);

    console.logout();

    assert!(!console.is_authenticated());
    assert!(console.catalog().is_empty());
    assert!(console.messages().is_empty());
    assert!(console.exclusions().is_empty());
}

#[tokio::test]
async fn login_rejection_surfaces_the_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "success": false,
            "message": "Invalid credentials",
        })))
        .mount(&server)
        .await;

    let mut console = AdminConsole::new(api_for(&server), true);

    let err = console.login("admin", "nope").await.unwrap_err();
    assert_eq!(err, ApiError::Auth("Invalid credentials".to_string()));
    assert!(!console.is_authenticated());
}
