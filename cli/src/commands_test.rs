use serde_json::json;
use session::UserStatus;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::transport::ReqwestTransport;

// =============================================================================
// HARNESS
// =============================================================================

struct Env {
    server: MockServer,
    dir: tempfile::TempDir,
}

impl Env {
    async fn new() -> Self {
        Self { server: MockServer::start().await, dir: tempfile::tempdir().unwrap() }
    }

    fn store(&self) -> FileCredentialStore {
        FileCredentialStore::new(self.dir.path())
    }

    fn signed_in(self, token: &str) -> Self {
        self.store().set(token).unwrap();
        self
    }

    fn gateway(&self) -> AuthGateway {
        let base = format!("{}/api/v1", self.server.uri());
        gateway(&base, self.dir.path(), Rc::new(ReqwestTransport::new().unwrap()))
    }

    async fn me(&self, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/api/v1/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }
}

fn user_json(id: u64, role: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "email": format!("user{id}@example.com"),
        "name": format!("User {id}"),
        "role": role,
        "status": status,
    })
}

// =============================================================================
// ADMISSION
// =============================================================================

#[test]
fn admit_maps_guard_decisions() {
    let user: User = serde_json::from_value(user_json(1, "user", "approved")).unwrap();

    assert_eq!(admit(GuardDecision::Render, Some(user.clone())).unwrap().id, 1);
    assert!(matches!(admit(GuardDecision::Redirect(routes::LOGIN), None), Err(CliError::NotSignedIn)));
    assert!(matches!(
        admit(GuardDecision::Redirect(routes::PENDING_APPROVAL), Some(user.clone())),
        Err(CliError::PendingApproval)
    ));
    assert!(matches!(
        admit(GuardDecision::Redirect(routes::DASHBOARD), Some(user.clone())),
        Err(CliError::AdminRequired)
    ));
    assert!(matches!(admit(GuardDecision::Denied, Some(user)), Err(CliError::AccessDenied)));
    assert!(matches!(admit(GuardDecision::Wait, None), Err(CliError::NotSignedIn)));
}

#[tokio::test]
async fn protected_command_without_credential_sends_nothing() {
    let env = Env::new().await;
    Mock::given(method("GET")).respond_with(ResponseTemplate::new(500)).expect(0).mount(&env.server).await;

    let result = list_clusters(&env.gateway()).await;

    assert!(matches!(result, Err(CliError::NotSignedIn)));
}

#[tokio::test]
async fn whoami_sends_bearer_token() {
    let env = Env::new().await.signed_in("tok-1");
    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(7, "user", "approved")))
        .expect(1)
        .mount(&env.server)
        .await;

    let value = whoami(&env.gateway()).await.unwrap();

    assert_eq!(value["id"], 7);
    assert_eq!(value["status"], "approved");
}

#[tokio::test]
async fn rejected_token_removes_credential_file() {
    let env = Env::new().await.signed_in("stale");
    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid token" })))
        .mount(&env.server)
        .await;

    let result = list_clusters(&env.gateway()).await;

    assert!(matches!(result, Err(CliError::NotSignedIn)));
    assert!(!env.store().path().exists());
}

#[tokio::test]
async fn admin_command_refuses_plain_user() {
    let env = Env::new().await.signed_in("tok");
    env.me(user_json(2, "user", "approved")).await;
    Mock::given(path("/api/v1/users")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&env.server).await;

    let result = list_users(&env.gateway()).await;

    assert!(matches!(result, Err(CliError::AdminRequired)));
}

#[tokio::test]
async fn pending_and_rejected_accounts_are_refused() {
    let env = Env::new().await.signed_in("tok");
    env.me(user_json(3, "pending", "pending")).await;
    assert!(matches!(list_clusters(&env.gateway()).await, Err(CliError::PendingApproval)));

    let env = Env::new().await.signed_in("tok");
    env.me(user_json(4, "user", "rejected")).await;
    assert!(matches!(list_clusters(&env.gateway()).await, Err(CliError::AccessDenied)));
}

#[tokio::test]
async fn admin_can_approve_user() {
    let env = Env::new().await.signed_in("tok");
    env.me(user_json(1, "admin", "approved")).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/admin/approve-user/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "User approved" })))
        .expect(1)
        .mount(&env.server)
        .await;

    let value = approve_user(&env.gateway(), 9).await.unwrap();

    assert_eq!(value["message"], "User approved");
}

#[tokio::test]
async fn cluster_fetch_surfaces_backend_message() {
    let env = Env::new().await.signed_in("tok");
    env.me(user_json(1, "user", "approved")).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/clusters/5"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Cluster not found" })))
        .mount(&env.server)
        .await;

    let err = get_cluster(&env.gateway(), 5).await.unwrap_err();

    match err {
        CliError::Api(api) => {
            assert_eq!(api.status(), Some(404));
            assert!(api.to_string().contains("Cluster not found"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

// =============================================================================
// KUBERNETES
// =============================================================================

#[tokio::test]
async fn namespaces_are_listed_for_approved_user() {
    let env = Env::new().await.signed_in("tok");
    env.me(user_json(1, "user", "approved")).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/k8s/clusters/3/namespaces"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "metadata": { "name": "default" }, "status": { "phase": "Active" } }
        ])))
        .expect(1)
        .mount(&env.server)
        .await;

    let value = list_namespaces(&env.gateway(), 3).await.unwrap();

    assert_eq!(value[0]["metadata"]["name"], "default");
    assert_eq!(value[0]["status"]["phase"], "Active");
}

#[tokio::test]
async fn pods_are_listed_per_namespace() {
    let env = Env::new().await.signed_in("tok");
    env.me(user_json(1, "user", "approved")).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/k8s/clusters/3/namespaces/shop/pods"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "metadata": { "name": "web-0", "namespace": "shop" },
            "status": { "phase": "Running", "podIP": "10.0.0.7" },
            "spec": { "containers": [{ "name": "web", "image": "nginx:1.27" }] }
        }])))
        .expect(1)
        .mount(&env.server)
        .await;

    let value = list_pods(&env.gateway(), 3, "shop").await.unwrap();

    assert_eq!(value[0]["metadata"]["name"], "web-0");
    assert_eq!(value[0]["status"]["podIP"], "10.0.0.7");
}

#[tokio::test]
async fn pending_account_cannot_browse_cluster() {
    let env = Env::new().await.signed_in("tok");
    env.me(user_json(1, "pending", "pending")).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/k8s/clusters/3/namespaces"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&env.server)
        .await;

    let err = list_namespaces(&env.gateway(), 3).await.unwrap_err();

    assert!(matches!(err, CliError::PendingApproval));
}

#[tokio::test]
async fn pod_logs_use_requested_tail() {
    let env = Env::new().await.signed_in("tok");
    env.me(user_json(1, "user", "approved")).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/k8s/clusters/3/namespaces/shop/pods/web-0/logs"))
        .and(query_param("tail", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "logs": "ready\n" })))
        .expect(1)
        .mount(&env.server)
        .await;

    let value = pod_logs(&env.gateway(), 3, "shop", "web-0", 20).await.unwrap();

    assert_eq!(value, json!({ "pod": "web-0", "logs": "ready\n" }));
}

#[tokio::test]
async fn expired_token_while_browsing_signs_out() {
    let env = Env::new().await.signed_in("tok");
    env.me(user_json(1, "user", "approved")).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/k8s/clusters/3/namespaces/shop/services"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid token" })))
        .mount(&env.server)
        .await;

    let err = list_services(&env.gateway(), 3, "shop").await.unwrap_err();

    assert!(matches!(err, CliError::Api(session::ApiError::Unauthorized)));
    assert!(!env.store().path().exists());
}

// =============================================================================
// SIGN-IN
// =============================================================================

#[tokio::test]
async fn login_fetches_provider_url_when_signed_out() {
    let env = Env::new().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/auth/google/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "url": "https://accounts.example/auth" })))
        .expect(1)
        .mount(&env.server)
        .await;

    let value = login(&env.gateway()).await.unwrap();

    assert_eq!(value["signed_in"], false);
}

#[tokio::test]
async fn callback_persists_token_and_user() {
    let env = Env::new().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/auth/google/callback"))
        .and(query_param("code", "c1"))
        .and(query_param("state", "s1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "token": "fresh", "user": user_json(5, "user", "approved") })),
        )
        .mount(&env.server)
        .await;

    let gw = env.gateway();
    let params = CallbackParams { code: Some("c1".into()), state: Some("s1".into()), error: None };
    let value = callback(&gw, &params).await.unwrap();

    assert_eq!(value["signed_in"], true);
    assert_eq!(env.store().token().as_deref(), Some("fresh"));
    assert_eq!(gw.view().user().map(|u| u.status), Some(UserStatus::Approved));
}

#[tokio::test]
async fn callback_without_code_is_invalid() {
    let env = Env::new().await;
    let params = CallbackParams { code: None, state: Some("s".into()), error: None };

    let err = callback(&env.gateway(), &params).await.unwrap_err();

    assert!(matches!(err, CliError::SignIn(code) if code == "invalid_callback"));
    assert!(env.store().token().is_none());
}

#[tokio::test]
async fn logout_notifies_backend_and_removes_file() {
    let env = Env::new().await.signed_in("tok");
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/logout"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Logged out" })))
        .expect(1)
        .mount(&env.server)
        .await;
    env.me(user_json(1, "user", "approved")).await;

    let gw = env.gateway();
    gw.bootstrap().await;
    let value = logout(&gw).await.unwrap();

    assert_eq!(value["signed_out"], true);
    assert!(!env.store().path().exists());
}
