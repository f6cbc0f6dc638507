//! Typed wrappers for the backend endpoints.
//!
//! ERROR HANDLING
//! ==============
//! Every call goes through [`HttpClient`], so a 401 anywhere resets the
//! session. All other failures are action-local: callers log or display
//! them and never touch session state.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use crate::error::ApiError;
use crate::http::HttpClient;
use crate::transport::Method;
use crate::types::{
    CallbackResponse, Cluster, ClusterInput, ConnectionStatus, Deployment, LoginUrlResponse, MessageResponse, Namespace,
    Pod, PodLogs, Role, RoleUpdate, Service, User,
};

// =============================================================================
// ENDPOINT PATHS
// =============================================================================

const CURRENT_USER: &str = "/users/me";
const USERS: &str = "/users";
const PENDING_USERS: &str = "/admin/pending-users";
const GOOGLE_LOGIN: &str = "/auth/google/login";
const LOGOUT: &str = "/auth/logout";
const CLUSTERS: &str = "/clusters";

/// Log lines requested when the caller does not choose a tail.
pub const DEFAULT_LOG_TAIL: u32 = 100;

fn google_callback_endpoint(code: &str, state: &str) -> String {
    format!(
        "/auth/google/callback?code={}&state={}",
        urlencoding::encode(code),
        urlencoding::encode(state)
    )
}

fn approve_user_endpoint(user_id: u64) -> String {
    format!("/admin/approve-user/{user_id}")
}

fn reject_user_endpoint(user_id: u64) -> String {
    format!("/admin/reject-user/{user_id}")
}

fn user_role_endpoint(user_id: u64) -> String {
    format!("/admin/users/{user_id}/role")
}

fn cluster_endpoint(cluster_id: u64) -> String {
    format!("{CLUSTERS}/{cluster_id}")
}

fn cluster_test_endpoint(cluster_id: u64) -> String {
    format!("{CLUSTERS}/{cluster_id}/test")
}

fn namespaces_endpoint(cluster_id: u64) -> String {
    format!("/k8s/clusters/{cluster_id}/namespaces")
}

fn namespaced_endpoint(cluster_id: u64, namespace: &str, resource: &str) -> String {
    format!("{}/{}/{resource}", namespaces_endpoint(cluster_id), urlencoding::encode(namespace))
}

fn pod_endpoint(cluster_id: u64, namespace: &str, pod: &str) -> String {
    format!("{}/{}", namespaced_endpoint(cluster_id, namespace, "pods"), urlencoding::encode(pod))
}

fn pod_logs_endpoint(cluster_id: u64, namespace: &str, pod: &str, tail: u32) -> String {
    format!("{}/logs?tail={tail}", pod_endpoint(cluster_id, namespace, pod))
}

// =============================================================================
// AUTH
// =============================================================================

/// `GET /users/me`.
///
/// # Errors
///
/// Any non-200 outcome means "not authenticated" to the bootstrap path.
pub async fn fetch_current_user(http: &HttpClient) -> Result<User, ApiError> {
    http.get_json(CURRENT_USER).await
}

/// `GET /auth/google/login`: the provider URL to send the browser to.
///
/// # Errors
///
/// Returns the underlying request or decode error.
pub async fn google_login_url(http: &HttpClient) -> Result<String, ApiError> {
    let body: LoginUrlResponse = http.get_json(GOOGLE_LOGIN).await?;
    Ok(body.url)
}

/// `GET /auth/google/callback?code&state`: exchange the provider code.
///
/// # Errors
///
/// Returns the underlying request or decode error.
pub async fn google_callback(http: &HttpClient, code: &str, state: &str) -> Result<CallbackResponse, ApiError> {
    http.get_json(&google_callback_endpoint(code, state)).await
}

/// `POST /auth/logout`. Any 2xx counts as success; the body is ignored.
///
/// # Errors
///
/// Returns the underlying request error.
pub async fn logout(http: &HttpClient) -> Result<(), ApiError> {
    http.request(Method::Post, LOGOUT, None).await.map(|_| ())
}

// =============================================================================
// USERS / ADMIN
// =============================================================================

/// `GET /users`.
///
/// # Errors
///
/// Returns the underlying request or decode error.
pub async fn list_users(http: &HttpClient) -> Result<Vec<User>, ApiError> {
    http.get_json(USERS).await
}

/// `GET /admin/pending-users`.
///
/// # Errors
///
/// Returns the underlying request or decode error.
pub async fn pending_users(http: &HttpClient) -> Result<Vec<User>, ApiError> {
    http.get_json(PENDING_USERS).await
}

/// `POST /admin/approve-user/{id}`.
///
/// # Errors
///
/// Returns the underlying request or decode error.
pub async fn approve_user(http: &HttpClient, user_id: u64) -> Result<MessageResponse, ApiError> {
    http.post_json(&approve_user_endpoint(user_id)).await
}

/// `POST /admin/reject-user/{id}`.
///
/// # Errors
///
/// Returns the underlying request or decode error.
pub async fn reject_user(http: &HttpClient, user_id: u64) -> Result<MessageResponse, ApiError> {
    http.post_json(&reject_user_endpoint(user_id)).await
}

/// `PUT /admin/users/{id}/role`.
///
/// # Errors
///
/// Returns the underlying request or decode error.
pub async fn update_user_role(http: &HttpClient, user_id: u64, role: Role) -> Result<MessageResponse, ApiError> {
    http.put_body(&user_role_endpoint(user_id), &RoleUpdate { role }).await
}

// =============================================================================
// CLUSTERS
// =============================================================================

/// `GET /clusters`.
///
/// # Errors
///
/// Returns the underlying request or decode error.
pub async fn list_clusters(http: &HttpClient) -> Result<Vec<Cluster>, ApiError> {
    http.get_json(CLUSTERS).await
}

/// `GET /clusters/{id}`.
///
/// # Errors
///
/// Returns the underlying request or decode error.
pub async fn get_cluster(http: &HttpClient, cluster_id: u64) -> Result<Cluster, ApiError> {
    http.get_json(&cluster_endpoint(cluster_id)).await
}

/// `POST /clusters`. Name and kubeconfig are required by the backend.
///
/// # Errors
///
/// Returns the underlying request, encode or decode error.
pub async fn add_cluster(http: &HttpClient, input: &ClusterInput) -> Result<Cluster, ApiError> {
    http.post_body(CLUSTERS, input).await
}

/// `PUT /clusters/{id}`.
///
/// # Errors
///
/// Returns the underlying request, encode or decode error.
pub async fn update_cluster(
    http: &HttpClient,
    cluster_id: u64,
    input: &ClusterInput,
) -> Result<MessageResponse, ApiError> {
    http.put_body(&cluster_endpoint(cluster_id), input).await
}

/// `DELETE /clusters/{id}`.
///
/// # Errors
///
/// Returns the underlying request or decode error.
pub async fn delete_cluster(http: &HttpClient, cluster_id: u64) -> Result<MessageResponse, ApiError> {
    http.delete_json(&cluster_endpoint(cluster_id)).await
}

/// `POST /clusters/{id}/test`: ask the backend to reach the cluster.
///
/// # Errors
///
/// An unreachable cluster comes back as a `Status` error carrying the
/// backend's message.
pub async fn test_cluster_connection(http: &HttpClient, cluster_id: u64) -> Result<ConnectionStatus, ApiError> {
    http.post_json(&cluster_test_endpoint(cluster_id)).await
}

// =============================================================================
// KUBERNETES
// =============================================================================

/// `GET /k8s/clusters/{id}/namespaces`.
///
/// # Errors
///
/// Returns the underlying request or decode error.
pub async fn list_namespaces(http: &HttpClient, cluster_id: u64) -> Result<Vec<Namespace>, ApiError> {
    http.get_json(&namespaces_endpoint(cluster_id)).await
}

/// # Errors
///
/// Returns the underlying request or decode error.
pub async fn list_pods(http: &HttpClient, cluster_id: u64, namespace: &str) -> Result<Vec<Pod>, ApiError> {
    http.get_json(&namespaced_endpoint(cluster_id, namespace, "pods")).await
}

/// # Errors
///
/// Returns the underlying request or decode error.
pub async fn list_deployments(
    http: &HttpClient,
    cluster_id: u64,
    namespace: &str,
) -> Result<Vec<Deployment>, ApiError> {
    http.get_json(&namespaced_endpoint(cluster_id, namespace, "deployments")).await
}

/// # Errors
///
/// Returns the underlying request or decode error.
pub async fn list_services(http: &HttpClient, cluster_id: u64, namespace: &str) -> Result<Vec<Service>, ApiError> {
    http.get_json(&namespaced_endpoint(cluster_id, namespace, "services")).await
}

/// `GET .../pods/{pod}/logs?tail=N`: the last `tail` lines as one string.
///
/// # Errors
///
/// Returns the underlying request or decode error.
pub async fn pod_logs(
    http: &HttpClient,
    cluster_id: u64,
    namespace: &str,
    pod: &str,
    tail: u32,
) -> Result<String, ApiError> {
    let body: PodLogs = http.get_json(&pod_logs_endpoint(cluster_id, namespace, pod, tail)).await?;
    Ok(body.logs)
}

/// `DELETE .../pods/{pod}`.
///
/// # Errors
///
/// Returns the underlying request or decode error.
pub async fn delete_pod(
    http: &HttpClient,
    cluster_id: u64,
    namespace: &str,
    pod: &str,
) -> Result<MessageResponse, ApiError> {
    http.delete_json(&pod_endpoint(cluster_id, namespace, pod)).await
}
