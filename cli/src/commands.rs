//! Command handlers for the `surfer` binary.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every handler runs against one `AuthGateway` built for the process. A
//! protected command first bootstraps the session from the credential file,
//! then asks the route guard whether the account may proceed. Handlers
//! return JSON values; `main` owns printing.

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;

use std::path::Path;
use std::rc::Rc;

use serde_json::{Value, json};
use session::guard::evaluate_for;
use session::{
    Access, AuthGateway, CallbackOutcome, CallbackParams, ClientConfig, ClusterInput, CredentialStore, GuardDecision,
    Role, SessionContext, Transport, User, api, routes,
};

use crate::error::CliError;
use crate::navigator::TerminalNavigator;
use crate::store::FileCredentialStore;

/// Wire the gateway for a CLI process.
pub fn gateway(base_url: &str, config_dir: &Path, transport: Rc<dyn Transport>) -> AuthGateway {
    let credentials: Rc<dyn CredentialStore> = Rc::new(FileCredentialStore::new(config_dir));
    let context = SessionContext::new(credentials, Rc::new(TerminalNavigator));
    AuthGateway::new(ClientConfig::new(base_url), transport, context)
}

/// Map a guard decision onto a CLI outcome.
pub fn admit(decision: GuardDecision, user: Option<User>) -> Result<User, CliError> {
    match (decision, user) {
        (GuardDecision::Render, Some(user)) => Ok(user),
        (GuardDecision::Redirect(routes::PENDING_APPROVAL), _) => Err(CliError::PendingApproval),
        (GuardDecision::Redirect(routes::DASHBOARD), _) => Err(CliError::AdminRequired),
        (GuardDecision::Denied, _) => Err(CliError::AccessDenied),
        _ => Err(CliError::NotSignedIn),
    }
}

/// Bootstrap the session and require `access`.
pub async fn require(gateway: &AuthGateway, access: Access) -> Result<User, CliError> {
    let state = gateway.bootstrap().await;
    admit(evaluate_for(&state, access), state.user)
}

// =============================================================================
// SIGN-IN
// =============================================================================

pub async fn login(gateway: &AuthGateway) -> Result<Value, CliError> {
    let state = gateway.bootstrap().await;
    if let Some(user) = state.user {
        return Ok(json!({ "signed_in": true, "user": user }));
    }
    gateway.start_google_login().await?;
    Ok(json!({ "signed_in": false }))
}

pub async fn callback(gateway: &AuthGateway, params: &CallbackParams) -> Result<Value, CliError> {
    match gateway.complete_google_callback(params).await {
        CallbackOutcome::SignedIn => Ok(json!({ "signed_in": true, "user": gateway.view().user() })),
        CallbackOutcome::PendingApproval => Ok(json!({
            "signed_in": false,
            "message": "Your account is awaiting administrator approval.",
        })),
        CallbackOutcome::ProviderError(error) => Err(CliError::SignIn(format!("oauth_error: {error}"))),
        CallbackOutcome::InvalidCallback => Err(CliError::SignIn("invalid_callback".to_owned())),
        CallbackOutcome::ExchangeFailed => Err(CliError::SignIn("callback_failed".to_owned())),
    }
}

pub async fn whoami(gateway: &AuthGateway) -> Result<Value, CliError> {
    let state = gateway.bootstrap().await;
    let user = state.user.ok_or(CliError::NotSignedIn)?;
    Ok(serde_json::to_value(user)?)
}

pub async fn logout(gateway: &AuthGateway) -> Result<Value, CliError> {
    let was_signed_in = gateway.http().context().credential().is_some();
    gateway.logout().await;
    Ok(json!({ "signed_out": was_signed_in }))
}

// =============================================================================
// ADMIN
// =============================================================================

pub async fn list_users(gateway: &AuthGateway) -> Result<Value, CliError> {
    require(gateway, Access::Admin).await?;
    Ok(serde_json::to_value(api::list_users(gateway.http()).await?)?)
}

pub async fn pending_users(gateway: &AuthGateway) -> Result<Value, CliError> {
    require(gateway, Access::Admin).await?;
    Ok(serde_json::to_value(api::pending_users(gateway.http()).await?)?)
}

pub async fn approve_user(gateway: &AuthGateway, user_id: u64) -> Result<Value, CliError> {
    require(gateway, Access::Admin).await?;
    Ok(serde_json::to_value(api::approve_user(gateway.http(), user_id).await?)?)
}

pub async fn reject_user(gateway: &AuthGateway, user_id: u64) -> Result<Value, CliError> {
    require(gateway, Access::Admin).await?;
    Ok(serde_json::to_value(api::reject_user(gateway.http(), user_id).await?)?)
}

pub async fn set_role(gateway: &AuthGateway, user_id: u64, role: Role) -> Result<Value, CliError> {
    require(gateway, Access::Admin).await?;
    Ok(serde_json::to_value(api::update_user_role(gateway.http(), user_id, role).await?)?)
}

// =============================================================================
// CLUSTERS
// =============================================================================

pub async fn list_clusters(gateway: &AuthGateway) -> Result<Value, CliError> {
    require(gateway, Access::Approved).await?;
    Ok(serde_json::to_value(api::list_clusters(gateway.http()).await?)?)
}

pub async fn get_cluster(gateway: &AuthGateway, cluster_id: u64) -> Result<Value, CliError> {
    require(gateway, Access::Approved).await?;
    Ok(serde_json::to_value(api::get_cluster(gateway.http(), cluster_id).await?)?)
}

pub async fn add_cluster(gateway: &AuthGateway, input: &ClusterInput) -> Result<Value, CliError> {
    require(gateway, Access::Approved).await?;
    Ok(serde_json::to_value(api::add_cluster(gateway.http(), input).await?)?)
}

pub async fn update_cluster(gateway: &AuthGateway, cluster_id: u64, input: &ClusterInput) -> Result<Value, CliError> {
    require(gateway, Access::Approved).await?;
    Ok(serde_json::to_value(api::update_cluster(gateway.http(), cluster_id, input).await?)?)
}

pub async fn delete_cluster(gateway: &AuthGateway, cluster_id: u64) -> Result<Value, CliError> {
    require(gateway, Access::Approved).await?;
    Ok(serde_json::to_value(api::delete_cluster(gateway.http(), cluster_id).await?)?)
}

pub async fn test_cluster(gateway: &AuthGateway, cluster_id: u64) -> Result<Value, CliError> {
    require(gateway, Access::Approved).await?;
    Ok(serde_json::to_value(api::test_cluster_connection(gateway.http(), cluster_id).await?)?)
}

// =============================================================================
// KUBERNETES
// =============================================================================

pub async fn list_namespaces(gateway: &AuthGateway, cluster_id: u64) -> Result<Value, CliError> {
    require(gateway, Access::Approved).await?;
    Ok(serde_json::to_value(api::list_namespaces(gateway.http(), cluster_id).await?)?)
}

pub async fn list_pods(gateway: &AuthGateway, cluster_id: u64, namespace: &str) -> Result<Value, CliError> {
    require(gateway, Access::Approved).await?;
    Ok(serde_json::to_value(api::list_pods(gateway.http(), cluster_id, namespace).await?)?)
}

pub async fn list_deployments(gateway: &AuthGateway, cluster_id: u64, namespace: &str) -> Result<Value, CliError> {
    require(gateway, Access::Approved).await?;
    Ok(serde_json::to_value(api::list_deployments(gateway.http(), cluster_id, namespace).await?)?)
}

pub async fn list_services(gateway: &AuthGateway, cluster_id: u64, namespace: &str) -> Result<Value, CliError> {
    require(gateway, Access::Approved).await?;
    Ok(serde_json::to_value(api::list_services(gateway.http(), cluster_id, namespace).await?)?)
}

pub async fn pod_logs(
    gateway: &AuthGateway,
    cluster_id: u64,
    namespace: &str,
    pod: &str,
    tail: u32,
) -> Result<Value, CliError> {
    require(gateway, Access::Approved).await?;
    let logs = api::pod_logs(gateway.http(), cluster_id, namespace, pod, tail).await?;
    Ok(json!({ "pod": pod, "logs": logs }))
}

pub async fn delete_pod(gateway: &AuthGateway, cluster_id: u64, namespace: &str, pod: &str) -> Result<Value, CliError> {
    require(gateway, Access::Approved).await?;
    Ok(serde_json::to_value(api::delete_pod(gateway.http(), cluster_id, namespace, pod).await?)?)
}
