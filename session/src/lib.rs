//! # session
//!
//! Client-side authentication and session lifecycle for the Surfer
//! Kubernetes console.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both the browser frontend (`client/`) and the command-line client
//! (`cli/`) drive the same state machine: bootstrap a session from the
//! persisted `auth_token`, gate protected views on `{user, loading}`, and
//! force a consistent logout whenever the backend answers `401`.
//!
//! Platform effects stay behind three seams: [`Transport`] sends one HTTP
//! request, [`CredentialStore`] owns the durable credential slot, and
//! [`Navigator`] performs soft navigation and hard redirects.

pub mod api;
pub mod config;
pub mod credential;
pub mod error;
pub mod gateway;
pub mod guard;
pub mod http;
pub mod navigator;
pub mod store;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_support;

pub use config::{ClientConfig, DEFAULT_API_BASE};
pub use credential::{CREDENTIAL_KEY, CredentialStore, MemoryCredentialStore};
pub use error::{ApiError, CredentialError};
pub use gateway::{AuthGateway, CallbackOutcome, CallbackParams};
pub use guard::{Access, GuardDecision, RouteGuard};
pub use http::HttpClient;
pub use navigator::{Navigator, routes};
pub use store::{SessionContext, SessionState, SessionView};
pub use transport::{ApiRequest, ApiResponse, Method, Transport, TransportError};
pub use types::{Cluster, ClusterInput, Deployment, Namespace, Pod, Role, Service, User, UserStatus};
