use std::path::PathBuf;

use session::{ApiError, CredentialError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("not signed in; run `surfer login` first")]
    NotSignedIn,
    #[error("account is awaiting administrator approval")]
    PendingApproval,
    #[error("account access was rejected by an administrator")]
    AccessDenied,
    #[error("this command requires the admin role")]
    AdminRequired,
    #[error("sign-in did not complete ({0})")]
    SignIn(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Credential(#[from] CredentialError),
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("cannot read kubeconfig {}: {source}", path.display())]
    Kubeconfig { path: PathBuf, source: std::io::Error },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
