//! Navigation seam and the application's route table.

/// Route paths the session layer navigates to.
pub mod routes {
    pub const LOGIN: &str = "/login";
    pub const PENDING_APPROVAL: &str = "/pending-approval";
    pub const DASHBOARD: &str = "/dashboard";
    pub const ADMIN: &str = "/admin";
    pub const CLUSTERS: &str = "/clusters";
    pub const GOOGLE_CALLBACK: &str = "/auth/callback";

    /// `/login?error=<code>`, used by the OAuth callback failure branches.
    #[must_use]
    pub fn login_with_error(code: &str) -> String {
        format!("{LOGIN}?error={code}")
    }
}

/// Issues navigation instructions on behalf of the session layer.
///
/// State mutation always happens before either call, so a navigator is free
/// to tear the whole process state down.
pub trait Navigator {
    /// In-app navigation that keeps in-memory state.
    fn navigate(&self, path: &str);

    /// Full navigation that discards all in-memory state.
    fn hard_redirect(&self, target: &str);
}
