//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Public pages (login, OAuth callback, pending approval) read the session
//! directly. Protected pages wrap their content in `ProtectedRoute` and only
//! fetch data once the guard admits the session.

pub mod admin;
pub mod cluster;
pub mod dashboard;
pub mod google_callback;
pub mod login;
pub mod pending_approval;
