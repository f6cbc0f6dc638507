//! Browser implementations of the session seams.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session core never touches the browser directly. These adapters give it
//! `localStorage`, `window.location` and `fetch` under the `csr` feature; on
//! native builds they degrade to inert stubs so pure UI helpers stay testable.

pub mod navigator;
pub mod storage;
pub mod transport;

use session::DEFAULT_API_BASE;

/// Backend base URL, fixed at build time through `SURFER_API_URL`.
pub fn api_base() -> &'static str {
    option_env!("SURFER_API_URL").unwrap_or(DEFAULT_API_BASE)
}
