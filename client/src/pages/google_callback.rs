//! `/auth/callback`: finishes the Google OAuth handshake.

#[cfg(test)]
#[path = "google_callback_test.rs"]
mod google_callback_test;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use session::CallbackParams;

use crate::state::auth::use_gateway;

/// Read the provider's query parameters; blank values count as missing.
pub(crate) fn callback_params(lookup: impl Fn(&str) -> Option<String>) -> CallbackParams {
    let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
    CallbackParams { code: read("code"), state: read("state"), error: read("error") }
}

#[component]
pub fn GoogleCallbackPage() -> impl IntoView {
    let query = use_query_map();
    let params = query.with_untracked(|q| callback_params(|key| q.get(key)));
    let gateway = use_gateway().get_value();

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let outcome = gateway.complete_google_callback(&params).await;
        log::debug!("callback: finished with {outcome:?}");
    });
    #[cfg(not(feature = "csr"))]
    let _ = (gateway, params);

    view! {
        <div class="callback-page">
            <p aria-busy="true">"Completing sign-in..."</p>
        </div>
    }
}
