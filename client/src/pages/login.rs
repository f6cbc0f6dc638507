//! Login page offering Google sign-in.
//!
//! SYSTEM CONTEXT
//! ==============
//! Public route. A visitor who already holds an approved or pending session is
//! forwarded to their landing page; failed OAuth callbacks land here with an
//! `error` query code that is shown as a notice.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use session::guard::login_page_redirect;

use crate::state::auth::{use_gateway, use_session};

pub(crate) fn login_error_message(code: &str) -> &'static str {
    match code {
        "oauth_error" => "Google sign-in was cancelled or refused.",
        "invalid_callback" => "The sign-in response was incomplete. Please try again.",
        "callback_failed" => "We could not complete sign-in. Please try again.",
        _ => "Sign-in failed. Please try again.",
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let gateway = use_gateway();
    let query = use_query_map();
    let busy = RwSignal::new(false);
    let failure = RwSignal::new(None::<&'static str>);

    Effect::new(move || {
        if let Some(target) = session.with(login_page_redirect) {
            gateway.get_value().http().context().navigator().navigate(target);
        }
    });

    let notice = move || {
        failure
            .get()
            .or_else(|| query.with(|q| q.get("error")).map(|code| login_error_message(&code)))
    };

    let on_sign_in = move |_: leptos::ev::MouseEvent| {
        if busy.get() {
            return;
        }
        busy.set(true);
        failure.set(None);
        let gateway = gateway.get_value();

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            if gateway.start_google_login().await.is_err() {
                failure.set(Some("Could not reach the sign-in service. Please try again."));
                busy.set(false);
            }
        });
        #[cfg(not(feature = "csr"))]
        let _ = gateway;
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Surfer"</h1>
                <p class="login-card__subtitle">"Kubernetes Management UI"</p>
                <p>"Sign in to manage your Kubernetes clusters from a single pane of glass."</p>
                <Show when=move || notice().is_some()>
                    <p class="login-message login-message--error">{move || notice().unwrap_or_default()}</p>
                </Show>
                <button class="login-button" on:click=on_sign_in disabled=move || busy.get()>
                    "Sign in with Google"
                </button>
                <p class="login-card__caption">"Secure authentication via Google OAuth2"</p>
            </div>
        </div>
    }
}
