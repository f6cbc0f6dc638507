//! Holding page for accounts awaiting administrator approval.

use leptos::prelude::*;

use crate::state::auth::use_session;

#[component]
pub fn PendingApprovalPage() -> impl IntoView {
    let session = use_session();
    let email = move || session.with(|s| s.user.as_ref().map(|u| u.email.clone()));

    view! {
        <div class="pending-page">
            <div class="pending-card">
                <h1>"Pending Approval"</h1>
                <p>
                    "Your account is waiting for administrator approval. "
                    "You'll receive access once an admin reviews your request."
                </p>
                <Show when=move || email().is_some()>
                    <p class="pending-card__email">"Signed in as " {move || email().unwrap_or_default()}</p>
                </Show>
                <p class="pending-card__hint">"Please check back later or contact your administrator."</p>
            </div>
        </div>
    }
}
