//! Admin panel: review accounts awaiting approval.
//!
//! ERROR HANDLING
//! ==============
//! A failed approve/reject is logged and shown inline; the session is only
//! touched when the backend answers 401.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use leptos::prelude::*;
use session::{Access, ApiError, User};

use crate::components::protected_route::ProtectedRoute;
use crate::state::auth::use_gateway;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Review {
    Approve,
    Reject,
}

impl Review {
    pub(crate) fn verb(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

pub(crate) fn pending_summary(count: usize) -> String {
    match count {
        0 => "No users are waiting for approval.".to_owned(),
        1 => "1 user is waiting for approval.".to_owned(),
        n => format!("{n} users are waiting for approval."),
    }
}

pub(crate) fn review_failed_message(review: Review, user: &User, err: &ApiError) -> String {
    format!("Failed to {} {}: {err}", review.verb(), user.email)
}

#[component]
pub fn AdminPage() -> impl IntoView {
    view! {
        <ProtectedRoute access=Access::Admin>
            <PendingApprovals/>
        </ProtectedRoute>
    }
}

#[component]
fn PendingApprovals() -> impl IntoView {
    let users = RwSignal::new(Vec::<User>::new());
    let loaded = RwSignal::new(false);
    let notice = RwSignal::new(None::<String>);
    let gateway = use_gateway();

    #[cfg(feature = "csr")]
    {
        let gateway = gateway.get_value();
        leptos::task::spawn_local(async move {
            match session::api::pending_users(gateway.http()).await {
                Ok(list) => users.set(list),
                Err(err) => {
                    log::error!("admin: failed to load pending users: {err}");
                    notice.set(Some(format!("Failed to load pending users: {err}")));
                }
            }
            loaded.set(true);
        });
    }

    let submit_review = move |user: User, review: Review| {
        notice.set(None);
        #[cfg(feature = "csr")]
        {
            let gateway = gateway.get_value();
            leptos::task::spawn_local(async move {
                let result = match review {
                    Review::Approve => session::api::approve_user(gateway.http(), user.id).await,
                    Review::Reject => session::api::reject_user(gateway.http(), user.id).await,
                };
                match result {
                    Ok(_) => users.update(|list| list.retain(|u| u.id != user.id)),
                    Err(err) => {
                        log::error!("admin: {} of user {} failed: {err}", review.verb(), user.id);
                        notice.set(Some(review_failed_message(review, &user, &err)));
                    }
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (gateway, user, review);
    };

    view! {
        <section class="admin">
            <h1>"Pending Approvals"</h1>
            <Show when=move || notice.get().is_some()>
                <p class="admin__error">{move || notice.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || loaded.get() fallback=|| view! { <p aria-busy="true">"Loading..."</p> }>
                <p>{move || pending_summary(users.with(Vec::len))}</p>
                <For
                    each=move || users.get()
                    key=|user: &User| user.id
                    children=move |user: User| {
                        let approve_target = user.clone();
                        let reject_target = user.clone();
                        view! {
                            <div class="admin__row">
                                <span>{user.display_name().to_owned()}</span>
                                <span class="admin__email">{user.email.clone()}</span>
                                <button on:click=move |_| submit_review(approve_target.clone(), Review::Approve)>
                                    "Approve"
                                </button>
                                <button on:click=move |_| submit_review(reject_target.clone(), Review::Reject)>
                                    "Reject"
                                </button>
                            </div>
                        }
                    }
                />
            </Show>
        </section>
    }
}
