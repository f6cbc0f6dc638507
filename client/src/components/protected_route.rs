//! Route wrapper that renders its children only for admitted accounts.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each mounted wrapper owns one `RouteGuard`. The guard re-runs whenever the
//! session mirror changes, so a logout or 401 elsewhere unmounts protected
//! content on the next tick. Nothing protected renders while bootstrap is
//! still pending.

use leptos::prelude::*;
use session::{Access, GuardDecision, RouteGuard};

use crate::state::auth::{use_gateway, use_session};

#[component]
pub fn ProtectedRoute(#[prop(optional)] access: Access, children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    let gateway = use_gateway();
    let guard = StoredValue::new_local(RouteGuard::new(access));
    let decision = RwSignal::new(GuardDecision::Wait);

    Effect::new(move || {
        let state = session.get();
        let gateway = gateway.get_value();
        let next = guard.with_value(|guard| guard.check(&state, gateway.http().context().navigator()));
        if let Some(next) = settle(decision.get_untracked(), next) {
            decision.set(next);
        }
    });

    move || match decision.get() {
        GuardDecision::Render => children().into_any(),
        GuardDecision::Denied => view! { <AccessDenied/> }.into_any(),
        GuardDecision::Wait => view! { <div class="guard-wait" aria-busy="true">"Loading..."</div> }.into_any(),
        GuardDecision::Redirect(_) => ().into_any(),
    }
}

/// The decision to publish, or `None` when it matches the current one and
/// subscribers should not re-render.
fn settle(current: GuardDecision, next: GuardDecision) -> Option<GuardDecision> {
    (current != next).then_some(next)
}

#[component]
fn AccessDenied() -> impl IntoView {
    view! {
        <div class="guard-notice">
            <h2>"Access denied"</h2>
            <p>"Your account request was declined. Contact an administrator if you believe this is a mistake."</p>
        </div>
    }
}

#[cfg(test)]
#[path = "protected_route_test.rs"]
mod protected_route_test;
