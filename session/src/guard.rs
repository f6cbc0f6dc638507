//! Render-vs-redirect decisions for protected views.
//!
//! SYSTEM CONTEXT
//! ==============
//! `evaluate_for` is a pure function of `(loading, user)`. `RouteGuard`
//! wraps it for a mounted view and remembers the redirect it last issued, so
//! re-renders in a terminal state do not navigate again.
//!
//! A rejected account gets `Denied`: the view shows a notice in place of the
//! protected content and no navigation happens.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::cell::Cell;

use crate::navigator::{Navigator, routes};
use crate::store::SessionState;
use crate::types::{User, UserStatus};

/// What a protected view requires beyond an approved account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Access {
    #[default]
    Approved,
    Admin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Bootstrap still running: show a neutral waiting indicator.
    Wait,
    Redirect(&'static str),
    Render,
    /// Account was rejected: show a notice, never the content.
    Denied,
}

/// Decide for a view that needs an approved account.
#[must_use]
pub fn evaluate(state: &SessionState) -> GuardDecision {
    evaluate_for(state, Access::Approved)
}

#[must_use]
pub fn evaluate_for(state: &SessionState, access: Access) -> GuardDecision {
    if state.loading {
        return GuardDecision::Wait;
    }
    let Some(user) = &state.user else {
        return GuardDecision::Redirect(routes::LOGIN);
    };
    match user.status {
        UserStatus::Pending => GuardDecision::Redirect(routes::PENDING_APPROVAL),
        UserStatus::Rejected => GuardDecision::Denied,
        UserStatus::Approved => match access {
            Access::Admin if !user.is_admin() => GuardDecision::Redirect(routes::DASHBOARD),
            Access::Approved | Access::Admin => GuardDecision::Render,
        },
    }
}

/// Where the login page forwards an already signed-in user, if anywhere.
#[must_use]
pub fn login_page_redirect(state: &SessionState) -> Option<&'static str> {
    let user = state.user.as_ref()?;
    match user.status {
        UserStatus::Approved | UserStatus::Pending => Some(landing_route(user)),
        UserStatus::Rejected => None,
    }
}

/// First page for a freshly signed-in user.
#[must_use]
pub fn landing_route(user: &User) -> &'static str {
    match user.status {
        UserStatus::Pending => routes::PENDING_APPROVAL,
        UserStatus::Approved | UserStatus::Rejected => routes::DASHBOARD,
    }
}

/// Stateful guard for one mounted protected view.
#[derive(Debug, Default)]
pub struct RouteGuard {
    access: Access,
    last_redirect: Cell<Option<&'static str>>,
}

impl RouteGuard {
    #[must_use]
    pub fn new(access: Access) -> Self {
        Self { access, last_redirect: Cell::new(None) }
    }

    /// Evaluate `state`, navigating only when the redirect target changes.
    pub fn check(&self, state: &SessionState, navigator: &dyn Navigator) -> GuardDecision {
        let decision = evaluate_for(state, self.access);
        match decision {
            GuardDecision::Redirect(target) => {
                if self.last_redirect.get() != Some(target) {
                    self.last_redirect.set(Some(target));
                    navigator.navigate(target);
                }
            }
            GuardDecision::Render | GuardDecision::Denied => self.last_redirect.set(None),
            GuardDecision::Wait => {}
        }
        decision
    }
}
