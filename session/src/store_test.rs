use std::cell::RefCell;

use super::*;
use crate::credential::MemoryCredentialStore;
use crate::test_support::{Nav, RecordingNavigator, user};

fn context(token: Option<&str>) -> (SessionContext, Rc<MemoryCredentialStore>, Rc<RecordingNavigator>) {
    let credentials = Rc::new(token.map_or_else(MemoryCredentialStore::new, MemoryCredentialStore::with_token));
    let navigator = Rc::new(RecordingNavigator::default());
    let ctx = SessionContext::new(credentials.clone(), navigator.clone());
    (ctx, credentials, navigator)
}

// =============================================================================
// SessionState / SessionStore
// =============================================================================

#[test]
fn new_session_is_loading_without_user() {
    let (ctx, _, _) = context(None);
    let state = ctx.view().state();
    assert!(state.loading);
    assert!(state.user.is_none());
    assert!(!state.is_authenticated());
}

#[test]
fn finish_loading_flips_exactly_once() {
    let store = SessionStore::default();
    assert!(store.finish_loading());
    assert!(!store.finish_loading());
    assert!(!store.loading());
}

#[test]
fn generation_advances_and_supersedes() {
    let store = SessionStore::default();
    let first = store.advance_generation();
    assert!(store.is_current(first));
    let second = store.advance_generation();
    assert!(!store.is_current(first));
    assert!(store.is_current(second));
}

#[test]
fn listeners_see_each_change_once() {
    let (ctx, _, _) = context(None);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    ctx.view().subscribe(move |state| sink.borrow_mut().push(state.clone()));

    ctx.store().replace_user(Some(user(1, "approved")));
    ctx.store().replace_user(Some(user(1, "approved")));
    ctx.store().finish_loading();
    ctx.store().finish_loading();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert!(seen[0].loading && seen[0].user.is_some());
    assert!(!seen[1].loading);
}

#[test]
fn listener_may_read_view_during_notify() {
    let (ctx, _, _) = context(None);
    let view = ctx.view();
    let observed = Rc::new(RefCell::new(None));
    let sink = observed.clone();
    view.clone().subscribe(move |_| *sink.borrow_mut() = Some(view.loading()));
    ctx.store().finish_loading();
    assert_eq!(*observed.borrow(), Some(false));
}

// =============================================================================
// SessionContext reset paths
// =============================================================================

#[test]
fn clear_session_removes_credential_and_user_together() {
    let (ctx, credentials, navigator) = context(Some("abc"));
    ctx.store().replace_user(Some(user(1, "approved")));

    assert!(ctx.clear_session());
    assert!(credentials.get().is_none());
    assert!(ctx.view().user().is_none());
    assert!(navigator.events().is_empty());
}

#[test]
fn commit_logout_redirects_once() {
    let (ctx, credentials, navigator) = context(Some("abc"));
    ctx.store().replace_user(Some(user(1, "approved")));

    assert!(ctx.commit_logout("test"));
    assert!(!ctx.commit_logout("test"));

    assert!(credentials.get().is_none());
    assert!(ctx.view().user().is_none());
    assert_eq!(navigator.events(), vec![Nav::Hard(routes::LOGIN.to_owned())]);
}

#[test]
fn commit_logout_with_nothing_to_clear_is_silent() {
    let (ctx, _, navigator) = context(None);
    assert!(!ctx.commit_logout("test"));
    assert!(navigator.events().is_empty());
}

#[test]
fn commit_logout_with_only_a_user_still_redirects() {
    let (ctx, _, navigator) = context(None);
    ctx.store().replace_user(Some(user(1, "approved")));

    assert!(ctx.commit_logout("test"));
    assert_eq!(navigator.events(), vec![Nav::Hard(routes::LOGIN.to_owned())]);
}

#[test]
fn commit_logout_supersedes_in_flight_generation() {
    let (ctx, _, _) = context(Some("abc"));
    let generation = ctx.store().advance_generation();
    ctx.commit_logout("test");
    assert!(!ctx.store().is_current(generation));
}
