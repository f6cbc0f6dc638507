//! Process-wide session state and the context object that owns it.
//!
//! DESIGN
//! ======
//! One `SessionContext` is created at process start and handed by handle to
//! the gateway, the HTTP client and every guard. Consumers get a read-only
//! [`SessionView`]; mutation is crate-private so the gateway and the 401
//! interceptor are the only writers.
//!
//! Every validation attempt is stamped with a generation. Logout, login and
//! new attempts advance it, so a late completion from a superseded attempt
//! can be recognized and dropped.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::credential::CredentialStore;
use crate::navigator::{Navigator, routes};
use crate::types::User;

/// In-memory record of the current user and bootstrap progress.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}

impl SessionState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

type Listener = Rc<dyn Fn(&SessionState)>;

#[derive(Default)]
struct Shared {
    state: RefCell<SessionState>,
    generation: Cell<u64>,
    listeners: RefCell<Vec<Listener>>,
}

/// Single-instance holder of [`SessionState`]. Clones share the same state.
#[derive(Clone, Default)]
pub(crate) struct SessionStore {
    shared: Rc<Shared>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &*self.shared.state.borrow())
            .field("generation", &self.shared.generation.get())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    pub(crate) fn snapshot(&self) -> SessionState {
        self.shared.state.borrow().clone()
    }

    pub(crate) fn loading(&self) -> bool {
        self.shared.state.borrow().loading
    }

    pub(crate) fn has_user(&self) -> bool {
        self.shared.state.borrow().user.is_some()
    }

    /// Replace the user, returning the previous one.
    pub(crate) fn replace_user(&self, user: Option<User>) -> Option<User> {
        let (previous, changed) = {
            let mut state = self.shared.state.borrow_mut();
            let changed = state.user != user;
            (std::mem::replace(&mut state.user, user), changed)
        };
        if changed {
            self.notify();
        }
        previous
    }

    /// Drop the loading barrier. Returns `false` when it was already down.
    pub(crate) fn finish_loading(&self) -> bool {
        let changed = {
            let mut state = self.shared.state.borrow_mut();
            std::mem::replace(&mut state.loading, false)
        };
        if changed {
            self.notify();
        }
        changed
    }

    pub(crate) fn advance_generation(&self) -> u64 {
        let next = self.shared.generation.get().wrapping_add(1);
        self.shared.generation.set(next);
        next
    }

    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.shared.generation.get() == generation
    }

    fn subscribe(&self, listener: Listener) {
        self.shared.listeners.borrow_mut().push(listener);
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        let listeners = self.shared.listeners.borrow().clone();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

/// Read-only view of the session handed to pages and guards.
#[derive(Clone, Debug)]
pub struct SessionView {
    store: SessionStore,
}

impl SessionView {
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.store.snapshot()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.store.shared.state.borrow().user.clone()
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.store.loading()
    }

    /// Call `listener` with the new state after every change.
    pub fn subscribe(&self, listener: impl Fn(&SessionState) + 'static) {
        self.store.subscribe(Rc::new(listener));
    }
}

/// The explicitly owned session context: state, credential slot, navigator.
#[derive(Clone)]
pub struct SessionContext {
    store: SessionStore,
    credentials: Rc<dyn CredentialStore>,
    navigator: Rc<dyn Navigator>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("store", &self.store)
            .field("has_credential", &self.credentials.token().is_some())
            .finish_non_exhaustive()
    }
}

impl SessionContext {
    /// Create the context in its start-of-process state (`loading`, no user).
    pub fn new(credentials: Rc<dyn CredentialStore>, navigator: Rc<dyn Navigator>) -> Self {
        Self { store: SessionStore::default(), credentials, navigator }
    }

    #[must_use]
    pub fn view(&self) -> SessionView {
        SessionView { store: self.store.clone() }
    }

    /// Current credential, read from the durable slot.
    #[must_use]
    pub fn credential(&self) -> Option<String> {
        self.credentials.token()
    }

    #[must_use]
    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    pub(crate) fn store(&self) -> &SessionStore {
        &self.store
    }

    pub(crate) fn credentials(&self) -> &dyn CredentialStore {
        self.credentials.as_ref()
    }

    /// Clear credential and user together without navigating.
    ///
    /// Returns `true` when either was present.
    pub(crate) fn clear_session(&self) -> bool {
        let had_credential = self.credentials.get().is_some();
        if let Err(err) = self.credentials.remove() {
            log::error!("session: failed to remove persisted credential: {err}");
        }
        self.store.advance_generation();
        let previous = self.store.replace_user(None);
        had_credential || previous.is_some()
    }

    /// The commit-logout step shared by explicit logout and the 401
    /// interceptor: clear first, then hard-redirect to login once.
    ///
    /// The redirect is issued only when a credential or a user was actually
    /// present. A commit on an already signed-out session, such as a second
    /// logout or a late 401, clears nothing and does not navigate. Returns
    /// whether anything was cleared.
    pub(crate) fn commit_logout(&self, reason: &str) -> bool {
        if self.clear_session() {
            log::info!("session: signed out ({reason})");
            self.navigator.hard_redirect(routes::LOGIN);
            true
        } else {
            log::debug!("session: already signed out ({reason})");
            false
        }
    }
}
