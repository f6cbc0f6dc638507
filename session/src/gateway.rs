//! Session orchestration: bootstrap, login, logout, Google callback.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthGateway` is the only writer of session state besides the 401
//! interceptor, and both converge on `SessionContext::commit_logout`.
//!
//! TRADE-OFFS
//! ==========
//! `login` trusts the user object from the login response instead of
//! re-fetching `/users/me`; a callback that only carries a token goes
//! through the same validation as bootstrap.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::rc::Rc;

use serde::Deserialize;

use crate::api;
use crate::config::ClientConfig;
use crate::error::{ApiError, CredentialError};
use crate::http::HttpClient;
use crate::navigator::routes;
use crate::store::{SessionContext, SessionState, SessionStore, SessionView};
use crate::transport::Transport;
use crate::types::{User, UserStatus};

/// Query parameters the OAuth provider appends to the callback URL.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Which branch the callback exchange took.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallbackOutcome {
    ProviderError(String),
    InvalidCallback,
    ExchangeFailed,
    SignedIn,
    PendingApproval,
}

impl CallbackOutcome {
    /// Route the callback page navigates to for this outcome.
    #[must_use]
    pub fn target(&self) -> String {
        match self {
            Self::ProviderError(_) => routes::login_with_error("oauth_error"),
            Self::InvalidCallback => routes::login_with_error("invalid_callback"),
            Self::ExchangeFailed => routes::login_with_error("callback_failed"),
            Self::SignedIn => routes::DASHBOARD.to_owned(),
            Self::PendingApproval => routes::PENDING_APPROVAL.to_owned(),
        }
    }
}

/// Releases the loading barrier when bootstrap ends, including when the
/// bootstrap future is dropped mid-flight.
struct LoadingBarrier<'a>(&'a SessionStore);

impl Drop for LoadingBarrier<'_> {
    fn drop(&mut self) {
        if self.0.finish_loading() {
            log::debug!("session: bootstrap finished");
        }
    }
}

#[derive(Clone, Debug)]
pub struct AuthGateway {
    http: HttpClient,
}

impl AuthGateway {
    pub fn new(config: ClientConfig, transport: Rc<dyn Transport>, context: SessionContext) -> Self {
        Self { http: HttpClient::new(config, transport, context) }
    }

    /// Client for resource calls; shares this gateway's session.
    #[must_use]
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    #[must_use]
    pub fn view(&self) -> SessionView {
        self.context().view()
    }

    fn context(&self) -> &SessionContext {
        self.http.context()
    }

    fn store(&self) -> &SessionStore {
        self.context().store()
    }

    /// Turn the persisted credential into a validated session.
    ///
    /// Runs once per process; later calls return the current state.
    pub async fn bootstrap(&self) -> SessionState {
        let store = self.store();
        if !store.loading() {
            log::debug!("session: bootstrap already completed");
            return store.snapshot();
        }
        let barrier = LoadingBarrier(store);
        if self.context().credential().is_none() {
            log::debug!("session: no persisted credential");
            store.replace_user(None);
        } else {
            let generation = store.advance_generation();
            let result = api::fetch_current_user(&self.http).await;
            self.apply_validation(generation, result);
        }
        drop(barrier);
        store.snapshot()
    }

    /// Apply the result of a `/users/me` validation started at `generation`.
    ///
    /// Returns the user when the session is now authenticated by it.
    fn apply_validation(&self, generation: u64, result: Result<User, ApiError>) -> Option<User> {
        let store = self.store();
        if !store.is_current(generation) {
            log::info!("session: discarding superseded validation (generation {generation})");
            return None;
        }
        match result {
            Ok(user) => {
                log::info!("session: signed in as {}", user.email);
                store.replace_user(Some(user.clone()));
                Some(user)
            }
            Err(err) => {
                log::warn!("session: failed to load current user: {err}");
                self.context().clear_session();
                None
            }
        }
    }

    /// Persist `token` and trust `user` from the login response.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential could not be persisted; the
    /// session is left unchanged in that case.
    pub fn login(&self, token: &str, user: User) -> Result<(), CredentialError> {
        self.context().credentials().set(token)?;
        self.store().advance_generation();
        log::info!("session: logged in as {}", user.email);
        self.store().replace_user(Some(user));
        Ok(())
    }

    /// Replace the current user.
    ///
    /// `None` clears the credential too. `Some` is refused (returns `false`)
    /// when no credential is held, since the user would be unauthenticated.
    pub fn set_user(&self, user: Option<User>) -> bool {
        match user {
            None => {
                self.context().clear_session();
                true
            }
            Some(_) if self.context().credential().is_none() => {
                log::warn!("session: refusing to set a user without a credential");
                false
            }
            Some(user) => {
                self.store().replace_user(Some(user));
                true
            }
        }
    }

    /// Sign out. The backend call is best effort; local invalidation and the
    /// hard redirect to `/login` happen regardless, at most once.
    pub async fn logout(&self) {
        let signed_in = self.context().credential().is_some() || self.store().has_user();
        if signed_in {
            if let Err(err) = api::logout(&self.http).await {
                log::warn!("session: logout request failed: {err}");
            }
        }
        self.context().commit_logout("logout");
    }

    /// Fetch the provider URL for the Google sign-in handshake.
    ///
    /// # Errors
    ///
    /// Returns the underlying request error.
    pub async fn google_login_url(&self) -> Result<String, ApiError> {
        api::google_login_url(&self.http).await
    }

    /// Fetch the provider URL and hard-redirect the browser to it.
    ///
    /// # Errors
    ///
    /// Returns the underlying request error; nothing is navigated then.
    pub async fn start_google_login(&self) -> Result<(), ApiError> {
        match self.google_login_url().await {
            Ok(url) => {
                self.context().navigator().hard_redirect(&url);
                Ok(())
            }
            Err(err) => {
                log::error!("session: failed to start google login: {err}");
                Err(err)
            }
        }
    }

    /// Finish the OAuth handshake and navigate to the outcome's route.
    pub async fn complete_google_callback(&self, params: &CallbackParams) -> CallbackOutcome {
        let outcome = self.exchange_callback(params).await;
        self.context().navigator().navigate(&outcome.target());
        outcome
    }

    async fn exchange_callback(&self, params: &CallbackParams) -> CallbackOutcome {
        if let Some(error) = &params.error {
            log::error!("session: oauth provider returned error: {error}");
            return CallbackOutcome::ProviderError(error.clone());
        }
        let (Some(code), Some(state)) = (params.code.as_deref(), params.state.as_deref()) else {
            log::error!("session: oauth callback missing code or state");
            return CallbackOutcome::InvalidCallback;
        };

        let response = match api::google_callback(&self.http, code, state).await {
            Ok(response) => response,
            Err(err) => {
                log::error!("session: oauth callback exchange failed: {err}");
                return CallbackOutcome::ExchangeFailed;
            }
        };

        let Some(token) = response.token else {
            log::info!("session: account awaits approval");
            return CallbackOutcome::PendingApproval;
        };

        let user = match response.user {
            Some(user) => {
                if let Err(err) = self.login(&token, user.clone()) {
                    log::error!("session: failed to persist credential: {err}");
                    return CallbackOutcome::ExchangeFailed;
                }
                user
            }
            None => match self.validate_token(&token).await {
                Some(user) => user,
                None => return CallbackOutcome::ExchangeFailed,
            },
        };

        if user.status == UserStatus::Pending {
            CallbackOutcome::PendingApproval
        } else {
            CallbackOutcome::SignedIn
        }
    }

    /// Persist `token` and validate it through `/users/me`.
    async fn validate_token(&self, token: &str) -> Option<User> {
        if let Err(err) = self.context().credentials().set(token) {
            log::error!("session: failed to persist credential: {err}");
            return None;
        }
        let generation = self.store().advance_generation();
        let result = api::fetch_current_user(&self.http).await;
        self.apply_validation(generation, result)
    }
}
