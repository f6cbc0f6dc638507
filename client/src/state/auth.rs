//! Reactive bridge between the session core and Leptos.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthGateway` owns the session. Components read it through an
//! `RwSignal<SessionState>` mirror that the gateway's change listener keeps
//! current, and reach the gateway itself through a local `StoredValue` handle.

use leptos::prelude::*;
use session::{AuthGateway, SessionState};

pub type GatewayHandle = StoredValue<AuthGateway, LocalStorage>;

/// Put the gateway and its session mirror into context.
pub fn provide_session(gateway: AuthGateway) -> RwSignal<SessionState> {
    let view = gateway.view();
    let session = RwSignal::new(view.state());
    view.subscribe(move |state| session.set(state.clone()));

    provide_context(session);
    provide_context::<GatewayHandle>(StoredValue::new_local(gateway));
    session
}

pub fn use_session() -> RwSignal<SessionState> {
    expect_context::<RwSignal<SessionState>>()
}

pub fn use_gateway() -> GatewayHandle {
    expect_context::<GatewayHandle>()
}
