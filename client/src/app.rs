//! Root application component with routing and context providers.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};
use session::{AuthGateway, ClientConfig, SessionContext};

use crate::components::navbar::Navbar;
use crate::pages::{
    admin::AdminPage, cluster::ClusterPage, dashboard::DashboardPage, google_callback::GoogleCallbackPage,
    login::LoginPage, pending_approval::PendingApprovalPage,
};
use crate::platform::api_base;
use crate::platform::navigator::BrowserNavigator;
use crate::platform::storage::LocalStorageCredentials;
use crate::platform::transport::GlooTransport;
use crate::state::auth::provide_session;

type NavigatorHandle = StoredValue<Rc<BrowserNavigator>, LocalStorage>;

/// Root application component.
///
/// Builds the one `AuthGateway` for the page, mirrors its session into
/// context and starts bootstrap before the first route renders.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let navigator = Rc::new(BrowserNavigator::default());
    let context = SessionContext::new(Rc::new(LocalStorageCredentials), navigator.clone());
    let gateway = AuthGateway::new(ClientConfig::new(api_base()), Rc::new(GlooTransport), context);
    provide_context::<NavigatorHandle>(StoredValue::new_local(navigator));
    provide_session(gateway.clone());

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let state = gateway.bootstrap().await;
        log::info!("session: bootstrap complete, signed in: {}", state.is_authenticated());
    });
    #[cfg(not(feature = "csr"))]
    let _ = gateway;

    view! {
        <Title text="Surfer"/>

        <Router>
            <RouterBridge/>
            <Navbar/>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=(StaticSegment("auth"), StaticSegment("callback")) view=GoogleCallbackPage/>
                    <Route path=StaticSegment("pending-approval") view=PendingApprovalPage/>
                    <Route path=StaticSegment("dashboard") view=DashboardPage/>
                    <Route path=StaticSegment("clusters") view=DashboardPage/>
                    <Route path=(StaticSegment("clusters"), ParamSegment("id")) view=ClusterPage/>
                    <Route path=StaticSegment("admin") view=AdminPage/>
                    <Route path=StaticSegment("") view=DashboardPage/>
                </Routes>
            </main>
        </Router>
    }
}

/// Hands the router's navigate function to the session navigator.
#[component]
fn RouterBridge() -> impl IntoView {
    let navigate = use_navigate();
    expect_context::<NavigatorHandle>()
        .with_value(|navigator| navigator.attach(move |path| navigate(path, NavigateOptions::default())));
}
