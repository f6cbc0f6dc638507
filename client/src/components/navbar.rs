//! Top navigation bar with the signed-in user's links and logout.

#[cfg(test)]
#[path = "navbar_test.rs"]
mod navbar_test;

use leptos::prelude::*;
use session::{User, routes};

use crate::state::auth::{use_gateway, use_session};

/// `(href, label)` pairs shown to `user`; the admin panel only for admins.
pub(crate) fn nav_links(user: &User) -> Vec<(&'static str, &'static str)> {
    let mut links = Vec::with_capacity(2);
    if user.is_admin() {
        links.push((routes::ADMIN, "Admin Panel"));
    }
    links.push((routes::CLUSTERS, "Clusters"));
    links
}

#[component]
pub fn Navbar() -> impl IntoView {
    let session = use_session();
    let gateway = use_gateway();

    let on_logout = move |_: leptos::ev::MouseEvent| {
        let gateway = gateway.get_value();
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            gateway.logout().await;
        });
        #[cfg(not(feature = "csr"))]
        let _ = gateway;
    };

    let signed_in = move || session.with(|s| s.user.is_some());
    let links = move || session.with(|s| s.user.as_ref().map(nav_links).unwrap_or_default());
    let label = move || session.with(|s| s.user.as_ref().map(|u| u.display_name().to_owned()).unwrap_or_default());

    view! {
        <nav class="navbar">
            <a class="navbar__brand" href=routes::DASHBOARD>"Surfer"</a>
            <Show when=signed_in>
                <div class="navbar__links">
                    {move || {
                        links()
                            .into_iter()
                            .map(|(href, text)| view! { <a class="navbar__link" href=href>{text}</a> })
                            .collect_view()
                    }}
                    <span class="navbar__user">{label}</span>
                    <button class="navbar__logout" on:click=on_logout>"Logout"</button>
                </div>
            </Show>
        </nav>
    }
}
