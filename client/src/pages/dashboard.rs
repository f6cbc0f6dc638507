//! Dashboard listing the clusters visible to the signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Authenticated landing route. The list is fetched only after the guard
//! admits the session, so an expired token surfaces as the global 401 reset
//! rather than a page error.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use session::{Access, ApiError, Cluster, routes};

use crate::components::protected_route::ProtectedRoute;

pub(crate) fn cluster_href(cluster: &Cluster) -> String {
    format!("{}/{}", routes::CLUSTERS, cluster.id)
}

pub(crate) fn cluster_summary(cluster: &Cluster) -> &str {
    if cluster.description.trim().is_empty() { "No description" } else { &cluster.description }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <ProtectedRoute access=Access::Approved>
            <ClusterList/>
        </ProtectedRoute>
    }
}

#[component]
fn ClusterList() -> impl IntoView {
    let clusters = RwSignal::new(None::<Result<Vec<Cluster>, ApiError>>);

    #[cfg(feature = "csr")]
    {
        let gateway = crate::state::auth::use_gateway().get_value();
        leptos::task::spawn_local(async move {
            let result = session::api::list_clusters(gateway.http()).await;
            if let Err(err) = &result {
                log::error!("dashboard: failed to load clusters: {err}");
            }
            clusters.set(Some(result));
        });
    }

    view! {
        <section class="dashboard">
            <h1>"My Clusters"</h1>
            {move || match clusters.get() {
                None => view! { <p aria-busy="true">"Loading clusters..."</p> }.into_any(),
                Some(Err(err)) => view! { <p class="dashboard__error">{format!("Failed to load clusters: {err}")}</p> }.into_any(),
                Some(Ok(list)) if list.is_empty() => {
                    view! { <p class="dashboard__empty">"No clusters yet."</p> }.into_any()
                }
                Some(Ok(list)) => list
                    .into_iter()
                    .map(|cluster| {
                        let href = cluster_href(&cluster);
                        let summary = cluster_summary(&cluster).to_owned();
                        view! {
                            <a class="cluster-card" href=href>
                                <h2>{cluster.name}</h2>
                                <p>{summary}</p>
                            </a>
                        }
                    })
                    .collect_view()
                    .into_any(),
            }}
        </section>
    }
}
