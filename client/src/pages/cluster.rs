//! `/clusters/:id` detail view with a namespace browser.
//!
//! ERROR HANDLING
//! ==============
//! Kubernetes calls fail per panel: a cluster the backend cannot reach shows
//! an inline error while the cluster summary stays visible.

#[cfg(test)]
#[path = "cluster_test.rs"]
mod cluster_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use session::types::{DeploymentStatus, ServicePort};
use session::{Access, ApiError, Cluster, Deployment, Namespace, Pod, Service};

use crate::components::protected_route::ProtectedRoute;
use crate::state::auth::use_gateway;

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Workloads {
    pub(crate) pods: Vec<Pod>,
    pub(crate) deployments: Vec<Deployment>,
    pub(crate) services: Vec<Service>,
}

pub(crate) fn pod_images(pod: &Pod) -> String {
    pod.spec.containers.iter().map(|c| c.image.as_str()).collect::<Vec<_>>().join(", ")
}

pub(crate) fn replica_summary(status: DeploymentStatus) -> String {
    format!("{}/{} ready, {} available", status.ready_replicas, status.replicas, status.available_replicas)
}

pub(crate) fn port_summary(port: &ServicePort) -> String {
    match &port.target_port {
        Some(target) => format!("{}:{target}/{}", port.port, port.protocol),
        None => format!("{}/{}", port.port, port.protocol),
    }
}

#[component]
pub fn ClusterPage() -> impl IntoView {
    view! {
        <ProtectedRoute access=Access::Approved>
            <ClusterDetails/>
        </ProtectedRoute>
    }
}

#[component]
fn ClusterDetails() -> impl IntoView {
    let params = use_params_map();
    let cluster_id = params.with_untracked(|p| p.get("id").and_then(|raw| raw.parse::<u64>().ok()));
    let cluster = RwSignal::new(None::<Result<Cluster, ApiError>>);

    match cluster_id {
        Some(id) => {
            #[cfg(feature = "csr")]
            {
                let gateway = crate::state::auth::use_gateway().get_value();
                leptos::task::spawn_local(async move {
                    let result = session::api::get_cluster(gateway.http(), id).await;
                    if let Err(err) = &result {
                        log::error!("cluster: failed to load cluster {id}: {err}");
                    }
                    cluster.set(Some(result));
                });
            }
            #[cfg(not(feature = "csr"))]
            let _ = id;
        }
        None => cluster.set(Some(Err(ApiError::Status { status: 404, message: "Cluster not found".to_owned() }))),
    }

    view! {
        <section class="cluster-details">
            {move || match cluster.get() {
                None => view! { <p aria-busy="true">"Loading cluster..."</p> }.into_any(),
                Some(Err(err)) => view! { <p class="cluster-details__error">{err.to_string()}</p> }.into_any(),
                Some(Ok(cluster)) => {
                    let creator = cluster.creator.as_ref().map(|u| u.display_name().to_owned());
                    view! {
                        <h1>{cluster.name}</h1>
                        <p>{cluster.description}</p>
                        <dl>
                            <dt>"Context"</dt>
                            <dd>{cluster.context}</dd>
                            <dt>"Created"</dt>
                            <dd>{cluster.created_at}</dd>
                            <dt>"Created by"</dt>
                            <dd>{creator.unwrap_or_else(|| "Unknown".to_owned())}</dd>
                        </dl>
                        <ClusterResources cluster_id=cluster.id/>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}

#[component]
fn ClusterResources(cluster_id: u64) -> impl IntoView {
    let namespaces = RwSignal::new(None::<Result<Vec<Namespace>, ApiError>>);
    let selected = RwSignal::new(None::<String>);
    let workloads = RwSignal::new(None::<Result<Workloads, ApiError>>);
    let logs = RwSignal::new(None::<(String, String)>);
    let notice = RwSignal::new(None::<String>);
    let gateway = use_gateway();

    #[cfg(feature = "csr")]
    {
        let gateway = gateway.get_value();
        leptos::task::spawn_local(async move {
            let result = session::api::list_namespaces(gateway.http(), cluster_id).await;
            if let Err(err) = &result {
                log::error!("cluster: failed to list namespaces of cluster {cluster_id}: {err}");
            }
            namespaces.set(Some(result));
        });
    }

    let load_workloads = move |namespace: String| {
        selected.set(Some(namespace.clone()));
        workloads.set(None);
        logs.set(None);
        notice.set(None);
        #[cfg(feature = "csr")]
        {
            let gateway = gateway.get_value();
            leptos::task::spawn_local(async move {
                let http = gateway.http();
                let result = async {
                    Ok::<_, ApiError>(Workloads {
                        pods: session::api::list_pods(http, cluster_id, &namespace).await?,
                        deployments: session::api::list_deployments(http, cluster_id, &namespace).await?,
                        services: session::api::list_services(http, cluster_id, &namespace).await?,
                    })
                }
                .await;
                if selected.get_untracked().as_deref() != Some(namespace.as_str()) {
                    return;
                }
                if let Err(err) = &result {
                    log::error!("cluster: failed to load namespace {namespace} of cluster {cluster_id}: {err}");
                }
                workloads.set(Some(result));
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (gateway, namespace);
    };

    let show_logs = move |pod: String| {
        let Some(namespace) = selected.get_untracked() else { return };
        notice.set(None);
        #[cfg(feature = "csr")]
        {
            let gateway = gateway.get_value();
            leptos::task::spawn_local(async move {
                match session::api::pod_logs(gateway.http(), cluster_id, &namespace, &pod, session::api::DEFAULT_LOG_TAIL)
                    .await
                {
                    Ok(text) => logs.set(Some((pod, text))),
                    Err(err) => {
                        log::error!("cluster: failed to fetch logs of pod {namespace}/{pod}: {err}");
                        notice.set(Some(format!("Failed to fetch logs for {pod}: {err}")));
                    }
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (gateway, namespace, pod);
    };

    let delete_pod = move |pod: String| {
        let Some(namespace) = selected.get_untracked() else { return };
        notice.set(None);
        #[cfg(feature = "csr")]
        {
            let gateway = gateway.get_value();
            leptos::task::spawn_local(async move {
                match session::api::delete_pod(gateway.http(), cluster_id, &namespace, &pod).await {
                    Ok(_) => workloads.update(|w| {
                        if let Some(Ok(w)) = w {
                            w.pods.retain(|p| p.metadata.name != pod);
                        }
                    }),
                    Err(err) => {
                        log::error!("cluster: failed to delete pod {namespace}/{pod}: {err}");
                        notice.set(Some(format!("Failed to delete {pod}: {err}")));
                    }
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (gateway, namespace, pod);
    };

    view! {
        <section class="cluster-resources">
            <h2>"Namespaces"</h2>
            {move || match namespaces.get() {
                None => view! { <p aria-busy="true">"Loading namespaces..."</p> }.into_any(),
                Some(Err(err)) => {
                    view! { <p class="cluster-resources__error">{format!("Failed to list namespaces: {err}")}</p> }
                        .into_any()
                }
                Some(Ok(list)) => view! {
                    <select on:change=move |ev| load_workloads(event_target_value(&ev))>
                        <option value="" disabled=true selected=move || selected.get().is_none()>
                            "Select a namespace"
                        </option>
                        {list
                            .into_iter()
                            .map(|ns| {
                                let name = ns.metadata.name;
                                view! { <option value=name.clone()>{format!("{name} ({})", ns.status.phase)}</option> }
                            })
                            .collect_view()}
                    </select>
                }
                    .into_any(),
            }}
            <Show when=move || notice.get().is_some()>
                <p class="cluster-resources__error">{move || notice.get().unwrap_or_default()}</p>
            </Show>
            {move || match (selected.get(), workloads.get()) {
                (None, _) => ().into_any(),
                (Some(_), None) => view! { <p aria-busy="true">"Loading workloads..."</p> }.into_any(),
                (Some(_), Some(Err(err))) => {
                    view! { <p class="cluster-resources__error">{format!("Failed to load workloads: {err}")}</p> }
                        .into_any()
                }
                (Some(_), Some(Ok(w))) => view! {
                    <h3>"Pods"</h3>
                    <table class="cluster-resources__pods">
                        {w
                            .pods
                            .into_iter()
                            .map(|pod| {
                                let name = pod.metadata.name.clone();
                                let logs_target = name.clone();
                                let delete_target = name.clone();
                                view! {
                                    <tr>
                                        <td>{name}</td>
                                        <td>{pod.status.phase.clone()}</td>
                                        <td>{pod.status.pod_ip.clone()}</td>
                                        <td>{pod_images(&pod)}</td>
                                        <td>
                                            <button on:click=move |_: leptos::ev::MouseEvent| show_logs(logs_target.clone())>
                                                "Logs"
                                            </button>
                                            <button on:click=move |_: leptos::ev::MouseEvent| delete_pod(delete_target.clone())>
                                                "Delete"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()}
                    </table>
                    <h3>"Deployments"</h3>
                    <ul>
                        {w
                            .deployments
                            .into_iter()
                            .map(|d| view! { <li>{format!("{}: {}", d.metadata.name, replica_summary(d.status))}</li> })
                            .collect_view()}
                    </ul>
                    <h3>"Services"</h3>
                    <ul>
                        {w
                            .services
                            .into_iter()
                            .map(|svc| {
                                let ports = svc.spec.ports.iter().map(port_summary).collect::<Vec<_>>().join(", ");
                                view! {
                                    <li>
                                        {format!("{} ({}, {}): {ports}", svc.metadata.name, svc.spec.service_type, svc.spec.cluster_ip)}
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                }
                    .into_any(),
            }}
            {move || {
                logs.get()
                    .map(|(pod, text)| {
                        view! {
                            <h3>{format!("Logs: {pod}")}</h3>
                            <pre class="cluster-resources__logs">{text}</pre>
                        }
                    })
            }}
        </section>
    }
}
