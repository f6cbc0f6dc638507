use super::*;

#[test]
fn user_decodes_full_backend_payload() {
    let raw = serde_json::json!({
        "id": 7,
        "email": "ada@example.com",
        "name": "Ada",
        "picture": "https://example.com/ada.png",
        "google_id": "g-7",
        "role": "admin",
        "status": "approved",
        "approved_by": 1,
        "approved_at": "2024-01-02T03:04:05Z",
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-02T03:04:05Z"
    });
    let user: User = serde_json::from_value(raw).unwrap();
    assert_eq!(user.id, 7);
    assert_eq!(user.role, Role::Admin);
    assert_eq!(user.status, UserStatus::Approved);
    assert_eq!(user.approved_by, Some(1));
}

#[test]
fn user_defaults_missing_optional_fields() {
    let user: User = serde_json::from_value(serde_json::json!({"id": 1, "email": "a@b.c"})).unwrap();
    assert_eq!(user.role, Role::Pending);
    assert_eq!(user.status, UserStatus::Pending);
    assert!(user.name.is_empty());
    assert!(user.approved_at.is_none());
}

#[test]
fn user_rejects_unknown_status() {
    let result = serde_json::from_value::<User>(serde_json::json!({
        "id": 1,
        "email": "a@b.c",
        "status": "banned"
    }));
    assert!(result.is_err());
}

#[test]
fn display_name_falls_back_to_email() {
    let mut user: User = serde_json::from_value(serde_json::json!({"id": 1, "email": "a@b.c"})).unwrap();
    assert_eq!(user.display_name(), "a@b.c");
    user.name = "Alice".to_owned();
    assert_eq!(user.display_name(), "Alice");
}

#[test]
fn callback_response_without_token_means_pending() {
    let body: CallbackResponse =
        serde_json::from_value(serde_json::json!({"message": "Please wait for admin approval."})).unwrap();
    assert!(body.token.is_none());
    assert!(body.user.is_none());
}

#[test]
fn role_update_serializes_lowercase() {
    let body = serde_json::to_value(RoleUpdate { role: Role::Admin }).unwrap();
    assert_eq!(body, serde_json::json!({"role": "admin"}));
}

#[test]
fn cluster_decodes_without_creator() {
    let cluster: Cluster =
        serde_json::from_value(serde_json::json!({"id": 3, "name": "prod", "context": "gke-prod"})).unwrap();
    assert_eq!(cluster.name, "prod");
    assert!(cluster.creator.is_none());
}

// =============================================================================
// kubernetes objects
// =============================================================================

#[test]
fn pod_decodes_displayed_fields_and_ignores_the_rest() {
    let raw = serde_json::json!({
        "apiVersion": "v1",
        "metadata": {"name": "web-0", "namespace": "shop", "creationTimestamp": "2024-03-01T10:00:00Z", "uid": "x"},
        "spec": {"containers": [{"name": "web", "image": "nginx:1.27", "ports": []}], "nodeName": "n1"},
        "status": {"phase": "Running", "podIP": "10.0.0.7", "conditions": []}
    });
    let pod: Pod = serde_json::from_value(raw).unwrap();
    assert_eq!(pod.metadata.name, "web-0");
    assert_eq!(pod.metadata.creation_timestamp, "2024-03-01T10:00:00Z");
    assert_eq!(pod.status.pod_ip, "10.0.0.7");
    assert_eq!(pod.spec.containers[0].image, "nginx:1.27");
}

#[test]
fn deployment_missing_replica_counts_read_as_zero() {
    let raw = serde_json::json!({"metadata": {"name": "api"}, "status": {"replicas": 2}});
    let deployment: Deployment = serde_json::from_value(raw).unwrap();
    assert_eq!(deployment.status, DeploymentStatus { replicas: 2, available_replicas: 0, ready_replicas: 0 });
}

#[test]
fn service_target_port_accepts_number_or_name() {
    let raw = serde_json::json!({
        "metadata": {"name": "web"},
        "spec": {
            "type": "ClusterIP",
            "clusterIP": "10.96.0.10",
            "ports": [
                {"port": 80, "targetPort": 8080, "protocol": "TCP"},
                {"port": 443, "targetPort": "https", "protocol": "TCP"}
            ]
        }
    });
    let service: Service = serde_json::from_value(raw).unwrap();
    assert_eq!(service.spec.service_type, "ClusterIP");
    assert_eq!(service.spec.ports[0].target_port, Some(TargetPort::Number(8080)));
    assert_eq!(service.spec.ports[1].target_port.as_ref().map(ToString::to_string).as_deref(), Some("https"));
}
