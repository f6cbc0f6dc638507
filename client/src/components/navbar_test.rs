use session::{Role, UserStatus};

use super::*;

fn user(role: Role) -> User {
    User {
        id: 1,
        email: "a@example.com".to_owned(),
        name: String::new(),
        picture: String::new(),
        google_id: String::new(),
        role,
        status: UserStatus::Approved,
        approved_by: None,
        approved_at: None,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

#[test]
fn admin_sees_admin_panel_first() {
    assert_eq!(nav_links(&user(Role::Admin)), [(routes::ADMIN, "Admin Panel"), (routes::CLUSTERS, "Clusters")]);
}

#[test]
fn regular_user_sees_clusters_only() {
    assert_eq!(nav_links(&user(Role::User)), [(routes::CLUSTERS, "Clusters")]);
}
