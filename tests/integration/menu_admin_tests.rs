//! Menu administration tests

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use carebridge_access::models::Capability;
use carebridge_access::MenuAdminService;

use crate::common::{menu_json, permission_json, staff_session, TestBackend};

#[tokio::test]
async fn test_admin_directory_includes_inactive_menus() {
    let backend = TestBackend::start().await;
    backend
        .stub_menus_for_admin(json!([
            menu_json("billing", "Billing", None, true),
            menu_json("legacy-reports", "Legacy Reports", None, false),
        ]))
        .await;

    let mut admin = MenuAdminService::new(backend.client(), backend.organization_id);
    let menus = admin.load_directory().await.unwrap();

    assert_eq!(menus.len(), 2);
    assert!(!menus[1].is_active);
}

#[tokio::test]
async fn test_set_menu_active_updates_local_copy_on_success() {
    let backend = TestBackend::start().await;
    backend
        .stub_menus_for_admin(json!([menu_json("billing", "Billing", None, true)]))
        .await;
    Mock::given(method("POST"))
        .and(path("/update-menu-status"))
        .and(body_json(json!({"menuId": "billing", "isActive": false})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&backend.server)
        .await;

    let mut admin = MenuAdminService::new(backend.client(), backend.organization_id);
    admin.load_directory().await.unwrap();
    admin.set_menu_active("billing", false).await.unwrap();

    assert!(!admin.menus()[0].is_active);
}

#[tokio::test]
async fn test_set_menu_active_failure_leaves_display_unchanged() {
    let backend = TestBackend::start().await;
    backend
        .stub_menus_for_admin(json!([menu_json("billing", "Billing", None, true)]))
        .await;
    Mock::given(method("POST"))
        .and(path("/update-menu-status"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&backend.server)
        .await;

    let mut admin = MenuAdminService::new(backend.client(), backend.organization_id);
    admin.load_directory().await.unwrap();

    assert!(admin.set_menu_active("billing", false).await.is_err());
    assert!(admin.menus()[0].is_active);
}

#[tokio::test]
async fn test_menu_visibility_is_independent_of_permissions() {
    let backend = TestBackend::start().await;
    let session = staff_session(backend.organization_id);

    backend
        .stub_user_permissions(
            &session,
            json!([permission_json("billing", true, false, false, false)]),
        )
        .await;
    backend
        .stub_menus_for_admin(json!([menu_json("billing", "Billing", None, true)]))
        .await;
    Mock::given(method("POST"))
        .and(path("/update-menu-status"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&backend.server)
        .await;

    let cache = backend.cache_for(session);
    cache.load().await;
    let before: Vec<bool> = Capability::all()
        .iter()
        .map(|c| cache.has_permission("billing", *c))
        .collect();

    let mut admin = MenuAdminService::new(backend.client(), backend.organization_id);
    admin.load_directory().await.unwrap();
    admin.set_menu_active("billing", false).await.unwrap();

    // Deactivating the menu changes nothing about capability resolution
    let after: Vec<bool> = Capability::all()
        .iter()
        .map(|c| cache.has_permission("billing", *c))
        .collect();
    assert_eq!(before, after);

    let tree = admin.tree();
    assert_eq!(tree.groups.len(), 1);
    assert!(!tree.groups[0].menu.is_active);
}
