//! Permission cache lifecycle tests

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, ResponseTemplate};

use carebridge_access::models::Capability;
use carebridge_access::CacheStatus;

use crate::common::{client_session, permission_json, staff_session, TestBackend};

#[tokio::test]
async fn test_staff_load_resolves_backend_records() {
    let backend = TestBackend::start().await;
    let session = staff_session(backend.organization_id);

    backend
        .stub_user_permissions(
            &session,
            json!([permission_json("billing", true, false, false, false)]),
        )
        .await;

    let cache = backend.cache_for(session);
    cache.load().await;

    assert_eq!(cache.status(), CacheStatus::Ready);
    assert!(cache.has_permission("billing", Capability::View));
    assert!(!cache.has_permission("billing", Capability::Create));
    assert!(!cache.has_permission("billing", Capability::Edit));
    // Unmapped menu resolves to allow
    assert!(cache.has_permission("reports", Capability::View));
}

#[tokio::test]
async fn test_non_staff_never_contacts_backend() {
    let backend = TestBackend::start().await;
    let session = client_session(backend.organization_id);

    Mock::given(method("GET"))
        .and(path_regex("^/user-permissions/.*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&backend.server)
        .await;

    let cache = backend.cache_for(session);
    cache.load().await;

    assert_eq!(cache.status(), CacheStatus::Ready);
    for capability in Capability::all() {
        assert!(cache.has_permission("billing", capability));
    }
}

#[tokio::test]
async fn test_fail_open_on_backend_error() {
    let backend = TestBackend::start().await;
    let session = staff_session(backend.organization_id);

    Mock::given(method("GET"))
        .and(path_regex("^/user-permissions/.*"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&backend.server)
        .await;

    let cache = backend.cache_for(session);
    cache.load().await;

    assert_eq!(cache.status(), CacheStatus::Ready);
    for capability in Capability::all() {
        assert!(cache.has_permission("billing", capability));
    }
}

#[tokio::test]
async fn test_fail_open_on_timeout() {
    let backend = TestBackend::start().await;
    let session = staff_session(backend.organization_id);

    // Response arrives well after the cache's 250ms load timeout
    Mock::given(method("GET"))
        .and(path_regex("^/user-permissions/.*"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([permission_json("billing", false, false, false, false)]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&backend.server)
        .await;

    let cache = backend.cache_for(session);
    let started = std::time::Instant::now();
    cache.load().await;

    // The load gave up at the timeout instead of waiting out the response
    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(cache.status(), CacheStatus::Ready);
    // The late denial never lands; the session continues unrestricted
    assert!(cache.has_permission("billing", Capability::View));
}

#[tokio::test]
async fn test_reload_replaces_map_wholesale() {
    let backend = TestBackend::start().await;
    let session = staff_session(backend.organization_id);

    // First load denies edit on billing, the next one allows it
    Mock::given(method("GET"))
        .and(path_regex("^/user-permissions/.*"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([permission_json("billing", true, false, false, false)])),
        )
        .up_to_n_times(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex("^/user-permissions/.*"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([permission_json("billing", true, false, true, false)])),
        )
        .mount(&backend.server)
        .await;

    let cache = backend.cache_for(session);
    cache.load().await;
    assert!(!cache.has_permission("billing", Capability::Edit));

    cache.reload().await;
    assert!(cache.has_permission("billing", Capability::Edit));
}

#[tokio::test]
async fn test_loaded_map_stays_authoritative_during_reload() {
    let backend = TestBackend::start().await;
    let session = staff_session(backend.organization_id);

    // First load denies edit on billing; the refresh response is slow
    Mock::given(method("GET"))
        .and(path_regex("^/user-permissions/.*"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([permission_json("billing", true, false, false, false)])),
        )
        .up_to_n_times(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex("^/user-permissions/.*"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([permission_json("billing", true, false, true, false)]))
                .set_delay(Duration::from_millis(150)),
        )
        .mount(&backend.server)
        .await;

    let cache = backend.cache_for(session);
    cache.load().await;
    assert!(!cache.has_permission("billing", Capability::Edit));

    let refreshing = cache.clone();
    let handle = tokio::spawn(async move { refreshing.reload().await });
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Mid-refresh the explicit denial from the completed load still holds
    assert_eq!(cache.status(), CacheStatus::Loading);
    assert!(!cache.has_permission("billing", Capability::Edit));

    handle.await.unwrap();
    assert_eq!(cache.status(), CacheStatus::Ready);
    assert!(cache.has_permission("billing", Capability::Edit));
}

#[tokio::test]
async fn test_convenience_predicates_match_has_permission() {
    let backend = TestBackend::start().await;
    let session = staff_session(backend.organization_id);

    backend
        .stub_user_permissions(
            &session,
            json!([permission_json("scheduling", true, true, false, false)]),
        )
        .await;

    let cache = backend.cache_for(session);
    cache.load().await;

    assert!(cache.can_view("scheduling"));
    assert!(cache.can_create("scheduling"));
    assert!(!cache.can_edit("scheduling"));
    assert!(!cache.can_delete("scheduling"));
}
