//! Permission caching service
//!
//! Resolves "can the current user perform action A on menu M" without a
//! network round trip per check. The map is loaded once per session, replaced
//! wholesale on reload, and read synchronously by every capability gate.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::models::{Capability, PermissionMap, SessionContext};
use crate::services::backend::PermissionBackendClient;

/// Lifecycle of the cached map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// No load has been attempted yet
    Uninitialized,
    /// A load is in flight
    Loading,
    /// A load has completed (possibly with an empty map)
    Ready,
}

struct CacheState {
    status: CacheStatus,
    /// Whether any load has ever completed. Once set, the map is
    /// authoritative even while a refresh is in flight.
    loaded_once: bool,
    map: PermissionMap,
}

/// Process-wide permission cache for the current session
///
/// Single writer (this service), many readers (every gate check). The map is
/// only ever swapped as a whole, so readers never observe a partial update.
pub struct PermissionCache {
    backend: Arc<PermissionBackendClient>,
    session: SessionContext,
    load_timeout: Duration,
    state: RwLock<CacheState>,
}

impl PermissionCache {
    pub fn new(
        backend: Arc<PermissionBackendClient>,
        session: SessionContext,
        load_timeout: Duration,
    ) -> Self {
        Self {
            backend,
            session,
            load_timeout,
            state: RwLock::new(CacheState {
                status: CacheStatus::Uninitialized,
                loaded_once: false,
                map: PermissionMap::new(),
            }),
        }
    }

    pub fn status(&self) -> CacheStatus {
        self.state.read().expect("permission cache lock poisoned").status
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Load the session's resolved permissions from the backend.
    ///
    /// Non-staff and super-admin sessions resolve immediately to an empty map:
    /// they are never capability-gated. For staff, the fetch races a fixed
    /// timeout; on timeout or failure the map is left empty and the cache
    /// still reaches `Ready` — the engine fails open, never closed. This call
    /// never returns an error.
    ///
    /// Overlapping loads are not deduplicated; each performs exactly one map
    /// replacement and the last writer wins. Both writers describe the same
    /// backend state queried moments apart.
    pub async fn load(&self) {
        self.set_status(CacheStatus::Loading);

        if !self.session.is_permission_gated() {
            debug!(
                user_type = %self.session.user_type,
                super_admin = self.session.is_super_admin,
                "Session is not permission-gated; permission map left empty"
            );
            self.replace(PermissionMap::new());
            return;
        }

        let fetch = self
            .backend
            .user_permissions(self.session.user_id, self.session.organization_id);

        let map = match tokio::time::timeout(self.load_timeout, fetch).await {
            Ok(Ok(records)) => {
                info!("Loaded {} menu permission record(s)", records.len());
                PermissionMap::from_records(records)
            }
            Ok(Err(e)) => {
                warn!("Permission load failed, continuing unrestricted: {}", e);
                PermissionMap::new()
            }
            Err(_) => {
                warn!(
                    "Permission load timed out after {:?}, continuing unrestricted",
                    self.load_timeout
                );
                PermissionMap::new()
            }
        };

        self.replace(map);
    }

    /// Replace the cached map with a fresh load. Called by the editor after a
    /// save so the editing session's own gates reflect the new matrix
    /// immediately; other sessions converge on their next load. The previous
    /// map keeps answering checks until the replacement lands.
    pub async fn reload(&self) {
        self.load().await;
    }

    /// Synchronous capability check; total, never suspends, never errors.
    ///
    /// Returns `true` when no load has ever completed or the map is empty —
    /// that covers both the legitimate non-staff case and the degraded
    /// load-failed case, which this layer deliberately cannot tell apart
    /// (availability over strict denial). A menu with no entry is
    /// unrestricted; only an explicit entry can deny. While a refresh is in
    /// flight the previously loaded map stays authoritative.
    pub fn has_permission(&self, menu_id: &str, capability: Capability) -> bool {
        let state = self.state.read().expect("permission cache lock poisoned");
        if !state.loaded_once {
            return true;
        }
        state.map.allows(menu_id, capability)
    }

    pub fn can_view(&self, menu_id: &str) -> bool {
        self.has_permission(menu_id, Capability::View)
    }

    pub fn can_create(&self, menu_id: &str) -> bool {
        self.has_permission(menu_id, Capability::Create)
    }

    pub fn can_edit(&self, menu_id: &str) -> bool {
        self.has_permission(menu_id, Capability::Edit)
    }

    pub fn can_delete(&self, menu_id: &str) -> bool {
        self.has_permission(menu_id, Capability::Delete)
    }

    fn set_status(&self, status: CacheStatus) {
        let mut state = self.state.write().expect("permission cache lock poisoned");
        state.status = status;
    }

    fn replace(&self, map: PermissionMap) {
        let mut state = self.state.write().expect("permission cache lock poisoned");
        state.map = map;
        state.status = CacheStatus::Ready;
        state.loaded_once = true;
    }

    #[cfg(test)]
    pub(crate) fn replace_for_test(&self, map: PermissionMap) {
        self.replace(map);
    }
}
