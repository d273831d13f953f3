//! CareBridge access engine
//!
//! Role-based menu permission core for the CareBridge home-care platform:
//! the per-session permission cache, the capability gate used to show or hide
//! UI actions, and the editing workflows that maintain the role → menu →
//! capability matrix. The crate is a library consumed by the UI shell; the
//! HTTP transport it talks to and the authentication that produced the
//! session are external collaborators.
//!
//! # Quick start
//!
//! ```no_run
//! use carebridge_access::{AccessConfig, AccessState};
//! use carebridge_access::models::{Capability, SessionContext, UserType};
//! use uuid::Uuid;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = AccessConfig::load()?;
//! let session = SessionContext::new(
//!     Uuid::new_v4(),
//!     UserType::Staff,
//!     Uuid::new_v4(),
//! );
//!
//! let state = AccessState::new(&config, session)?;
//! state.cache().load().await;
//!
//! let gate = state.gate();
//! if gate.passes("billing", Capability::Create) {
//!     // show the "new invoice" button
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

pub mod config;
pub mod models;
pub mod services;
pub mod utils;

pub use config::AccessConfig;
pub use services::{
    CacheStatus, CapabilityGate, MenuAdminService, PermissionBackendClient, PermissionCache,
    RolePermissionEditor,
};
pub use utils::error::{AccessError, AccessResult};

use models::SessionContext;

/// Engine state built once at application start and shared by reference
///
/// This is the explicit replacement for an ambient global cache: the session
/// is injected at construction and every consumer reads through the handle.
#[derive(Clone)]
pub struct AccessState {
    config: AccessConfig,
    backend: Arc<PermissionBackendClient>,
    cache: Arc<PermissionCache>,
}

impl AccessState {
    pub fn new(config: &AccessConfig, session: SessionContext) -> AccessResult<Self> {
        let backend = Arc::new(PermissionBackendClient::new(&config.backend)?);
        let cache = Arc::new(PermissionCache::new(
            backend.clone(),
            session,
            config.backend.permission_timeout(),
        ));
        Ok(Self {
            config: config.clone(),
            backend,
            cache,
        })
    }

    pub fn config(&self) -> &AccessConfig {
        &self.config
    }

    pub fn backend(&self) -> Arc<PermissionBackendClient> {
        self.backend.clone()
    }

    pub fn cache(&self) -> Arc<PermissionCache> {
        self.cache.clone()
    }

    /// Gate over this session's cache
    pub fn gate(&self) -> CapabilityGate {
        CapabilityGate::new(self.cache.clone())
    }

    /// Inverted gate (primary branch renders when the capability is lacking)
    pub fn inverted_gate(&self) -> CapabilityGate {
        CapabilityGate::inverted(self.cache.clone())
    }

    /// Permission editor for this session's organization
    pub fn editor(&self) -> RolePermissionEditor {
        RolePermissionEditor::new(
            self.backend.clone(),
            self.cache.clone(),
            self.cache.session().organization_id,
        )
    }

    /// Menu administration view for this session's organization
    pub fn menu_admin(&self) -> MenuAdminService {
        MenuAdminService::new(self.backend.clone(), self.cache.session().organization_id)
    }
}
