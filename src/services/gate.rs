//! Capability gate
//!
//! Declarative render-time branching over the permission cache. Gates are
//! pure reads: safe to evaluate on every render, including before the cache
//! has finished loading (the predicate defaults to allow, so UI never
//! flickers to a blocked state).

use std::sync::Arc;

use crate::models::Capability;
use crate::services::cache::PermissionCache;

/// Render-time guard over one permission cache
#[derive(Clone)]
pub struct CapabilityGate {
    cache: Arc<PermissionCache>,
    inverted: bool,
}

impl CapabilityGate {
    pub fn new(cache: Arc<PermissionCache>) -> Self {
        Self {
            cache,
            inverted: false,
        }
    }

    /// Inverted mode: the primary branch renders when the capability is
    /// *lacking* (upgrade prompts and similar)
    pub fn inverted(cache: Arc<PermissionCache>) -> Self {
        Self {
            cache,
            inverted: true,
        }
    }

    /// Whether the primary branch should render
    pub fn passes(&self, menu_id: &str, capability: Capability) -> bool {
        let allowed = self.cache.has_permission(menu_id, capability);
        if self.inverted {
            !allowed
        } else {
            allowed
        }
    }

    /// Evaluate the gate and return one branch
    pub fn render<T>(
        &self,
        menu_id: &str,
        capability: Capability,
        granted: impl FnOnce() -> T,
        fallback: impl FnOnce() -> T,
    ) -> T {
        if self.passes(menu_id, capability) {
            granted()
        } else {
            fallback()
        }
    }

    /// Evaluate the gate with no fallback branch
    pub fn render_opt<T>(
        &self,
        menu_id: &str,
        capability: Capability,
        granted: impl FnOnce() -> T,
    ) -> Option<T> {
        self.passes(menu_id, capability).then(granted)
    }
}
