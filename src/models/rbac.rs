//! Role-Based Access Control (RBAC) models
//!
//! Permissions are granted per (role, menu) pair as four independent boolean
//! capabilities. The capabilities are deliberately not hierarchical: `Edit`
//! does not imply `View`; every call site checks exactly the flag it needs.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One of the four rights evaluated per menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    View,
    Create,
    Edit,
    Delete,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::View => "canView",
            Capability::Create => "canCreate",
            Capability::Edit => "canEdit",
            Capability::Delete => "canDelete",
        }
    }

    /// All capabilities, in display order
    pub fn all() -> [Capability; 4] {
        [
            Capability::View,
            Capability::Create,
            Capability::Edit,
            Capability::Delete,
        ]
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four capability flags for one menu
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitySet {
    #[serde(default)]
    pub can_view: bool,
    #[serde(default)]
    pub can_create: bool,
    #[serde(default)]
    pub can_edit: bool,
    #[serde(default)]
    pub can_delete: bool,
}

impl CapabilitySet {
    /// Editor seeding default: visible, but no mutation rights
    pub fn seeded() -> Self {
        Self {
            can_view: true,
            can_create: false,
            can_edit: false,
            can_delete: false,
        }
    }

    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::View => self.can_view,
            Capability::Create => self.can_create,
            Capability::Edit => self.can_edit,
            Capability::Delete => self.can_delete,
        }
    }

    pub fn set(&mut self, capability: Capability, value: bool) {
        match capability {
            Capability::View => self.can_view = value,
            Capability::Create => self.can_create = value,
            Capability::Edit => self.can_edit = value,
            Capability::Delete => self.can_delete = value,
        }
    }
}

/// A role assignable to staff users, scoped to an organization
///
/// The reserved "Super Admin" role bypasses menu permissions entirely; that
/// bypass is normalized into the session at login, not resolved here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub organization_id: Option<Uuid>,
}

/// Per-menu capability record on the wire
///
/// The same shape serves the resolved user permissions returned by the
/// backend and the per-menu entries of a role's saved matrix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MenuPermission {
    pub menu_id: String,
    #[serde(flatten)]
    pub capabilities: CapabilitySet,
}

impl MenuPermission {
    pub fn new(menu_id: impl Into<String>, capabilities: CapabilitySet) -> Self {
        Self {
            menu_id: menu_id.into(),
            capabilities,
        }
    }
}

/// The persisted authorization record, identified by (role, menu, organization)
///
/// At most one record exists per (role, menu) pair; saving a role's
/// permissions replaces the role's whole matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePermission {
    pub role_id: Uuid,
    pub organization_id: Uuid,
    pub menu_id: String,
    #[serde(flatten)]
    pub capabilities: CapabilitySet,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for a full-replace save of one role's matrix
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePermissionsRequest {
    pub role_id: Uuid,
    pub organization_id: Uuid,
    pub permissions: Vec<MenuPermission>,
}

/// Resolved capabilities for the current user, keyed by menu
///
/// This is a cache of the backend's RolePermission table, not a source of
/// truth. It is created empty, populated by one load, and only ever replaced
/// wholesale.
#[derive(Debug, Clone, Default)]
pub struct PermissionMap {
    entries: HashMap<String, CapabilitySet>,
}

impl PermissionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index resolved records by menu id
    pub fn from_records(records: Vec<MenuPermission>) -> Self {
        Self {
            entries: records
                .into_iter()
                .map(|r| (r.menu_id, r.capabilities))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, menu_id: &str) -> Option<&CapabilitySet> {
        self.entries.get(menu_id)
    }

    /// Resolve one capability check against the map.
    ///
    /// An empty map means no restrictions are configured (or none could be
    /// loaded) and a menu with no entry is treated as unrestricted; both
    /// resolve to allow. Only an explicit entry can deny.
    pub fn allows(&self, menu_id: &str, capability: Capability) -> bool {
        if self.entries.is_empty() {
            return true;
        }
        match self.entries.get(menu_id) {
            Some(set) => set.allows(capability),
            None => true,
        }
    }
}
