//! Role permission editor
//!
//! Authoring workflow that produces and persists a full permission matrix for
//! one role: seed defaults from the menu directory, merge the role's existing
//! records over the seeds, apply the operator's toggles, then save the whole
//! matrix in one request and reload the session's permission cache.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{Capability, CapabilitySet, Menu, MenuPermission, SavePermissionsRequest};
use crate::services::backend::PermissionBackendClient;
use crate::services::cache::PermissionCache;
use crate::utils::error::{AccessError, AccessResult};

/// Editing state for one role's menu permission matrix
///
/// The working matrix lives in memory until `save`; every failure path leaves
/// it untouched so the operator never loses unsaved toggles.
pub struct RolePermissionEditor {
    backend: Arc<PermissionBackendClient>,
    cache: Arc<PermissionCache>,
    organization_id: Uuid,
    menus: Vec<Menu>,
    matrix: BTreeMap<String, CapabilitySet>,
    selected_role: Option<Uuid>,
}

impl RolePermissionEditor {
    pub fn new(
        backend: Arc<PermissionBackendClient>,
        cache: Arc<PermissionCache>,
        organization_id: Uuid,
    ) -> Self {
        Self {
            backend,
            cache,
            organization_id,
            menus: Vec::new(),
            matrix: BTreeMap::new(),
            selected_role: None,
        }
    }

    /// Fetch the organization's menus and seed the working matrix with one
    /// entry per menu, defaulted to view-only. The default favors visibility
    /// over mutation rights.
    pub async fn load_menu_directory(&mut self) -> AccessResult<&[Menu]> {
        let menus = self.backend.menus(self.organization_id).await?;
        debug!("Loaded {} menu(s) for permission editing", menus.len());

        self.matrix = Self::seed(&menus);
        self.menus = menus;
        self.selected_role = None;

        Ok(&self.menus)
    }

    /// Select a role: fetch its existing records and merge them over freshly
    /// seeded defaults.
    ///
    /// The directory stays authoritative for which menus exist; the backend
    /// is authoritative for values where a record exists. Menus without a
    /// record keep seeded defaults (first-time configuration), and records
    /// for menus absent from the directory are ignored.
    pub async fn select_role(&mut self, role_id: Uuid) -> AccessResult<()> {
        if self.menus.is_empty() {
            return Err(AccessError::EmptyMatrix);
        }

        let existing = self
            .backend
            .role_permissions(role_id, self.organization_id)
            .await?;
        debug!(
            "Merging {} existing record(s) into matrix for role {}",
            existing.len(),
            role_id
        );

        // Reseed before merging so switching roles never carries one role's
        // values into another's matrix.
        let mut matrix = Self::seed(&self.menus);
        for record in existing {
            if let Some(entry) = matrix.get_mut(&record.menu_id) {
                *entry = record.capabilities;
            }
        }

        self.matrix = matrix;
        self.selected_role = Some(role_id);
        Ok(())
    }

    /// Set one capability flag in the working matrix. Local only; nothing is
    /// persisted until `save`.
    pub fn toggle_permission(
        &mut self,
        menu_id: &str,
        capability: Capability,
        value: bool,
    ) -> AccessResult<()> {
        match self.matrix.get_mut(menu_id) {
            Some(entry) => {
                entry.set(capability, value);
                Ok(())
            }
            None => Err(AccessError::UnknownMenu(menu_id.to_string())),
        }
    }

    /// Persist the whole working matrix for the selected role as one
    /// all-or-nothing request, then re-fetch the persisted state and reload
    /// the permission cache so this session's gates reflect the new matrix
    /// immediately.
    pub async fn save(&mut self) -> AccessResult<()> {
        let role_id = self.selected_role.ok_or(AccessError::NoRoleSelected)?;
        if self.matrix.is_empty() {
            return Err(AccessError::EmptyMatrix);
        }

        let request = SavePermissionsRequest {
            role_id,
            organization_id: self.organization_id,
            permissions: self
                .matrix
                .iter()
                .map(|(menu_id, set)| MenuPermission::new(menu_id.clone(), *set))
                .collect(),
        };

        self.backend.save_permissions(&request).await?;
        info!(
            "Saved {} permission record(s) for role {}",
            request.permissions.len(),
            role_id
        );

        // Confirm persisted state, then refresh the session's own gates.
        self.select_role(role_id).await?;
        self.cache.reload().await;

        Ok(())
    }

    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    pub fn matrix(&self) -> &BTreeMap<String, CapabilitySet> {
        &self.matrix
    }

    pub fn selected_role(&self) -> Option<Uuid> {
        self.selected_role
    }

    fn seed(menus: &[Menu]) -> BTreeMap<String, CapabilitySet> {
        menus
            .iter()
            .map(|m| (m.menu_id.clone(), CapabilitySet::seeded()))
            .collect()
    }
}
