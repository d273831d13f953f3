//! Menu administration service
//!
//! Toggles a menu's tenant-wide `is_active` flag. This is a visibility
//! switch, not a capability: an inactive menu is suppressed by the navigation
//! layer regardless of what any role's permissions say, and flipping it never
//! touches the permission map.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::models::{Menu, MenuTree};
use crate::services::backend::PermissionBackendClient;
use crate::utils::error::{AccessError, AccessResult};

/// Administration view over the full menu directory, inactive entries
/// included
pub struct MenuAdminService {
    backend: Arc<PermissionBackendClient>,
    organization_id: Uuid,
    menus: Vec<Menu>,
}

impl MenuAdminService {
    pub fn new(backend: Arc<PermissionBackendClient>, organization_id: Uuid) -> Self {
        Self {
            backend,
            organization_id,
            menus: Vec::new(),
        }
    }

    /// Fetch the organization's full directory, including inactive menus
    pub async fn load_directory(&mut self) -> AccessResult<&[Menu]> {
        let menus = self.backend.menus_for_admin(self.organization_id).await?;
        self.menus = menus;
        Ok(&self.menus)
    }

    /// The loaded directory grouped for display
    pub fn tree(&self) -> MenuTree {
        MenuTree::build(&self.menus)
    }

    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    /// Toggle one menu's visibility. The displayed copy is updated only after
    /// the backend confirms; on failure it is left unchanged and the error is
    /// surfaced to the operator.
    pub async fn set_menu_active(&mut self, menu_id: &str, is_active: bool) -> AccessResult<()> {
        if !self.menus.iter().any(|m| m.menu_id == menu_id) {
            return Err(AccessError::UnknownMenu(menu_id.to_string()));
        }

        self.backend.update_menu_status(menu_id, is_active).await?;

        if let Some(menu) = self.menus.iter_mut().find(|m| m.menu_id == menu_id) {
            menu.is_active = is_active;
        }
        info!(menu_id, is_active, "Updated menu visibility");
        Ok(())
    }
}
