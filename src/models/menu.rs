//! Menu directory models
//!
//! A menu is the unit at which permissions are granted: every navigable or
//! controllable piece of the UI maps to one menu record. Menus form a flat
//! list with optional parent references; in practice only one level of
//! nesting is used.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A menu entry as stored by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    /// Persistence identifier (row identity)
    pub id: Uuid,

    /// Stable logical identifier; permissions and parent links key on this
    pub menu_id: String,

    /// Display label
    pub name: String,

    /// Route path, if the menu navigates anywhere
    #[serde(default)]
    pub path: Option<String>,

    /// Logical id of the parent menu; `None` means top-level
    #[serde(default)]
    pub parent_menu_id: Option<String>,

    /// Tenant-level visibility switch, independent of any role's capability
    /// flags. An inactive menu is suppressed by the navigation layer
    /// regardless of permissions.
    #[serde(default = "default_menu_active")]
    pub is_active: bool,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_menu_active() -> bool {
    true
}

impl Menu {
    /// Whether this menu sits at the top level of the directory
    pub fn is_top_level(&self) -> bool {
        self.parent_menu_id.is_none()
    }
}

/// Request body for toggling a menu's tenant-wide visibility
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuStatusRequest {
    pub menu_id: String,
    pub is_active: bool,
}

/// A top-level menu with its children
#[derive(Debug, Clone, Serialize)]
pub struct MenuGroup {
    pub menu: Menu,
    pub children: Vec<Menu>,
}

/// A menu directory grouped for display
///
/// Children whose `parent_menu_id` references no top-level menu are tolerated
/// and collected separately rather than dropped.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MenuTree {
    pub groups: Vec<MenuGroup>,
    pub orphans: Vec<Menu>,
}

impl MenuTree {
    /// Group a flat directory into top-level entries with their children.
    ///
    /// Input order is preserved: groups appear in the order their parents
    /// appear in the directory, children in directory order within a group.
    pub fn build(menus: &[Menu]) -> Self {
        let mut tree = MenuTree {
            groups: menus
                .iter()
                .filter(|m| m.is_top_level())
                .map(|m| MenuGroup {
                    menu: m.clone(),
                    children: Vec::new(),
                })
                .collect(),
            orphans: Vec::new(),
        };

        for menu in menus.iter().filter(|m| !m.is_top_level()) {
            let parent_id = menu.parent_menu_id.as_deref();
            match tree
                .groups
                .iter_mut()
                .find(|g| Some(g.menu.menu_id.as_str()) == parent_id)
            {
                Some(group) => group.children.push(menu.clone()),
                None => tree.orphans.push(menu.clone()),
            }
        }

        tree
    }

    /// Total number of menus in the tree
    pub fn len(&self) -> usize {
        self.groups.len()
            + self.groups.iter().map(|g| g.children.len()).sum::<usize>()
            + self.orphans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.orphans.is_empty()
    }
}
