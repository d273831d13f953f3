//! Business logic services

pub mod backend;
pub mod cache;
pub mod editor;
pub mod gate;
pub mod menu_admin;

pub use backend::PermissionBackendClient;
pub use cache::{CacheStatus, PermissionCache};
pub use editor::RolePermissionEditor;
pub use gate::CapabilityGate;
pub use menu_admin::MenuAdminService;
