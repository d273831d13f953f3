//! Data models

mod menu;
mod rbac;
mod session;

pub use menu::*;
pub use rbac::*;
pub use session::*;
