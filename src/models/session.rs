//! Session context models
//!
//! The engine never reads ambient global state; the host shell constructs a
//! `SessionContext` once at login and hands it to the services that need it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User category, normalized at the session boundary
///
/// Only `Staff` users are subject to menu permissions; every other category
/// is implicitly unrestricted by this subsystem. The backend historically
/// carried the category as a loosely typed numeric code (sometimes a string),
/// so normalization happens exactly once, here, and comparisons elsewhere are
/// by enum value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Client,
    CareProvider,
    Staff,
    OrganizationOwner,
}

impl UserType {
    /// Normalize a legacy numeric user-type code
    pub fn from_code(code: i64) -> Option<UserType> {
        match code {
            1 => Some(UserType::Client),
            2 => Some(UserType::CareProvider),
            3 => Some(UserType::Staff),
            4 => Some(UserType::OrganizationOwner),
            _ => None,
        }
    }

    /// Normalize a legacy stringly typed code ("3" and 3 mean the same user)
    pub fn from_code_str(code: &str) -> Option<UserType> {
        code.trim().parse::<i64>().ok().and_then(Self::from_code)
    }

    pub fn is_staff(&self) -> bool {
        matches!(self, UserType::Staff)
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserType::Client => write!(f, "client"),
            UserType::CareProvider => write!(f, "care_provider"),
            UserType::Staff => write!(f, "staff"),
            UserType::OrganizationOwner => write!(f, "organization_owner"),
        }
    }
}

/// The authenticated user's identity as seen by this subsystem
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    pub user_id: Uuid,
    pub user_type: UserType,
    pub organization_id: Uuid,
    /// Set at login when the user holds the reserved Super Admin role, which
    /// bypasses menu permissions entirely
    #[serde(default)]
    pub is_super_admin: bool,
}

impl SessionContext {
    pub fn new(user_id: Uuid, user_type: UserType, organization_id: Uuid) -> Self {
        Self {
            user_id,
            user_type,
            organization_id,
            is_super_admin: false,
        }
    }

    pub fn super_admin(user_id: Uuid, organization_id: Uuid) -> Self {
        Self {
            user_id,
            user_type: UserType::Staff,
            organization_id,
            is_super_admin: true,
        }
    }

    /// Whether menu permissions apply to this session at all
    pub fn is_permission_gated(&self) -> bool {
        self.user_type.is_staff() && !self.is_super_admin
    }
}
