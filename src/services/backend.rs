//! Permission repository client
//!
//! Typed HTTP client for the backend service that owns the menu directory
//! and the role permission table. The backend is the source of truth; this
//! crate only caches and edits what it serves.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::BackendConfig;
use crate::models::{
    Menu, MenuPermission, RolePermission, SavePermissionsRequest, UpdateMenuStatusRequest,
};
use crate::utils::error::{AccessError, AccessResult};

/// Permission repository API client
#[derive(Debug, Clone)]
pub struct PermissionBackendClient {
    client: Client,
    base_url: String,
}

impl PermissionBackendClient {
    /// Create a new client from backend configuration
    pub fn new(config: &BackendConfig) -> AccessResult<Self> {
        info!("Initializing permission backend client for {}", config.url);

        let client = Client::builder()
            .timeout(config.request_timeout())
            .use_rustls_tls()
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client with an explicit request timeout, bypassing config.
    /// Used by tests and embedded hosts.
    pub fn with_base_url(base_url: &str, request_timeout: Duration) -> AccessResult<Self> {
        let client = Client::builder().timeout(request_timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolved menu permissions for one user in one organization
    pub async fn user_permissions(
        &self,
        user_id: Uuid,
        organization_id: Uuid,
    ) -> AccessResult<Vec<MenuPermission>> {
        let url = format!(
            "{}/user-permissions/{}?organizationId={}",
            self.base_url,
            urlencoding::encode(&user_id.to_string()),
            organization_id
        );
        self.get(&url).await
    }

    /// Active menus for an organization (editor view)
    pub async fn menus(&self, organization_id: Uuid) -> AccessResult<Vec<Menu>> {
        let url = format!("{}/menus/{}", self.base_url, organization_id);
        self.get(&url).await
    }

    /// All menus for an organization, including inactive ones
    /// (administration view)
    pub async fn menus_for_admin(&self, organization_id: Uuid) -> AccessResult<Vec<Menu>> {
        let url = format!("{}/menus-for-admin/{}", self.base_url, organization_id);
        self.get(&url).await
    }

    /// Toggle a menu's tenant-wide visibility
    pub async fn update_menu_status(&self, menu_id: &str, is_active: bool) -> AccessResult<()> {
        let url = format!("{}/update-menu-status", self.base_url);
        let body = UpdateMenuStatusRequest {
            menu_id: menu_id.to_string(),
            is_active,
        };
        self.post_no_content(&url, &body).await
    }

    /// Replace one role's whole permission matrix
    pub async fn save_permissions(&self, request: &SavePermissionsRequest) -> AccessResult<()> {
        let url = format!("{}/save-permissions", self.base_url);
        self.post_no_content(&url, request).await
    }

    /// Existing permission records for one role in one organization
    pub async fn role_permissions(
        &self,
        role_id: Uuid,
        organization_id: Uuid,
    ) -> AccessResult<Vec<RolePermission>> {
        let url = format!(
            "{}/role-permissions/{}?organizationId={}",
            self.base_url, role_id, organization_id
        );
        self.get(&url).await
    }

    // ==================== Helper Methods ====================

    /// Internal GET request handler
    async fn get<T: DeserializeOwned>(&self, url: &str) -> AccessResult<T> {
        debug!("Backend: sending GET request to {}", url);
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(
                "Backend request to {} failed (connect: {}, timeout: {}): {}",
                url,
                e.is_connect(),
                e.is_timeout(),
                e
            );
            AccessError::from(e)
        })?;

        Self::handle_response(response).await
    }

    /// Internal POST handler for endpoints whose success body we discard
    async fn post_no_content<B: Serialize>(&self, url: &str, body: &B) -> AccessResult<()> {
        debug!("Backend: sending POST request to {}", url);
        let response = self.client.post(url).json(body).send().await.map_err(|e| {
            warn!("Backend request to {} failed: {}", url, e);
            AccessError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(AccessError::Backend {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Handle HTTP response and parse JSON
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> AccessResult<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str::<T>(&body).map_err(|e| {
                AccessError::Decode(format!("{}: {}", e, truncate_body(body)))
            })
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(AccessError::Backend {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Clamp an undecodable body for the error message. The cut backs up to a
/// character boundary so a multibyte character straddling the limit cannot
/// panic the slice.
fn truncate_body(body: String) -> String {
    const LIMIT: usize = 500;
    if body.len() <= LIMIT {
        return body;
    }
    let cut = (0..=LIMIT)
        .rfind(|&i| body.is_char_boundary(i))
        .unwrap_or(0);
    format!("{}... (truncated)", &body[..cut])
}
