//! Role permission editing.
//!
//! Fetch a role's sparse permission records, densify them into a
//! [`PermissionMatrix`], edit in memory, then save the flattened code list
//! back. The [`PermissionsApi`] trait is the seam between the matrix and
//! the HTTP client, mirroring how login is decoupled from transport.

pub mod matrix;

pub use matrix::{
    format_display_name, CanonicalAction, ModuleRow, PermissionCell, PermissionMatrix,
};

use async_trait::async_trait;
use serde::Serialize;

use crate::api::roles::{Role, RolePermissionsResponse};
use crate::api::ApiClient;
use crate::error::ApiError;

/// PUT /roles/{id} payload when saving edited permissions.
#[derive(Debug, Clone, Serialize)]
struct SavePermissionsRequest<'a> {
    permissions: &'a [String],
}

/// Permission storage as seen by the matrix editor.
#[async_trait]
pub trait PermissionsApi: Send + Sync {
    /// Sparse per-module permission records for one role.
    async fn fetch_role_permissions(
        &self,
        role_id: &str,
    ) -> Result<RolePermissionsResponse, ApiError>;

    /// Replace the role's grants with the given permission codes.
    async fn save_role_permissions(
        &self,
        role_id: &str,
        codes: &[String],
    ) -> Result<Role, ApiError>;
}

#[async_trait]
impl PermissionsApi for ApiClient {
    async fn fetch_role_permissions(
        &self,
        role_id: &str,
    ) -> Result<RolePermissionsResponse, ApiError> {
        self.get(&format!("/permissions/role/{role_id}"), &[]).await
    }

    async fn save_role_permissions(
        &self,
        role_id: &str,
        codes: &[String],
    ) -> Result<Role, ApiError> {
        self.put(
            &format!("/roles/{role_id}"),
            &SavePermissionsRequest { permissions: codes },
        )
        .await
    }
}
