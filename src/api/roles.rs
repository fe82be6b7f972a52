//! Roles and the wire shapes behind the permission matrix.
//!
//! `GET /permissions/role/{id}` returns the role's permissions grouped by
//! module — sparse: a module lists only the actions a permission record
//! exists for. The reconciler in [`crate::permissions`] densifies that into
//! the full module × action grid. Saving goes back through
//! `PUT /roles/{id}` with the flat list of granted codes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Flat permission codes currently granted to the role.
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub user_count: Option<u64>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One permission record as the server reports it.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePermission {
    pub permission_id: String,
    pub name: String,
    /// Action name as stored, e.g. `create`. Matched case-insensitively.
    pub action: String,
    /// Full code, `{moduleCode}.{action}`.
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    pub is_granted: bool,
}

/// A module and whichever of its permissions the server has records for.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireModulePermissions {
    pub module_id: String,
    pub module_name: String,
    pub module_code: String,
    #[serde(default)]
    pub module_icon: Option<String>,
    #[serde(default)]
    pub module_order: Option<i64>,
    pub permissions: Vec<WirePermission>,
}

/// GET /permissions/role/{roleId} response.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePermissionsResponse {
    pub role_id: String,
    pub role_name: String,
    pub modules: Vec<WireModulePermissions>,
}

impl ApiClient {
    pub async fn list_roles(&self) -> Result<Vec<Role>, ApiError> {
        self.get("/roles", &[]).await
    }

    pub async fn get_role(&self, id: &str) -> Result<Role, ApiError> {
        self.get(&format!("/roles/{id}"), &[]).await
    }

    pub async fn create_role(&self, req: &RoleRequest) -> Result<Role, ApiError> {
        self.post("/roles", req).await
    }

    pub async fn update_role(&self, id: &str, req: &RoleRequest) -> Result<Role, ApiError> {
        self.put(&format!("/roles/{id}"), req).await
    }

    pub async fn delete_role(&self, id: &str) -> Result<(), ApiError> {
        self.delete_discard(&format!("/roles/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_permissions_decode() {
        let resp: RolePermissionsResponse = serde_json::from_str(
            r#"{
                "roleId": "r1",
                "roleName": "front_desk",
                "modules": [
                    {
                        "moduleId": "mod1",
                        "moduleName": "members",
                        "moduleCode": "members",
                        "moduleOrder": 1,
                        "permissions": [
                            {
                                "permissionId": "perm1",
                                "name": "Create Members",
                                "action": "create",
                                "code": "members.create",
                                "isGranted": true
                            }
                        ]
                    },
                    {
                        "moduleId": "mod2",
                        "moduleName": "payments",
                        "moduleCode": "payments",
                        "permissions": []
                    }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(resp.modules.len(), 2);
        assert_eq!(resp.modules[0].permissions.len(), 1);
        assert!(resp.modules[1].permissions.is_empty());
        assert!(resp.modules[1].module_order.is_none());
    }
}
