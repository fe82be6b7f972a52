//! Application modules: the permissionable areas of the system (members,
//! staff, payments, ...). `Module.code` is the prefix of every permission
//! code in the matrix (`members.create`, `staff.delete`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRequest {
    pub name: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl ApiClient {
    pub async fn list_modules(&self) -> Result<Vec<Module>, ApiError> {
        self.get("/modules", &[]).await
    }

    pub async fn get_module(&self, id: &str) -> Result<Module, ApiError> {
        self.get(&format!("/modules/{id}"), &[]).await
    }

    pub async fn create_module(&self, req: &ModuleRequest) -> Result<Module, ApiError> {
        self.post("/modules", req).await
    }

    pub async fn update_module(&self, id: &str, req: &ModuleRequest) -> Result<Module, ApiError> {
        self.put(&format!("/modules/{id}"), req).await
    }

    /// The backend echoes the removed module back.
    pub async fn delete_module(&self, id: &str) -> Result<Module, ApiError> {
        self.delete(&format!("/modules/{id}")).await
    }
}
