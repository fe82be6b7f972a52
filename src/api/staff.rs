//! Staff: trainers, managers, and front-desk employees on payroll.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ApiClient, Page, PageQuery};
use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    #[serde(rename = "_id")]
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub phone_number: String,
    pub role: String,
    pub designation: String,
    pub date_of_joining: DateTime<Utc>,
    pub salary: f64,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<String>,
    pub status: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStaffRequest {
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub phone_number: String,
    pub role: String,
    pub designation: String,
    /// Joining date as entered, e.g. `2025-06-01`.
    pub date_of_joining: String,
    pub salary: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStaffRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_joining: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedStaff {
    pub message: String,
    pub deleted_staff_id: String,
}

impl ApiClient {
    pub async fn list_staff(&self, page: PageQuery) -> Result<Page<Staff>, ApiError> {
        self.get("/staff", &page.params()).await
    }

    pub async fn search_staff(
        &self,
        query: &str,
        page: PageQuery,
    ) -> Result<Page<Staff>, ApiError> {
        let mut params = vec![("q", query.to_string())];
        params.extend(page.params());
        self.get("/staff/search", &params).await
    }

    pub async fn get_staff(&self, id: &str) -> Result<Staff, ApiError> {
        self.get(&format!("/staff/{id}"), &[]).await
    }

    pub async fn create_staff(&self, req: &CreateStaffRequest) -> Result<Staff, ApiError> {
        self.post("/staff", req).await
    }

    pub async fn update_staff(
        &self,
        id: &str,
        req: &UpdateStaffRequest,
    ) -> Result<Staff, ApiError> {
        self.put(&format!("/staff/{id}"), req).await
    }

    pub async fn delete_staff(&self, id: &str) -> Result<DeletedStaff, ApiError> {
        self.delete(&format!("/staff/{id}")).await
    }
}
