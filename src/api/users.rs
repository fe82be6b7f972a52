//! User accounts: every login (admins, trainers, members) keyed by phone
//! number, with the role that drives the permission matrix.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ApiClient, Page, PageQuery};
use crate::error::ApiError;
use crate::session::UserRole;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<DateTime<Utc>>,
    #[serde(default)]
    pub profile_photo: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub emergency_contact_name: Option<String>,
    #[serde(default)]
    pub emergency_contact_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub phone_number: String,
    pub is_active: bool,
    #[serde(default)]
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Absent on accounts created before roles were introduced.
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub profile: Option<UserProfile>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub phone_number: String,
    pub role_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl ApiClient {
    pub async fn list_users(
        &self,
        page: PageQuery,
        search: Option<&str>,
    ) -> Result<Page<User>, ApiError> {
        let mut params = page.params();
        if let Some(search) = search {
            params.push(("search", search.to_string()));
        }
        self.get("/users", &params).await
    }

    pub async fn get_user(&self, id: &str) -> Result<User, ApiError> {
        self.get(&format!("/users/{id}"), &[]).await
    }

    pub async fn create_user(&self, req: &CreateUserRequest) -> Result<User, ApiError> {
        self.post("/users", req).await
    }

    pub async fn update_user(&self, id: &str, req: &UpdateUserRequest) -> Result<User, ApiError> {
        self.put(&format!("/users/{id}"), req).await
    }

    /// The backend echoes the removed user back.
    pub async fn delete_user(&self, id: &str) -> Result<User, ApiError> {
        self.delete(&format!("/users/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_decodes_without_role_or_profile() {
        let user: User = serde_json::from_str(
            r#"{
                "_id": "u1",
                "phoneNumber": "9876543210",
                "isActive": true,
                "createdAt": "2025-01-01T00:00:00.000Z",
                "updatedAt": "2025-01-02T00:00:00.000Z"
            }"#,
        )
        .unwrap();
        assert!(user.role.is_none());
        assert!(user.profile.is_none());
        assert!(user.last_login_at.is_none());
    }
}
