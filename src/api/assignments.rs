//! Trainer-member assignments: which trainer coaches which member.
//!
//! The list endpoint returns a flattened row (names and phones already
//! joined in); the by-member and by-trainer endpoints return the raw
//! document with object references instead. Both shapes are kept as they
//! are on the wire rather than forced into one struct.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ApiClient, DeletedAck, Page, PageQuery};
use crate::error::ApiError;
use crate::session::UserRole;

/// Assignment lifecycle state. Wire values are capitalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum AssignmentStatus {
    Active,
    Completed,
    Cancelled,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Active => "Active",
            AssignmentStatus::Completed => "Completed",
            AssignmentStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::str::FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(AssignmentStatus::Active),
            "completed" => Ok(AssignmentStatus::Completed),
            "cancelled" => Ok(AssignmentStatus::Cancelled),
            other => Err(format!(
                "unknown status '{other}' (expected Active, Completed, or Cancelled)"
            )),
        }
    }
}

/// Row from GET /trainer-assignments: pre-joined for display.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentListItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub member_code: String,
    pub member_name: String,
    pub member_phone: String,
    pub trainer_name: String,
    pub trainer_phone: String,
    pub assigned_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    pub status: AssignmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub member_code: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub phone_number: String,
}

/// Raw document from the by-member / by-trainer endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDetail {
    #[serde(rename = "_id")]
    pub id: String,
    pub member_id: MemberRef,
    pub trainer_id: PhoneRef,
    pub assigned_by: PhoneRef,
    pub assigned_date: DateTime<Utc>,
    pub status: AssignmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Acknowledgement from POST / PUT. Reference fields arrive sometimes as
/// ids and sometimes as populated objects, so only the stable scalars are
/// decoded here.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentAck {
    #[serde(rename = "_id")]
    pub id: String,
    pub assigned_date: DateTime<Utc>,
    pub status: AssignmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerLoad {
    pub trainer_id: String,
    pub trainer_name: String,
    pub count: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentStats {
    pub total_assignments: u64,
    pub active_assignments: u64,
    pub completed_assignments: u64,
    pub cancelled_assignments: u64,
    #[serde(default)]
    pub assignments_by_trainer: Option<Vec<TrainerLoad>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignmentRequest {
    pub member_id: String,
    pub trainer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssignmentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AssignmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Entry in the trainer / member pick lists (GET /users/trainers|members).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryProfile {
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub profile_photo: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub phone_number: String,
    #[serde(default)]
    pub profile: Option<DirectoryProfile>,
    #[serde(default)]
    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryResponse {
    pub data: Vec<DirectoryUser>,
}

impl ApiClient {
    pub async fn list_assignments(
        &self,
        page: PageQuery,
        status: Option<AssignmentStatus>,
        trainer_id: Option<&str>,
        member_id: Option<&str>,
    ) -> Result<Page<AssignmentListItem>, ApiError> {
        let mut params = page.params();
        if let Some(status) = status {
            params.push(("status", status.as_str().to_string()));
        }
        if let Some(trainer) = trainer_id {
            params.push(("trainerId", trainer.to_string()));
        }
        if let Some(member) = member_id {
            params.push(("memberId", member.to_string()));
        }
        self.get("/trainer-assignments", &params).await
    }

    pub async fn create_assignment(
        &self,
        req: &CreateAssignmentRequest,
    ) -> Result<AssignmentAck, ApiError> {
        self.post("/trainer-assignments", req).await
    }

    pub async fn update_assignment(
        &self,
        id: &str,
        req: &UpdateAssignmentRequest,
    ) -> Result<AssignmentAck, ApiError> {
        self.put(&format!("/trainer-assignments/{id}"), req).await
    }

    pub async fn delete_assignment(&self, id: &str) -> Result<DeletedAck, ApiError> {
        self.delete(&format!("/trainer-assignments/{id}")).await
    }

    pub async fn assignments_by_member(
        &self,
        member_id: &str,
    ) -> Result<Vec<AssignmentDetail>, ApiError> {
        self.get(&format!("/trainer-assignments/member/{member_id}"), &[])
            .await
    }

    pub async fn assignments_by_trainer(
        &self,
        trainer_id: &str,
    ) -> Result<Vec<AssignmentDetail>, ApiError> {
        self.get(&format!("/trainer-assignments/trainer/{trainer_id}"), &[])
            .await
    }

    pub async fn assignment_stats(&self) -> Result<AssignmentStats, ApiError> {
        self.get("/trainer-assignments/stats", &[]).await
    }

    /// Users holding the trainer role, for assignment pick lists.
    pub async fn trainer_directory(&self) -> Result<DirectoryResponse, ApiError> {
        self.get("/users/trainers", &[]).await
    }

    /// Users holding the member role, for assignment pick lists.
    pub async fn member_directory(&self) -> Result<DirectoryResponse, ApiError> {
        self.get("/users/members", &[]).await
    }
}
