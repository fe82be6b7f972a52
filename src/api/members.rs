//! Members: the people holding an active gym membership.
//!
//! A member record aggregates the user account, profile, plan, and the
//! payment that opened the membership. `GET /members` is paginated;
//! `/members/search` matches name, phone, or member code.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ApiClient, Page, PageQuery};
use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub phone_number: String,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberProfile {
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
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPlan {
    #[serde(rename = "_id")]
    pub id: String,
    pub plan_name: String,
    pub duration_days: u32,
    pub base_price: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPayment {
    #[serde(rename = "_id")]
    pub id: String,
    pub payment_mode: String,
    pub amount_paid: f64,
    pub payment_status: String,
    pub pending_amount: f64,
    pub payment_date: DateTime<Utc>,
    #[serde(default)]
    pub reference_no: Option<String>,
}

/// `createdBy` on members and expenses: the operator who entered the record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBy {
    #[serde(rename = "_id")]
    pub id: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(rename = "_id")]
    pub id: String,
    pub member_code: String,
    pub duration_days: u32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Negative once the membership has expired.
    pub days_left: i64,
    pub base_price: f64,
    pub discount_amount: f64,
    pub final_price: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub user: MemberUser,
    pub profile: MemberProfile,
    pub plan: MemberPlan,
    pub payment: MemberPayment,
    #[serde(default)]
    pub created_by: Option<CreatedBy>,
    /// Set when enrolment reused an existing user account.
    #[serde(default)]
    pub is_existing_user: Option<bool>,
}

/// POST /members body. The backend creates user + profile + membership +
/// payment in one shot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    pub mobile_number: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    pub duration_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<f64>,
    pub payment_mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_no: Option<String>,
}

/// PUT /members/{id} body — only the given fields change.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedMember {
    pub message: String,
    pub deleted_member_id: String,
}

impl ApiClient {
    pub async fn list_members(&self, page: PageQuery) -> Result<Page<Member>, ApiError> {
        self.get("/members", &page.params()).await
    }

    pub async fn search_members(
        &self,
        query: &str,
        page: PageQuery,
    ) -> Result<Page<Member>, ApiError> {
        let mut params = vec![("q", query.to_string())];
        params.extend(page.params());
        self.get("/members/search", &params).await
    }

    pub async fn get_member(&self, id: &str) -> Result<Member, ApiError> {
        self.get(&format!("/members/{id}"), &[]).await
    }

    pub async fn create_member(&self, req: &CreateMemberRequest) -> Result<Member, ApiError> {
        self.post("/members", req).await
    }

    pub async fn update_member(
        &self,
        id: &str,
        req: &UpdateMemberRequest,
    ) -> Result<Member, ApiError> {
        self.put(&format!("/members/{id}"), req).await
    }

    pub async fn delete_member(&self, id: &str) -> Result<DeletedMember, ApiError> {
        self.delete(&format!("/members/{id}")).await
    }
}
