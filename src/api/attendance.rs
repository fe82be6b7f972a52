//! Attendance log: QR check-ins at the front desk, with optional checkout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ApiClient, Page, PageQuery};
use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceMember {
    #[serde(rename = "_id")]
    pub id: String,
    pub member_code: String,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    #[serde(rename = "_id")]
    pub id: String,
    pub check_in_time: DateTime<Utc>,
    /// None while the member is still inside.
    #[serde(default)]
    pub check_out_time: Option<DateTime<Utc>>,
    pub qr_code: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub user: AttendanceUser,
    pub profile: AttendanceProfile,
    pub member: AttendanceMember,
}

/// PUT /attendance/{id} — the only editable fields.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAttendanceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedAttendance {
    pub message: String,
    pub deleted_attendance_id: String,
}

impl ApiClient {
    /// List attendance records, newest first, optionally bounded by a
    /// `YYYY-MM-DD` date range.
    pub async fn list_attendance(
        &self,
        page: PageQuery,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Page<Attendance>, ApiError> {
        let mut params = page.params();
        if let Some(start) = start_date {
            params.push(("startDate", start.to_string()));
        }
        if let Some(end) = end_date {
            params.push(("endDate", end.to_string()));
        }
        self.get("/attendance", &params).await
    }

    pub async fn search_attendance(
        &self,
        query: &str,
        page: PageQuery,
    ) -> Result<Page<Attendance>, ApiError> {
        let mut params = vec![("q", query.to_string())];
        params.extend(page.params());
        self.get("/attendance/search", &params).await
    }

    pub async fn get_attendance(&self, id: &str) -> Result<Attendance, ApiError> {
        self.get(&format!("/attendance/{id}"), &[]).await
    }

    pub async fn update_attendance(
        &self,
        id: &str,
        req: &UpdateAttendanceRequest,
    ) -> Result<Attendance, ApiError> {
        self.put(&format!("/attendance/{id}"), req).await
    }

    pub async fn delete_attendance(&self, id: &str) -> Result<DeletedAttendance, ApiError> {
        self.delete(&format!("/attendance/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_field_maps_to_kind() {
        let record: Attendance = serde_json::from_str(
            r#"{
                "_id": "a1",
                "checkInTime": "2025-08-20T06:05:00.000Z",
                "qrCode": "QR-123",
                "type": "gym",
                "isActive": true,
                "createdAt": "2025-08-20T06:05:00.000Z",
                "user": { "_id": "u1", "phoneNumber": "9876543210" },
                "profile": { "_id": "p1", "fullName": "Asha Rao" },
                "member": { "_id": "m1", "memberCode": "GYM0042", "status": "active" }
            }"#,
        )
        .unwrap();
        assert_eq!(record.kind, "gym");
        assert!(record.check_out_time.is_none());
    }
}
