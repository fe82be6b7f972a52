//! Membership plans: named duration + price bundles members enrol under.
//! The plan list is small and unpaginated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipPlan {
    #[serde(rename = "_id")]
    pub id: String,
    pub plan_name: String,
    pub duration_days: u32,
    pub base_price: f64,
    pub price_per_day: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// POST / PUT body for plans. `price_per_day` defaults to
/// `base_price / duration_days` when the operator does not override it,
/// matching what the admin console pre-fills.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub plan_name: String,
    pub duration_days: u32,
    pub base_price: f64,
    pub price_per_day: f64,
}

impl PlanRequest {
    pub fn new(plan_name: String, duration_days: u32, base_price: f64) -> Self {
        Self {
            price_per_day: price_per_day(base_price, duration_days),
            plan_name,
            duration_days,
            base_price,
        }
    }
}

/// Daily rate rounded to two decimals; zero duration yields zero instead of
/// dividing by it.
pub fn price_per_day(base_price: f64, duration_days: u32) -> f64 {
    if duration_days > 0 {
        (base_price / duration_days as f64 * 100.0).round() / 100.0
    } else {
        0.0
    }
}

/// PUT /plans/{id} partial update.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlanRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_day: Option<f64>,
}

impl ApiClient {
    pub async fn list_plans(&self) -> Result<Vec<MembershipPlan>, ApiError> {
        self.get("/plans", &[]).await
    }

    pub async fn get_plan(&self, id: &str) -> Result<MembershipPlan, ApiError> {
        self.get(&format!("/plans/{id}"), &[]).await
    }

    pub async fn create_plan(&self, req: &PlanRequest) -> Result<MembershipPlan, ApiError> {
        self.post("/plans", req).await
    }

    pub async fn update_plan(
        &self,
        id: &str,
        req: &UpdatePlanRequest,
    ) -> Result<MembershipPlan, ApiError> {
        self.put(&format!("/plans/{id}"), req).await
    }

    pub async fn delete_plan(&self, id: &str) -> Result<(), ApiError> {
        self.delete_discard(&format!("/plans/{id}")).await
    }
}
