//! Payments ledger. Read-only: payments are created by the backend as a
//! side effect of enrolment and renewals, never directly from the console.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{ApiClient, Page, PageQuery};
use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    pub amount: f64,
    pub payment_mode: String,
    pub status: String,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub payment_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// GET /payments/stats — totals plus per-status and per-mode breakdowns.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStats {
    pub total_payments: u64,
    pub total_amount: f64,
    pub pending_amount: f64,
    #[serde(default)]
    pub payments_by_status: HashMap<String, f64>,
    #[serde(default)]
    pub payments_by_mode: HashMap<String, f64>,
}

impl ApiClient {
    /// List payments, optionally filtered by status and/or payment mode.
    pub async fn list_payments(
        &self,
        page: PageQuery,
        status: Option<&str>,
        payment_mode: Option<&str>,
    ) -> Result<Page<Payment>, ApiError> {
        let mut params = page.params();
        if let Some(status) = status {
            params.push(("status", status.to_string()));
        }
        if let Some(mode) = payment_mode {
            params.push(("paymentMode", mode.to_string()));
        }
        self.get("/payments", &params).await
    }

    pub async fn get_payment(&self, id: &str) -> Result<Payment, ApiError> {
        self.get(&format!("/payments/{id}"), &[]).await
    }

    /// Every payment made by one user, unpaginated.
    pub async fn payments_by_user(&self, user_id: &str) -> Result<Vec<Payment>, ApiError> {
        self.get(&format!("/payments/user/{user_id}"), &[]).await
    }

    pub async fn payment_stats(&self) -> Result<PaymentStats, ApiError> {
        self.get("/payments/stats", &[]).await
    }
}
