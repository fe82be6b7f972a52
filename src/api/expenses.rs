//! Operating expenses: rent, equipment, maintenance, salaries paid out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::members::CreatedBy;
use super::{ApiClient, Page, PageQuery};
use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub amount: f64,
    pub category: String,
    pub expense_date: DateTime<Utc>,
    pub payment_method: String,
    #[serde(default)]
    pub vendor_name: Option<String>,
    #[serde(default)]
    pub reference_no: Option<String>,
    #[serde(default)]
    pub receipt_url: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub created_by: Option<CreatedBy>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// GET /expenses/stats. The backend keeps growing this payload, so only the
/// total is typed; everything else rides along in `extra` and is rendered
/// as-is.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseStats {
    #[serde(default)]
    pub total_expense: f64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: f64,
    pub category: String,
    /// Expense date as entered, e.g. `2025-06-15`.
    pub expense_date: String,
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpenseRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedExpense {
    pub message: String,
    pub deleted_expense_id: String,
}

impl ApiClient {
    /// List expenses, optionally filtered by category and a date range
    /// (`YYYY-MM-DD` strings, passed through to the backend).
    pub async fn list_expenses(
        &self,
        page: PageQuery,
        category: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Page<Expense>, ApiError> {
        let mut params = page.params();
        if let Some(category) = category {
            params.push(("category", category.to_string()));
        }
        if let Some(start) = start_date {
            params.push(("startDate", start.to_string()));
        }
        if let Some(end) = end_date {
            params.push(("endDate", end.to_string()));
        }
        self.get("/expenses", &params).await
    }

    pub async fn search_expenses(
        &self,
        query: &str,
        page: PageQuery,
    ) -> Result<Page<Expense>, ApiError> {
        let mut params = vec![("q", query.to_string())];
        params.extend(page.params());
        self.get("/expenses/search", &params).await
    }

    pub async fn expense_stats(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<ExpenseStats, ApiError> {
        let mut params = Vec::new();
        if let Some(start) = start_date {
            params.push(("startDate", start.to_string()));
        }
        if let Some(end) = end_date {
            params.push(("endDate", end.to_string()));
        }
        self.get("/expenses/stats", &params).await
    }

    pub async fn get_expense(&self, id: &str) -> Result<Expense, ApiError> {
        self.get(&format!("/expenses/{id}"), &[]).await
    }

    pub async fn create_expense(&self, req: &CreateExpenseRequest) -> Result<Expense, ApiError> {
        self.post("/expenses", req).await
    }

    pub async fn update_expense(
        &self,
        id: &str,
        req: &UpdateExpenseRequest,
    ) -> Result<Expense, ApiError> {
        self.put(&format!("/expenses/{id}"), req).await
    }

    pub async fn delete_expense(&self, id: &str) -> Result<DeletedExpense, ApiError> {
        self.delete(&format!("/expenses/{id}")).await
    }
}
