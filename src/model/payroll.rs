use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

/// Payroll header. `total_salary` is always derived from the line items,
/// never accepted from a client.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Payroll {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = 42)]
    pub staff_id: i64,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub period_start: NaiveDate,
    #[schema(example = "2026-01-31", format = "date", value_type = String)]
    pub period_end: NaiveDate,
    #[schema(example = 2300.0)]
    pub total_salary: f64,
    #[schema(example = "draft")]
    pub status: PayrollStatus,
    #[schema(example = "2026-01-31T12:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    sqlx::Type,
    Display,
    EnumString,
    ToSchema,
)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PayrollStatus {
    #[default]
    Draft,
    Confirmed,
    Paid,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    sqlx::Type,
    Display,
    EnumString,
    ToSchema,
)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ComponentType {
    Earning,
    Deduction,
}

/// One earning or deduction line on a payroll.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct PayrollDetail {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = 1)]
    pub payroll_id: i64,
    #[schema(example = "Basic Salary")]
    pub name: String,
    #[schema(example = 2500.0)]
    pub amount: f64,
    #[schema(example = "earning")]
    pub component_type: ComponentType,
}

/// Line item as submitted by a client; amounts must be non-negative.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DetailInput {
    #[schema(example = "Basic Salary")]
    pub name: String,
    #[schema(example = 2500.0)]
    pub amount: f64,
    #[schema(example = "earning")]
    pub component_type: ComponentType,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePayroll {
    #[schema(example = 42)]
    pub staff_id: i64,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub period_start: NaiveDate,
    #[schema(example = "2026-01-31", format = "date", value_type = String)]
    pub period_end: NaiveDate,
    /// Defaults to "draft" when omitted.
    #[schema(example = "draft", value_type = String)]
    pub status: Option<PayrollStatus>,
    #[serde(default)]
    pub details: Vec<DetailInput>,
}

/// Header patch. A `details` list, when present, fully replaces the stored
/// line items.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePayroll {
    #[schema(example = 42)]
    pub staff_id: Option<i64>,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub period_start: Option<NaiveDate>,
    #[schema(example = "2026-01-31", format = "date", value_type = String)]
    pub period_end: Option<NaiveDate>,
    #[schema(example = "confirmed", value_type = String)]
    pub status: Option<PayrollStatus>,
    pub details: Option<Vec<DetailInput>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePayrollStatus {
    #[schema(example = "paid")]
    pub status: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReplaceDetails {
    pub details: Vec<DetailInput>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PayrollFilter {
    /// Filter by staff ID
    #[param(example = 42)]
    pub staff_id: Option<i64>,
    /// Filter by payroll status
    #[param(example = "draft")]
    pub status: Option<String>,
    /// Pagination page number (start with 1)
    #[param(example = 1)]
    pub page: Option<u32>,
    /// Pagination per page number
    #[param(example = 10)]
    pub limit: Option<u32>,
}

/// Header joined with staff display fields.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct PayrollWithStaff {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = 42)]
    pub staff_id: i64,
    #[schema(example = "EMP-0042")]
    pub staff_code: String,
    #[schema(example = "Jordan Smith")]
    pub staff_name: String,
    #[schema(example = "Software Engineer")]
    pub position: Option<String>,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub period_start: NaiveDate,
    #[schema(example = "2026-01-31", format = "date", value_type = String)]
    pub period_end: NaiveDate,
    #[schema(example = 2300.0)]
    pub total_salary: f64,
    #[schema(example = "draft")]
    pub status: PayrollStatus,
    #[schema(example = "2026-01-31T12:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PayrollWithDetails {
    pub payroll: PayrollWithStaff,
    pub details: Vec<PayrollDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn payroll_status_round_trips_through_snake_case() {
        assert_eq!(PayrollStatus::Confirmed.to_string(), "confirmed");
        assert_eq!(
            PayrollStatus::from_str("paid").unwrap(),
            PayrollStatus::Paid
        );
        assert!(PayrollStatus::from_str("approved").is_err());
    }

    #[test]
    fn component_type_orders_deductions_before_earnings_as_text() {
        // Detail listings sort on the stored text, so deductions come first.
        assert!(ComponentType::Deduction.to_string() < ComponentType::Earning.to_string());
    }
}
