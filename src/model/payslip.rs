use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::payroll::PayrollStatus;

/// One display line on a payslip.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PayslipLine {
    #[schema(example = "Basic Salary")]
    pub name: String,
    #[schema(example = 2500.0)]
    pub amount: f64,
}

/// Fully resolved payslip for one payroll: staff identity, grouped lines,
/// derived totals and the net amount spelled out in words.
#[derive(Debug, Serialize, ToSchema)]
pub struct PayslipView {
    #[schema(example = 1)]
    pub payroll_id: i64,
    #[schema(example = 42)]
    pub staff_id: i64,
    #[schema(example = "EMP-0042")]
    pub staff_code: String,
    #[schema(example = "Jordan Smith")]
    pub staff_name: String,
    #[schema(example = "Software Engineer")]
    pub position: Option<String>,
    #[schema(example = "Engineering")]
    pub department: Option<String>,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub period_start: NaiveDate,
    #[schema(example = "2026-01-31", format = "date", value_type = String)]
    pub period_end: NaiveDate,
    #[schema(example = "confirmed")]
    pub status: PayrollStatus,
    pub earnings: Vec<PayslipLine>,
    pub deductions: Vec<PayslipLine>,
    #[schema(example = 2800.0)]
    pub total_earnings: f64,
    #[schema(example = 300.0)]
    pub total_deductions: f64,
    #[schema(example = 2500.0)]
    pub net_pay: f64,
    #[schema(example = "Two Thousand Five Hundred Dollars Only")]
    pub net_pay_in_words: String,
}
