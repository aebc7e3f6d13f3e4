use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

/// One attendance row: at most one per staff member per calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceRecord {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = 42)]
    pub staff_id: i64,
    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "09:00:00", value_type = String)]
    pub check_in: Option<NaiveTime>,
    #[schema(example = "17:30:00", value_type = String)]
    pub check_out: Option<NaiveTime>,
    /// Derived from check-in and check-out, rounded to 2 decimal places.
    #[schema(example = 8.5)]
    pub total_hours: Option<f64>,
    #[schema(example = "present")]
    pub status: AttendanceStatus,
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
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
    Late,
    SickLeave,
    AnnualLeave,
    Overtime,
}

/// Direction of a clock request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ClockType {
    CheckIn,
    CheckOut,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ClockRequest {
    #[schema(example = 42)]
    pub staff_id: i64,
    /// "check_in" or "check_out"
    #[serde(rename = "type")]
    #[schema(example = "check_in", value_type = String)]
    pub clock_type: String,
}

/// Manual correction payload. Omitted fields keep their stored value.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAttendance {
    #[schema(example = "09:00:00", value_type = String)]
    pub check_in: Option<NaiveTime>,
    #[schema(example = "17:30:00", value_type = String)]
    pub check_out: Option<NaiveTime>,
    #[schema(example = "late", value_type = String)]
    pub status: Option<AttendanceStatus>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AttendanceFilter {
    /// Filter by staff ID
    #[param(example = 42)]
    pub staff_id: Option<i64>,
    /// Exact date filter
    #[param(example = "2026-01-05", format = "date", value_type = String)]
    pub date: Option<NaiveDate>,
    /// Range start (inclusive)
    #[param(example = "2026-01-01", format = "date", value_type = String)]
    pub start_date: Option<NaiveDate>,
    /// Range end (inclusive)
    #[param(example = "2026-01-31", format = "date", value_type = String)]
    pub end_date: Option<NaiveDate>,
    /// Filter by attendance status
    #[param(example = "present")]
    pub status: Option<String>,
    /// Pagination page number (start with 1)
    #[param(example = 1)]
    pub page: Option<u32>,
    /// Pagination per page number
    #[param(example = 10)]
    pub limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ReportFilter {
    /// Limit the report to one staff member
    #[param(example = 42)]
    pub staff_id: Option<i64>,
    /// Range start (inclusive)
    #[param(example = "2026-01-01", format = "date", value_type = String)]
    pub start_date: Option<NaiveDate>,
    /// Range end (inclusive)
    #[param(example = "2026-01-31", format = "date", value_type = String)]
    pub end_date: Option<NaiveDate>,
    /// Calendar month shorthand, ignored when a date range is given
    #[param(example = "2026-01")]
    pub month: Option<String>,
}

/// Per-staff aggregate over the records matching a report filter.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceReportRow {
    #[schema(example = 42)]
    pub staff_id: i64,
    #[schema(example = "Jordan Smith")]
    pub staff_name: String,
    #[schema(example = 20)]
    pub total_records: i64,
    #[schema(example = 17)]
    pub present_days: i64,
    #[schema(example = 1)]
    pub absent_days: i64,
    #[schema(example = 1)]
    pub late_days: i64,
    #[schema(example = 1)]
    pub sick_leave_days: i64,
    #[schema(example = 0)]
    pub annual_leave_days: i64,
    #[schema(example = 0)]
    pub overtime_days: i64,
    #[schema(example = 161.5)]
    pub total_hours: f64,
    #[schema(example = 8.07)]
    pub average_hours: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_round_trips_through_snake_case() {
        assert_eq!(AttendanceStatus::SickLeave.to_string(), "sick_leave");
        assert_eq!(
            AttendanceStatus::from_str("annual_leave").unwrap(),
            AttendanceStatus::AnnualLeave
        );
        assert!(AttendanceStatus::from_str("vacation").is_err());
    }

    #[test]
    fn clock_type_parses_both_directions() {
        assert_eq!(ClockType::from_str("check_in").unwrap(), ClockType::CheckIn);
        assert_eq!(
            ClockType::from_str("check_out").unwrap(),
            ClockType::CheckOut
        );
        assert!(ClockType::from_str("lunch").is_err());
    }
}
