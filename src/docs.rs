use utoipa::OpenApi;

use crate::model::attendance::{
    AttendanceRecord, AttendanceReportRow, AttendanceStatus, ClockRequest, UpdateAttendance,
};
use crate::model::payroll::{
    ComponentType, CreatePayroll, DetailInput, Payroll, PayrollDetail, PayrollStatus,
    PayrollWithDetails, PayrollWithStaff, ReplaceDetails, UpdatePayroll, UpdatePayrollStatus,
};
use crate::model::payslip::{PayslipLine, PayslipView};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payclock API",
        version = "1.0.0",
        description = r#"
## Attendance Clock & Payroll API

Back end for daily attendance tracking and payroll administration.

### 🔹 Key Features
- **Attendance Tracking**
  - Daily check-in and check-out with derived worked hours
  - Manual corrections, filtered listings and aggregate reports
- **Payroll Management**
  - Payroll headers with itemized earning/deduction components
  - Totals derived from the components, never hand-entered
- **Payslips**
  - Resolved payslip views with amounts spelled out in words
  - Downloadable payslip documents

### 📦 Response Format
Every JSON endpoint answers with the same envelope:
`{ "success": bool, "message": string, "data": ..., "error": ... }`.
Pagination is supported on list endpoints via `page` and `limit`.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::clock,
        crate::api::attendance::list_attendance,
        crate::api::attendance::staff_attendance,
        crate::api::attendance::attendance_report,
        crate::api::attendance::update_attendance,
        crate::api::attendance::delete_attendance,

        crate::api::payroll::create_payroll,
        crate::api::payroll::list_payrolls,
        crate::api::payroll::get_payroll,
        crate::api::payroll::update_payroll,
        crate::api::payroll::replace_payroll_details,
        crate::api::payroll::update_payroll_status,
        crate::api::payroll::delete_payroll,
        crate::api::payroll::staff_payrolls,

        crate::api::payslip::get_payslip,
        crate::api::payslip::download_payslip,
        crate::api::payslip::staff_payslips
    ),
    components(
        schemas(
            AttendanceRecord,
            AttendanceStatus,
            AttendanceReportRow,
            ClockRequest,
            UpdateAttendance,
            Payroll,
            PayrollStatus,
            PayrollDetail,
            ComponentType,
            DetailInput,
            CreatePayroll,
            UpdatePayroll,
            UpdatePayrollStatus,
            ReplaceDetails,
            PayrollWithStaff,
            PayrollWithDetails,
            PayslipLine,
            PayslipView
        )
    ),
    tags(
        (name = "Attendance", description = "Attendance clock and reporting APIs"),
        (name = "Payroll", description = "Payroll management APIs"),
        (name = "Payslip", description = "Payslip view and download APIs"),
    )
)]
pub struct ApiDoc;
