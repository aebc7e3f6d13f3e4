//! Rows, request payloads and filter types for the HTTP surface and the
//! domain services.

pub mod attendance;
pub mod payroll;
pub mod payslip;
pub mod staff;
