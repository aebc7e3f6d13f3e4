//! Domain services: the attendance tracker, the payroll engine and the
//! payslip composer. Each owns a pool handle and exposes async operations
//! returning [`crate::error::AppResult`].

pub mod attendance;
pub mod payroll;
pub mod payslip;
pub mod render;
pub mod words;

pub use attendance::AttendanceTracker;
pub use payroll::PayrollEngine;
pub use payslip::PayslipComposer;

/// Money and hour values are stored rounded to 2 decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
