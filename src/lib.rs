//! Attendance clock and payroll/payslip back end.
//!
//! The library exposes three services over one SQLite pool:
//! [`core::AttendanceTracker`], [`core::PayrollEngine`] and
//! [`core::PayslipComposer`], plus the Actix route tree in [`routes`].

pub mod api;
pub mod config;
pub mod core;
pub mod db;
pub mod docs;
pub mod error;
pub mod model;
pub mod response;
pub mod routes;
