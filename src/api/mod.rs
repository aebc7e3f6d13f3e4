//! HTTP handlers. Thin adapters: parse, call the service, wrap the result
//! in the response envelope.

pub mod attendance;
pub mod payroll;
pub mod payslip;
