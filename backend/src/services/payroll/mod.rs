//! # Payroll Read Service Module
//!
//! Read-only endpoints the payslip builder binds its preview against: the
//! employee directory and the monthly payslip snapshots produced elsewhere
//! by the payroll run.
//!
//! ## Sub-modules:
//! - `employees`: Lists the employee directory for the preview picker.
//! - `payslip`: Returns one employee's payslip snapshot for a month.

mod employees;
pub mod payslip;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/api";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/hr/employees", get().to(employees::process))
        .route("/payroll/payslips/{employee_id}", get().to(payslip::process))
}
