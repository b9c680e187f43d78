//! Domain core for the employee directory.
//!
//! Everything in this crate is pure and I/O-free: the reporting-hierarchy
//! counter, the employee identifier/existence gate, and the ordered admission
//! chain for compensation records. Persistence and transport live in the
//! `platform-db` and `server` crates and hand fully materialized data in.

pub mod error;
pub mod hierarchy;
pub mod model;
pub mod validate;

pub use error::DirectoryError;
pub use hierarchy::count_descendants;
pub use model::{
    cents_to_salary, salary_to_cents, Compensation, Employee, ReportingStructure,
};
pub use validate::{
    admit_compensation, require_employee, screen_compensation, validate_employee_id,
    AdmittedCompensation, CompensationDraft, EmployeeRef, MIN_EFFECTIVE_YEAR,
};
