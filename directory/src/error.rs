use thiserror::Error;
use uuid::Uuid;

use crate::validate::MIN_EFFECTIVE_YEAR;

/// Closed set of domain validation failures.
///
/// The message text of each variant is part of the service contract: the HTTP
/// layer returns it verbatim as the response body, so wording changes here are
/// wire-visible.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("Employee id must not be null or empty")]
    MissingId,
    #[error("Employee id must be in the form of a GUID")]
    MalformedId,
    #[error("Employee with id {0} does not exist")]
    EmployeeNotFound(String),
    #[error("Employee must not be null")]
    MissingEmployee,
    #[error("Effective date cannot be earlier than {}.", MIN_EFFECTIVE_YEAR + 1)]
    EffectiveDateTooEarly,
    #[error("Salary cannot be negative")]
    NegativeSalary,
    #[error("Salary exceeds the representable range")]
    SalaryOutOfRange,
    /// The reports relation is acyclic by construction of the store; hitting
    /// this means the materialized tree repeated an employee id.
    #[error("reporting hierarchy contains a cycle at employee {0}")]
    CyclicHierarchy(Uuid),
}
