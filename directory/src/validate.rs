//! Admission rules for employee references and compensation records.
//!
//! Each rule set is an ordered, short-circuiting chain: the first failing
//! check wins and later checks are never evaluated. The order is part of the
//! contract (an empty id must report `MissingId`, not `MalformedId`, even
//! though an empty string is also not a valid GUID).

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::DirectoryError;
use crate::model::{salary_to_cents, Employee};

/// Effective dates in or before this year are rejected.
pub const MIN_EFFECTIVE_YEAR: i32 = 1950;

/// A proposed compensation record as supplied by a client, before any
/// validation. All fields are optional at the wire level; the admission chain
/// decides what absence means for each of them.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompensationDraft {
    pub employee: Option<EmployeeRef>,
    pub salary: Option<f64>,
    pub effective_date: Option<NaiveDate>,
}

/// Reference to an existing employee by raw (unvalidated) identifier.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeRef {
    pub employee_id: Option<String>,
}

/// A draft that has passed every admission check, reduced to the values the
/// store persists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdmittedCompensation {
    pub salary_cents: i64,
    pub effective_date: NaiveDate,
}

/// Identifier gate, applied in this exact order at every call site:
/// empty → `MissingId`, then non-UUID → `MalformedId`.
pub fn validate_employee_id(raw: &str) -> Result<Uuid, DirectoryError> {
    if raw.is_empty() {
        return Err(DirectoryError::MissingId);
    }
    Uuid::try_parse(raw).map_err(|_| DirectoryError::MalformedId)
}

/// Existence gate: turns the store's lookup outcome into the resolved
/// employee or `EmployeeNotFound` carrying the raw id as supplied.
pub fn require_employee(
    raw_id: &str,
    found: Option<Employee>,
) -> Result<Employee, DirectoryError> {
    found.ok_or_else(|| DirectoryError::EmployeeNotFound(raw_id.to_string()))
}

type Check = fn(&CompensationDraft) -> Option<DirectoryError>;

/// Checks that run before the employee lookup.
const PRE_LOOKUP_CHECKS: &[Check] = &[employee_present];

/// Checks that run after the employee resolved, still in contract order.
const DOMAIN_CHECKS: &[Check] = &[effective_date_in_range, salary_non_negative];

fn employee_present(draft: &CompensationDraft) -> Option<DirectoryError> {
    draft.employee.is_none().then_some(DirectoryError::MissingEmployee)
}

fn effective_date_in_range(draft: &CompensationDraft) -> Option<DirectoryError> {
    match draft.effective_date {
        // An unset date is the sentinel minimum and fails the same bound.
        None => Some(DirectoryError::EffectiveDateTooEarly),
        Some(date) if date.year() <= MIN_EFFECTIVE_YEAR => {
            Some(DirectoryError::EffectiveDateTooEarly)
        }
        Some(_) => None,
    }
}

fn salary_non_negative(draft: &CompensationDraft) -> Option<DirectoryError> {
    match draft.salary {
        Some(salary) if salary < 0.0 => Some(DirectoryError::NegativeSalary),
        // Unset salary is treated as 0, which is acceptable.
        _ => None,
    }
}

fn run_checks(draft: &CompensationDraft, checks: &[Check]) -> Result<(), DirectoryError> {
    for check in checks {
        if let Some(err) = check(draft) {
            return Err(err);
        }
    }
    Ok(())
}

/// Structural screening before the store is consulted: the employee reference
/// must be present and its id must pass the identifier gate. Returns the raw
/// id (for not-found interpolation) alongside the parsed one.
pub fn screen_compensation(
    draft: &CompensationDraft,
) -> Result<(&str, Uuid), DirectoryError> {
    run_checks(draft, PRE_LOOKUP_CHECKS)?;
    let raw = draft
        .employee
        .as_ref()
        .and_then(|employee| employee.employee_id.as_deref())
        .unwrap_or("");
    let id = validate_employee_id(raw)?;
    Ok((raw, id))
}

/// Domain checks applied once the referenced employee is known to exist.
/// On success, yields the values ready for persistence.
pub fn admit_compensation(
    draft: &CompensationDraft,
) -> Result<AdmittedCompensation, DirectoryError> {
    run_checks(draft, DOMAIN_CHECKS)?;
    let effective_date = draft
        .effective_date
        .ok_or(DirectoryError::EffectiveDateTooEarly)?;
    let salary_cents = salary_to_cents(draft.salary.unwrap_or(0.0))
        .ok_or(DirectoryError::SalaryOutOfRange)?;
    Ok(AdmittedCompensation {
        salary_cents,
        effective_date,
    })
}
