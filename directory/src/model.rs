use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An employee with its materialized reporting subtree.
///
/// `direct_reports` is already loaded by the store before the core ever sees
/// it; a flat view of an employee simply carries an empty list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub employee_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub department: String,
    #[serde(default)]
    pub direct_reports: Vec<Employee>,
}

/// Computed view: the subject employee plus its total transitive report
/// count. Never persisted.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingStructure {
    pub employee: Employee,
    pub number_of_reports: usize,
}

/// A persisted compensation record as returned to clients. The embedded
/// employee is the flat view (reports normalized to empty).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compensation {
    pub compensation_id: Uuid,
    pub employee: Employee,
    pub salary: f64,
    pub effective_date: NaiveDate,
}

/// Salary travels as a JSON number but is stored as integer cents. Values
/// whose cents do not fit an `i64` (or are not finite) yield `None` rather
/// than saturating on the cast and reading back a different amount.
pub fn salary_to_cents(salary: f64) -> Option<i64> {
    let cents = (salary * 100.0).round();
    // i64::MIN and i64::MAX as f64 are exactly ±2^63; everything at or above
    // the top bound is unrepresentable.
    if !cents.is_finite() || cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
        return None;
    }
    Some(cents as i64)
}

pub fn cents_to_salary(cents: i64) -> f64 {
    cents as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salary_round_trips_through_cents() {
        assert_eq!(salary_to_cents(85_000.50), Some(8_500_050));
        assert_eq!(cents_to_salary(8_500_050), 85_000.50);
        assert_eq!(salary_to_cents(0.0), Some(0));
        assert_eq!(salary_to_cents(-0.01), Some(-1));
    }

    #[test]
    fn unrepresentable_salaries_are_refused_not_saturated() {
        assert_eq!(salary_to_cents(1e17), None);
        assert_eq!(salary_to_cents(-1e17), None);
        assert_eq!(salary_to_cents(f64::INFINITY), None);
        assert_eq!(salary_to_cents(f64::NAN), None);
        // The largest representable cents value still converts.
        assert!(salary_to_cents(9.0e16).is_some());
    }

    #[test]
    fn employee_serializes_with_camel_case_names() {
        let employee = Employee {
            employee_id: Uuid::nil(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            position: "Engineer".into(),
            department: "Engineering".into(),
            direct_reports: Vec::new(),
        };
        let json = serde_json::to_value(&employee).unwrap();
        assert!(json.get("employeeId").is_some());
        assert!(json.get("firstName").is_some());
        assert_eq!(json["directReports"], serde_json::json!([]));
    }
}
