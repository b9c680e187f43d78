//! Reporting-hierarchy traversal.
//!
//! Precondition: the materialized tree is acyclic (the store builds it from a
//! single-parent adjacency list). A visited set guards the traversal anyway so
//! corrupt data surfaces as [`DirectoryError::CyclicHierarchy`] instead of
//! unbounded recursion.

use std::collections::HashSet;

use uuid::Uuid;

use crate::error::DirectoryError;
use crate::model::Employee;

/// Total number of direct and indirect reports under `employee`.
///
/// The subject itself is excluded from its own count: an employee with no
/// direct reports counts 0, a leaf report contributes exactly 1 to its
/// manager. Pure and deterministic over the materialized tree.
pub fn count_descendants(employee: &Employee) -> Result<usize, DirectoryError> {
    let mut seen = HashSet::new();
    seen.insert(employee.employee_id);
    let mut total = 0;
    for report in &employee.direct_reports {
        total += subtree_size(report, &mut seen)?;
    }
    Ok(total)
}

/// Size of the subtree rooted at `node`, including `node` itself.
fn subtree_size(node: &Employee, seen: &mut HashSet<Uuid>) -> Result<usize, DirectoryError> {
    if !seen.insert(node.employee_id) {
        return Err(DirectoryError::CyclicHierarchy(node.employee_id));
    }
    let mut size = 1;
    for report in &node.direct_reports {
        size += subtree_size(report, seen)?;
    }
    Ok(size)
}
