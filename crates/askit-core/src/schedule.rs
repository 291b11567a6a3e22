//! Topological scheduling of form fields.

use std::collections::BTreeSet;

use crate::error::DependencyError;
use crate::graph::DependencyGraph;

/// Order the fields of `graph` so that every field comes after the fields
/// its skip condition reads.
///
/// Kahn's algorithm with the ready set ordered by declaration index: among
/// the fields whose dependencies are all scheduled, the one declared first
/// goes next. Fields without dependencies therefore keep their declared
/// order, and the result is the same on every call.
///
/// # Errors
///
/// Returns [`DependencyError`] naming every field that could not be
/// scheduled when the graph contains a cycle (including a field whose
/// condition reads its own answer).
pub fn schedule(graph: &DependencyGraph) -> Result<Vec<usize>, DependencyError> {
    let n = graph.len();
    let mut pending: Vec<usize> = (0..n).map(|i| graph.dependencies(i).count()).collect();
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];
    for index in 0..n {
        for dep in graph.dependencies(index) {
            dependents[dep].push(index);
        }
    }

    let mut ready: BTreeSet<usize> = (0..n).filter(|&i| pending[i] == 0).collect();
    let mut order = Vec::with_capacity(n);

    while let Some(index) = ready.pop_first() {
        order.push(index);
        for &dependent in &dependents[index] {
            pending[dependent] -= 1;
            if pending[dependent] == 0 {
                ready.insert(dependent);
            }
        }
    }

    if order.len() != n {
        let unresolved = (0..n)
            .filter(|&i| pending[i] > 0)
            .filter_map(|i| graph.key(i).map(str::to_string))
            .collect();
        return Err(DependencyError { unresolved });
    }

    Ok(order)
}

/// Like [`schedule`], but yields field keys.
pub fn execution_order(graph: &DependencyGraph) -> Result<Vec<String>, DependencyError> {
    Ok(schedule(graph)?
        .into_iter()
        .filter_map(|i| graph.key(i).map(str::to_string))
        .collect())
}
