//! Problem Builder: wires the Variable Model, every registered cost
//! and constraint, and the always-on structural rows into one assembled LP,
//! ready for the Solver Driver to submit.

use good_lp::ProblemVariables;

use crate::adapters::{FilterProperties, Host};
use crate::config::SolverSchedulerConfig;
use crate::constraints::structural;
use crate::contrib::{Constraint, ConstraintRow, Cost};
use crate::model::VariableModel;

/// Everything the Solver Driver needs: the still-unconsumed
/// `ProblemVariables` (so `.minimise(...).using(...)` can be called on it),
/// the matrix it populated, the flattened objective, the named constraint
/// rows, and the instance identifiers the Assignment Emitter will draw from.
pub struct BuiltProblem {
    pub vars: ProblemVariables,
    pub model: VariableModel,
    pub objective: Vec<(good_lp::Variable, f64)>,
    pub rows: Vec<(String, ConstraintRow)>,
    pub instance_identifiers: Vec<String>,
}

/// Scales one cost's raw coefficients into the fixed `[0, 1]` span (the
/// "normalise coefs into a bounded scale" step of the Problem Builder),
/// so that no single cost plugin can dominate the objective purely by
/// emitting coefficients on a larger native scale than its peers. Order
/// preserving: an affine min-max rescaling never changes which of a
/// cost's own cells it prefers, only the magnitude. A cost whose
/// coefficients are all equal (including the empty/single-cell case)
/// normalises to all zeros -- it has no preference among its own cells.
fn normalize_coefs(coefs: &[f64]) -> Vec<f64> {
    if coefs.is_empty() {
        return Vec::new();
    }
    let min = coefs.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = coefs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if max <= min {
        return vec![0.0; coefs.len()];
    }
    coefs.iter().map(|c| (c - min) / (max - min)).collect()
}

/// Compares the accumulated matrix's first and last column and squares
/// every coefficient around whichever of `min(first)`/`max(first)` keeps
/// the sign consistent with which column summed higher. Must
/// not be skipped: it is what makes costs whose raw coefficient grows with
/// slot index (stacking/spreading) produce a well-defined LP minimum rather
/// than ties the solver breaks arbitrarily.
fn shape_cost_matrix(matrix: &mut [Vec<f64>]) {
    if matrix.is_empty() || matrix[0].is_empty() {
        return;
    }
    let first_sum: f64 = matrix.iter().map(|row| row[0]).sum();
    let last_sum: f64 = matrix.iter().map(|row| *row.last().unwrap()).sum();
    let first_column: Vec<f64> = matrix.iter().map(|row| row[0]).collect();
    let (offset, sign) = if first_sum < last_sum {
        (first_column.iter().cloned().fold(f64::INFINITY, f64::min), 1.0)
    } else {
        (first_column.iter().cloned().fold(f64::NEG_INFINITY, f64::max), -1.0)
    };
    for row in matrix.iter_mut() {
        for cell in row.iter_mut() {
            *cell = sign * (*cell - offset).powi(2);
        }
    }
}

/// Builds the LP from a resolved set of cost/constraint plugins. Unknown
/// plugin names are rejected earlier, at `Engine::new` time: by the time
/// a `BuiltProblem` is assembled every plugin here is known to resolve.
pub fn build(
    cfg: &SolverSchedulerConfig,
    costs: &[Box<dyn Cost>],
    constraints: &[Box<dyn Constraint>],
    hosts: &mut [Host],
    fp: &FilterProperties,
) -> BuiltProblem {
    let num_hosts = hosts.len();
    let num_slots = fp.num_instances;

    let mut vars = ProblemVariables::new();
    let model = VariableModel::populate(&mut vars, num_hosts, num_slots);

    let mut cost_matrix = vec![vec![0.0_f64; num_slots]; num_hosts];
    for cost in costs {
        let multiplier = cost.cost_multiplier(cfg);
        let terms = cost.get_components(&model, hosts, fp, cfg);
        let raw_coefs: Vec<f64> = terms.iter().map(|t| t.coef).collect();
        let normalised = normalize_coefs(&raw_coefs);
        for (term, coef) in terms.iter().zip(normalised) {
            if let Some((i, j)) = model.index_of(term.var) {
                cost_matrix[i][j] += coef * multiplier;
            }
        }
    }
    shape_cost_matrix(&mut cost_matrix);

    let objective: Vec<(good_lp::Variable, f64)> =
        model.iter_cells().map(|(i, j, var)| (var, cost_matrix[i][j])).collect();

    let mut rows = Vec::new();
    for constraint in constraints {
        let class_name = constraint.name();
        for (k, row) in constraint.get_components(&model, hosts, fp, cfg).into_iter().enumerate() {
            rows.push((format!("Constraint_{class_name}_{k}"), row));
        }
    }
    for (k, row) in structural::assignment_rows(&model).into_iter().enumerate() {
        rows.push((format!("Constraint_Assignment_{k}"), row));
    }
    for (k, row) in structural::row_monotonicity_rows(&model).into_iter().enumerate() {
        rows.push((format!("Constraint_RowMonotonicity_{k}"), row));
    }

    BuiltProblem { vars, model, objective, rows, instance_identifiers: fp.instance_identifiers() }
}
