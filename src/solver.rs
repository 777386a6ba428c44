//! Solver Driver: submits the assembled ILP to `good_lp`'s `highs`
//! backend under a wall-clock ceiling and interprets Optimal / Infeasible /
//! anything-else into the three outcomes the rest of the crate expects.

use good_lp::{Expression, ResolutionError, Solution, SolverModel};

use crate::builder::BuiltProblem;
use crate::contrib::{ConstraintRow, Operator};
use crate::error::PlacementError;
use crate::model::VariableModel;

fn row_to_expression(row: &ConstraintRow) -> Expression {
    let mut expr = Expression::from(0.0);
    for (var, coef) in row.vars.iter().zip(&row.coefs) {
        expr += *coef * *var;
    }
    expr
}

fn row_to_constraint(row: &ConstraintRow) -> good_lp::Constraint {
    let expr = row_to_expression(row);
    match row.op {
        Operator::Eq => expr.eq(row.constant),
        Operator::Le | Operator::Lt => expr.leq(row.constant),
        Operator::Ge | Operator::Gt => expr.geq(row.constant),
        Operator::NotEq => unreachable!("NotEq constraints are never emitted by this crate's plugins"),
    }
}

/// What the LP solver concluded: either the optimal 0/1 assignment (host,
/// slot) -> selected, or that no feasible assignment exists.
pub enum SolveOutcome {
    Optimal(Vec<Vec<bool>>),
    Infeasible,
}

/// Everything the Assignment Emitter needs after a solve: the outcome, the
/// variable model it was decoded against, and the instance identifiers to
/// draw from.
pub struct SolveResult {
    pub outcome: SolveOutcome,
    pub model: VariableModel,
    pub instance_identifiers: Vec<String>,
}

/// Submits `built` to `highs` with a `timeout_seconds` wall-clock ceiling
/// and interprets the result. Any status besides Optimal/Infeasible
/// becomes `PlacementError::SolverFailure`.
pub fn solve(built: BuiltProblem, timeout_seconds: u64) -> Result<SolveResult, PlacementError> {
    let BuiltProblem { vars, model, objective, rows, instance_identifiers } = built;

    let mut objective_expr = Expression::from(0.0);
    for (var, coef) in &objective {
        objective_expr += *coef * *var;
    }

    let mut problem = vars.minimise(objective_expr).using(good_lp::highs);
    problem.set_time_limit(timeout_seconds as f64);
    for (name, row) in &rows {
        log::debug!("adding {name}: {} vars, op {:?}, constant {}", row.vars.len(), row.op, row.constant);
        problem = problem.with(row_to_constraint(row));
    }

    match problem.solve() {
        Ok(solution) => {
            let mut selected = vec![vec![false; model.num_slots()]; model.num_hosts()];
            for (i, j, var) in model.iter_cells() {
                selected[i][j] = solution.value(var) > 0.5;
            }
            Ok(SolveResult { outcome: SolveOutcome::Optimal(selected), model, instance_identifiers })
        }
        Err(ResolutionError::Infeasible) => {
            log::warn!("solver did not find an optimal solution! reason: Infeasible");
            Ok(SolveResult { outcome: SolveOutcome::Infeasible, model, instance_identifiers })
        }
        Err(other) => {
            let status = format!("{other:?}");
            log::warn!("solver did not find an optimal solution! reason: {status}");
            Err(PlacementError::SolverFailure { status })
        }
    }
}
