//! The two always-on constraints that define the decision problem itself
//! rather than any domain policy.
//! The Problem Builder appends these unconditionally; they are never
//! resolved through the constraint registry and configuration cannot turn
//! them off (grounded in `non_trivial_solution_constraint.py` and
//! `valid_solution_constraint.py`, whose optionality this crate
//! deliberately removes).

use crate::contrib::{ConstraintRow, Operator};
use crate::model::VariableModel;

/// `Sum_i X[i][j] == 1` for every slot `j`: each requested instance is
/// placed on exactly one host.
pub fn assignment_rows(vars: &VariableModel) -> Vec<ConstraintRow> {
    (0..vars.num_slots())
        .map(|j| {
            let column: Vec<_> = (0..vars.num_hosts()).map(|i| vars.get(i, j)).collect();
            let coefs = vec![1.0; column.len()];
            ConstraintRow::new(column, coefs, 1.0, Operator::Eq)
        })
        .collect()
}

/// `X[i][j] - X[i][j+1] >= 0` for every host `i` and `j < N-1`: filled
/// slots on a host are always the low-indexed ones, breaking the symmetry
/// between equivalent requested instances.
pub fn row_monotonicity_rows(vars: &VariableModel) -> Vec<ConstraintRow> {
    let mut rows = Vec::new();
    if vars.num_slots() <= 1 {
        return rows;
    }
    for i in 0..vars.num_hosts() {
        for j in 0..(vars.num_slots() - 1) {
            rows.push(ConstraintRow::new(
                vec![vars.get(i, j), vars.get(i, j + 1)],
                vec![1.0, -1.0],
                0.0,
                Operator::Ge,
            ));
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use good_lp::ProblemVariables;

    #[test]
    fn assignment_has_one_row_per_slot() {
        let mut vars = ProblemVariables::new();
        let model = VariableModel::populate(&mut vars, 3, 2);
        let rows = assignment_rows(&model);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].vars.len(), 3);
        assert_eq!(rows[0].constant, 1.0);
    }

    #[test]
    fn row_monotonicity_has_hosts_times_slots_minus_one_rows() {
        let mut vars = ProblemVariables::new();
        let model = VariableModel::populate(&mut vars, 3, 4);
        let rows = row_monotonicity_rows(&model);
        assert_eq!(rows.len(), 3 * 3);
    }

    #[test]
    fn single_slot_has_no_monotonicity_rows() {
        let mut vars = ProblemVariables::new();
        let model = VariableModel::populate(&mut vars, 3, 1);
        assert!(row_monotonicity_rows(&model).is_empty());
    }
}
