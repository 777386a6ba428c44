//! Variable Model: the decision matrix X and the synthetic key scheme that
//! lets the Solver Driver decode an LP solution back into host/slot pairs
//! without carrying a parallel (i, j) index everywhere by hand. A flat `Vec`
//! of values addressed through small index types, populated once per call
//! and discarded at the end of it.

use std::collections::HashMap;

use good_lp::{variable, ProblemVariables, Variable};

/// Synthetic, stable key for a host: `Host<i>`.
pub fn host_key(i: usize) -> String {
    format!("Host{i}")
}

/// Synthetic, stable key for the j-th requested instance slot:
/// `InstanceNum<j>`.
pub fn slot_key(j: usize) -> String {
    format!("InstanceNum{j}")
}

/// The variable naming convention the Problem Builder and Solver Driver
/// agree on: `HI_<host_key>_<slot_key>`. Kept for diagnostic output and
/// for parity with the source this engine is modeled on; decoding a
/// solution does *not* reparse these strings (see `VariableModel::host_of`
/// / `VariableModel::slot_of`), it walks the direct (i, j) table instead.
pub fn variable_name(i: usize, j: usize) -> String {
    format!("HI_{}_{}", host_key(i), slot_key(j))
}

/// Owns the |hosts| x N matrix of 0/1 decision variables `X[i][j]`:
/// "the j-th requested instance is placed on host i".
pub struct VariableModel {
    num_hosts: usize,
    num_slots: usize,
    matrix: Vec<Vec<Variable>>,
    index: HashMap<Variable, (usize, usize)>,
}

impl VariableModel {
    /// Allocates `num_hosts * num_slots` binary variables into `vars` and
    /// gives each a stable, parseable name. This is the only place new LP
    /// variables for the host/instance matrix are created.
    pub fn populate(vars: &mut ProblemVariables, num_hosts: usize, num_slots: usize) -> Self {
        let mut matrix = Vec::with_capacity(num_hosts);
        let mut index = HashMap::with_capacity(num_hosts * num_slots);
        for i in 0..num_hosts {
            let mut row = Vec::with_capacity(num_slots);
            for j in 0..num_slots {
                let var = vars.add(variable().binary().name(variable_name(i, j)));
                index.insert(var, (i, j));
                row.push(var);
            }
            matrix.push(row);
        }
        VariableModel { num_hosts, num_slots, matrix, index }
    }

    pub fn num_hosts(&self) -> usize {
        self.num_hosts
    }

    pub fn num_slots(&self) -> usize {
        self.num_slots
    }

    /// The decision variable for host `i`, slot `j`.
    pub fn get(&self, i: usize, j: usize) -> Variable {
        self.matrix[i][j]
    }

    /// All slot variables for host `i`, in slot order.
    pub fn row(&self, i: usize) -> &[Variable] {
        &self.matrix[i]
    }

    /// The `(host, slot)` a decision variable was allocated for. Built once
    /// at `populate` time, not by reparsing `variable_name` strings (see the
    /// module doc): the Problem Builder needs this to fold a cost's
    /// `Term`s back into the |hosts|×N coefficient matrix.
    pub fn index_of(&self, var: Variable) -> Option<(usize, usize)> {
        self.index.get(&var).copied()
    }

    /// Iterates over every `(i, j, variable)` triple in row-major order,
    /// the stable ordering the Problem Builder and cost-shaping step rely
    /// on for deterministic tie-breaking.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Variable)> + '_ {
        (0..self.num_hosts).flat_map(move |i| (0..self.num_slots).map(move |j| (i, j, self.matrix[i][j])))
    }
}
