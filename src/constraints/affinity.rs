//! Server group (anti-)affinity: keeps every instance from this request on
//! the same host, or scatters them across distinct hosts, relative to a
//! group's already-placed members (`server_group_affinity_constraint.py` /
//! `server_group_anti_affinity_constraint.py`). `fp.group_hosts` is the set
//! of hosts the group already occupies; this engine keeps no group
//! membership ledger of its own.

use crate::adapters::{FilterProperties, Host};
use crate::config::SolverSchedulerConfig;
use crate::contrib::{Constraint, ConstraintRow, Operator};
use crate::model::VariableModel;

fn reject_rows(vars: &VariableModel, i: usize) -> Vec<ConstraintRow> {
    (0..vars.num_slots()).map(|j| ConstraintRow::zero(vars.get(i, j))).collect()
}

/// Requires this request's `num_instances` to land on a single host: when
/// the group already has members, every host outside `group_hosts` is
/// rejected outright; when the group is empty, each host is still allowed
/// at most one "first" slot filled unless it takes every requested
/// instance, expressed as `(1-N)*X[i][0] + X[i][1] + ... + X[i][N-1] == 0`
/// (so a host either takes none, or all N, of the requested instances).
#[derive(Debug, Default)]
pub struct ServerGroupAffinityConstraint;

impl Constraint for ServerGroupAffinityConstraint {
    fn name(&self) -> &'static str {
        "ServerGroupAffinityConstraint"
    }

    fn get_components(
        &self,
        vars: &VariableModel,
        hosts: &mut [Host],
        fp: &FilterProperties,
        _cfg: &SolverSchedulerConfig,
    ) -> Vec<ConstraintRow> {
        if !fp.group_policies.iter().any(|p| p == "affinity") {
            return Vec::new();
        }
        let mut rows = Vec::new();
        if !fp.group_hosts.is_empty() {
            for (i, host) in hosts.iter().enumerate() {
                if !fp.group_hosts.iter().any(|h| h == &host.host) {
                    rows.extend(reject_rows(vars, i));
                }
            }
            return rows;
        }

        let n = vars.num_slots() as f64;
        for i in 0..vars.num_hosts() {
            let row = vars.row(i).to_vec();
            let mut coefs = vec![1.0; row.len()];
            if let Some(first) = coefs.first_mut() {
                *first = 1.0 - n;
            }
            rows.push(ConstraintRow::new(row, coefs, 0.0, Operator::Eq));
        }
        rows
    }
}

/// Spreads this request's instances across distinct hosts: hosts already in
/// `group_hosts` are rejected outright (the group already has a member
/// there), every other host may take at most one instance from this
/// request (`Sum_j X[i][j] <= 1`).
#[derive(Debug, Default)]
pub struct ServerGroupAntiAffinityConstraint;

impl Constraint for ServerGroupAntiAffinityConstraint {
    fn name(&self) -> &'static str {
        "ServerGroupAntiAffinityConstraint"
    }

    fn get_components(
        &self,
        vars: &VariableModel,
        hosts: &mut [Host],
        fp: &FilterProperties,
        _cfg: &SolverSchedulerConfig,
    ) -> Vec<ConstraintRow> {
        if !fp.group_policies.iter().any(|p| p == "anti-affinity") {
            return Vec::new();
        }
        let mut rows = Vec::new();
        for (i, host) in hosts.iter().enumerate() {
            if fp.group_hosts.iter().any(|h| h == &host.host) {
                rows.extend(reject_rows(vars, i));
            } else {
                let row = vars.row(i).to_vec();
                let coefs = vec![1.0; row.len()];
                rows.push(ConstraintRow::new(row, coefs, 1.0, Operator::Le));
            }
        }
        rows
    }
}
