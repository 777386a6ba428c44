//! Engine: owns the resolved cost/constraint registries and configuration,
//! built once and reused across many `solve` calls: the split between
//! one-time setup and per-call execution the rest of the pipeline assumes.

use crate::adapters::{FilterProperties, Host};
use crate::builder;
use crate::config::SolverSchedulerConfig;
use crate::constraints;
use crate::contrib::{Constraint, Cost};
use crate::costs;
use crate::emitter;
use crate::error::{ConfigError, PlacementError};
use crate::solver;

pub struct Engine {
    cfg: SolverSchedulerConfig,
    costs: Vec<Box<dyn Cost>>,
    constraints: Vec<Box<dyn Constraint>>,
}

impl Engine {
    /// Resolves every configured cost/constraint name once. An unknown name
    /// fails fast here rather than on the first `solve` call.
    pub fn new(cfg: SolverSchedulerConfig) -> Result<Self, PlacementError> {
        let costs = cfg
            .solver_scheduler
            .scheduler_solver_costs
            .iter()
            .map(|name| costs::build_cost(name).ok_or_else(|| ConfigError::UnknownCost(name.clone())))
            .collect::<Result<Vec<_>, _>>()?;
        let constraints = cfg
            .solver_scheduler
            .scheduler_solver_constraints
            .iter()
            .map(|name| constraints::build_constraint(name).ok_or_else(|| ConfigError::UnknownConstraint(name.clone())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Engine { cfg, costs, constraints })
    }

    /// Places `filter_properties.num_instances` identical instances across
    /// `hosts`, returning length `num_instances` on success, an empty
    /// result when infeasible. `hosts` is mutated in place: capacity
    /// constraints publish the effective allocation cap they enforced into
    /// `host.limits`.
    pub fn solve(&self, hosts: &mut [Host], filter_properties: &FilterProperties) -> Result<Vec<(Host, String)>, PlacementError> {
        if filter_properties.num_instances == 0 {
            return Err(PlacementError::InvalidRequest("num_instances must be >= 1".to_string()));
        }
        log::debug!("solving placement for {} instances across {} hosts", filter_properties.num_instances, hosts.len());

        let built = builder::build(&self.cfg, &self.costs, &self.constraints, hosts, filter_properties);
        let result = solver::solve(built, self.cfg.solver_scheduler.pulp_solver_timeout_seconds)?;
        Ok(emitter::emit(&result.model, &result.outcome, hosts, &result.instance_identifiers))
    }
}
