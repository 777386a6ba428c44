//! Aggregate network-affinity cost: rewards hosts belonging to an
//! aggregate flagged `network_affinity` that already carries a requested
//! network (grounded in `costs/aggregate_network_affinity_cost.py`).

use std::collections::HashSet;

use crate::adapters::{FilterProperties, Host};
use crate::config::SolverSchedulerConfig;
use crate::contrib::{Cost, Term};
use crate::model::VariableModel;

const TRUTHY_TOKENS: &[&str] = &["true", "1", "yes", "y"];

fn is_truthy(value: &str) -> bool {
    TRUTHY_TOKENS.contains(&value.to_ascii_lowercase().as_str())
}

#[derive(Debug, Default)]
pub struct AggregateNetworkAffinityCost;

impl Cost for AggregateNetworkAffinityCost {
    fn name(&self) -> &'static str {
        "AggregateNetworkAffinityCost"
    }

    fn cost_multiplier(&self, cfg: &SolverSchedulerConfig) -> f64 {
        cfg.solver_scheduler.aggregate_network_affinity_cost_multiplier
    }

    fn get_components(
        &self,
        vars: &VariableModel,
        hosts: &[Host],
        fp: &FilterProperties,
        _cfg: &SolverSchedulerConfig,
    ) -> Vec<Term> {
        if fp.requested_networks.is_empty() {
            return Vec::new();
        }

        let mut terms = Vec::with_capacity(vars.num_hosts() * vars.num_slots());
        for i in 0..vars.num_hosts() {
            let mut affinity_networks: HashSet<&str> = HashSet::new();
            for aggregate in &hosts[i].aggregates {
                let flagged = aggregate
                    .metadata
                    .get("network_affinity")
                    .map(|v| is_truthy(v))
                    .unwrap_or(false);
                if let (true, Some(networks)) = (flagged, &aggregate.networks) {
                    affinity_networks.extend(networks.iter().map(String::as_str));
                }
            }
            let host_cost = -(fp
                .requested_networks
                .iter()
                .filter_map(|net| net.network_id.as_deref())
                .filter(|id| affinity_networks.contains(id))
                .count() as f64);

            for j in 0..vars.num_slots() {
                terms.push(Term { var: vars.get(i, j), coef: host_cost });
            }
        }
        terms
    }
}
