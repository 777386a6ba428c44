//! IP-distance cost: prefers hosts whose IP is "close" (by a folded octet
//! distance, not real network topology) to the hosts backing a set of
//! referenced volumes (grounded in `costs/ip_distance_cost.py`).

use crate::adapters::{FilterProperties, Host};
use crate::config::SolverSchedulerConfig;
use crate::contrib::{Cost, Term};
use crate::model::VariableModel;

/// Signed fold of the four octet differences between two dotted-quad IPs,
/// taken as an absolute value: the "IP distance" from the source this is
/// modeled on.
fn ip_distance(a: &str, b: &str) -> Option<i64> {
    let parse = |ip: &str| -> Option<[i64; 4]> {
        let mut octets = [0i64; 4];
        let parts: Vec<&str> = ip.split('.').collect();
        if parts.len() != 4 {
            return None;
        }
        for (slot, part) in octets.iter_mut().zip(parts) {
            *slot = part.parse().ok()?;
        }
        Some(octets)
    };
    let a = parse(a)?;
    let b = parse(b)?;
    let folded = ((((a[0] - b[0]) * 256 - (a[1] - b[1])) * 256 - (a[2] - b[2])) * 256) - (a[3] - b[3]);
    Some(folded.abs())
}

#[derive(Debug, Default)]
pub struct IpDistanceCost;

impl Cost for IpDistanceCost {
    fn name(&self) -> &'static str {
        "IpDistanceCost"
    }

    fn cost_multiplier(&self, cfg: &SolverSchedulerConfig) -> f64 {
        cfg.solver_scheduler.ip_distance_cost_multiplier
    }

    fn get_components(
        &self,
        vars: &VariableModel,
        hosts: &[Host],
        fp: &FilterProperties,
        _cfg: &SolverSchedulerConfig,
    ) -> Vec<Term> {
        let volume_ips = &fp.scheduler_hints.ip_distance_cost_volume_host_ips;
        if volume_ips.is_empty() {
            return Vec::new();
        }

        let mut terms = Vec::with_capacity(vars.num_hosts() * vars.num_slots());
        for i in 0..vars.num_hosts() {
            let mut distance_sum = 0.0;
            let mut distance_prod = 1.0;
            for volume_ip in volume_ips {
                match ip_distance(&hosts[i].host_ip, volume_ip) {
                    Some(d) => {
                        distance_sum += d as f64;
                        distance_prod *= d as f64;
                    }
                    None => {
                        log::warn!("IpDistanceCost: could not parse IP '{}' or '{}'", hosts[i].host_ip, volume_ip);
                    }
                }
            }
            let coef = distance_sum + distance_prod;
            for j in 0..vars.num_slots() {
                terms.push(Term { var: vars.get(i, j), coef });
            }
        }
        terms
    }
}
