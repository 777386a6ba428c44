//! Configuration for the `solver_scheduler` group, loaded from a TOML file.
//! No global mutable state: a `SolverSchedulerConfig` is a plain value
//! threaded through `Engine::new` and `solve`.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSchedulerConfig {
    pub solver_scheduler: SolverSchedulerSection,
    pub metrics: MetricsSection,
}

impl Default for SolverSchedulerConfig {
    fn default() -> Self {
        SolverSchedulerConfig {
            solver_scheduler: SolverSchedulerSection::default(),
            metrics: MetricsSection::default(),
        }
    }
}

impl SolverSchedulerConfig {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSchedulerSection {
    pub scheduler_solver_costs: Vec<String>,
    pub scheduler_solver_constraints: Vec<String>,
    pub pulp_solver_timeout_seconds: u64,

    pub ram_cost_multiplier: f64,
    pub metrics_cost_multiplier: f64,
    pub aggregate_network_affinity_cost_multiplier: f64,
    pub ip_distance_cost_multiplier: f64,

    pub ram_allocation_ratio: f64,
    pub disk_allocation_ratio: f64,
    pub cpu_allocation_ratio: f64,
    pub max_instances_per_host: i64,
    pub max_networks_per_rack: i64,

    pub isolated_hosts: Vec<String>,
    pub isolated_images: Vec<String>,
    pub restrict_isolated_hosts_to_isolated_images: bool,
}

impl Default for SolverSchedulerSection {
    fn default() -> Self {
        SolverSchedulerSection {
            scheduler_solver_costs: vec!["RamCost".to_string()],
            scheduler_solver_constraints: vec!["ActiveHostsConstraint".to_string()],
            pulp_solver_timeout_seconds: 20,
            ram_cost_multiplier: 1.0,
            metrics_cost_multiplier: -1.0,
            aggregate_network_affinity_cost_multiplier: 1.0,
            ip_distance_cost_multiplier: 1.0,
            ram_allocation_ratio: 1.0,
            disk_allocation_ratio: 1.0,
            cpu_allocation_ratio: 1.0,
            max_instances_per_host: 50,
            max_networks_per_rack: 1000,
            isolated_hosts: Vec::new(),
            isolated_images: Vec::new(),
            restrict_isolated_hosts_to_isolated_images: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsSection {
    /// Raw "name1=ratio1,name2=ratio2" setting, parsed by MetricsCost.
    pub weight_setting: String,
    pub weight_multiplier_of_unavailable: f64,
}

impl Default for MetricsSection {
    fn default() -> Self {
        MetricsSection {
            weight_setting: String::new(),
            weight_multiplier_of_unavailable: -1.0,
        }
    }
}

/// Parses a `"name1=1.0,name2=-1.0"` setting into `(name, ratio)` pairs.
/// Unparseable pairs are dropped with a warning; a malformed pair never
/// aborts the whole parse (mirrors `nova.scheduler.utils.parse_options`).
pub fn parse_weight_setting(setting: &str) -> Vec<(String, f64)> {
    let mut pairs = Vec::new();
    for entry in setting.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        match entry.split_once('=') {
            Some((name, ratio)) => match ratio.trim().parse::<f64>() {
                Ok(ratio) => pairs.push((name.trim().to_string(), ratio)),
                Err(_) => {
                    log::warn!("metrics.weight_setting: could not parse ratio in '{entry}', skipping");
                }
            },
            None => {
                log::warn!("metrics.weight_setting: malformed entry '{entry}', skipping");
            }
        }
    }
    pairs
}
