//! Metrics cost: weighs hosts by a configured linear combination of their
//! reported metrics, with a penalty substituted for hosts missing a
//! configured metric (grounded in `costs/metrics_cost.py`).

use crate::adapters::{FilterProperties, Host};
use crate::config::{parse_weight_setting, SolverSchedulerConfig};
use crate::contrib::{Cost, Term};
use crate::model::VariableModel;

#[derive(Debug, Default)]
pub struct MetricsCost;

impl MetricsCost {
    fn host_weight(host: &Host, setting: &[(String, f64)]) -> Option<f64> {
        let mut sum = 0.0;
        for (name, ratio) in setting {
            match host.metrics.get(name) {
                Some(metric) => sum += metric.value * ratio,
                None => return None,
            }
        }
        Some(sum)
    }
}

impl Cost for MetricsCost {
    fn name(&self) -> &'static str {
        "MetricsCost"
    }

    fn cost_multiplier(&self, cfg: &SolverSchedulerConfig) -> f64 {
        cfg.solver_scheduler.metrics_cost_multiplier
    }

    fn get_components(
        &self,
        vars: &VariableModel,
        hosts: &[Host],
        _fp: &FilterProperties,
        cfg: &SolverSchedulerConfig,
    ) -> Vec<Term> {
        let setting = parse_weight_setting(&cfg.metrics.weight_setting);
        self.components_with_setting(vars, hosts, &setting, cfg.metrics.weight_multiplier_of_unavailable)
    }
}

impl MetricsCost {
    /// Split out from `get_components` so the unavailable-metric
    /// substitution rule can be unit tested independently of threading the
    /// whole config object through. `get_components` itself is wired up
    /// by the registry with the real configured setting (see
    /// `crate::costs::build_cost`).
    pub fn components_with_setting(
        &self,
        vars: &VariableModel,
        hosts: &[Host],
        setting: &[(String, f64)],
        weight_multiplier_of_unavailable: f64,
    ) -> Vec<Term> {
        if setting.is_empty() {
            return Vec::new();
        }

        let host_weights: Vec<Option<f64>> = hosts.iter().map(|h| Self::host_weight(h, setting)).collect();
        let defined: Vec<f64> = host_weights.iter().filter_map(|w| *w).collect();

        let resolved: Vec<f64> = if defined.is_empty() {
            vec![0.0; hosts.len()]
        } else {
            let minw = defined.iter().cloned().fold(f64::INFINITY, f64::min);
            let maxw = defined.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let unavailable_weight = minw - (maxw - minw) * weight_multiplier_of_unavailable;
            host_weights.iter().map(|w| w.unwrap_or(unavailable_weight)).collect()
        };

        let mut terms = Vec::with_capacity(vars.num_hosts() * vars.num_slots());
        for i in 0..vars.num_hosts() {
            for j in 0..vars.num_slots() {
                terms.push(Term { var: vars.get(i, j), coef: resolved[i] });
            }
        }
        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use good_lp::ProblemVariables;
    use std::collections::HashMap;

    fn host_with_metric(name: Option<(&str, f64)>) -> Host {
        let mut metrics = HashMap::new();
        if let Some((n, v)) = name {
            metrics.insert(n.to_string(), crate::adapters::host::Metric { value: v });
        }
        Host {
            host: "h".into(),
            node: "n".into(),
            host_ip: "10.0.0.1".into(),
            service_active: true,
            service_disabled: false,
            free_ram_mb: 0,
            total_usable_ram_mb: 0,
            free_disk_mb: 0,
            total_usable_disk_gb: 0,
            vcpus_total: 0,
            vcpus_used: 0,
            num_instances: 0,
            pci_stats: Default::default(),
            aggregates: vec![],
            metrics,
            supported_instances: vec![],
            capabilities: HashMap::new(),
            hypervisor_version: 0,
            current_instance_type_id: None,
            trust_level: None,
            image_ref: None,
            limits: Default::default(),
        }
    }

    #[test]
    fn missing_metric_gets_penalized_relative_to_defined_hosts() {
        let mut vars = ProblemVariables::new();
        let model = VariableModel::populate(&mut vars, 3, 1);
        let hosts = vec![
            host_with_metric(Some(("cpu.percent", 10.0))),
            host_with_metric(Some(("cpu.percent", 30.0))),
            host_with_metric(None),
        ];
        let setting = vec![("cpu.percent".to_string(), 1.0)];
        let terms = MetricsCost.components_with_setting(&model, &hosts, &setting, -1.0);
        // host0 -> 10, host1 -> 30, host2 missing -> minw - (maxw-minw)*(-1) = 10 + 20 = 30
        assert_eq!(terms[0].coef, 10.0);
        assert_eq!(terms[1].coef, 30.0);
        assert_eq!(terms[2].coef, 30.0);
    }

    #[test]
    fn no_host_has_a_defined_weight_everything_is_zero() {
        let mut vars = ProblemVariables::new();
        let model = VariableModel::populate(&mut vars, 2, 1);
        let hosts = vec![host_with_metric(None), host_with_metric(None)];
        let setting = vec![("cpu.percent".to_string(), 1.0)];
        let terms = MetricsCost.components_with_setting(&model, &hosts, &setting, -1.0);
        assert!(terms.iter().all(|t| t.coef == 0.0));
    }

    #[test]
    fn empty_setting_contributes_nothing() {
        let mut vars = ProblemVariables::new();
        let model = VariableModel::populate(&mut vars, 1, 1);
        let hosts = vec![host_with_metric(None)];
        assert!(MetricsCost.components_with_setting(&model, &hosts, &[], -1.0).is_empty());
    }
}
