//! RAM cost: the marginal cost of placing the (j+1)-th instance of this
//! request on a host, as a function of that host's free RAM. The default
//! positive multiplier stacks instances on fewer hosts; a negative
//! multiplier spreads them instead (grounded in
//! `costs/ram_cost.py`).

use crate::adapters::{FilterProperties, Host};
use crate::config::SolverSchedulerConfig;
use crate::contrib::{Cost, Term};
use crate::model::VariableModel;

#[derive(Debug, Default)]
pub struct RamCost;

impl Cost for RamCost {
    fn name(&self) -> &'static str {
        "RamCost"
    }

    fn cost_multiplier(&self, cfg: &SolverSchedulerConfig) -> f64 {
        cfg.solver_scheduler.ram_cost_multiplier
    }

    fn get_components(
        &self,
        vars: &VariableModel,
        hosts: &[Host],
        fp: &FilterProperties,
        _cfg: &SolverSchedulerConfig,
    ) -> Vec<Term> {
        let requested_ram = match &fp.instance_type {
            Some(instance_type) => instance_type.memory_mb as f64,
            None => {
                log::warn!("RamCost: no instance_type in request, defaulting requested memory_mb to 0");
                0.0
            }
        };

        vars.iter_cells()
            .map(|(i, j, var)| {
                let coef = -(hosts[i].free_ram_mb as f64) + requested_ram * (j as f64 + 1.0);
                Term { var, coef }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use good_lp::ProblemVariables;
    use std::collections::HashMap;

    fn host(free_ram_mb: i64) -> Host {
        Host {
            host: "h".into(),
            node: "n".into(),
            host_ip: "10.0.0.1".into(),
            service_active: true,
            service_disabled: false,
            free_ram_mb,
            total_usable_ram_mb: 4096,
            free_disk_mb: 1_000_000,
            total_usable_disk_gb: 1000,
            vcpus_total: 8,
            vcpus_used: 0,
            num_instances: 0,
            pci_stats: Default::default(),
            aggregates: vec![],
            metrics: HashMap::new(),
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
    fn coefficient_grows_with_slot_index() {
        let mut vars = ProblemVariables::new();
        let model = VariableModel::populate(&mut vars, 1, 3);
        let hosts = vec![host(1024)];
        let fp = FilterProperties {
            num_instances: 3,
            instance_uuids: None,
            instance_type: Some(crate::adapters::InstanceType {
                id: "1".into(),
                root_gb: 0,
                ephemeral_gb: 0,
                swap: 0,
                memory_mb: 512,
                vcpus: 1,
                extra_specs: HashMap::new(),
            }),
            request_spec: Default::default(),
            scheduler_hints: Default::default(),
            group_policies: vec![],
            group_hosts: vec![],
            pci_requests: vec![],
            requested_networks: vec![],
            retry: None,
            context: Default::default(),
        };
        let terms = RamCost.get_components(&model, &hosts, &fp, &SolverSchedulerConfig::default());
        assert_eq!(terms[0].coef, -1024.0 + 512.0);
        assert_eq!(terms[1].coef, -1024.0 + 1024.0);
        assert_eq!(terms[2].coef, -1024.0 + 1536.0);
    }

    #[test]
    fn missing_instance_type_degrades_to_zero_requested_ram_not_no_contribution() {
        let mut vars = ProblemVariables::new();
        let model = VariableModel::populate(&mut vars, 1, 1);
        let hosts = vec![host(1024)];
        let fp = FilterProperties {
            num_instances: 1,
            instance_uuids: None,
            instance_type: None,
            request_spec: Default::default(),
            scheduler_hints: Default::default(),
            group_policies: vec![],
            group_hosts: vec![],
            pci_requests: vec![],
            requested_networks: vec![],
            retry: None,
            context: Default::default(),
        };
        let terms = RamCost.get_components(&model, &hosts, &fp, &SolverSchedulerConfig::default());
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].coef, -1024.0);
    }
}
