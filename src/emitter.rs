//! Assignment Emitter: turns a solved X matrix into an ordered
//! sequence of (host, instance-identifier) pairs, or an empty sequence when
//! infeasible.

use crate::adapters::Host;
use crate::model::VariableModel;
use crate::solver::SolveOutcome;

/// Tallies the selected slots per host (row-monotonicity guarantees these
/// are always the low-indexed ones) and draws that many instance
/// identifiers, in input order, for each host in host-index order.
pub fn emit(model: &VariableModel, outcome: &SolveOutcome, hosts: &[Host], instance_identifiers: &[String]) -> Vec<(Host, String)> {
    let selected = match outcome {
        SolveOutcome::Optimal(selected) => selected,
        SolveOutcome::Infeasible => return Vec::new(),
    };

    let mut identifiers = instance_identifiers.iter();
    let mut assignments = Vec::with_capacity(instance_identifiers.len());
    for i in 0..model.num_hosts() {
        let num_selected = selected[i].iter().filter(|&&x| x).count();
        for _ in 0..num_selected {
            match identifiers.next() {
                Some(id) => assignments.push((hosts[i].clone(), id.clone())),
                None => break,
            }
        }
    }
    assignments
}

#[cfg(test)]
mod tests {
    use super::*;
    use good_lp::ProblemVariables;
    use std::collections::HashMap;

    fn host(name: &str) -> Host {
        Host {
            host: name.into(),
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
    fn draws_identifiers_in_order_per_host_in_host_order() {
        let mut vars = ProblemVariables::new();
        let model = VariableModel::populate(&mut vars, 2, 3);
        // host0 takes slots 0,1 (row-monotone); host1 takes none.
        let outcome = SolveOutcome::Optimal(vec![vec![true, true, false], vec![false, false, false]]);
        let hosts = vec![host("h0"), host("h1")];
        let ids = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let assignments = emit(&model, &outcome, &hosts, &ids);
        assert_eq!(assignments, vec![("h0".to_string(), "a".to_string()), ("h0".to_string(), "b".to_string())]
            .into_iter()
            .map(|(h, id)| (host(&h), id))
            .collect::<Vec<_>>());
    }

    #[test]
    fn infeasible_yields_empty_assignment() {
        let mut vars = ProblemVariables::new();
        let model = VariableModel::populate(&mut vars, 1, 1);
        let hosts = vec![host("h0")];
        let ids = vec!["a".to_string()];
        assert!(emit(&model, &SolveOutcome::Infeasible, &hosts, &ids).is_empty());
    }
}
