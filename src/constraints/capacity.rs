//! Capacity constraints: "at most K of the requested instances fit on
//! host i", expressed as a linear resource budget across the host's row.
//! RAM/Disk/VCPU also publish the effective allocation cap they enforced
//! into `host.limits`, the one documented mutation of `Host`.

use crate::adapters::{FilterProperties, Host};
use crate::config::SolverSchedulerConfig;
use crate::contrib::{Constraint, ConstraintRow, Operator};
use crate::model::VariableModel;

fn zero_rows(vars: &VariableModel, i: usize) -> Vec<ConstraintRow> {
    (0..vars.num_slots()).map(|j| ConstraintRow::zero(vars.get(i, j))).collect()
}

fn budget_row(vars: &VariableModel, i: usize, demand: f64, supply: f64) -> ConstraintRow {
    let row = vars.row(i).to_vec();
    let coefs = vec![demand; row.len()];
    ConstraintRow::new(row, coefs, supply, Operator::Le)
}

/// Total RAM demand acceptable on each host (`ram_constraint.py`).
#[derive(Debug, Default)]
pub struct RamConstraint;

impl Constraint for RamConstraint {
    fn name(&self) -> &'static str {
        "RamConstraint"
    }

    fn get_components(
        &self,
        vars: &VariableModel,
        hosts: &mut [Host],
        fp: &FilterProperties,
        cfg: &SolverSchedulerConfig,
    ) -> Vec<ConstraintRow> {
        let Some(instance_type) = &fp.instance_type else {
            log::warn!("RamConstraint: no instance_type in request, skipping");
            return Vec::new();
        };
        let requested_ram = instance_type.memory_mb as f64;
        let ratio = cfg.solver_scheduler.ram_allocation_ratio;

        let mut rows = Vec::new();
        for (i, host) in hosts.iter_mut().enumerate() {
            let limit = host.total_usable_ram_mb as f64 * ratio;
            let used = host.total_usable_ram_mb as f64 - host.free_ram_mb as f64;
            let usable = limit - used;
            host.limits.memory_mb = Some(limit);

            if usable < requested_ram {
                rows.extend(zero_rows(vars, i));
            } else {
                rows.push(budget_row(vars, i, requested_ram, usable));
            }
        }
        rows
    }
}

/// Total disk demand acceptable on each host (`disk_constraint.py`). A
/// zero-sized request (no `instance_type`, or root/ephemeral/swap all
/// zero) still publishes `host.limits.disk_gb` for every host but
/// contributes no rows.
#[derive(Debug, Default)]
pub struct DiskConstraint;

impl Constraint for DiskConstraint {
    fn name(&self) -> &'static str {
        "DiskConstraint"
    }

    fn get_components(
        &self,
        vars: &VariableModel,
        hosts: &mut [Host],
        fp: &FilterProperties,
        cfg: &SolverSchedulerConfig,
    ) -> Vec<ConstraintRow> {
        let requested_disk = fp.instance_type.as_ref().map(|it| it.requested_disk_mb() as f64).unwrap_or(0.0);
        let ratio = cfg.solver_scheduler.disk_allocation_ratio;

        let mut rows = Vec::new();
        for (i, host) in hosts.iter_mut().enumerate() {
            let total_usable_disk_mb = host.total_usable_disk_gb as f64 * 1024.0;
            let limit = total_usable_disk_mb * ratio;
            let used = total_usable_disk_mb - host.free_disk_mb as f64;
            let usable = limit - used;
            host.limits.disk_gb = Some(limit / 1024.0);

            if requested_disk == 0.0 {
                continue;
            }
            if usable < requested_disk {
                rows.extend(zero_rows(vars, i));
            } else {
                rows.push(budget_row(vars, i, requested_disk, usable));
            }
        }
        rows
    }
}

/// Total VCPU demand acceptable on each host (`vcpu_constraint.py`).
#[derive(Debug, Default)]
pub struct VcpuConstraint;

impl Constraint for VcpuConstraint {
    fn name(&self) -> &'static str {
        "VcpuConstraint"
    }

    fn get_components(
        &self,
        vars: &VariableModel,
        hosts: &mut [Host],
        fp: &FilterProperties,
        cfg: &SolverSchedulerConfig,
    ) -> Vec<ConstraintRow> {
        let requested_vcpus = fp.instance_type.as_ref().map(|it| it.vcpus as f64).unwrap_or(0.0);
        let ratio = cfg.solver_scheduler.cpu_allocation_ratio;

        let mut rows = Vec::new();
        for (i, host) in hosts.iter_mut().enumerate() {
            if host.vcpus_total == 0 {
                log::warn!("VcpuConstraint: {} has vcpus_total == 0, treating as no usable vcpus", host.host);
                rows.extend(zero_rows(vars, i));
                continue;
            }
            let vcpus_total = host.vcpus_total as f64 * ratio;
            let usable_vcpus = vcpus_total - host.vcpus_used as f64;
            host.limits.vcpu = Some(vcpus_total);

            if usable_vcpus < requested_vcpus {
                rows.extend(zero_rows(vars, i));
            } else {
                rows.push(budget_row(vars, i, requested_vcpus, usable_vcpus));
            }
        }
        rows
    }
}

/// Caps the number of instances from this request that can land on a host
/// already running some (`num_instances_constraint.py`): `K = max(0,
/// max_per_host - current_num_instances)`, zeroing every slot `j >= K`.
#[derive(Debug, Default)]
pub struct NumInstancesPerHostConstraint;

impl Constraint for NumInstancesPerHostConstraint {
    fn name(&self) -> &'static str {
        "NumInstancesPerHostConstraint"
    }

    fn get_components(
        &self,
        vars: &VariableModel,
        hosts: &mut [Host],
        _fp: &FilterProperties,
        cfg: &SolverSchedulerConfig,
    ) -> Vec<ConstraintRow> {
        let max_per_host = cfg.solver_scheduler.max_instances_per_host;
        let mut rows = Vec::new();
        for (i, host) in hosts.iter().enumerate() {
            let k = (max_per_host - host.num_instances).max(0) as usize;
            for j in k..vars.num_slots() {
                rows.push(ConstraintRow::zero(vars.get(i, j)));
            }
        }
        rows
    }
}

/// Caps the number of instances from this request that can land on a host
/// given its PCI device inventory (`pci_passthrough_constraint.py`): the
/// maximum `t` such that applying the requested PCI device set `t` times
/// still succeeds against a private deep copy of the host's PCI stats. The
/// original `host.pci_stats` is never touched.
#[derive(Debug, Default)]
pub struct PciPassthroughConstraint;

impl PciPassthroughConstraint {
    fn max_satisfiable(host: &Host, requests: &[crate::adapters::host::PciRequest], cap: usize) -> usize {
        let mut probe = host.pci_stats.clone();
        let mut t = 0;
        while t < cap && probe.support_requests(requests) {
            probe.apply_requests(requests);
            t += 1;
        }
        t
    }
}

impl Constraint for PciPassthroughConstraint {
    fn name(&self) -> &'static str {
        "PciPassthroughConstraint"
    }

    fn get_components(
        &self,
        vars: &VariableModel,
        hosts: &mut [Host],
        fp: &FilterProperties,
        _cfg: &SolverSchedulerConfig,
    ) -> Vec<ConstraintRow> {
        if fp.pci_requests.is_empty() {
            return Vec::new();
        }
        let mut rows = Vec::new();
        for (i, host) in hosts.iter().enumerate() {
            let k = Self::max_satisfiable(host, &fp.pci_requests, vars.num_slots());
            for j in k..vars.num_slots() {
                rows.push(ConstraintRow::zero(vars.get(i, j)));
            }
        }
        rows
    }
}

/// Limits the number of networks a rack (here, a host aggregate carrying a
/// `networks` list) would end up carrying if this request's networks are
/// added (`num_networks_per_rack_constraint.py`). When a host belongs to
/// several such aggregates the one with the most networks already is
/// treated as its rack, matching the original's `max(...)` across
/// aggregated racks.
#[derive(Debug, Default)]
pub struct NumNetworksPerRackConstraint;

impl Constraint for NumNetworksPerRackConstraint {
    fn name(&self) -> &'static str {
        "NumNetworksPerRackConstraint"
    }

    fn get_components(
        &self,
        vars: &VariableModel,
        hosts: &mut [Host],
        fp: &FilterProperties,
        cfg: &SolverSchedulerConfig,
    ) -> Vec<ConstraintRow> {
        if fp.requested_networks.is_empty() {
            return Vec::new();
        }
        let max_allowed = cfg.solver_scheduler.max_networks_per_rack as f64;
        let requested_ids: Vec<&str> = fp.requested_networks.iter().filter_map(|n| n.network_id.as_deref()).collect();

        let mut rows = Vec::new();
        for (i, host) in hosts.iter().enumerate() {
            let rack = host.aggregates.iter().filter_map(|a| a.networks.as_ref()).max_by_key(|nets| nets.len());
            let current = rack.map(|nets| nets.len()).unwrap_or(0) as f64;
            let delta_net = match rack {
                Some(nets) => requested_ids.iter().filter(|id| !nets.iter().any(|n| n == *id)).count(),
                None => requested_ids.len(),
            } as f64;
            let supply = max_allowed - current;
            if supply < delta_net {
                // Rack already at or past its cap (supply can be negative), or
                // doesn't have room for even one slot's worth of new networks:
                // reject the host outright rather than emit a budget row an
                // empty selection could still violate.
                rows.extend(zero_rows(vars, i));
            } else {
                rows.push(budget_row(vars, i, delta_net, supply));
            }
        }
        rows
    }
}
