//! Host-rejection constraints: one predicate per host, `host_passes`;
//! a rejected host gets every one of its slots zeroed (`X[i][j] == 0`)
//! for `j` in `[0, N)`. A passing host contributes nothing.

use crate::adapters::{FilterProperties, Host};
use crate::config::SolverSchedulerConfig;
use crate::contrib::{Constraint, ConstraintRow};
use crate::extra_specs::{match_extra_spec, strip_scope};
use crate::model::VariableModel;

fn reject_rows(vars: &VariableModel, i: usize) -> Vec<ConstraintRow> {
    (0..vars.num_slots()).map(|j| ConstraintRow::zero(vars.get(i, j))).collect()
}

/// Runs `host_passes` over every host and zeroes the slots of every host
/// that fails it. Shared skeleton every host-rejection constraint below
/// reduces to.
fn rows_from_predicate(vars: &VariableModel, hosts: &[Host], host_passes: impl Fn(&Host) -> bool) -> Vec<ConstraintRow> {
    let mut rows = Vec::new();
    for (i, host) in hosts.iter().enumerate() {
        if !host_passes(host) {
            rows.extend(reject_rows(vars, i));
        }
    }
    rows
}

/// Rejects hosts whose compute service isn't active, or is administratively
/// disabled (`active_hosts_constraint.py` / `active_host_constraint.py`).
#[derive(Debug, Default)]
pub struct ActiveHostsConstraint;

impl Constraint for ActiveHostsConstraint {
    fn name(&self) -> &'static str {
        "ActiveHostsConstraint"
    }

    fn get_components(
        &self,
        vars: &VariableModel,
        hosts: &mut [Host],
        _fp: &FilterProperties,
        _cfg: &SolverSchedulerConfig,
    ) -> Vec<ConstraintRow> {
        rows_from_predicate(vars, hosts, |h| h.service_active && !h.service_disabled)
    }
}

/// Rejects hosts whose advertised `supported_instances` don't cover the
/// requested image's architecture/hypervisor_type/vm_mode
/// (`image_props_constraint.py`). A request with none of those three
/// properties set is satisfied by every host. The original's
/// `hypervisor_version_requires` version-predicate check is not ported
/// (see DESIGN.md); hosts are accepted on arch/hypervisor/vm_mode match
/// alone.
#[derive(Debug, Default)]
pub struct ImagePropertiesConstraint;

impl ImagePropertiesConstraint {
    fn instance_supported(host: &Host, arch: Option<&str>, hyp: Option<&str>, vm_mode: Option<&str>) -> bool {
        if arch.is_none() && hyp.is_none() && vm_mode.is_none() {
            return true;
        }
        if host.supported_instances.is_empty() {
            return false;
        }
        host.supported_instances.iter().any(|supp| {
            let arch_ok = arch.map_or(true, |a| supp.architecture.as_deref() == Some(a));
            let hyp_ok = hyp.map_or(true, |h| supp.hypervisor_type.as_deref() == Some(h));
            let vm_ok = vm_mode.map_or(true, |m| supp.vm_mode.as_deref() == Some(m));
            arch_ok && hyp_ok && vm_ok
        })
    }
}

impl Constraint for ImagePropertiesConstraint {
    fn name(&self) -> &'static str {
        "ImagePropertiesConstraint"
    }

    fn get_components(
        &self,
        vars: &VariableModel,
        hosts: &mut [Host],
        fp: &FilterProperties,
        _cfg: &SolverSchedulerConfig,
    ) -> Vec<ConstraintRow> {
        let props = &fp.request_spec.image_properties;
        let arch = props.get("architecture").map(String::as_str);
        let hyp = props.get("hypervisor_type").map(String::as_str);
        let vm_mode = props.get("vm_mode").map(String::as_str);
        rows_from_predicate(vars, hosts, |h| Self::instance_supported(h, arch, hyp, vm_mode))
    }
}

/// Keeps isolated images on isolated hosts (and vice versa, when
/// configured to) (`isolated_hosts_constraint.py`).
#[derive(Debug, Default)]
pub struct IsolatedHostsConstraint;

impl Constraint for IsolatedHostsConstraint {
    fn name(&self) -> &'static str {
        "IsolatedHostsConstraint"
    }

    fn get_components(
        &self,
        vars: &VariableModel,
        hosts: &mut [Host],
        fp: &FilterProperties,
        cfg: &SolverSchedulerConfig,
    ) -> Vec<ConstraintRow> {
        let sched = &cfg.solver_scheduler;
        let image_ref = fp.request_spec.instance_properties.image_ref.as_deref();
        rows_from_predicate(vars, hosts, |h| {
            let host_isolated = sched.isolated_hosts.iter().any(|x| x == &h.host);
            if sched.isolated_images.is_empty() {
                !sched.restrict_isolated_hosts_to_isolated_images || !host_isolated
            } else {
                let image_isolated = image_ref.map_or(false, |img| sched.isolated_images.iter().any(|x| x == img));
                if sched.restrict_isolated_hosts_to_isolated_images {
                    image_isolated == host_isolated
                } else {
                    !image_isolated || host_isolated
                }
            }
        })
    }
}

/// Excludes hosts already attempted in a prior scheduling retry for this
/// request (`retry_constraint.py`).
#[derive(Debug, Default)]
pub struct RetryConstraint;

impl Constraint for RetryConstraint {
    fn name(&self) -> &'static str {
        "RetryConstraint"
    }

    fn get_components(
        &self,
        vars: &VariableModel,
        hosts: &mut [Host],
        fp: &FilterProperties,
        _cfg: &SolverSchedulerConfig,
    ) -> Vec<ConstraintRow> {
        let Some(retry) = &fp.retry else {
            return Vec::new();
        };
        rows_from_predicate(vars, hosts, |h| {
            !retry.hosts.iter().any(|(host, node)| host == &h.host && node == &h.node)
        })
    }
}

/// Matches the flavor's `trust` extra_spec against the host's attestation
/// trust level (`trusted_hosts_constraints.py`). A flavor with no `trust`
/// extra_spec is satisfied by every host.
#[derive(Debug, Default)]
pub struct TrustedComputeConstraint;

impl Constraint for TrustedComputeConstraint {
    fn name(&self) -> &'static str {
        "TrustedComputeConstraint"
    }

    fn get_components(
        &self,
        vars: &VariableModel,
        hosts: &mut [Host],
        fp: &FilterProperties,
        _cfg: &SolverSchedulerConfig,
    ) -> Vec<ConstraintRow> {
        let Some(instance_type) = &fp.instance_type else {
            return Vec::new();
        };
        let Some(required_trust) = instance_type.extra_specs.get("trust") else {
            return Vec::new();
        };
        rows_from_predicate(vars, hosts, |h| h.trust_level.as_deref() == Some(required_trust.as_str()))
    }
}

/// Rejects a host already running a different flavor type, so it ends up
/// hosting only one flavor (`type_affinity_constraint.py`). This engine has
/// no instance ledger of its own to query, so it relies on
/// `Host.current_instance_type_id` being kept current by the caller.
#[derive(Debug, Default)]
pub struct TypeAffinityConstraint;

impl Constraint for TypeAffinityConstraint {
    fn name(&self) -> &'static str {
        "TypeAffinityConstraint"
    }

    fn get_components(
        &self,
        vars: &VariableModel,
        hosts: &mut [Host],
        fp: &FilterProperties,
        _cfg: &SolverSchedulerConfig,
    ) -> Vec<ConstraintRow> {
        let Some(instance_type) = &fp.instance_type else {
            return Vec::new();
        };
        rows_from_predicate(vars, hosts, |h| match &h.current_instance_type_id {
            None => true,
            Some(current) => current == &instance_type.id,
        })
    }
}

/// Matches `extra_specs` keys scoped `capabilities:*` (or unscoped) against
/// `Host.capabilities` (`compute_capabilities_constraint.py`). Only a flat
/// capability map is supported, not the original's arbitrary attribute-path
/// walk into host stats (see DESIGN.md).
#[derive(Debug, Default)]
pub struct ComputeCapabilitiesConstraint;

impl ComputeCapabilitiesConstraint {
    fn satisfies(host: &Host, instance_type: &crate::adapters::InstanceType) -> bool {
        instance_type.extra_specs.iter().all(|(key, req)| {
            let Some(key) = strip_scope(key, "capabilities") else {
                return true;
            };
            match host.capabilities.get(key) {
                Some(cap) => match_extra_spec(cap, req),
                None => false,
            }
        })
    }
}

impl Constraint for ComputeCapabilitiesConstraint {
    fn name(&self) -> &'static str {
        "ComputeCapabilitiesConstraint"
    }

    fn get_components(
        &self,
        vars: &VariableModel,
        hosts: &mut [Host],
        fp: &FilterProperties,
        _cfg: &SolverSchedulerConfig,
    ) -> Vec<ConstraintRow> {
        let Some(instance_type) = &fp.instance_type else {
            return Vec::new();
        };
        rows_from_predicate(vars, hosts, |h| Self::satisfies(h, instance_type))
    }
}

/// Restricts an image property's allowed values per aggregate membership
/// (`aggregate_image_properties_isolation.py`). An aggregate's metadata
/// value is treated as a comma-separated set of allowed values.
#[derive(Debug, Default)]
pub struct AggregateImagePropertiesIsolation;

impl Constraint for AggregateImagePropertiesIsolation {
    fn name(&self) -> &'static str {
        "AggregateImagePropertiesIsolation"
    }

    fn get_components(
        &self,
        vars: &VariableModel,
        hosts: &mut [Host],
        fp: &FilterProperties,
        _cfg: &SolverSchedulerConfig,
    ) -> Vec<ConstraintRow> {
        let image_props = &fp.request_spec.image_properties;
        rows_from_predicate(vars, hosts, |h| {
            h.aggregates.iter().all(|agg| {
                agg.metadata.iter().all(|(key, options)| match image_props.get(key) {
                    Some(requested) if !requested.is_empty() => {
                        options.split(',').any(|opt| opt.trim() == requested)
                    }
                    _ => true,
                })
            })
        })
    }
}

/// Matches the flavor's `extra_specs` (scoped `aggregate_instance_extra_specs:*`
/// or unscoped) against aggregate metadata (`aggregate_instance_extra_specs.py`).
/// An aggregate metadata value is a comma-separated set of acceptable values.
#[derive(Debug, Default)]
pub struct AggregateInstanceExtraSpecs;

impl Constraint for AggregateInstanceExtraSpecs {
    fn name(&self) -> &'static str {
        "AggregateInstanceExtraSpecs"
    }

    fn get_components(
        &self,
        vars: &VariableModel,
        hosts: &mut [Host],
        fp: &FilterProperties,
        _cfg: &SolverSchedulerConfig,
    ) -> Vec<ConstraintRow> {
        let Some(instance_type) = &fp.instance_type else {
            return Vec::new();
        };
        if instance_type.extra_specs.is_empty() {
            return Vec::new();
        }
        rows_from_predicate(vars, hosts, |h| {
            instance_type.extra_specs.iter().all(|(key, req)| {
                let Some(key) = strip_scope(key, "aggregate_instance_extra_specs") else {
                    return true;
                };
                h.aggregates.iter().any(|agg| {
                    agg.metadata
                        .get(key)
                        .is_some_and(|vals| vals.split(',').any(|v| match_extra_spec(v.trim(), req)))
                })
            })
        })
    }
}

/// Restricts an aggregate carrying `filter_tenant_id` metadata to only the
/// listed tenants (`aggregate_multitenancy_isolation.py`).
#[derive(Debug, Default)]
pub struct AggregateMultitenancyIsolation;

impl Constraint for AggregateMultitenancyIsolation {
    fn name(&self) -> &'static str {
        "AggregateMultitenancyIsolation"
    }

    fn get_components(
        &self,
        vars: &VariableModel,
        hosts: &mut [Host],
        fp: &FilterProperties,
        _cfg: &SolverSchedulerConfig,
    ) -> Vec<ConstraintRow> {
        let project_id = fp.request_spec.instance_properties.project_id.as_deref();
        rows_from_predicate(vars, hosts, |h| {
            h.aggregates.iter().all(|agg| match agg.metadata.get("filter_tenant_id") {
                Some(tenants) => project_id.is_some_and(|pid| tenants.split(',').any(|t| t.trim() == pid)),
                None => true,
            })
        })
    }
}

/// Requires placement on a host already running an instance from
/// `scheduler_hints.same_host` (`affinity_constraint.py::SameHostFilter`).
#[derive(Debug, Default)]
pub struct SameHostConstraint;

impl Constraint for SameHostConstraint {
    fn name(&self) -> &'static str {
        "SameHostConstraint"
    }

    fn get_components(
        &self,
        vars: &VariableModel,
        hosts: &mut [Host],
        fp: &FilterProperties,
        _cfg: &SolverSchedulerConfig,
    ) -> Vec<ConstraintRow> {
        let wanted = &fp.scheduler_hints.same_host;
        if wanted.is_empty() {
            return Vec::new();
        }
        rows_from_predicate(vars, hosts, |h| wanted.iter().any(|w| w == &h.host))
    }
}

/// Excludes hosts already running an instance from
/// `scheduler_hints.different_host` (`affinity_constraint.py::DifferentHostFilter`).
#[derive(Debug, Default)]
pub struct DifferentHostConstraint;

impl Constraint for DifferentHostConstraint {
    fn name(&self) -> &'static str {
        "DifferentHostConstraint"
    }

    fn get_components(
        &self,
        vars: &VariableModel,
        hosts: &mut [Host],
        fp: &FilterProperties,
        _cfg: &SolverSchedulerConfig,
    ) -> Vec<ConstraintRow> {
        let excluded = &fp.scheduler_hints.different_host;
        if excluded.is_empty() {
            return Vec::new();
        }
        rows_from_predicate(vars, hosts, |h| !excluded.iter().any(|w| w == &h.host))
    }
}

/// Rejects a host outright when it cannot satisfy the requested PCI devices
/// even once (the zero-times-acceptable case of `pci_passthrough_constraint.py`
/// in `linearconstraints/`; the "how many times" case lives in
/// `constraints::capacity::PciPassthroughConstraint`).
#[derive(Debug, Default)]
pub struct PciPassthroughRejectConstraint;

impl Constraint for PciPassthroughRejectConstraint {
    fn name(&self) -> &'static str {
        "PciPassthroughRejectConstraint"
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
        rows_from_predicate(vars, hosts, |h| h.pci_stats.support_requests(&fp.pci_requests))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::host::Aggregate;
    use good_lp::ProblemVariables;
    use std::collections::HashMap;

    fn base_host() -> Host {
        Host {
            host: "h1".into(),
            node: "n1".into(),
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

    fn base_fp() -> FilterProperties {
        FilterProperties {
            num_instances: 2,
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
        }
    }

    #[test]
    fn active_hosts_rejects_disabled_service() {
        let mut vars = ProblemVariables::new();
        let model = VariableModel::populate(&mut vars, 1, 2);
        let mut hosts = vec![Host { service_disabled: true, ..base_host() }];
        let rows = ActiveHostsConstraint.get_components(&model, &mut hosts, &base_fp(), &SolverSchedulerConfig::default());
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn active_hosts_passes_live_host() {
        let mut vars = ProblemVariables::new();
        let model = VariableModel::populate(&mut vars, 1, 2);
        let mut hosts = vec![base_host()];
        let rows = ActiveHostsConstraint.get_components(&model, &mut hosts, &base_fp(), &SolverSchedulerConfig::default());
        assert!(rows.is_empty());
    }

    #[test]
    fn same_host_constraint_zeroes_non_matching_hosts() {
        let mut vars = ProblemVariables::new();
        let model = VariableModel::populate(&mut vars, 2, 1);
        let mut hosts = vec![base_host(), Host { host: "h2".into(), ..base_host() }];
        let mut fp = base_fp();
        fp.scheduler_hints.same_host = vec!["h2".into()];
        let rows = SameHostConstraint.get_components(&model, &mut hosts, &fp, &SolverSchedulerConfig::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].vars[0], model.get(0, 0));
    }

    #[test]
    fn different_host_constraint_zeroes_matching_hosts() {
        let mut vars = ProblemVariables::new();
        let model = VariableModel::populate(&mut vars, 2, 1);
        let mut hosts = vec![base_host(), Host { host: "h2".into(), ..base_host() }];
        let mut fp = base_fp();
        fp.scheduler_hints.different_host = vec!["h2".into()];
        let rows = DifferentHostConstraint.get_components(&model, &mut hosts, &fp, &SolverSchedulerConfig::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].vars[0], model.get(1, 0));
    }

    #[test]
    fn retry_constraint_excludes_attempted_host_node_pairs() {
        let mut vars = ProblemVariables::new();
        let model = VariableModel::populate(&mut vars, 2, 1);
        let mut hosts = vec![base_host(), Host { host: "h2".into(), node: "n2".into(), ..base_host() }];
        let mut fp = base_fp();
        fp.retry = Some(crate::adapters::filter_properties::RetryHistory {
            hosts: vec![("h1".into(), "n1".into())],
        });
        let rows = RetryConstraint.get_components(&model, &mut hosts, &fp, &SolverSchedulerConfig::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].vars[0], model.get(0, 0));
    }

    #[test]
    fn aggregate_multitenancy_rejects_mismatched_tenant() {
        let mut vars = ProblemVariables::new();
        let model = VariableModel::populate(&mut vars, 1, 1);
        let mut metadata = HashMap::new();
        metadata.insert("filter_tenant_id".to_string(), "tenant-a,tenant-b".to_string());
        let mut hosts = vec![Host { aggregates: vec![Aggregate { metadata, networks: None }], ..base_host() }];
        let mut fp = base_fp();
        fp.request_spec.instance_properties.project_id = Some("tenant-z".into());
        let rows = AggregateMultitenancyIsolation.get_components(&model, &mut hosts, &fp, &SolverSchedulerConfig::default());
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn aggregate_multitenancy_passes_listed_tenant() {
        let mut vars = ProblemVariables::new();
        let model = VariableModel::populate(&mut vars, 1, 1);
        let mut metadata = HashMap::new();
        metadata.insert("filter_tenant_id".to_string(), "tenant-a,tenant-b".to_string());
        let mut hosts = vec![Host { aggregates: vec![Aggregate { metadata, networks: None }], ..base_host() }];
        let mut fp = base_fp();
        fp.request_spec.instance_properties.project_id = Some("tenant-a".into());
        let rows = AggregateMultitenancyIsolation.get_components(&model, &mut hosts, &fp, &SolverSchedulerConfig::default());
        assert!(rows.is_empty());
    }

    #[test]
    fn pci_passthrough_reject_zeroes_unsupportable_host() {
        let mut vars = ProblemVariables::new();
        let model = VariableModel::populate(&mut vars, 1, 1);
        let mut hosts = vec![base_host()];
        let mut fp = base_fp();
        fp.pci_requests = vec![crate::adapters::host::PciRequest { count: 1, vendor_id: "8086".into(), product_id: "1520".into() }];
        let rows = PciPassthroughRejectConstraint.get_components(&model, &mut hosts, &fp, &SolverSchedulerConfig::default());
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn type_affinity_rejects_host_running_a_different_flavor() {
        let mut vars = ProblemVariables::new();
        let model = VariableModel::populate(&mut vars, 1, 1);
        let mut hosts = vec![Host { current_instance_type_id: Some("other".into()), ..base_host() }];
        let mut fp = base_fp();
        fp.instance_type = Some(crate::adapters::InstanceType {
            id: "this".into(),
            root_gb: 0,
            ephemeral_gb: 0,
            swap: 0,
            memory_mb: 0,
            vcpus: 0,
            extra_specs: HashMap::new(),
        });
        let rows = TypeAffinityConstraint.get_components(&model, &mut hosts, &fp, &SolverSchedulerConfig::default());
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn image_properties_rejects_a_host_without_the_matching_hypervisor() {
        let mut vars = ProblemVariables::new();
        let model = VariableModel::populate(&mut vars, 1, 1);
        let mut hosts = vec![Host {
            supported_instances: vec![crate::adapters::host::SupportedInstance {
                architecture: Some("x86_64".into()),
                hypervisor_type: Some("qemu".into()),
                vm_mode: None,
            }],
            ..base_host()
        }];
        let mut fp = base_fp();
        fp.request_spec.image_properties.insert("hypervisor_type".to_string(), "xen".to_string());
        let rows = ImagePropertiesConstraint.get_components(&model, &mut hosts, &fp, &SolverSchedulerConfig::default());
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn image_properties_passes_a_host_with_no_image_requirements() {
        let mut vars = ProblemVariables::new();
        let model = VariableModel::populate(&mut vars, 1, 1);
        let mut hosts = vec![base_host()];
        let rows = ImagePropertiesConstraint.get_components(&model, &mut hosts, &base_fp(), &SolverSchedulerConfig::default());
        assert!(rows.is_empty());
    }

    #[test]
    fn isolated_hosts_rejects_non_isolated_host_for_isolated_image() {
        let mut vars = ProblemVariables::new();
        let model = VariableModel::populate(&mut vars, 1, 1);
        let mut hosts = vec![base_host()];
        let mut fp = base_fp();
        fp.request_spec.instance_properties.image_ref = Some("isolated-image".into());
        let mut cfg = SolverSchedulerConfig::default();
        cfg.solver_scheduler.isolated_images = vec!["isolated-image".into()];
        cfg.solver_scheduler.restrict_isolated_hosts_to_isolated_images = true;
        let rows = IsolatedHostsConstraint.get_components(&model, &mut hosts, &fp, &cfg);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn isolated_hosts_passes_when_no_isolation_configured() {
        let mut vars = ProblemVariables::new();
        let model = VariableModel::populate(&mut vars, 1, 1);
        let mut hosts = vec![base_host()];
        let rows = IsolatedHostsConstraint.get_components(&model, &mut hosts, &base_fp(), &SolverSchedulerConfig::default());
        assert!(rows.is_empty());
    }

    #[test]
    fn trusted_compute_rejects_host_with_mismatched_trust_level() {
        let mut vars = ProblemVariables::new();
        let model = VariableModel::populate(&mut vars, 1, 1);
        let mut hosts = vec![Host { trust_level: Some("untrusted".into()), ..base_host() }];
        let mut fp = base_fp();
        let mut extra_specs = HashMap::new();
        extra_specs.insert("trust".to_string(), "trusted".to_string());
        fp.instance_type = Some(crate::adapters::InstanceType {
            id: "1".into(),
            root_gb: 0,
            ephemeral_gb: 0,
            swap: 0,
            memory_mb: 0,
            vcpus: 0,
            extra_specs,
        });
        let rows = TrustedComputeConstraint.get_components(&model, &mut hosts, &fp, &SolverSchedulerConfig::default());
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn trusted_compute_is_a_no_op_without_a_trust_extra_spec() {
        let mut vars = ProblemVariables::new();
        let model = VariableModel::populate(&mut vars, 1, 1);
        let mut hosts = vec![Host { trust_level: Some("untrusted".into()), ..base_host() }];
        let mut fp = base_fp();
        fp.instance_type = Some(crate::adapters::InstanceType {
            id: "1".into(),
            root_gb: 0,
            ephemeral_gb: 0,
            swap: 0,
            memory_mb: 0,
            vcpus: 0,
            extra_specs: HashMap::new(),
        });
        let rows = TrustedComputeConstraint.get_components(&model, &mut hosts, &fp, &SolverSchedulerConfig::default());
        assert!(rows.is_empty());
    }

    #[test]
    fn compute_capabilities_rejects_a_host_missing_the_required_capability() {
        let mut vars = ProblemVariables::new();
        let model = VariableModel::populate(&mut vars, 1, 1);
        let mut hosts = vec![base_host()];
        let mut fp = base_fp();
        let mut extra_specs = HashMap::new();
        extra_specs.insert("capabilities:cpu_info:vendor".to_string(), "Intel".to_string());
        fp.instance_type = Some(crate::adapters::InstanceType {
            id: "1".into(),
            root_gb: 0,
            ephemeral_gb: 0,
            swap: 0,
            memory_mb: 0,
            vcpus: 0,
            extra_specs,
        });
        let rows = ComputeCapabilitiesConstraint.get_components(&model, &mut hosts, &fp, &SolverSchedulerConfig::default());
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn compute_capabilities_passes_a_host_with_a_matching_capability() {
        let mut vars = ProblemVariables::new();
        let model = VariableModel::populate(&mut vars, 1, 1);
        let mut capabilities = HashMap::new();
        capabilities.insert("cpu_info:vendor".to_string(), "Intel".to_string());
        let mut hosts = vec![Host { capabilities, ..base_host() }];
        let mut fp = base_fp();
        let mut extra_specs = HashMap::new();
        extra_specs.insert("capabilities:cpu_info:vendor".to_string(), "Intel".to_string());
        fp.instance_type = Some(crate::adapters::InstanceType {
            id: "1".into(),
            root_gb: 0,
            ephemeral_gb: 0,
            swap: 0,
            memory_mb: 0,
            vcpus: 0,
            extra_specs,
        });
        let rows = ComputeCapabilitiesConstraint.get_components(&model, &mut hosts, &fp, &SolverSchedulerConfig::default());
        assert!(rows.is_empty());
    }

    #[test]
    fn aggregate_image_properties_isolation_rejects_host_outside_the_allowed_value() {
        let mut vars = ProblemVariables::new();
        let model = VariableModel::populate(&mut vars, 1, 1);
        let mut metadata = HashMap::new();
        metadata.insert("os_distro".to_string(), "rhel,centos".to_string());
        let mut hosts = vec![Host { aggregates: vec![Aggregate { metadata, networks: None }], ..base_host() }];
        let mut fp = base_fp();
        fp.request_spec.image_properties.insert("os_distro".to_string(), "ubuntu".to_string());
        let rows = AggregateImagePropertiesIsolation.get_components(&model, &mut hosts, &fp, &SolverSchedulerConfig::default());
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn aggregate_instance_extra_specs_requires_membership_in_a_matching_aggregate() {
        let mut vars = ProblemVariables::new();
        let model = VariableModel::populate(&mut vars, 1, 1);
        let mut hosts = vec![base_host()];
        let mut fp = base_fp();
        let mut extra_specs = HashMap::new();
        extra_specs.insert("aggregate_instance_extra_specs:ssd".to_string(), "true".to_string());
        fp.instance_type = Some(crate::adapters::InstanceType {
            id: "1".into(),
            root_gb: 0,
            ephemeral_gb: 0,
            swap: 0,
            memory_mb: 0,
            vcpus: 0,
            extra_specs,
        });
        let rows = AggregateInstanceExtraSpecs.get_components(&model, &mut hosts, &fp, &SolverSchedulerConfig::default());
        assert_eq!(rows.len(), 1);
    }
}
