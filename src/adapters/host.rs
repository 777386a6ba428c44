//! Read-mostly view of a candidate compute host.
//!
//! Hosts live for exactly one `solve` call. Every field here is an input
//! except `limits`, which is the one documented output channel: capacity
//! constraints publish the effective allocation cap they enforced so the
//! caller can see what ratio was actually applied.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A candidate compute host and everything the registered costs and
/// constraints may read about it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Host {
    pub host: String,
    pub node: String,
    pub host_ip: String,

    pub service_active: bool,
    pub service_disabled: bool,

    pub free_ram_mb: i64,
    pub total_usable_ram_mb: i64,
    pub free_disk_mb: i64,
    pub total_usable_disk_gb: i64,
    pub vcpus_total: i64,
    pub vcpus_used: i64,
    pub num_instances: i64,

    #[serde(default)]
    pub pci_stats: PciStats,
    #[serde(default)]
    pub aggregates: Vec<Aggregate>,
    #[serde(default)]
    pub metrics: HashMap<String, Metric>,
    /// (architecture, hypervisor_type, vm_mode) triples this host's
    /// hypervisor advertises support for, consumed by
    /// `ImagePropertiesConstraint`.
    #[serde(default)]
    pub supported_instances: Vec<SupportedInstance>,
    #[serde(default)]
    pub hypervisor_version: i64,

    /// Free-form capability map (the Rust stand-in for the "stats" dict the
    /// original scans via attribute-path lookup), consumed by
    /// `ComputeCapabilitiesConstraint` for `extra_specs` keys scoped
    /// `capabilities:*`.
    #[serde(default)]
    pub capabilities: HashMap<String, String>,

    /// id of the flavor currently running on this host, if uniform; used by
    /// `TypeAffinityConstraint`. `None` means the host runs no instances yet
    /// or already mixes flavors (never "passes" the single-type check).
    #[serde(default)]
    pub current_instance_type_id: Option<String>,
    /// Attestation trust level reported for this host ("trusted" /
    /// "untrusted"), consumed by `TrustedComputeConstraint`.
    #[serde(default)]
    pub trust_level: Option<String>,
    /// image_ref this host is currently restricted to, when it belongs to
    /// the isolated-hosts set; `IsolatedHostsConstraint` reads this via the
    /// `isolated_hosts`/`isolated_images` configuration instead, this field
    /// is unused by that constraint and kept only for adapter completeness.
    #[serde(default)]
    pub image_ref: Option<String>,

    #[serde(default)]
    pub limits: Limits,
}

/// One hypervisor-supported (architecture, hypervisor_type, vm_mode)
/// combination. A blank field means "any".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SupportedInstance {
    #[serde(default)]
    pub architecture: Option<String>,
    #[serde(default)]
    pub hypervisor_type: Option<String>,
    #[serde(default)]
    pub vm_mode: Option<String>,
}

/// Output channel written by capacity constraints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Limits {
    pub memory_mb: Option<f64>,
    pub disk_gb: Option<f64>,
    pub vcpu: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Metric {
    pub value: f64,
}

/// A host aggregate membership: a metadata mapping and (for rack/network
/// affinity purposes) an optional set of networks already present in that
/// aggregate.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Aggregate {
    pub metadata: HashMap<String, String>,
    #[serde(default)]
    pub networks: Option<Vec<String>>,
}

/// One pool of identical PCI devices, the unit `support_requests` /
/// `apply_requests` operate on.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PciDevicePool {
    pub count: i64,
    pub vendor_id: String,
    pub product_id: String,
    #[serde(default)]
    pub extra_info: HashMap<String, String>,
}

/// A PCI device request: "give me `count` devices matching vendor/product".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PciRequest {
    pub count: i64,
    pub vendor_id: String,
    pub product_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PciStats {
    pub pools: Vec<PciDevicePool>,
}

impl PciStats {
    /// Whether this stats snapshot can satisfy every request in `requests`
    /// simultaneously, without mutating anything.
    pub fn support_requests(&self, requests: &[PciRequest]) -> bool {
        requests.iter().all(|req| {
            self.pools
                .iter()
                .any(|pool| pool.vendor_id == req.vendor_id && pool.product_id == req.product_id && pool.count >= req.count)
        })
    }

    /// Consumes `requests` worth of devices from matching pools. Callers
    /// that need to probe "how many times can this be applied" must call
    /// this on a deep copy (`self.clone()`), never on the original: the
    /// original `Host.pci_stats` must come out of a solve bit-identical to
    /// how it went in.
    pub fn apply_requests(&mut self, requests: &[PciRequest]) {
        for req in requests {
            if let Some(pool) = self
                .pools
                .iter_mut()
                .find(|pool| pool.vendor_id == req.vendor_id && pool.product_id == req.product_id && pool.count >= req.count)
            {
                pool.count -= req.count;
            }
        }
    }
}
