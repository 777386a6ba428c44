//! Immutable request descriptor: everything about the placement request
//! that isn't the candidate host list itself.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::flavor::InstanceType;
use super::host::PciRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterProperties {
    pub num_instances: usize,
    #[serde(default)]
    pub instance_uuids: Option<Vec<String>>,
    #[serde(default)]
    pub instance_type: Option<InstanceType>,
    #[serde(default)]
    pub request_spec: RequestSpec,
    #[serde(default)]
    pub scheduler_hints: SchedulerHints,
    #[serde(default)]
    pub group_policies: Vec<String>,
    #[serde(default)]
    pub group_hosts: Vec<String>,
    #[serde(default)]
    pub pci_requests: Vec<PciRequest>,
    #[serde(default)]
    pub requested_networks: Vec<RequestedNetwork>,
    #[serde(default)]
    pub retry: Option<RetryHistory>,
    #[serde(default)]
    pub context: RequestContext,
}

impl FilterProperties {
    /// Instance identifiers to draw from, in input order; synthesizes
    /// `(unknown_uuid)0`, `(unknown_uuid)1`, ... when the caller supplied
    /// none.
    pub fn instance_identifiers(&self) -> Vec<String> {
        match &self.instance_uuids {
            Some(uuids) if !uuids.is_empty() => uuids.clone(),
            _ => (0..self.num_instances)
                .map(|i| format!("(unknown_uuid){i}"))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestSpec {
    #[serde(default)]
    pub image_properties: HashMap<String, String>,
    #[serde(default)]
    pub instance_properties: InstanceProperties,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstanceProperties {
    pub project_id: Option<String>,
    pub image_ref: Option<String>,
}

/// Scheduler hints. `same_host`/`different_host` are accepted already
/// resolved to host identities (this engine has no instance-placement
/// ledger of its own to resolve instance uuids to hosts with; see
/// DESIGN.md). `ip_distance_cost_volume_host_ips` likewise accepts
/// already-resolved volume host IPs rather than volume uuids, since this
/// engine isn't given a Cinder-equivalent client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchedulerHints {
    #[serde(default)]
    pub same_host: Vec<String>,
    #[serde(default)]
    pub different_host: Vec<String>,
    #[serde(default)]
    pub ip_distance_cost_volume_host_ips: Vec<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestedNetwork {
    pub network_id: Option<String>,
    #[serde(default)]
    pub requested_ip: Option<String>,
    #[serde(default)]
    pub port_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetryHistory {
    /// `(host, node)` pairs already attempted for this request.
    pub hosts: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestContext {
    #[serde(default)]
    pub request_id: String,
}
