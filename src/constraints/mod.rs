//! Constraint plugins. The always-on structural rows (`structural`) are
//! never resolved through this registry; everything else is a named,
//! config-selected policy.

pub mod affinity;
pub mod capacity;
pub mod host_rejection;
pub mod structural;

use crate::contrib::Constraint;

pub use affinity::{ServerGroupAffinityConstraint, ServerGroupAntiAffinityConstraint};
pub use capacity::{
    DiskConstraint, NumInstancesPerHostConstraint, NumNetworksPerRackConstraint, PciPassthroughConstraint, RamConstraint,
    VcpuConstraint,
};
pub use host_rejection::{
    ActiveHostsConstraint, AggregateImagePropertiesIsolation, AggregateInstanceExtraSpecs, AggregateMultitenancyIsolation,
    ComputeCapabilitiesConstraint, DifferentHostConstraint, ImagePropertiesConstraint, IsolatedHostsConstraint,
    PciPassthroughRejectConstraint, RetryConstraint, SameHostConstraint, TrustedComputeConstraint, TypeAffinityConstraint,
};

/// Resolves a configured constraint name (`scheduler_solver_constraints`
/// entries) to its implementation. `None` is the caller's problem to report
/// (`ConfigError::UnknownConstraint`); the structural constraints
/// (Assignment, Row-monotonicity) are not part of this set, see
/// `structural`.
pub fn build_constraint(name: &str) -> Option<Box<dyn Constraint>> {
    match name {
        "ActiveHostsConstraint" => Some(Box::new(ActiveHostsConstraint)),
        "ImagePropertiesConstraint" => Some(Box::new(ImagePropertiesConstraint)),
        "IsolatedHostsConstraint" => Some(Box::new(IsolatedHostsConstraint)),
        "RetryConstraint" => Some(Box::new(RetryConstraint)),
        "TrustedComputeConstraint" => Some(Box::new(TrustedComputeConstraint)),
        "TypeAffinityConstraint" => Some(Box::new(TypeAffinityConstraint)),
        "ComputeCapabilitiesConstraint" => Some(Box::new(ComputeCapabilitiesConstraint)),
        "AggregateImagePropertiesIsolation" => Some(Box::new(AggregateImagePropertiesIsolation)),
        "AggregateInstanceExtraSpecs" => Some(Box::new(AggregateInstanceExtraSpecs)),
        "AggregateMultitenancyIsolation" => Some(Box::new(AggregateMultitenancyIsolation)),
        "SameHostConstraint" => Some(Box::new(SameHostConstraint)),
        "DifferentHostConstraint" => Some(Box::new(DifferentHostConstraint)),
        "PciPassthroughRejectConstraint" => Some(Box::new(PciPassthroughRejectConstraint)),
        "RamConstraint" => Some(Box::new(RamConstraint)),
        "DiskConstraint" => Some(Box::new(DiskConstraint)),
        "VcpuConstraint" => Some(Box::new(VcpuConstraint)),
        "NumInstancesPerHostConstraint" => Some(Box::new(NumInstancesPerHostConstraint)),
        "PciPassthroughConstraint" => Some(Box::new(PciPassthroughConstraint)),
        "NumNetworksPerRackConstraint" => Some(Box::new(NumNetworksPerRackConstraint)),
        "ServerGroupAffinityConstraint" => Some(Box::new(ServerGroupAffinityConstraint)),
        "ServerGroupAntiAffinityConstraint" => Some(Box::new(ServerGroupAntiAffinityConstraint)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_resolve() {
        assert!(build_constraint("ActiveHostsConstraint").is_some());
        assert!(build_constraint("RamConstraint").is_some());
        assert!(build_constraint("ServerGroupAffinityConstraint").is_some());
        assert!(build_constraint("NotAConstraint").is_none());
    }
}
