//! Cost plugins: each contributes one coefficient per (host, slot) cell to
//! the objective before it's shaped and summed by the Problem Builder.

pub mod aggregate_network_affinity_cost;
pub mod ip_distance_cost;
pub mod metrics_cost;
pub mod ram_cost;

use crate::contrib::Cost;

pub use aggregate_network_affinity_cost::AggregateNetworkAffinityCost;
pub use ip_distance_cost::IpDistanceCost;
pub use metrics_cost::MetricsCost;
pub use ram_cost::RamCost;

/// Resolves a configured cost name (`scheduler_solver_costs` entries) to its
/// implementation. Unknown names are the caller's problem to report; this
/// registry itself never grows at runtime, matching the closed set of cost
/// plugins this core ships with.
pub fn build_cost(name: &str) -> Option<Box<dyn Cost>> {
    match name {
        "RamCost" => Some(Box::new(RamCost)),
        "AggregateNetworkAffinityCost" => Some(Box::new(AggregateNetworkAffinityCost)),
        "IpDistanceCost" => Some(Box::new(IpDistanceCost)),
        "MetricsCost" => Some(Box::new(MetricsCost)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_resolve() {
        assert!(build_cost("RamCost").is_some());
        assert!(build_cost("MetricsCost").is_some());
        assert!(build_cost("NotACost").is_none());
    }
}
