//! The requested instance type (OpenStack calls this a "flavor").

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceType {
    pub id: String,
    #[serde(default)]
    pub root_gb: i64,
    #[serde(default)]
    pub ephemeral_gb: i64,
    #[serde(default)]
    pub swap: i64,
    pub memory_mb: i64,
    pub vcpus: i64,
    #[serde(default)]
    pub extra_specs: HashMap<String, String>,
}

impl InstanceType {
    /// Disk demand in MB: `1024 * (root_gb + ephemeral_gb) + swap_mb`.
    pub fn requested_disk_mb(&self) -> i64 {
        1024 * (self.root_gb + self.ephemeral_gb) + self.swap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requested_disk_mb_matches_formula() {
        let it = InstanceType {
            id: "1".into(),
            root_gb: 1,
            ephemeral_gb: 1,
            swap: 512,
            memory_mb: 1024,
            vcpus: 1,
            extra_specs: HashMap::new(),
        };
        assert_eq!(it.requested_disk_mb(), 1024 * 2 + 512);
    }
}
