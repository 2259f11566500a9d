//! ClusterNetwork CRD
//!
//! The cluster-wide address space record: cluster network CIDR, service
//! network CIDR, per-node host subnet length, and the active plugin name.
//! A single instance exists per cluster under the well-known name
//! [`CLUSTER_NETWORK_DEFAULT`]. It is written exclusively by the SDN master
//! reconciler and read by every subsystem that needs the address space.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Well-known name of the single cluster-wide ClusterNetwork record.
pub const CLUSTER_NETWORK_DEFAULT: &str = "default";

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[kube(
    group = "sdn.microscaler.io",
    version = "v1alpha1",
    kind = "ClusterNetwork"
)]
#[serde(rename_all = "camelCase")]
pub struct ClusterNetworkSpec {
    /// Cluster network CIDR: the address space node subnets are carved from
    pub network: String,

    /// Number of address bits reserved per node host subnet
    /// (a node subnet has prefix length 32 - hostSubnetLength)
    pub host_subnet_length: u32,

    /// Service network CIDR: the address space for service ClusterIPs
    pub service_network: String,

    /// Name of the active SDN plugin / isolation mode
    pub plugin_name: String,
}

/// Compact rendering used in lifecycle log lines.
pub fn cluster_network_to_string(spec: &ClusterNetworkSpec) -> String {
    format!(
        "network: {}, hostSubnetLength: {}, serviceNetwork: {}, pluginName: {}",
        spec.network, spec.host_subnet_length, spec.service_network, spec.plugin_name
    )
}
