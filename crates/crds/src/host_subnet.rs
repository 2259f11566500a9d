//! HostSubnet CRD
//!
//! One record per cluster node, describing the slice of the cluster network
//! allocated to that node. The SDN master reconciler only reads these; the
//! subnet allocator owns their lifecycle.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "sdn.microscaler.io",
    version = "v1alpha1",
    kind = "HostSubnet"
)]
#[serde(rename_all = "camelCase")]
pub struct HostSubnetSpec {
    /// Name of the owning node
    pub host: String,

    /// IP address of the owning node
    #[serde(rename = "hostIP")]
    pub host_ip: String,

    /// CIDR allocated to the node, carved from the cluster network
    pub subnet: String,
}
