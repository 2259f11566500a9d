//! Master network configuration loaded from the environment.

use crate::error::MasterError;
use crate::plugin;
use std::env;

/// Desired network configuration for the SDN master.
#[derive(Debug, Clone)]
pub struct MasterNetworkConfig {
    /// Cluster network CIDR (node subnets are carved from this)
    pub cluster_network_cidr: String,

    /// Service network CIDR (service ClusterIPs live here)
    pub service_network_cidr: String,

    /// Number of address bits reserved per node host subnet
    pub host_subnet_length: u32,

    /// Name of the SDN plugin / isolation mode to run
    pub plugin_name: String,
}

impl MasterNetworkConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, MasterError> {
        let cluster_network_cidr = env::var("SDN_CLUSTER_NETWORK_CIDR")
            .unwrap_or_else(|_| "10.128.0.0/14".to_string());
        let service_network_cidr = env::var("SDN_SERVICE_NETWORK_CIDR")
            .unwrap_or_else(|_| "172.30.0.0/16".to_string());
        let host_subnet_length = env::var("SDN_HOST_SUBNET_LENGTH")
            .unwrap_or_else(|_| "9".to_string())
            .parse::<u32>()
            .map_err(|e| {
                MasterError::Config(format!("SDN_HOST_SUBNET_LENGTH must be an integer: {e}"))
            })?;
        let plugin_name = env::var("SDN_NETWORK_PLUGIN")
            .unwrap_or_else(|_| plugin::SUBNET_PLUGIN_NAME.to_string());

        Ok(Self {
            cluster_network_cidr,
            service_network_cidr,
            host_subnet_length,
            plugin_name,
        })
    }
}
