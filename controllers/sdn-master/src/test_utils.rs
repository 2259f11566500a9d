//! Test utilities for unit testing the master bootstrap
//!
//! This module provides helpers for creating test data and recording test
//! doubles for the collaborator boundaries.

use crate::bootstrap::{SubnetAllocation, VnidTracking};
use crate::config::MasterNetworkConfig;
use crate::error::MasterError;
use crate::local_networks::LocalNetworks;
use ipnet::Ipv4Net;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::sync::Mutex;

use crds::{ClusterNetwork, ClusterNetworkSpec, HostSubnet, HostSubnetSpec, CLUSTER_NETWORK_DEFAULT};

/// Helper to create the desired spec used across scenarios
pub fn desired_spec(
    network: &str,
    host_subnet_length: u32,
    service_network: &str,
    plugin_name: &str,
) -> ClusterNetworkSpec {
    ClusterNetworkSpec {
        network: network.to_string(),
        host_subnet_length,
        service_network: service_network.to_string(),
        plugin_name: plugin_name.to_string(),
    }
}

/// Helper to create a persisted ClusterNetwork record under the well-known name
pub fn stored_record(spec: ClusterNetworkSpec) -> ClusterNetwork {
    ClusterNetwork {
        metadata: ObjectMeta {
            name: Some(CLUSTER_NETWORK_DEFAULT.to_string()),
            ..Default::default()
        },
        spec,
    }
}

/// Helper to create a HostSubnet record
pub fn host_subnet(host: &str, host_ip: &str, subnet: &str) -> HostSubnet {
    HostSubnet {
        metadata: ObjectMeta {
            name: Some(host.to_string()),
            ..Default::default()
        },
        spec: HostSubnetSpec {
            host: host.to_string(),
            host_ip: host_ip.to_string(),
            subnet: subnet.to_string(),
        },
    }
}

/// Helper to create a master configuration
pub fn master_config(
    cluster_cidr: &str,
    service_cidr: &str,
    host_subnet_length: u32,
    plugin_name: &str,
) -> MasterNetworkConfig {
    MasterNetworkConfig {
        cluster_network_cidr: cluster_cidr.to_string(),
        service_network_cidr: service_cidr.to_string(),
        host_subnet_length,
        plugin_name: plugin_name.to_string(),
    }
}

/// LocalNetworks double returning a fixed set of host networks
#[derive(Debug, Default)]
pub struct StaticLocalNetworks {
    networks: Vec<(String, Ipv4Net)>,
}

impl StaticLocalNetworks {
    pub fn new(networks: Vec<(&str, &str)>) -> Self {
        Self {
            networks: networks
                .into_iter()
                .map(|(name, cidr)| (name.to_string(), cidr.parse().unwrap()))
                .collect(),
        }
    }
}

impl LocalNetworks for StaticLocalNetworks {
    fn host_networks(&self, exclude: &[&str]) -> Result<Vec<(String, Ipv4Net)>, MasterError> {
        Ok(self
            .networks
            .iter()
            .filter(|(name, _)| !exclude.contains(&name.as_str()))
            .cloned()
            .collect())
    }
}

/// SubnetAllocation double recording every start call
#[derive(Debug, Default)]
pub struct RecordingSubnetAllocation {
    pub starts: Mutex<Vec<(Ipv4Net, u32)>>,
    pub fail: bool,
}

impl RecordingSubnetAllocation {
    pub fn failing() -> Self {
        Self {
            starts: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

#[async_trait::async_trait]
impl SubnetAllocation for RecordingSubnetAllocation {
    async fn start(
        &self,
        cluster_network: Ipv4Net,
        host_subnet_length: u32,
    ) -> Result<(), MasterError> {
        self.starts
            .lock()
            .unwrap()
            .push((cluster_network, host_subnet_length));
        if self.fail {
            return Err(MasterError::Bootstrap(
                "injected subnet bootstrap failure".to_string(),
            ));
        }
        Ok(())
    }
}

/// VnidTracking double recording every start call
#[derive(Debug, Default)]
pub struct RecordingVnidTracking {
    pub starts: Mutex<Vec<bool>>,
}

#[async_trait::async_trait]
impl VnidTracking for RecordingVnidTracking {
    async fn start(&self, multitenant: bool) -> Result<(), MasterError> {
        self.starts.lock().unwrap().push(multitenant);
        Ok(())
    }
}
