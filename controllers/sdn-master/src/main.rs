//! SDN Master Controller
//!
//! Master-side bootstrap for the cluster SDN control plane:
//! - validates the desired cluster/service network configuration against the
//!   live fleet (existing HostSubnets, service ClusterIPs, local host networks)
//! - idempotently creates or updates the cluster-wide ClusterNetwork record
//! - starts subnet allocation and, for isolating plugins, VNID tracking
//!
//! The bootstrap runs once to completion; retry belongs to the supervisor
//! restarting the process.

mod bootstrap;
mod config;
mod error;
mod local_networks;
mod master;
mod network_info;
mod plugin;
mod reconciler;
mod subnet;
mod vnid;
mod violations;

#[cfg(test)]
mod test_utils;

use crate::config::MasterNetworkConfig;
use crate::error::MasterError;
use crate::local_networks::HostInterfaces;
use crate::master::start_master;
use crate::subnet::SubnetMaster;
use crate::vnid::VnidTracker;
use cluster_client::KubeClusterClient;
use kube::Client;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), MasterError> {
    tracing_subscriber::fmt::init();

    info!("Starting SDN Master Controller");

    // Load configuration from environment variables
    let config = MasterNetworkConfig::from_env()?;

    info!("Configuration:");
    info!("  Cluster network: {}", config.cluster_network_cidr);
    info!("  Service network: {}", config.service_network_cidr);
    info!("  Host subnet length: {}", config.host_subnet_length);
    info!("  Network plugin: {}", config.plugin_name);

    let kube_client = Client::try_default()
        .await
        .map_err(cluster_client::ClusterError::from)?;
    let client = Arc::new(KubeClusterClient::new(kube_client));

    let subnet_allocation = Arc::new(SubnetMaster::new(client.clone()));
    let vnid_tracking = Arc::new(VnidTracker::new());

    let master = start_master(
        &config,
        client,
        Arc::new(HostInterfaces),
        subnet_allocation,
        vnid_tracking,
    )
    .await?;

    match master {
        Some(_) => info!("SDN master bootstrap complete"),
        None => info!(
            "Plugin {} is not managed by this master, nothing to do",
            config.plugin_name
        ),
    }

    Ok(())
}
