//! SDN master bootstrap entry point.
//!
//! Invoked once at master startup with the desired configuration: resolves
//! the isolation mode, builds NetworkInfo, converges the ClusterNetwork
//! record, then dispatches the downstream bootstraps. Runs on a single
//! control-flow task with no internal parallelism; a fatal error aborts
//! startup and the supervisor re-invokes the whole sequence.

use crate::bootstrap::{SubnetAllocation, VnidTracking};
use crate::config::MasterNetworkConfig;
use crate::error::MasterError;
use crate::local_networks::LocalNetworks;
use crate::network_info::NetworkInfo;
use crate::plugin::IsolationMode;
use crate::reconciler::Reconciler;
use cluster_client::ClusterStateClient;
use crds::ClusterNetworkSpec;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Long-lived master instance owning the process-wide SDN state.
pub struct SdnMaster {
    client: Arc<dyn ClusterStateClient>,
    network_info: NetworkInfo,
    /// Node IP used when each node's host subnet was created, keyed by node
    /// UID. Populated by downstream node processing, which may run on
    /// separate tasks.
    host_subnet_node_ips: Arc<Mutex<HashMap<String, String>>>,
}

impl SdnMaster {
    fn new(client: Arc<dyn ClusterStateClient>, network_info: NetworkInfo) -> Self {
        Self {
            client,
            network_info,
            host_subnet_node_ips: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The validated address space this master was bootstrapped with.
    #[allow(dead_code)] // Reserved for the node controller
    pub fn network_info(&self) -> &NetworkInfo {
        &self.network_info
    }

    /// Shared handle to the node-IP tracking table.
    #[allow(dead_code)] // Reserved for the node controller
    pub fn host_subnet_node_ips(&self) -> Arc<Mutex<HashMap<String, String>>> {
        Arc::clone(&self.host_subnet_node_ips)
    }

    /// Control plane client shared with downstream subsystems.
    #[allow(dead_code)] // Reserved for the node controller
    pub fn client(&self) -> Arc<dyn ClusterStateClient> {
        Arc::clone(&self.client)
    }
}

// The client is a trait object, so Debug cannot be derived
impl fmt::Debug for SdnMaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SdnMaster")
            .field("network_info", &self.network_info)
            .finish_non_exhaustive()
    }
}

/// Bootstrap the SDN master.
///
/// Returns `Ok(None)` without touching the control plane when the configured
/// plugin is not one this master owns. Otherwise converges the ClusterNetwork
/// record, starts subnet allocation, starts VNID tracking for isolating
/// modes, and returns the live master instance.
pub async fn start_master(
    config: &MasterNetworkConfig,
    client: Arc<dyn ClusterStateClient>,
    local_networks: Arc<dyn LocalNetworks>,
    subnet_allocation: Arc<dyn SubnetAllocation>,
    vnid_tracking: Arc<dyn VnidTracking>,
) -> Result<Option<SdnMaster>, MasterError> {
    let Some(mode) = IsolationMode::parse(&config.plugin_name) else {
        return Ok(None);
    };

    info!("Initializing SDN master of type {:?}", config.plugin_name);

    let network_info =
        NetworkInfo::parse(&config.cluster_network_cidr, &config.service_network_cidr)?;
    let master = SdnMaster::new(Arc::clone(&client), network_info);

    // Persisted record carries the normalized CIDR strings
    let desired = ClusterNetworkSpec {
        network: master.network_info.cluster_network.to_string(),
        host_subnet_length: config.host_subnet_length,
        service_network: master.network_info.service_network.to_string(),
        plugin_name: config.plugin_name.clone(),
    };

    let reconciler = Reconciler::new(client, local_networks);
    let outcome = reconciler.reconcile(&desired, &master.network_info).await?;
    debug!("ClusterNetwork reconciliation outcome: {:?}", outcome);

    subnet_allocation
        .start(
            master.network_info.cluster_network,
            config.host_subnet_length,
        )
        .await?;

    match mode {
        IsolationMode::Multitenant => vnid_tracking.start(true).await?,
        IsolationMode::NetworkPolicy => vnid_tracking.start(false).await?,
        IsolationMode::Subnet => {}
    }

    Ok(Some(master))
}
