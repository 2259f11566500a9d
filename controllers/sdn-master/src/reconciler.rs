//! ClusterNetwork record reconciliation.
//!
//! Fetches the persisted ClusterNetwork record, diffs it against the desired
//! configuration, validates a create/update against local host networks and
//! the live fleet, and persists the result. An identical record is a no-op
//! that performs zero validation and zero writes, so restarting the master
//! against an unchanged configuration costs one fetch.

use crate::error::MasterError;
use crate::local_networks::{LocalNetworks, OVERLAY_DEVICE};
use crate::network_info::NetworkInfo;
use crate::violations::{Violation, Violations};
use cluster_client::ClusterStateClient;
use crds::{cluster_network_to_string, ClusterNetwork, ClusterNetworkSpec, CLUSTER_NETWORK_DEFAULT};
use ipnet::Ipv4Net;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, info};

/// How a reconciliation attempt converged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Persisted record already matches the desired configuration
    NoOp,
    /// No record existed; one was created after validation
    Created,
    /// Record existed with differing fields; it was replaced after validation
    Updated,
}

/// Reconciles the cluster-wide ClusterNetwork record.
pub struct Reconciler {
    client: Arc<dyn ClusterStateClient>,
    local_networks: Arc<dyn LocalNetworks>,
    overlay_device: String,
}

impl Reconciler {
    /// Creates a new reconciler instance.
    pub fn new(client: Arc<dyn ClusterStateClient>, local_networks: Arc<dyn LocalNetworks>) -> Self {
        Self {
            client,
            local_networks,
            overlay_device: OVERLAY_DEVICE.to_string(),
        }
    }

    /// Converge the persisted ClusterNetwork record toward `desired`.
    ///
    /// Validation (local host networks, then the fleet) runs only when a
    /// create or update is actually needed; a validation failure aborts
    /// before any write, leaving the persisted record untouched.
    pub async fn reconcile(
        &self,
        desired: &ClusterNetworkSpec,
        network_info: &NetworkInfo,
    ) -> Result<ReconcileOutcome, MasterError> {
        let existing = self
            .client
            .get_cluster_network(CLUSTER_NETWORK_DEFAULT)
            .await?;

        let (mut record, outcome) = match existing {
            Some(cn) => {
                if !spec_differs(&cn.spec, desired) {
                    debug!("ClusterNetwork {} is up to date", CLUSTER_NETWORK_DEFAULT);
                    return Ok(ReconcileOutcome::NoOp);
                }
                (cn, ReconcileOutcome::Updated)
            }
            None => (
                ClusterNetwork::new(CLUSTER_NETWORK_DEFAULT, desired.clone()),
                ReconcileOutcome::Created,
            ),
        };

        self.check_against_local_networks(network_info)?;
        self.check_against_cluster_objects(network_info).await?;

        record.spec = desired.clone();
        match outcome {
            ReconcileOutcome::Created => {
                let created = self.client.create_cluster_network(&record).await?;
                info!(
                    "Created ClusterNetwork {}",
                    cluster_network_to_string(&created.spec)
                );
            }
            ReconcileOutcome::Updated => {
                let updated = self.client.update_cluster_network(&record).await?;
                info!(
                    "Updated ClusterNetwork {}",
                    cluster_network_to_string(&updated.spec)
                );
            }
            ReconcileOutcome::NoOp => {}
        }

        Ok(outcome)
    }

    /// Verify the candidate cluster network against the host's configured
    /// networks, excluding the overlay device.
    fn check_against_local_networks(&self, network_info: &NetworkInfo) -> Result<(), MasterError> {
        let host_networks = self
            .local_networks
            .host_networks(&[self.overlay_device.as_str()])?;
        let violations = network_info.check_host_networks(&host_networks);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(MasterError::Conflict(violations))
        }
    }

    /// Full-scan audit of the fleet: every HostSubnet must lie inside the
    /// cluster network, every service ClusterIP inside the service network.
    /// All violations are collected; nothing aborts the scan early.
    async fn check_against_cluster_objects(
        &self,
        network_info: &NetworkInfo,
    ) -> Result<(), MasterError> {
        let mut violations = Violations::new();

        let subnets = self.client.list_host_subnets().await?;
        for subnet in &subnets {
            match subnet.spec.subnet.parse::<Ipv4Net>() {
                Err(_) => violations.push(Violation::SubnetParseFailure {
                    subnet: subnet.spec.subnet.clone(),
                }),
                Ok(net) if !network_info.cluster_network.contains(&net.addr()) => {
                    violations.push(Violation::SubnetOutsideClusterNetwork {
                        subnet: subnet.spec.subnet.clone(),
                        cluster_network: network_info.cluster_network,
                    });
                }
                Ok(_) => {}
            }
        }

        let service_ips = self.client.list_service_ips().await?;
        for ip in &service_ips {
            // Headless services carry "None"; unset and unparsable entries
            // are skipped, everything else must land in the service network
            if ip.is_empty() || ip == "None" {
                continue;
            }
            let Ok(addr) = ip.parse::<IpAddr>() else {
                continue;
            };
            let in_range = match addr {
                IpAddr::V4(v4) => network_info.service_network.contains(&v4),
                IpAddr::V6(_) => false,
            };
            if !in_range {
                violations.push(Violation::ServiceOutsideServiceNetwork {
                    cluster_ip: addr,
                    service_network: network_info.service_network,
                });
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(MasterError::Conflict(violations))
        }
    }
}

/// Field-by-field diff of the persisted spec against the desired one.
fn spec_differs(existing: &ClusterNetworkSpec, desired: &ClusterNetworkSpec) -> bool {
    if existing.network != desired.network {
        debug!(
            "ClusterNetwork network changed: '{}' -> '{}'",
            existing.network, desired.network
        );
        return true;
    }
    if existing.host_subnet_length != desired.host_subnet_length {
        debug!(
            "ClusterNetwork hostSubnetLength changed: {} -> {}",
            existing.host_subnet_length, desired.host_subnet_length
        );
        return true;
    }
    if existing.service_network != desired.service_network {
        debug!(
            "ClusterNetwork serviceNetwork changed: '{}' -> '{}'",
            existing.service_network, desired.service_network
        );
        return true;
    }
    if existing.plugin_name != desired.plugin_name {
        debug!(
            "ClusterNetwork pluginName changed: '{}' -> '{}'",
            existing.plugin_name, desired.plugin_name
        );
        return true;
    }
    false
}
