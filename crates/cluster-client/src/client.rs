//! Kube-backed ClusterStateClient implementation.

use crate::cluster_trait::ClusterStateClient;
use crate::error::ClusterError;
use crds::{ClusterNetwork, HostSubnet};
use k8s_openapi::api::core::v1::Service;
use kube::api::{Api, ListParams, PostParams};
use kube::Client;
use tracing::debug;

/// Cluster control plane client backed by the Kubernetes API.
#[derive(Clone)]
pub struct KubeClusterClient {
    cluster_networks: Api<ClusterNetwork>,
    host_subnets: Api<HostSubnet>,
    services: Api<Service>,
}

impl KubeClusterClient {
    /// Creates a client over an established kube connection.
    ///
    /// ClusterNetwork and HostSubnet are cluster-scoped; services are listed
    /// across all namespaces.
    pub fn new(client: Client) -> Self {
        Self {
            cluster_networks: Api::all(client.clone()),
            host_subnets: Api::all(client.clone()),
            services: Api::all(client),
        }
    }
}

#[async_trait::async_trait]
impl ClusterStateClient for KubeClusterClient {
    async fn get_cluster_network(&self, name: &str) -> Result<Option<ClusterNetwork>, ClusterError> {
        // get_opt maps only an explicit 404 to None; everything else is fatal
        let cn = self.cluster_networks.get_opt(name).await?;
        debug!(
            "Fetched ClusterNetwork {}: {}",
            name,
            if cn.is_some() { "found" } else { "not found" }
        );
        Ok(cn)
    }

    async fn create_cluster_network(&self, cn: &ClusterNetwork) -> Result<ClusterNetwork, ClusterError> {
        Ok(self.cluster_networks.create(&PostParams::default(), cn).await?)
    }

    async fn update_cluster_network(&self, cn: &ClusterNetwork) -> Result<ClusterNetwork, ClusterError> {
        let name = cn
            .metadata
            .name
            .as_deref()
            .ok_or_else(|| ClusterError::Api("ClusterNetwork missing name".to_string()))?;
        Ok(self
            .cluster_networks
            .replace(name, &PostParams::default(), cn)
            .await?)
    }

    async fn list_host_subnets(&self) -> Result<Vec<HostSubnet>, ClusterError> {
        let subnets = self.host_subnets.list(&ListParams::default()).await?;
        Ok(subnets.items)
    }

    async fn list_service_ips(&self) -> Result<Vec<String>, ClusterError> {
        let services = self.services.list(&ListParams::default()).await?;
        Ok(services
            .items
            .into_iter()
            .filter_map(|svc| svc.spec.and_then(|spec| spec.cluster_ip))
            .collect())
    }
}
