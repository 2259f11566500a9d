//! ClusterStateClient trait for mocking
//!
//! This trait abstracts the cluster control plane operations the SDN master
//! consumes, so reconciliation logic can be unit tested against a mock.
//! All async methods must be `Send` to work with Tokio's work-stealing runtime.

use crate::error::ClusterError;
use crds::{ClusterNetwork, HostSubnet};

/// Trait for cluster control plane operations
///
/// Every method is a single blocking round trip with no internal retry;
/// retry/backoff belongs to the caller re-invoking the whole bootstrap.
#[async_trait::async_trait]
pub trait ClusterStateClient: Send + Sync {
    /// Fetch the ClusterNetwork record by name.
    ///
    /// Returns `Ok(None)` only for an explicit not-found response; any other
    /// failure is a fatal transport error surfaced unchanged.
    async fn get_cluster_network(&self, name: &str) -> Result<Option<ClusterNetwork>, ClusterError>;

    /// Create the ClusterNetwork record.
    async fn create_cluster_network(&self, cn: &ClusterNetwork) -> Result<ClusterNetwork, ClusterError>;

    /// Update (replace) the ClusterNetwork record.
    async fn update_cluster_network(&self, cn: &ClusterNetwork) -> Result<ClusterNetwork, ClusterError>;

    /// List every HostSubnet record in the cluster.
    async fn list_host_subnets(&self) -> Result<Vec<HostSubnet>, ClusterError>;

    /// List the ClusterIP of every service across all namespaces.
    ///
    /// Headless services surface as `"None"`; the caller decides what to do
    /// with unparsable entries.
    async fn list_service_ips(&self) -> Result<Vec<String>, ClusterError>;
}
