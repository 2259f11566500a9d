//! Cluster control plane access layer
//!
//! Wraps the Kubernetes API operations the SDN master needs: fetch/create/
//! update of the ClusterNetwork record, and full listings of HostSubnets and
//! service ClusterIPs. The [`ClusterStateClient`] trait abstracts the concrete
//! kube-backed client so reconciliation logic can be unit tested against
//! [`MockClusterClient`] (enabled with the `test-util` feature).

pub mod client;
pub mod error;
#[cfg(feature = "test-util")]
pub mod mock;
#[path = "trait.rs"]
pub mod cluster_trait;

pub use client::KubeClusterClient;
pub use cluster_trait::ClusterStateClient;
pub use error::ClusterError;
#[cfg(feature = "test-util")]
pub use mock::{CallCounts, MockClusterClient};
