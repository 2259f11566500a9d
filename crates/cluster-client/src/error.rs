//! Cluster client errors

use thiserror::Error;

/// Errors that can occur when talking to the cluster control plane
#[derive(Debug, Error)]
pub enum ClusterError {
    /// Kubernetes API transport or server error
    #[error("Kubernetes error: {0}")]
    Kube(#[from] kube::Error),

    /// Control plane returned something the client cannot use
    #[error("cluster API error: {0}")]
    Api(String),
}
