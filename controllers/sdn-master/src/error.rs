//! Controller-specific error types.
//!
//! Every error surfaces unchanged to the caller of the bootstrap entry point;
//! nothing is swallowed or downgraded to a log line.

use crate::violations::Violations;
use cluster_client::ClusterError;
use thiserror::Error;

/// Errors that can occur in the SDN master bootstrap.
#[derive(Debug, Error)]
pub enum MasterError {
    /// Malformed or overlapping CIDRs in the desired configuration
    #[error("invalid network configuration: {0}")]
    Config(String),

    /// Control plane fetch/list/create/update failed
    #[error(transparent)]
    Cluster(#[from] ClusterError),

    /// One or more local-interface or fleet-containment violations;
    /// carries every violation found, not just the first
    #[error("cluster network validation failed: {0}")]
    Conflict(Violations),

    /// Local host interface enumeration failed
    #[error("failed to enumerate host networks: {0}")]
    HostNetworks(String),

    /// A downstream subnet or VNID bootstrap failed after the record
    /// was already persisted
    #[error("bootstrap failed: {0}")]
    Bootstrap(String),
}
