//! Downstream bootstrap boundaries.
//!
//! Once the ClusterNetwork record is consistent, the master hands the
//! validated address-space parameters to two downstream subsystems. Each
//! either succeeds or returns a fatal error that aborts master startup.

use crate::error::MasterError;
use ipnet::Ipv4Net;

/// Starts per-node subnet allocation for a validated cluster network.
#[async_trait::async_trait]
pub trait SubnetAllocation: Send + Sync {
    async fn start(
        &self,
        cluster_network: Ipv4Net,
        host_subnet_length: u32,
    ) -> Result<(), MasterError>;
}

/// Starts per-namespace VNID tracking.
///
/// `multitenant = true` assigns a distinct VNID per tenant; `false` runs the
/// shared/global VNID used by network-policy isolation.
#[async_trait::async_trait]
pub trait VnidTracking: Send + Sync {
    async fn start(&self, multitenant: bool) -> Result<(), MasterError>;
}
