//! Local host network enumeration.
//!
//! The reconciler checks the candidate cluster network against the networks
//! already configured on the local host, excluding the overlay device itself.
//! Enumeration sits behind a trait so tests can supply a fixed set.

use crate::error::MasterError;
use ipnet::Ipv4Net;
use nix::ifaddrs::getifaddrs;

/// Name of the overlay/tunnel device the data plane uses; its addresses
/// belong to the cluster network and must not count as conflicts.
pub const OVERLAY_DEVICE: &str = "tun0";

/// Read-only enumeration of the host's configured IPv4 networks.
pub trait LocalNetworks: Send + Sync {
    /// Return every (interface name, network) pair configured on the host,
    /// skipping loopback and any interface named in `exclude`.
    fn host_networks(&self, exclude: &[&str]) -> Result<Vec<(String, Ipv4Net)>, MasterError>;
}

/// Production implementation backed by getifaddrs.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostInterfaces;

impl LocalNetworks for HostInterfaces {
    fn host_networks(&self, exclude: &[&str]) -> Result<Vec<(String, Ipv4Net)>, MasterError> {
        let addrs = getifaddrs().map_err(|e| MasterError::HostNetworks(e.to_string()))?;

        let mut networks = Vec::new();
        for ifaddr in addrs {
            if exclude.contains(&ifaddr.interface_name.as_str()) {
                continue;
            }
            // Only IPv4 addresses with a netmask are of interest
            let Some(addr) = ifaddr.address.as_ref().and_then(|a| a.as_sockaddr_in()) else {
                continue;
            };
            let Some(mask) = ifaddr.netmask.as_ref().and_then(|m| m.as_sockaddr_in()) else {
                continue;
            };
            let ip = addr.ip();
            if ip.is_loopback() {
                continue;
            }
            let network = Ipv4Net::with_netmask(ip, mask.ip())
                .map_err(|e| {
                    MasterError::HostNetworks(format!(
                        "interface {} has invalid netmask: {e}",
                        ifaddr.interface_name
                    ))
                })?
                .trunc();
            networks.push((ifaddr.interface_name, network));
        }
        Ok(networks)
    }
}
