//! Validation violation aggregation.
//!
//! A reconciliation that fails validation reports every incompatible object in
//! one shot, so an operator changing the network configuration sees the whole
//! problem instead of discovering it one error at a time.

use ipnet::Ipv4Net;
use std::fmt;
use std::net::IpAddr;

/// A single validation violation found while checking the desired network
/// configuration against local host networks or the live fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A local host network overlaps the candidate cluster network
    HostNetworkConflict {
        interface: String,
        host_network: Ipv4Net,
        cluster_network: Ipv4Net,
    },

    /// A HostSubnet record carries an unparsable subnet CIDR
    SubnetParseFailure { subnet: String },

    /// A HostSubnet lies outside the candidate cluster network
    SubnetOutsideClusterNetwork {
        subnet: String,
        cluster_network: Ipv4Net,
    },

    /// A service ClusterIP lies outside the candidate service network
    ServiceOutsideServiceNetwork {
        cluster_ip: IpAddr,
        service_network: Ipv4Net,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::HostNetworkConflict {
                interface,
                host_network,
                cluster_network,
            } => write!(
                f,
                "cluster network: {cluster_network} conflicts with host network: {host_network} on interface: {interface}"
            ),
            Violation::SubnetParseFailure { subnet } => {
                write!(f, "failed to parse network address: {subnet}")
            }
            Violation::SubnetOutsideClusterNetwork {
                subnet,
                cluster_network,
            } => write!(
                f,
                "existing node subnet: {subnet} is not part of cluster network: {cluster_network}"
            ),
            Violation::ServiceOutsideServiceNetwork {
                cluster_ip,
                service_network,
            } => write!(
                f,
                "existing service with IP: {cluster_ip} is not part of service network: {service_network}"
            ),
        }
    }
}

/// Order-preserving aggregate of validation violations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[allow(dead_code)] // Exercised by tests inspecting individual violations
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} violation(s): ", self.0.len())?;
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{violation}")?;
        }
        write!(f, "]")
    }
}

impl From<Vec<Violation>> for Violations {
    fn from(violations: Vec<Violation>) -> Self {
        Self(violations)
    }
}
