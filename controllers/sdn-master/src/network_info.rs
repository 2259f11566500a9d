//! Parsed, validated view of the cluster address space.

use crate::error::MasterError;
use crate::violations::{Violation, Violations};
use ipnet::Ipv4Net;

/// Validated cluster and service network pair.
///
/// Constructed once per reconciliation attempt from the raw configuration
/// strings; immutable afterwards. The two networks are guaranteed not to
/// overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInfo {
    pub cluster_network: Ipv4Net,
    pub service_network: Ipv4Net,
}

impl NetworkInfo {
    /// Parse and validate the two configured CIDRs.
    ///
    /// Fails if either string does not parse, either prefix is /0, or the
    /// networks overlap in either direction. Host bits are truncated, so
    /// `10.128.0.1/14` normalizes to `10.128.0.0/14`.
    pub fn parse(cluster_cidr: &str, service_cidr: &str) -> Result<Self, MasterError> {
        let cluster_network = parse_cidr(cluster_cidr, "cluster network")?;
        let service_network = parse_cidr(service_cidr, "service network")?;

        if cluster_network.contains(&service_network) || service_network.contains(&cluster_network)
        {
            return Err(MasterError::Config(format!(
                "cluster network {cluster_network} and service network {service_network} overlap"
            )));
        }

        Ok(Self {
            cluster_network,
            service_network,
        })
    }

    /// Check the candidate cluster network against local host networks,
    /// collecting every conflicting (interface, network) pair.
    pub fn check_host_networks(&self, host_networks: &[(String, Ipv4Net)]) -> Violations {
        let mut violations = Violations::new();
        for (interface, host_network) in host_networks {
            if self.cluster_network.contains(host_network)
                || host_network.contains(&self.cluster_network)
            {
                violations.push(Violation::HostNetworkConflict {
                    interface: interface.clone(),
                    host_network: *host_network,
                    cluster_network: self.cluster_network,
                });
            }
        }
        violations
    }
}

fn parse_cidr(cidr: &str, which: &str) -> Result<Ipv4Net, MasterError> {
    let net = cidr
        .parse::<Ipv4Net>()
        .map_err(|e| MasterError::Config(format!("failed to parse {which} CIDR {cidr}: {e}")))?
        .trunc();
    if net.prefix_len() == 0 {
        return Err(MasterError::Config(format!(
            "{which} CIDR {cidr} is degenerate (zero-length prefix)"
        )));
    }
    Ok(net)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_non_overlapping_pair_parses() {
        let ni = NetworkInfo::parse("10.128.0.0/14", "172.30.0.0/16").unwrap();
        assert_eq!(ni.cluster_network, "10.128.0.0/14".parse::<Ipv4Net>().unwrap());
        assert_eq!(ni.service_network, "172.30.0.0/16".parse::<Ipv4Net>().unwrap());
    }

    #[test]
    fn host_bits_are_truncated() {
        let ni = NetworkInfo::parse("10.128.0.1/14", "172.30.0.5/16").unwrap();
        assert_eq!(ni.cluster_network.to_string(), "10.128.0.0/14");
        assert_eq!(ni.service_network.to_string(), "172.30.0.0/16");
    }

    #[test]
    fn overlapping_pair_is_rejected() {
        // service inside cluster
        let err = NetworkInfo::parse("10.128.0.0/14", "10.130.0.0/16").unwrap_err();
        assert!(matches!(err, MasterError::Config(_)));
        // cluster inside service
        let err = NetworkInfo::parse("10.128.0.0/16", "10.128.0.0/14").unwrap_err();
        assert!(matches!(err, MasterError::Config(_)));
        // identical
        let err = NetworkInfo::parse("10.128.0.0/14", "10.128.0.0/14").unwrap_err();
        assert!(matches!(err, MasterError::Config(_)));
    }

    #[test]
    fn unparsable_cidr_is_rejected() {
        assert!(matches!(
            NetworkInfo::parse("not-a-cidr", "172.30.0.0/16"),
            Err(MasterError::Config(_))
        ));
        assert!(matches!(
            NetworkInfo::parse("10.128.0.0/14", "172.30.0.0"),
            Err(MasterError::Config(_))
        ));
    }

    #[test]
    fn degenerate_prefix_is_rejected() {
        assert!(matches!(
            NetworkInfo::parse("0.0.0.0/0", "172.30.0.0/16"),
            Err(MasterError::Config(_))
        ));
    }

    #[test]
    fn host_network_conflicts_are_aggregated() {
        let ni = NetworkInfo::parse("10.128.0.0/14", "172.30.0.0/16").unwrap();
        let host_networks = vec![
            ("eth0".to_string(), "192.168.1.0/24".parse().unwrap()),
            ("eth1".to_string(), "10.130.0.0/16".parse().unwrap()),
            ("eth2".to_string(), "10.0.0.0/8".parse().unwrap()),
        ];
        let violations = ni.check_host_networks(&host_networks);
        assert_eq!(violations.len(), 2);
        let rendered = violations.to_string();
        assert!(rendered.contains("eth1"));
        assert!(rendered.contains("eth2"));
        assert!(!rendered.contains("eth0"));
    }
}
