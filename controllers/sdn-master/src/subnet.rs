//! Subnet allocation bootstrap.
//!
//! First-fit allocator for node subnets carved from the cluster network.
//! The master seeds it with every existing HostSubnet at startup; the node
//! controller draws from it afterwards.

use crate::bootstrap::SubnetAllocation;
use crate::error::MasterError;
use cluster_client::ClusterStateClient;
use ipnet::Ipv4Net;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tracing::info;

/// First-fit CIDR allocator over a fixed address space.
///
/// All blocks share one prefix length (32 - hostSubnetLength). Allocated
/// blocks are keyed by network address so the first free gap is found in
/// order.
#[derive(Debug, Clone)]
pub struct SubnetAllocator {
    address_space: Ipv4Net,
    node_prefix_len: u8,
    allocated: BTreeMap<u32, Ipv4Net>,
}

impl SubnetAllocator {
    /// Create an allocator handing out blocks of `32 - host_subnet_length`
    /// bits from `address_space`.
    pub fn new(address_space: Ipv4Net, host_subnet_length: u32) -> Result<Self, MasterError> {
        if host_subnet_length < 2 {
            return Err(MasterError::Bootstrap(format!(
                "host subnet length {host_subnet_length} is too small"
            )));
        }
        if host_subnet_length > 32 - u32::from(address_space.prefix_len()) {
            return Err(MasterError::Bootstrap(format!(
                "host subnet length {host_subnet_length} is too large for cluster network {address_space}"
            )));
        }
        Ok(Self {
            address_space,
            node_prefix_len: (32 - host_subnet_length) as u8,
            allocated: BTreeMap::new(),
        })
    }

    /// Mark an existing subnet as in use.
    pub fn reserve(&mut self, subnet: Ipv4Net) -> Result<(), MasterError> {
        if !self.address_space.contains(&subnet) {
            return Err(MasterError::Bootstrap(format!(
                "subnet {subnet} is outside cluster network {}",
                self.address_space
            )));
        }
        if self.overlaps(&subnet) {
            return Err(MasterError::Bootstrap(format!(
                "subnet {subnet} overlaps an already allocated subnet"
            )));
        }
        self.allocated.insert(u32::from(subnet.network()), subnet);
        Ok(())
    }

    /// Hand out the first free block, or `None` when the space is exhausted.
    #[allow(dead_code)] // Reserved for the node controller
    pub fn allocate(&mut self) -> Option<Ipv4Net> {
        let candidates = self.address_space.subnets(self.node_prefix_len).ok()?;
        for candidate in candidates {
            if !self.overlaps(&candidate) {
                self.allocated
                    .insert(u32::from(candidate.network()), candidate);
                return Some(candidate);
            }
        }
        None
    }

    /// Release a previously reserved block.
    #[allow(dead_code)] // Reserved for the node controller
    pub fn release(&mut self, subnet: &Ipv4Net) {
        self.allocated.remove(&u32::from(subnet.network()));
    }

    fn overlaps(&self, subnet: &Ipv4Net) -> bool {
        self.allocated
            .values()
            .any(|a| a.contains(subnet) || subnet.contains(a))
    }
}

/// Production [`SubnetAllocation`] bootstrap: builds the allocator and seeds
/// it with every HostSubnet already present in the cluster.
pub struct SubnetMaster {
    client: Arc<dyn ClusterStateClient>,
    allocator: Mutex<Option<SubnetAllocator>>,
}

impl SubnetMaster {
    pub fn new(client: Arc<dyn ClusterStateClient>) -> Self {
        Self {
            client,
            allocator: Mutex::new(None),
        }
    }

    /// Run a closure against the live allocator, once started.
    #[allow(dead_code)] // Reserved for the node controller
    pub fn with_allocator<R>(
        &self,
        f: impl FnOnce(&mut SubnetAllocator) -> R,
    ) -> Option<R> {
        match self.allocator.lock() {
            Ok(mut guard) => guard.as_mut().map(f),
            Err(_) => None,
        }
    }
}

#[async_trait::async_trait]
impl SubnetAllocation for SubnetMaster {
    async fn start(
        &self,
        cluster_network: Ipv4Net,
        host_subnet_length: u32,
    ) -> Result<(), MasterError> {
        let mut allocator = SubnetAllocator::new(cluster_network, host_subnet_length)?;

        let subnets = self
            .client
            .list_host_subnets()
            .await
            .map_err(|e| MasterError::Bootstrap(format!("failed to fetch host subnets: {e}")))?;
        for subnet in &subnets {
            let net = subnet.spec.subnet.parse::<Ipv4Net>().map_err(|e| {
                MasterError::Bootstrap(format!(
                    "HostSubnet for node {} has invalid subnet {}: {e}",
                    subnet.spec.host, subnet.spec.subnet
                ))
            })?;
            allocator.reserve(net.trunc())?;
            info!(
                "Found existing HostSubnet {} for node {}",
                subnet.spec.subnet, subnet.spec.host
            );
        }

        if let Ok(mut guard) = self.allocator.lock() {
            *guard = Some(allocator);
        }
        info!(
            "Started subnet allocation for {} (host subnet length {})",
            cluster_network, host_subnet_length
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space() -> Ipv4Net {
        "10.128.0.0/14".parse().unwrap()
    }

    #[test]
    fn allocates_blocks_in_order() {
        let mut allocator = SubnetAllocator::new(space(), 9).unwrap();
        assert_eq!(allocator.allocate().unwrap().to_string(), "10.128.0.0/23");
        assert_eq!(allocator.allocate().unwrap().to_string(), "10.128.2.0/23");
    }

    #[test]
    fn reserved_blocks_are_skipped() {
        let mut allocator = SubnetAllocator::new(space(), 9).unwrap();
        allocator.reserve("10.128.0.0/23".parse().unwrap()).unwrap();
        assert_eq!(allocator.allocate().unwrap().to_string(), "10.128.2.0/23");
    }

    #[test]
    fn reserve_outside_space_fails() {
        let mut allocator = SubnetAllocator::new(space(), 9).unwrap();
        let err = allocator
            .reserve("192.168.0.0/23".parse().unwrap())
            .unwrap_err();
        assert!(matches!(err, MasterError::Bootstrap(_)));
    }

    #[test]
    fn overlapping_reserve_fails() {
        let mut allocator = SubnetAllocator::new(space(), 9).unwrap();
        allocator.reserve("10.128.0.0/23".parse().unwrap()).unwrap();
        assert!(allocator.reserve("10.128.0.0/24".parse().unwrap()).is_err());
    }

    #[test]
    fn release_makes_block_reusable() {
        let mut allocator = SubnetAllocator::new(space(), 9).unwrap();
        let first = allocator.allocate().unwrap();
        allocator.release(&first);
        assert_eq!(allocator.allocate().unwrap(), first);
    }

    #[test]
    fn host_subnet_length_must_fit() {
        // /14 space leaves 18 host bits; 19 cannot fit
        assert!(SubnetAllocator::new(space(), 19).is_err());
        assert!(SubnetAllocator::new(space(), 18).is_ok());
        assert!(SubnetAllocator::new(space(), 1).is_err());
    }
}
