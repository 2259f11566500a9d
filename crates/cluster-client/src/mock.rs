//! Mock ClusterStateClient for unit testing
//!
//! In-memory implementation of [`ClusterStateClient`]. Stores the
//! ClusterNetwork record, HostSubnets, and service ClusterIPs in memory,
//! counts every call, and can be configured to fail individual operations so
//! tests can exercise transport error paths.

use crate::cluster_trait::ClusterStateClient;
use crate::error::ClusterError;
use crds::{ClusterNetwork, HostSubnet};
use std::sync::{Arc, Mutex};

/// Per-operation call counters, for asserting on persistence behavior.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CallCounts {
    pub get: usize,
    pub create: usize,
    pub update: usize,
    pub list_host_subnets: usize,
    pub list_service_ips: usize,
}

/// Mock cluster control plane for testing
#[derive(Clone, Default)]
pub struct MockClusterClient {
    cluster_network: Arc<Mutex<Option<ClusterNetwork>>>,
    host_subnets: Arc<Mutex<Vec<HostSubnet>>>,
    service_ips: Arc<Mutex<Vec<String>>>,
    counts: Arc<Mutex<CallCounts>>,
    fail_get: Arc<Mutex<bool>>,
    fail_persist: Arc<Mutex<bool>>,
    fail_list: Arc<Mutex<bool>>,
}

impl MockClusterClient {
    /// Create an empty mock (no record, empty fleet)
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the persisted ClusterNetwork record (for test setup)
    pub fn set_cluster_network(&self, cn: ClusterNetwork) {
        *self.cluster_network.lock().unwrap() = Some(cn);
    }

    /// Add a HostSubnet to the fleet (for test setup)
    pub fn add_host_subnet(&self, subnet: HostSubnet) {
        self.host_subnets.lock().unwrap().push(subnet);
    }

    /// Add a service ClusterIP to the fleet (for test setup)
    pub fn add_service_ip(&self, ip: impl Into<String>) {
        self.service_ips.lock().unwrap().push(ip.into());
    }

    /// Make `get_cluster_network` fail with a transport error
    pub fn fail_get(&self, fail: bool) {
        *self.fail_get.lock().unwrap() = fail;
    }

    /// Make create/update fail with a transport error
    pub fn fail_persist(&self, fail: bool) {
        *self.fail_persist.lock().unwrap() = fail;
    }

    /// Make the HostSubnet/service listings fail with a transport error
    pub fn fail_list(&self, fail: bool) {
        *self.fail_list.lock().unwrap() = fail;
    }

    /// Snapshot of the call counters
    pub fn call_counts(&self) -> CallCounts {
        *self.counts.lock().unwrap()
    }

    /// The currently stored ClusterNetwork record, if any
    pub fn stored_cluster_network(&self) -> Option<ClusterNetwork> {
        self.cluster_network.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ClusterStateClient for MockClusterClient {
    async fn get_cluster_network(&self, _name: &str) -> Result<Option<ClusterNetwork>, ClusterError> {
        self.counts.lock().unwrap().get += 1;
        if *self.fail_get.lock().unwrap() {
            return Err(ClusterError::Api("injected get failure".to_string()));
        }
        Ok(self.cluster_network.lock().unwrap().clone())
    }

    async fn create_cluster_network(&self, cn: &ClusterNetwork) -> Result<ClusterNetwork, ClusterError> {
        self.counts.lock().unwrap().create += 1;
        if *self.fail_persist.lock().unwrap() {
            return Err(ClusterError::Api("injected create failure".to_string()));
        }
        let mut stored = self.cluster_network.lock().unwrap();
        if stored.is_some() {
            return Err(ClusterError::Api("ClusterNetwork already exists".to_string()));
        }
        *stored = Some(cn.clone());
        Ok(cn.clone())
    }

    async fn update_cluster_network(&self, cn: &ClusterNetwork) -> Result<ClusterNetwork, ClusterError> {
        self.counts.lock().unwrap().update += 1;
        if *self.fail_persist.lock().unwrap() {
            return Err(ClusterError::Api("injected update failure".to_string()));
        }
        let mut stored = self.cluster_network.lock().unwrap();
        if stored.is_none() {
            return Err(ClusterError::Api("ClusterNetwork does not exist".to_string()));
        }
        *stored = Some(cn.clone());
        Ok(cn.clone())
    }

    async fn list_host_subnets(&self) -> Result<Vec<HostSubnet>, ClusterError> {
        self.counts.lock().unwrap().list_host_subnets += 1;
        if *self.fail_list.lock().unwrap() {
            return Err(ClusterError::Api("injected list failure".to_string()));
        }
        Ok(self.host_subnets.lock().unwrap().clone())
    }

    async fn list_service_ips(&self) -> Result<Vec<String>, ClusterError> {
        self.counts.lock().unwrap().list_service_ips += 1;
        if *self.fail_list.lock().unwrap() {
            return Err(ClusterError::Api("injected list failure".to_string()));
        }
        Ok(self.service_ips.lock().unwrap().clone())
    }
}
