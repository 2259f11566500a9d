//! VNID tracking bootstrap.
//!
//! Tenant namespaces are segregated at the data plane by virtual network IDs.
//! Multitenant mode assigns a distinct VNID per namespace; network-policy
//! mode runs everything under the shared global VNID and isolates with
//! policy rules instead.

use crate::bootstrap::VnidTracking;
use crate::error::MasterError;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::info;

/// VNID of the default, non-isolated global network.
pub const GLOBAL_VNID: u32 = 0;

/// First VNID handed out to tenant namespaces.
const MIN_VNID: u32 = 10;

/// Master-side VNID assignment table.
#[derive(Debug)]
pub struct VnidMap {
    multitenant: bool,
    ids: HashMap<String, u32>,
    next_id: u32,
}

impl VnidMap {
    fn new(multitenant: bool) -> Self {
        Self {
            multitenant,
            ids: HashMap::new(),
            next_id: MIN_VNID,
        }
    }

    /// VNID for a namespace, assigning one on first sight.
    ///
    /// In shared mode every namespace maps to [`GLOBAL_VNID`].
    #[allow(dead_code)] // Reserved for the namespace controller
    pub fn assign(&mut self, namespace: &str) -> u32 {
        if !self.multitenant {
            return GLOBAL_VNID;
        }
        if let Some(id) = self.ids.get(namespace) {
            return *id;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.ids.insert(namespace.to_string(), id);
        id
    }

    #[allow(dead_code)] // Reserved for the namespace controller
    pub fn get(&self, namespace: &str) -> Option<u32> {
        if self.multitenant {
            self.ids.get(namespace).copied()
        } else {
            Some(GLOBAL_VNID)
        }
    }
}

/// Production [`VnidTracking`] bootstrap.
#[derive(Debug, Default)]
pub struct VnidTracker {
    vnids: Mutex<Option<VnidMap>>,
}

impl VnidTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a closure against the live VNID map, once started.
    #[allow(dead_code)] // Reserved for the namespace controller
    pub fn with_vnids<R>(&self, f: impl FnOnce(&mut VnidMap) -> R) -> Option<R> {
        match self.vnids.lock() {
            Ok(mut guard) => guard.as_mut().map(f),
            Err(_) => None,
        }
    }
}

#[async_trait::async_trait]
impl VnidTracking for VnidTracker {
    async fn start(&self, multitenant: bool) -> Result<(), MasterError> {
        if let Ok(mut guard) = self.vnids.lock() {
            *guard = Some(VnidMap::new(multitenant));
        }
        info!(
            "Started VNID tracking in {} mode",
            if multitenant { "per-tenant" } else { "shared" }
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multitenant_assigns_distinct_ids() {
        let mut vnids = VnidMap::new(true);
        let a = vnids.assign("tenant-a");
        let b = vnids.assign("tenant-b");
        assert_ne!(a, b);
        assert_ne!(a, GLOBAL_VNID);
        assert_eq!(vnids.assign("tenant-a"), a);
        assert_eq!(vnids.get("tenant-b"), Some(b));
    }

    #[test]
    fn shared_mode_maps_everything_to_global() {
        let mut vnids = VnidMap::new(false);
        assert_eq!(vnids.assign("tenant-a"), GLOBAL_VNID);
        assert_eq!(vnids.assign("tenant-b"), GLOBAL_VNID);
        assert_eq!(vnids.get("never-seen"), Some(GLOBAL_VNID));
    }
}
