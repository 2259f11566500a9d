//! SDN plugin names and the isolation modes they select.
//!
//! Plugin-name strings arrive from configuration; they are resolved once at
//! the bootstrap boundary into a closed set of isolation modes. Names this
//! master does not own resolve to `None` and the whole bootstrap is a no-op.

/// Plugin name for flat subnet networking (no tenant isolation)
pub const SUBNET_PLUGIN_NAME: &str = "microscaler/sdn-subnet";

/// Plugin name for multi-tenant isolation (distinct VNID per tenant)
pub const MULTITENANT_PLUGIN_NAME: &str = "microscaler/sdn-multitenant";

/// Plugin name for network-policy isolation (shared global VNID)
pub const NETWORKPOLICY_PLUGIN_NAME: &str = "microscaler/sdn-networkpolicy";

/// Isolation modes this master knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsolationMode {
    /// Flat networking, no VNID tracking
    Subnet,
    /// Distinct VNID per tenant namespace
    Multitenant,
    /// Single shared VNID, isolation enforced by policy rules
    NetworkPolicy,
}

impl IsolationMode {
    /// Resolve a configured plugin name. Unrecognized names mean this master
    /// does not own the plugin and declines to run.
    pub fn parse(plugin_name: &str) -> Option<Self> {
        match plugin_name {
            SUBNET_PLUGIN_NAME => Some(IsolationMode::Subnet),
            MULTITENANT_PLUGIN_NAME => Some(IsolationMode::Multitenant),
            NETWORKPOLICY_PLUGIN_NAME => Some(IsolationMode::NetworkPolicy),
            _ => None,
        }
    }
}
