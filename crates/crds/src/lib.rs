//! SDN CRD Definitions
//!
//! Kubernetes Custom Resource Definitions for the SDN master controller.

pub mod cluster_network;
pub mod host_subnet;

pub use cluster_network::*;
pub use host_subnet::*;
