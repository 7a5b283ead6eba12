//! Topology type definitions.
//!
//! This file contains the resolved intermediate representation produced by
//! the builder: every flag composed, every port and identity bound, but not
//! yet rendered into the launcher's JSON shape.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::config::HrmpChannel;

/// Role a node plays in the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    /// Validator on the relay chain.
    RelayValidator,
    /// Collator on a parachain.
    ParachainCollator,
}

impl NodeRole {
    /// Get the chain-kind prefix used in owner and error contexts
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeRole::RelayValidator => "relay chain",
            NodeRole::ParachainCollator => "parachain",
        }
    }
}

impl std::fmt::Display for NodeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ports bound by one node. The metrics port is only present when the node
/// exposes metrics; it travels to the launcher inside the flag list rather
/// than as a dedicated descriptor field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePorts {
    pub p2p: u16,
    pub rpc: u16,
    pub ws: u16,
    pub metrics: Option<u16>,
}

/// A fully resolved node: everything the launcher needs to start one
/// process.
#[derive(Debug, Clone)]
pub struct NodeSpec {
    pub name: String,
    pub role: NodeRole,
    pub ports: NodePorts,
    /// Data directory, when a root was resolved.
    pub base_path: Option<String>,
    /// Final composed flag list, in launch order.
    pub flags: Vec<String>,
    /// Stable network key, when the chain requests one.
    pub node_key: Option<String>,
    /// Executable path; `None` means the chain-level executable applies.
    pub executable: Option<String>,
}

/// A resolved chain: the relay chain or one parachain.
#[derive(Debug, Clone)]
pub struct ChainSpec {
    /// Resolved executable path for the chain's nodes.
    pub executable: String,
    /// Relay chains carry the chain spec id here, parachains their para id.
    pub chain_id: String,
    pub balance: Option<String>,
    /// Label woven into data-directory names.
    pub label: String,
    pub nodes: Vec<NodeSpec>,
    pub genesis: Option<Value>,
}

/// A resolved registration-only parachain.
#[derive(Debug, Clone)]
pub struct SimpleParachain {
    pub executable: String,
    pub id: String,
    pub balance: Option<String>,
    pub port: u16,
}

/// The complete resolved topology, ready for descriptor emission.
#[derive(Debug, Clone)]
pub struct TopologyDescriptor {
    pub relay: ChainSpec,
    pub parachains: Vec<ChainSpec>,
    pub simple_parachains: Vec<SimpleParachain>,
    pub hrmp_channels: Vec<HrmpChannel>,
    pub types: BTreeMap<String, Value>,
    pub finalization: bool,
}

impl TopologyDescriptor {
    /// Total number of nodes across the relay chain and all parachains.
    pub fn node_count(&self) -> usize {
        self.relay.nodes.len() + self.parachains.iter().map(|p| p.nodes.len()).sum::<usize>()
    }
}
