//! Launcher-specific type definitions.
//!
//! This module contains type definitions matching the JSON schema the
//! external launcher consumes: the top-level launch configuration, chain
//! and node objects, and the static payload sections that pass through
//! unmodified. Field names follow the launcher's camelCase contract.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

// ============================================================================
// Top-Level Descriptor
// ============================================================================

/// Main launch configuration.
///
/// This is the root structure that gets serialized to JSON and consumed by
/// the external launcher. Every section is emitted even when empty; the
/// launcher treats a missing section and an empty one differently across
/// versions, so the full shape is always written.
#[derive(Serialize, Debug)]
pub struct LaunchConfig {
    /// Relay chain definition
    pub relaychain: LaunchRelaychain,
    /// Parachains with dedicated nodes
    pub parachains: Vec<LaunchParachain>,
    /// Registration-only parachains
    #[serde(rename = "simpleParachains")]
    pub simple_parachains: Vec<LaunchSimpleParachain>,
    /// Cross-chain messaging channels to open at genesis
    #[serde(rename = "hrmpChannels")]
    pub hrmp_channels: Vec<LaunchHrmpChannel>,
    /// Type-registry overrides for the launcher's chain client
    pub types: BTreeMap<String, Value>,
    /// Whether the launcher waits for block finalization before reporting
    /// success
    pub finalization: bool,
}

// ============================================================================
// Chains and Nodes
// ============================================================================

/// Relay chain section of the launch configuration.
#[derive(Serialize, Debug)]
pub struct LaunchRelaychain {
    /// Path to the relay chain executable
    pub bin: String,
    /// Chain spec identifier (e.g. "rococo-local")
    pub chain: String,
    /// Validator nodes, primary first
    pub nodes: Vec<LaunchNode>,
    /// Genesis override payload; an empty object when nothing is overridden
    pub genesis: Value,
}

/// One parachain section of the launch configuration.
#[derive(Serialize, Debug)]
pub struct LaunchParachain {
    /// Path to the collator executable
    pub bin: String,
    /// Parachain id registered on the relay chain
    pub id: String,
    /// Genesis balance endowed to the parachain account
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<String>,
    /// Collator nodes, primary first
    pub nodes: Vec<LaunchNode>,
}

/// A single node entry, relay validator or parachain collator alike.
#[derive(Serialize, Debug)]
pub struct LaunchNode {
    /// Node name; doubles as the well-known session key identity
    pub name: String,
    /// WebSocket RPC port
    #[serde(rename = "wsPort")]
    pub ws_port: u16,
    /// Peer-to-peer listen port
    pub port: u16,
    /// HTTP RPC port
    #[serde(rename = "rpcPort")]
    pub rpc_port: u16,
    /// Data directory for chain state
    #[serde(rename = "basePath", skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    /// Stable network key fixing the node's peer identity
    #[serde(rename = "nodeKey", skip_serializing_if = "Option::is_none")]
    pub node_key: Option<String>,
    /// Per-node executable override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin: Option<String>,
    /// Complete command-line flag list, in launch order
    pub flags: Vec<String>,
}

/// A registration-only parachain without dedicated full nodes.
///
/// The launcher expects the port as a string here, unlike node ports.
#[derive(Serialize, Debug)]
pub struct LaunchSimpleParachain {
    /// Path to the collator executable
    pub bin: String,
    /// Parachain id registered on the relay chain
    pub id: String,
    /// Collator port
    pub port: String,
    /// Genesis balance endowed to the parachain account
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<String>,
}

// ============================================================================
// Static Payload Types
// ============================================================================

/// Cross-chain messaging channel declaration.
#[derive(Serialize, Debug)]
pub struct LaunchHrmpChannel {
    /// Sending parachain id
    pub sender: u32,
    /// Receiving parachain id
    pub recipient: u32,
    /// Maximum number of in-flight messages
    #[serde(rename = "maxCapacity")]
    pub max_capacity: u32,
    /// Maximum message size in bytes
    #[serde(rename = "maxMessageSize")]
    pub max_message_size: u32,
}
