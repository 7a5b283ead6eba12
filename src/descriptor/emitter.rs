//! Descriptor emission.
//!
//! This file contains the pure mapping from a resolved topology to the
//! launcher's JSON shape. Emission cannot fail and never mutates its input;
//! everything fallible happened during resolution.

use serde_json::json;

use crate::config::HrmpChannel;
use crate::descriptor::types::{
    LaunchConfig, LaunchHrmpChannel, LaunchNode, LaunchParachain, LaunchRelaychain,
    LaunchSimpleParachain,
};
use crate::topology::{ChainSpec, NodeSpec, TopologyDescriptor};

/// Render a resolved topology into the launcher's configuration shape.
///
/// The mapping is mechanical: ports and flags were already bound during
/// resolution, so this is a field-for-field translation. Emitting the same
/// topology twice yields identical output.
pub fn emit(topology: &TopologyDescriptor) -> LaunchConfig {
    LaunchConfig {
        relaychain: emit_relaychain(&topology.relay),
        parachains: topology.parachains.iter().map(emit_parachain).collect(),
        simple_parachains: topology
            .simple_parachains
            .iter()
            .map(|simple| LaunchSimpleParachain {
                bin: simple.executable.clone(),
                id: simple.id.clone(),
                port: simple.port.to_string(),
                balance: simple.balance.clone(),
            })
            .collect(),
        hrmp_channels: topology.hrmp_channels.iter().map(emit_channel).collect(),
        types: topology.types.clone(),
        finalization: topology.finalization,
    }
}

/// Serialize a launch configuration to pretty-printed JSON.
pub fn to_json(descriptor: &LaunchConfig) -> serde_json::Result<String> {
    serde_json::to_string_pretty(descriptor)
}

fn emit_relaychain(relay: &ChainSpec) -> LaunchRelaychain {
    LaunchRelaychain {
        bin: relay.executable.clone(),
        chain: relay.chain_id.clone(),
        nodes: relay.nodes.iter().map(emit_node).collect(),
        // The launcher expects the genesis key even with nothing overridden.
        genesis: relay.genesis.clone().unwrap_or_else(|| json!({})),
    }
}

fn emit_parachain(parachain: &ChainSpec) -> LaunchParachain {
    LaunchParachain {
        bin: parachain.executable.clone(),
        id: parachain.chain_id.clone(),
        balance: parachain.balance.clone(),
        nodes: parachain.nodes.iter().map(emit_node).collect(),
    }
}

fn emit_node(node: &NodeSpec) -> LaunchNode {
    LaunchNode {
        name: node.name.clone(),
        ws_port: node.ports.ws,
        port: node.ports.p2p,
        rpc_port: node.ports.rpc,
        base_path: node.base_path.clone(),
        node_key: node.node_key.clone(),
        bin: node.executable.clone(),
        flags: node.flags.clone(),
    }
}

fn emit_channel(channel: &HrmpChannel) -> LaunchHrmpChannel {
    LaunchHrmpChannel {
        sender: channel.sender,
        recipient: channel.recipient,
        max_capacity: channel.max_capacity,
        max_message_size: channel.max_message_size,
    }
}
