//! Topology resolution.
//!
//! This file contains the builder that turns a validated configuration into
//! a fully resolved topology: executables and node keys looked up, ports
//! allocated and checked for collisions, flag layers composed, and data
//! directories derived. Resolution either succeeds completely or fails with
//! the first error; no partial topology escapes.

use log::{debug, info};
use std::collections::HashSet;

use crate::config::{
    Config, FlagTemplates, NodeConfig, ParachainConfig, RelaychainConfig, SimpleParachainConfig,
};
use crate::flags;
use crate::identity::{IdentityError, IdentityResolver, IdentitySource};
use crate::ports::{PortAllocator, PortCollision, PortKind, PortRegistry};
use crate::topology::types::{
    ChainSpec, NodePorts, NodeRole, NodeSpec, SimpleParachain, TopologyDescriptor,
};

/// Errors from resolving a configuration into a topology
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// A required executable or node key was absent from the identity
    /// source.
    #[error("{context}: {source}")]
    MissingIdentity {
        context: String,
        #[source]
        source: IdentityError,
    },
    /// Two nodes ended up with the same port of the same kind.
    #[error(transparent)]
    PortCollision(#[from] PortCollision),
    /// The configuration describes a structurally impossible network.
    #[error("Invalid topology: {0}")]
    InvalidTopology(String),
}

/// Resolve a configuration into a launchable topology.
///
/// Structural invariants are enforced up front: every chain declares at
/// least one node, node names are unique within their chain, and parachain
/// ids are unique across the build. Resolution is deterministic: the same
/// configuration and identity source always yield the same descriptor. A
/// fresh port allocator and registry are used per call, so no state leaks
/// between builds.
pub fn build_topology(
    config: &Config,
    source: &dyn IdentitySource,
) -> Result<TopologyDescriptor, BuildError> {
    check_node_names(config)?;
    check_chain_ids(config)?;

    let resolver = IdentityResolver::new(source);
    let base_root =
        resolver.optional(&config.base_path.env_key, config.base_path.default.as_deref());
    if let Some(root) = &base_root {
        debug!("Data directories rooted at {}", root);
    }

    let mut builder = Builder {
        resolver,
        allocator: PortAllocator::new(&config.ports),
        registry: PortRegistry::new(),
        templates: &config.flags,
        base_root,
    };

    info!(
        "Resolving relay chain '{}' with {} node(s)",
        config.relaychain.chain,
        config.relaychain.nodes.len()
    );
    let relay = builder.build_relay(&config.relaychain)?;

    let mut parachains = Vec::with_capacity(config.parachains.len());
    for parachain in &config.parachains {
        info!(
            "Resolving parachain '{}' with {} node(s)",
            parachain.id,
            parachain.nodes.len()
        );
        parachains.push(builder.build_parachain(parachain)?);
    }

    let mut simple_parachains = Vec::with_capacity(config.simple_parachains.len());
    for simple in &config.simple_parachains {
        simple_parachains.push(builder.build_simple(simple)?);
    }

    let descriptor = TopologyDescriptor {
        relay,
        parachains,
        simple_parachains,
        hrmp_channels: config.hrmp_channels.clone(),
        types: config.types.clone(),
        finalization: config.finalization,
    };
    info!(
        "Topology resolved: {} node(s), {} port(s) claimed",
        descriptor.node_count(),
        builder.registry.len()
    );
    Ok(descriptor)
}

/// Every chain declares at least one node, and node names are unique
/// within their chain; the launcher keys session accounts and data
/// directories off them.
fn check_node_names(config: &Config) -> Result<(), BuildError> {
    check_chain_node_names(NodeRole::RelayValidator.as_str(), &config.relaychain.nodes)?;
    for parachain in &config.parachains {
        check_chain_node_names(
            &format!("{} '{}'", NodeRole::ParachainCollator, parachain.id),
            &parachain.nodes,
        )?;
    }
    Ok(())
}

fn check_chain_node_names(chain: &str, nodes: &[NodeConfig]) -> Result<(), BuildError> {
    if nodes.is_empty() {
        return Err(BuildError::InvalidTopology(format!(
            "{} declares no nodes",
            chain
        )));
    }
    let mut seen = HashSet::new();
    for node in nodes {
        if !seen.insert(node.name.as_str()) {
            return Err(BuildError::InvalidTopology(format!(
                "duplicate node name '{}' in {}",
                node.name, chain
            )));
        }
    }
    Ok(())
}

/// Parachain ids share one registration namespace on the relay chain, so
/// regular and simple parachains are checked together.
fn check_chain_ids(config: &Config) -> Result<(), BuildError> {
    let mut seen = HashSet::new();
    for id in config
        .parachains
        .iter()
        .map(|p| p.id.as_str())
        .chain(config.simple_parachains.iter().map(|s| s.id.as_str()))
    {
        if !seen.insert(id) {
            return Err(BuildError::InvalidTopology(format!(
                "duplicate parachain id '{}'",
                id
            )));
        }
    }
    Ok(())
}

/// Data-directory label: the configured override, or the binary key with
/// underscores hyphenated.
fn chain_label(label: Option<&str>, binary: &str) -> String {
    match label {
        Some(label) => label.to_string(),
        None => binary.replace('_', "-"),
    }
}

/// Mutable state threaded through one resolution pass.
struct Builder<'a> {
    resolver: IdentityResolver<'a>,
    allocator: PortAllocator,
    registry: PortRegistry,
    templates: &'a FlagTemplates,
    base_root: Option<String>,
}

impl<'a> Builder<'a> {
    fn build_relay(&mut self, chain: &RelaychainConfig) -> Result<ChainSpec, BuildError> {
        let context = NodeRole::RelayValidator.to_string();
        let executable = self.executable(&chain.binary, &context)?;
        let label = chain_label(chain.label.as_deref(), &chain.binary);

        let mut nodes = Vec::with_capacity(chain.nodes.len());
        for (index, node) in chain.nodes.iter().enumerate() {
            nodes.push(self.build_node(
                node,
                index,
                NodeRole::RelayValidator,
                &chain.binary,
                chain.node_keys,
                &label,
                &context,
            )?);
        }

        Ok(ChainSpec {
            executable,
            chain_id: chain.chain.clone(),
            balance: None,
            label,
            nodes,
            genesis: chain.genesis.clone(),
        })
    }

    fn build_parachain(&mut self, parachain: &ParachainConfig) -> Result<ChainSpec, BuildError> {
        let context = format!("{} '{}'", NodeRole::ParachainCollator, parachain.id);
        let executable = self.executable(&parachain.binary, &context)?;
        let label = chain_label(parachain.label.as_deref(), &parachain.binary);

        let mut nodes = Vec::with_capacity(parachain.nodes.len());
        for (index, node) in parachain.nodes.iter().enumerate() {
            nodes.push(self.build_node(
                node,
                index,
                NodeRole::ParachainCollator,
                &parachain.binary,
                parachain.node_keys,
                &label,
                &context,
            )?);
        }

        Ok(ChainSpec {
            executable,
            chain_id: parachain.id.clone(),
            balance: parachain.balance.clone(),
            label,
            nodes,
            genesis: None,
        })
    }

    /// Resolve one node: ports, flags, network key, executable override and
    /// data directory.
    fn build_node(
        &mut self,
        node: &NodeConfig,
        index: usize,
        role: NodeRole,
        binary: &str,
        node_keys: bool,
        label: &str,
        chain_context: &str,
    ) -> Result<NodeSpec, BuildError> {
        let owner = format!("{} node '{}'", chain_context, node.name);

        let p2p = self.claim_port(role, PortKind::P2p, node.p2p_port, &owner)?;
        let rpc = self.claim_port(role, PortKind::Rpc, node.rpc_port, &owner)?;
        let ws = self.claim_port(role, PortKind::Ws, node.ws_port, &owner)?;
        let metrics = if node.wants_metrics() {
            Some(self.claim_port(role, PortKind::Metrics, node.metrics_port, &owner)?)
        } else {
            None
        };
        debug!("{}: p2p={} rpc={} ws={} metrics={:?}", owner, p2p, rpc, ws, metrics);

        // The metrics flag leads the command line so a later layer can still
        // override it through last-occurrence-wins parsing.
        let templates = self.templates;
        let role_template = match role {
            NodeRole::RelayValidator => &templates.relaychain,
            NodeRole::ParachainCollator => &templates.parachain,
        };
        let metrics_layer: Vec<String> = metrics
            .map(|port| vec![flags::flag_with_value("prometheus-port", port)])
            .unwrap_or_default();
        let composed = flags::compose(&[
            &metrics_layer,
            &templates.common,
            role_template,
            &node.flags,
        ]);

        let node_key = if node_keys {
            let key = self
                .resolver
                .node_key(binary, &node.name)
                .map_err(|source| BuildError::MissingIdentity {
                    context: owner.clone(),
                    source,
                })?;
            Some(key)
        } else {
            None
        };

        let executable = match &node.binary {
            Some(key) => Some(self.executable(key, &owner)?),
            None => None,
        };

        let base_path = self
            .base_root
            .as_ref()
            .map(|root| format!("{}/{}-{}-{}", root, node.name, index, label));

        Ok(NodeSpec {
            name: node.name.clone(),
            role,
            ports: NodePorts {
                p2p,
                rpc,
                ws,
                metrics,
            },
            base_path,
            flags: composed,
            node_key,
            executable,
        })
    }

    fn build_simple(
        &mut self,
        simple: &SimpleParachainConfig,
    ) -> Result<SimpleParachain, BuildError> {
        let context = format!("simple parachain '{}'", simple.id);
        let executable = self.executable(&simple.binary, &context)?;
        let port = match simple.port {
            Some(port) => port,
            None => self
                .allocator
                .allocate(NodeRole::ParachainCollator, PortKind::P2p),
        };
        self.registry.claim(PortKind::P2p, port, &context)?;

        Ok(SimpleParachain {
            executable,
            id: simple.id.clone(),
            balance: simple.balance.clone(),
            port,
        })
    }

    /// Take the pinned port if one is declared, otherwise pull from the
    /// allocator; either way the result goes through the registry so
    /// collisions surface no matter where a port came from.
    fn claim_port(
        &mut self,
        role: NodeRole,
        kind: PortKind,
        pinned: Option<u16>,
        owner: &str,
    ) -> Result<u16, BuildError> {
        let port = match pinned {
            Some(port) => port,
            None => self.allocator.allocate(role, kind),
        };
        self.registry.claim(kind, port, owner)?;
        Ok(port)
    }

    fn executable(&self, binary: &str, context: &str) -> Result<String, BuildError> {
        self.resolver
            .executable(binary)
            .map_err(|source| BuildError::MissingIdentity {
                context: context.to_string(),
                source,
            })
    }
}
