//! Port allocation logic.
//!
//! This file contains the cursor-based port allocator. Each (role, kind)
//! pair owns one monotonically increasing cursor seeded from configured
//! base ports, so a fixed seed configuration and a fixed sequence of calls
//! always produce the same collision-free port sequence.

use crate::topology::NodeRole;
use serde::{Deserialize, Serialize};

/// Kind of network port a node binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortKind {
    /// Peer-to-peer listen port.
    P2p,
    /// HTTP RPC port.
    Rpc,
    /// WebSocket RPC port.
    Ws,
    /// Prometheus metrics port.
    Metrics,
}

impl PortKind {
    /// Get the string representation of the port kind
    pub fn as_str(&self) -> &'static str {
        match self {
            PortKind::P2p => "p2p",
            PortKind::Rpc => "rpc",
            PortKind::Ws => "ws",
            PortKind::Metrics => "metrics",
        }
    }
}

impl std::fmt::Display for PortKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base ports seeding the allocator cursors.
///
/// Defaults reproduce the conventional layout for a local relay/parachain
/// test network: relay and parachain ranges are disjoint per kind, so the
/// allocator cannot collide with itself under default seeds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PortSeeds {
    pub relay_p2p: u16,
    pub relay_rpc: u16,
    pub relay_ws: u16,
    pub relay_metrics: u16,
    pub para_p2p: u16,
    pub para_rpc: u16,
    pub para_ws: u16,
    pub para_metrics: u16,
}

impl Default for PortSeeds {
    fn default() -> Self {
        PortSeeds {
            relay_p2p: 30300,
            relay_rpc: 9900,
            relay_ws: 9914,
            relay_metrics: 9615,
            para_p2p: 30400,
            para_rpc: 9930,
            para_ws: 9944,
            para_metrics: 9610,
        }
    }
}

/// One contiguous port range: a cursor seeded at the base port, advancing
/// one port per draw. Exhaustion (cursor overflow) is not checked;
/// topologies of the scale this tool targets stay far below it.
#[derive(Debug, Clone)]
pub struct PortRange {
    cursor: u16,
}

impl PortRange {
    pub fn new(base: u16) -> Self {
        PortRange { cursor: base }
    }

    /// Return the current cursor value, then advance it.
    pub fn next(&mut self) -> u16 {
        let port = self.cursor;
        self.cursor += 1;
        port
    }
}

/// Ranges for the four port kinds of one role.
#[derive(Debug, Clone)]
struct RoleRanges {
    p2p: PortRange,
    rpc: PortRange,
    ws: PortRange,
    metrics: PortRange,
}

/// Cursor-based port allocator, scoped to one build pass.
///
/// A fresh allocator is constructed per topology build; no cursor state
/// survives across invocations. Allocation never fails.
#[derive(Debug, Clone)]
pub struct PortAllocator {
    relay: RoleRanges,
    para: RoleRanges,
}

impl PortAllocator {
    pub fn new(seeds: &PortSeeds) -> Self {
        PortAllocator {
            relay: RoleRanges {
                p2p: PortRange::new(seeds.relay_p2p),
                rpc: PortRange::new(seeds.relay_rpc),
                ws: PortRange::new(seeds.relay_ws),
                metrics: PortRange::new(seeds.relay_metrics),
            },
            para: RoleRanges {
                p2p: PortRange::new(seeds.para_p2p),
                rpc: PortRange::new(seeds.para_rpc),
                ws: PortRange::new(seeds.para_ws),
                metrics: PortRange::new(seeds.para_metrics),
            },
        }
    }

    /// Hand out the next port for the given (role, kind) pair.
    ///
    /// Cursors are independent per pair and shared across every chain of a
    /// build, so two parachains drawing from the same role ranges can never
    /// receive the same port.
    pub fn allocate(&mut self, role: NodeRole, kind: PortKind) -> u16 {
        self.range_mut(role, kind).next()
    }

    fn range_mut(&mut self, role: NodeRole, kind: PortKind) -> &mut PortRange {
        let ranges = match role {
            NodeRole::RelayValidator => &mut self.relay,
            NodeRole::ParachainCollator => &mut self.para,
        };
        match kind {
            PortKind::P2p => &mut ranges.p2p,
            PortKind::Rpc => &mut ranges.rpc,
            PortKind::Ws => &mut ranges.ws,
            PortKind::Metrics => &mut ranges.metrics,
        }
    }
}
