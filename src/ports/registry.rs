//! Port assignment registry.
//!
//! This file manages a registry of claimed ports to ensure uniqueness per
//! port kind across the whole topology. Relay and parachain nodes share one
//! namespace per kind, so a duplicate anywhere in a build is an error.
//!
//! Under pure cursor allocation the registry can never trip; it exists
//! because node entries may override ports by hand, and historical
//! hand-edited configurations did assign duplicates by mistake.

use super::allocator::PortKind;
use std::collections::HashMap;

/// A duplicate port assignment detected while building a topology.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("Port {port} ({kind}) assigned to both {first} and {second}")]
pub struct PortCollision {
    pub kind: PortKind,
    pub port: u16,
    /// Owner that claimed the port first, e.g. `relay chain node 'alice'`.
    pub first: String,
    /// Owner whose claim collided.
    pub second: String,
}

/// Tracks every (kind, port) claim of one build pass.
#[derive(Debug, Default)]
pub struct PortRegistry {
    claimed: HashMap<(PortKind, u16), String>,
}

impl PortRegistry {
    pub fn new() -> Self {
        PortRegistry {
            claimed: HashMap::new(),
        }
    }

    /// Claim a port for an owner, failing if another owner already holds the
    /// same port under the same kind.
    pub fn claim(&mut self, kind: PortKind, port: u16, owner: &str) -> Result<(), PortCollision> {
        if let Some(existing) = self.claimed.get(&(kind, port)) {
            return Err(PortCollision {
                kind,
                port,
                first: existing.clone(),
                second: owner.to_string(),
            });
        }
        self.claimed.insert((kind, port), owner.to_string());
        Ok(())
    }

    /// Check whether a (kind, port) pair is already claimed.
    pub fn is_claimed(&self, kind: PortKind, port: u16) -> bool {
        self.claimed.contains_key(&(kind, port))
    }

    /// Number of claims recorded so far.
    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}
