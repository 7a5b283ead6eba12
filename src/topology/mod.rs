//! Network topology module.
//!
//! This module contains the resolved intermediate representation of a test
//! network and the builder that produces it from a declarative
//! configuration. The builder owns every cross-cutting decision: port
//! allocation and collision checking, identity resolution, flag layering
//! and data-directory derivation.

pub mod builder;
pub mod types;

// Re-export key types and functions for easier access
pub use builder::{build_topology, BuildError};
pub use types::{
    ChainSpec, NodePorts, NodeRole, NodeSpec, SimpleParachain, TopologyDescriptor,
};
