//! Identity resolution module.
//!
//! This module centralizes every lookup of executable paths, node keys and
//! base-path roots behind one capability interface, so the topology builder
//! never touches the process environment directly and tests can swap in an
//! in-memory source.

pub mod resolver;
pub mod source;

// Re-export commonly used types
pub use resolver::{IdentityError, IdentityKind, IdentityResolver};
pub use source::{EnvSource, IdentitySource, MapSource};
