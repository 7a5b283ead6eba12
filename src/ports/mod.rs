//! Port allocation and uniqueness tracking.
//!
//! This module hands out non-colliding network ports per node from disjoint
//! per-role ranges, and tracks every claim so that manual overrides cannot
//! silently reintroduce duplicates.

pub mod allocator;
pub mod registry;

// Re-export commonly used types
pub use allocator::{PortAllocator, PortKind, PortRange, PortSeeds};
pub use registry::{PortCollision, PortRegistry};
