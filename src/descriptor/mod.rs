//! # Launch Descriptor Module
//!
//! This module provides the bridge between the resolved internal topology
//! and the JSON configuration the external launcher consumes to actually
//! spawn processes, wire up peers and await finalization.
//!
//! ## Core Functionality
//!
//! The module renders a [`TopologyDescriptor`](crate::topology::TopologyDescriptor)
//! into the launcher's schema, field for field. It performs no resolution of
//! its own: ports, flags, identities and paths were all bound during
//! topology building, so emission is a pure, infallible mapping.
//!
//! ## Key Components
//!
//! - `types.rs`: Launcher schema data structures and serde renames
//! - `emitter.rs`: The topology-to-descriptor mapping and JSON rendering
//!
//! ## Example Generated Structure
//!
//! ```json
//! {
//!   "relaychain": {
//!     "bin": "/usr/local/bin/polkadot",
//!     "chain": "rococo-local",
//!     "nodes": [
//!       {
//!         "name": "alice",
//!         "wsPort": 9914,
//!         "port": 30300,
//!         "rpcPort": 9900,
//!         "flags": ["--unsafe-ws-external", "--rpc-cors=all"]
//!       }
//!     ],
//!     "genesis": {}
//!   },
//!   "parachains": [],
//!   "simpleParachains": [],
//!   "hrmpChannels": [],
//!   "types": {},
//!   "finalization": false
//! }
//! ```
//!
//! ## Schema Stability
//!
//! The launcher's schema is the sole wire contract of this tool. Every
//! section is emitted even when empty, optional node fields are omitted
//! rather than set to null, and camelCase names are fixed by serde renames
//! so refactors cannot silently change the wire format.

pub mod emitter;
pub mod types;

// Re-export commonly used types for convenience
pub use emitter::{emit, to_json};
pub use types::{
    LaunchConfig,
    LaunchHrmpChannel,
    LaunchNode,
    LaunchParachain,
    LaunchRelaychain,
    LaunchSimpleParachain,
};
