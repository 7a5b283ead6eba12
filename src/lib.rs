//! # Launchgen - Topology compiler for polkadot-launch test networks
//!
//! This library turns a declarative description of a relay-chain/parachain
//! test network into the JSON configuration consumed by the external
//! `polkadot-launch` tool, which actually spawns the processes, wires up
//! peer connections and waits for finalization.
//!
//! ## Overview
//!
//! Hand-maintained launch configurations rot quickly: port numbers drift
//! into collisions, executable paths get hardcoded, and every environment
//! ends up with its own near-duplicate copy of the same file. Launchgen
//! replaces those copies with one topology description plus an environment:
//! ports are allocated from per-role ranges, executables and node keys come
//! from environment variables, and command lines are composed from layered
//! flag templates.
//!
//! ## Key Features
//!
//! - **Deterministic**: the same configuration and environment always
//!   produce byte-identical output
//! - **Collision-free ports**: monotonic per-range cursors, with an
//!   explicit registry check covering hand-pinned ports too
//! - **Environment-driven identities**: no absolute paths or key material
//!   in the topology file
//! - **Layered flags**: common, per-role and per-node flag lists composed
//!   in a fixed override order
//! - **Profiles**: named node subsets for smoke tests and constrained
//!   environments, selected at build time
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `config`: Type-safe configuration structures and YAML parsing
//! - `config_loader`: Configuration file loading and profile selection
//! - `ports`: Port range allocation and collision tracking
//! - `identity`: Environment-backed executable and node-key resolution
//! - `flags`: Command-line flag layer composition
//! - `topology`: Resolution of the configuration into a bound topology
//! - `descriptor`: Launcher schema types and JSON emission
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use launchgen::identity::EnvSource;
//! use launchgen::{config_loader, descriptor, topology};
//!
//! // Load and validate the declarative topology
//! let config = config_loader::load_config("topology.yaml".as_ref())?;
//!
//! // Resolve ports, identities and flags into a launchable topology
//! let resolved = topology::build_topology(&config, &EnvSource)?;
//!
//! // Render the launcher's JSON configuration
//! let json = descriptor::to_json(&descriptor::emit(&resolved))?;
//! println!("{}", json);
//! # Ok::<(), color_eyre::Report>(())
//! ```
//!
//! ## Configuration Format
//!
//! Topologies use YAML format with one relay chain and any number of
//! parachains:
//!
//! ```yaml
//! relaychain:
//!   binary: relaychain
//!   chain: rococo-local
//!   nodes:
//!     - name: alice
//!     - name: bob
//!
//! parachains:
//!   - binary: collator
//!     id: "2102"
//!     balance: "1000000000000000000000"
//!     nodes:
//!       - name: alice
//!         expose_metrics: true
//! ```
//!
//! The `binary` keys are identities, not paths: `relaychain` resolves
//! through the `RELAYCHAIN_EXECUTABLE` environment variable, so the same
//! topology runs against any locally built binaries.
//!
//! ## Error Handling
//!
//! Fallible operations return typed errors (`ValidationError`,
//! `BuildError`) that the binary surfaces through `color_eyre` reports.
//! Resolution either produces a complete topology or fails with the first
//! error; no partial descriptor is ever written.

pub mod config;
pub mod config_loader;
pub mod descriptor;
pub mod flags;
pub mod identity;
pub mod ports;
pub mod topology;
