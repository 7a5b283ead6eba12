//! Identity source abstraction.
//!
//! Executable paths and node key material come from an injected key-value
//! store rather than from scattered `std::env` reads, so the whole build
//! can run against an in-memory map in tests and hermetic environments.

use std::collections::BTreeMap;

/// Read-only key-value store holding identities (executable paths, node
/// keys, base-path roots). Keys follow the resolver's naming convention.
pub trait IdentitySource {
    /// Look up a raw value by its environment-style key.
    fn get(&self, key: &str) -> Option<String>;
}

/// Identity source backed by the process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSource;

impl IdentitySource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory identity source.
///
/// The drop-in test double for `EnvSource`: builds take whichever source
/// they are handed, so tests populate one of these instead of mutating the
/// process environment.
#[derive(Debug, Default, Clone)]
pub struct MapSource {
    values: BTreeMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        MapSource {
            values: BTreeMap::new(),
        }
    }

    /// Insert a key-value pair, consuming and returning self for chaining.
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl IdentitySource for MapSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
