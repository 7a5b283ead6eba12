//! Identity resolution and key naming.
//!
//! This file maps logical identity requests ("the executable for binary key
//! `imbue_collator`", "the node key for `alice`") to environment-style keys
//! and resolves them through an [`IdentitySource`]. Required identities fail
//! fast when absent; optional ones fall back to a caller-supplied default or
//! to unset.

use super::source::IdentitySource;

/// Kind of identity a lookup resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityKind {
    /// Executable path for a chain or node, keyed by binary identity.
    Executable,
    /// Stable per-node network key.
    NodeKey,
}

/// Errors raised while resolving identities
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Missing required environment value: {key}")]
    MissingIdentity { key: String },
}

/// Resolves identities through an injected source using a deterministic
/// naming convention:
///
/// - executables: `{binary}_EXECUTABLE`, uppercased
///   (`relaychain` -> `RELAYCHAIN_EXECUTABLE`)
/// - node keys: `{binary}_{node}_NODE_KEY`, uppercased
///   (`imbue_collator`/`bob` -> `IMBUE_COLLATOR_BOB_NODE_KEY`)
pub struct IdentityResolver<'a> {
    source: &'a dyn IdentitySource,
}

impl<'a> IdentityResolver<'a> {
    pub fn new(source: &'a dyn IdentitySource) -> Self {
        IdentityResolver { source }
    }

    /// Environment-style key for a (kind, scope) pair. The scope is the
    /// binary identity for executables and `{binary}_{node}` for node keys.
    pub fn key_for(kind: IdentityKind, scope: &str) -> String {
        let suffix = match kind {
            IdentityKind::Executable => "executable",
            IdentityKind::NodeKey => "node_key",
        };
        format!("{}_{}", scope, suffix).to_uppercase()
    }

    /// Resolve a required identity, failing with `MissingIdentity` when the
    /// source has no value for its key.
    pub fn resolve(&self, kind: IdentityKind, scope: &str) -> Result<String, IdentityError> {
        let key = Self::key_for(kind, scope);
        self.source
            .get(&key)
            .ok_or(IdentityError::MissingIdentity { key })
    }

    /// Resolve the executable path registered under a binary identity key.
    pub fn executable(&self, binary: &str) -> Result<String, IdentityError> {
        self.resolve(IdentityKind::Executable, binary)
    }

    /// Resolve the network key for one node of a chain.
    pub fn node_key(&self, binary: &str, node: &str) -> Result<String, IdentityError> {
        self.resolve(IdentityKind::NodeKey, &format!("{}_{}", binary, node))
    }

    /// Resolve an optional value: the source wins, then the configured
    /// default, then unset. Unset means downstream consumers let the
    /// external launcher choose.
    pub fn optional(&self, key: &str, default: Option<&str>) -> Option<String> {
        match self.source.get(key) {
            Some(value) => Some(value),
            None => {
                if default.is_some() {
                    log::debug!("{} is unset, using configured default", key);
                }
                default.map(|d| d.to_string())
            }
        }
    }
}
