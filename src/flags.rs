//! Flag layer composition.
//!
//! Node command lines are assembled from layered flag lists: common flags
//! first, then the role template, then per-node extras. Layers are
//! concatenated in caller order without deduplication because the external
//! launcher's argument parser applies last-occurrence-wins semantics, so
//! composition order is what encodes override precedence.

use std::fmt::Display;

/// Divider separating launcher-level flags from flags forwarded to the
/// wrapped inner binary (e.g. the relay-chain side of a collator). It is an
/// ordinary element during composition; only the launcher interprets it.
pub const DIVIDER: &str = "--";

/// Concatenate flag layers in the given order.
///
/// Duplicates are preserved deliberately: a flag repeated in a later layer
/// overrides the earlier occurrence once the launcher parses the final
/// argument list, and dropping either copy would change which side of a
/// `--` divider the flag lands on.
pub fn compose(layers: &[&[String]]) -> Vec<String> {
    layers
        .iter()
        .flat_map(|layer| layer.iter().cloned())
        .collect()
}

/// Format a bare switch flag: `--name`.
pub fn flag(name: &str) -> String {
    format!("--{}", name)
}

/// Format a valued flag: `--name=value`.
pub fn flag_with_value(name: &str, value: impl Display) -> String {
    format!("--{}={}", name, value)
}
