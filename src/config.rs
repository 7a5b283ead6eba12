use crate::flags::DIVIDER;
use crate::ports::PortSeeds;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Default environment key consulted for the data-directory root.
pub const DEFAULT_BASE_PATH_ENV: &str = "POLKADOT_LAUNCH_BASE_PATH_BASE";

/// Declarative topology configuration: one relay chain, any number of
/// parachains, plus the static payloads the launcher descriptor carries
/// through unmodified.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub base_path: BasePathConfig,
    #[serde(default)]
    pub ports: PortSeeds,
    #[serde(default)]
    pub flags: FlagTemplates,
    pub relaychain: RelaychainConfig,
    #[serde(default)]
    pub parachains: Vec<ParachainConfig>,
    #[serde(default)]
    pub simple_parachains: Vec<SimpleParachainConfig>,
    #[serde(default)]
    pub hrmp_channels: Vec<HrmpChannel>,
    #[serde(default)]
    pub types: BTreeMap<String, Value>,
    #[serde(default)]
    pub finalization: bool,
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.relaychain.validate()?;

        for parachain in &self.parachains {
            parachain.validate()?;
        }

        for simple in &self.simple_parachains {
            if simple.binary.is_empty() {
                return Err(ValidationError::InvalidParachain(format!(
                    "simple parachain '{}' has an empty binary identity",
                    simple.id
                )));
            }
            if simple.id.is_empty() {
                return Err(ValidationError::InvalidParachain(
                    "simple parachain id cannot be empty".to_string(),
                ));
            }
        }

        for channel in &self.hrmp_channels {
            if channel.sender == channel.recipient {
                return Err(ValidationError::InvalidChannel(format!(
                    "channel endpoints must differ, got {} on both sides",
                    channel.sender
                )));
            }
        }

        for (name, profile) in &self.profiles {
            self.validate_profile(name, profile)?;
        }

        Ok(())
    }

    /// Check that a profile only selects nodes and chains that are declared.
    fn validate_profile(&self, name: &str, profile: &Profile) -> Result<(), ValidationError> {
        if let Some(active) = &profile.relaychain {
            if active.is_empty() {
                return Err(ValidationError::InvalidProfile(format!(
                    "profile '{}' selects no relay chain nodes",
                    name
                )));
            }
            for node in active {
                if !self.relaychain.nodes.iter().any(|n| &n.name == node) {
                    return Err(ValidationError::InvalidProfile(format!(
                        "profile '{}' references undeclared relay chain node '{}'",
                        name, node
                    )));
                }
            }
        }

        for (para_id, active) in &profile.parachains {
            let parachain = self
                .parachains
                .iter()
                .find(|p| &p.id == para_id)
                .ok_or_else(|| {
                    ValidationError::InvalidProfile(format!(
                        "profile '{}' references undeclared parachain '{}'",
                        name, para_id
                    ))
                })?;
            if active.is_empty() {
                return Err(ValidationError::InvalidProfile(format!(
                    "profile '{}' selects no nodes for parachain '{}'",
                    name, para_id
                )));
            }
            for node in active {
                if !parachain.nodes.iter().any(|n| &n.name == node) {
                    return Err(ValidationError::InvalidProfile(format!(
                        "profile '{}' references undeclared node '{}' in parachain '{}'",
                        name, node, para_id
                    )));
                }
            }
        }

        Ok(())
    }

    /// Reduce each chain's node list to the subset a profile selects.
    ///
    /// Profiles only select among declared nodes, preserving declaration
    /// order; a chain the profile does not mention keeps its full node
    /// list. With no profile the configuration is used as declared.
    pub fn select_profile(&mut self, name: &str) -> Result<(), ValidationError> {
        let profile = self
            .profiles
            .get(name)
            .cloned()
            .ok_or_else(|| ValidationError::InvalidProfile(format!("unknown profile '{}'", name)))?;
        self.validate_profile(name, &profile)?;

        if let Some(active) = &profile.relaychain {
            self.relaychain
                .nodes
                .retain(|n| active.iter().any(|a| a == &n.name));
        }
        for (para_id, active) in &profile.parachains {
            if let Some(parachain) = self.parachains.iter_mut().find(|p| &p.id == para_id) {
                parachain
                    .nodes
                    .retain(|n| active.iter().any(|a| a == &n.name));
            }
        }

        log::info!("Applied profile '{}'", name);
        Ok(())
    }
}

/// Where the per-node data-directory root comes from.
///
/// Resolution order: the environment key, then the configured default,
/// then unset (the launcher picks its own temporary directories).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BasePathConfig {
    #[serde(default = "default_base_path_env")]
    pub env_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

fn default_base_path_env() -> String {
    DEFAULT_BASE_PATH_ENV.to_string()
}

impl Default for BasePathConfig {
    fn default() -> Self {
        BasePathConfig {
            env_key: default_base_path_env(),
            default: None,
        }
    }
}

/// Layered flag templates: every node receives `common`, then its role
/// template, then its own extras.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct FlagTemplates {
    pub common: Vec<String>,
    pub relaychain: Vec<String>,
    pub parachain: Vec<String>,
}

impl Default for FlagTemplates {
    fn default() -> Self {
        FlagTemplates {
            common: vec![
                "--unsafe-ws-external".to_string(),
                "--rpc-cors=all".to_string(),
                "--rpc-external".to_string(),
                "--rpc-methods=Unsafe".to_string(),
            ],
            relaychain: vec!["--wasm-execution=Compiled".to_string()],
            parachain: vec![
                "--prometheus-external".to_string(),
                "--allow-private-ipv4".to_string(),
                "--execution=wasm".to_string(),
                DIVIDER.to_string(),
                "--prometheus-external".to_string(),
            ],
        }
    }
}

/// Relay chain declaration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RelaychainConfig {
    /// Identity key for the executable (`relaychain` resolves through
    /// `RELAYCHAIN_EXECUTABLE`).
    pub binary: String,
    /// Chain spec identifier handed to the launcher, e.g. `rococo-local`.
    pub chain: String,
    /// Label used in data-directory paths; defaults to the binary key with
    /// underscores replaced by hyphens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Resolve a stable network key per node.
    #[serde(default)]
    pub node_keys: bool,
    /// Declared nodes, primary first.
    pub nodes: Vec<NodeConfig>,
    /// Opaque genesis override forwarded to the launcher unmodified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genesis: Option<Value>,
}

impl RelaychainConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.binary.is_empty() {
            return Err(ValidationError::InvalidRelay(
                "binary identity cannot be empty".to_string(),
            ));
        }
        if self.chain.is_empty() {
            return Err(ValidationError::InvalidRelay(
                "chain identifier cannot be empty".to_string(),
            ));
        }
        if self.nodes.is_empty() {
            return Err(ValidationError::InvalidRelay(
                "at least one node is required".to_string(),
            ));
        }
        for node in &self.nodes {
            if node.name.is_empty() {
                return Err(ValidationError::InvalidRelay(
                    "node names cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Parachain declaration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ParachainConfig {
    /// Identity key for the collator executable.
    pub binary: String,
    /// Parachain id registered on the relay chain, e.g. `"2102"`.
    pub id: String,
    /// Genesis balance endowed to the parachain account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Resolve a stable network key per node, e.g. for a primary/secondary
    /// pair that must keep fixed peer identities across restarts.
    #[serde(default)]
    pub node_keys: bool,
    /// Declared nodes, primary first.
    pub nodes: Vec<NodeConfig>,
}

impl ParachainConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.binary.is_empty() {
            return Err(ValidationError::InvalidParachain(format!(
                "parachain '{}' has an empty binary identity",
                self.id
            )));
        }
        if self.id.is_empty() {
            return Err(ValidationError::InvalidParachain(
                "parachain id cannot be empty".to_string(),
            ));
        }
        if self.nodes.is_empty() {
            return Err(ValidationError::InvalidParachain(format!(
                "parachain '{}' requires at least one node",
                self.id
            )));
        }
        for node in &self.nodes {
            if node.name.is_empty() {
                return Err(ValidationError::InvalidParachain(format!(
                    "parachain '{}' has a node with an empty name",
                    self.id
                )));
            }
        }
        Ok(())
    }
}

/// One node of a chain
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NodeConfig {
    pub name: String,
    /// Extra flags appended after the common and role layers.
    #[serde(default)]
    pub flags: Vec<String>,
    /// Allocate a metrics port and inject `--prometheus-port` for it.
    #[serde(default)]
    pub expose_metrics: bool,
    /// Manual port overrides. Overrides bypass the allocator but still pass
    /// through the collision check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p2p_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpc_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_port: Option<u16>,
    /// Per-node executable identity override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary: Option<String>,
}

impl NodeConfig {
    /// A node exposes metrics when asked explicitly or when a metrics port
    /// was pinned by hand.
    pub fn wants_metrics(&self) -> bool {
        self.expose_metrics || self.metrics_port.is_some()
    }
}

/// Registration-only parachain without dedicated full nodes.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SimpleParachainConfig {
    pub binary: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<String>,
    /// Collator port; drawn from the parachain p2p range when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

/// Cross-chain messaging channel declaration, forwarded to the launcher
/// unmodified.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HrmpChannel {
    pub sender: u32,
    pub recipient: u32,
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u32,
    #[serde(default = "default_max_message_size")]
    pub max_message_size: u32,
}

fn default_max_capacity() -> u32 {
    8
}

fn default_max_message_size() -> u32 {
    512
}

/// Named node-subset selection, answering "which declared nodes are active
/// in this environment" without hand-editing the topology.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Profile {
    /// Active relay chain node names; omitted means all declared nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relaychain: Option<Vec<String>>,
    /// Active node names per parachain id; an unlisted parachain keeps all
    /// declared nodes.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parachains: BTreeMap<String, Vec<String>>,
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid relay chain configuration: {0}")]
    InvalidRelay(String),
    #[error("Invalid parachain configuration: {0}")]
    InvalidParachain(String),
    #[error("Invalid channel declaration: {0}")]
    InvalidChannel(String),
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_yaml() -> &'static str {
        r#"
relaychain:
  binary: relaychain
  chain: rococo-local
  nodes:
    - name: alice
      flags: ["--prometheus-external"]
    - name: bob
    - name: charlie
parachains:
  - binary: collator
    id: "2102"
    balance: "1000000000000000000000"
    node_keys: true
    nodes:
      - name: alice
        expose_metrics: true
      - name: bob
hrmp_channels: []
types:
  HrmpChannelId:
    sender: u32
    receiver: u32
profiles:
  smoke:
    relaychain: [alice, bob]
    parachains:
      "2102": [alice]
"#
    }

    #[test]
    fn test_parse_topology_config() {
        let config: Config = serde_yaml::from_str(sample_yaml()).unwrap();
        assert!(config.validate().is_ok());

        assert_eq!(config.relaychain.binary, "relaychain");
        assert_eq!(config.relaychain.chain, "rococo-local");
        assert_eq!(config.relaychain.nodes.len(), 3);
        assert_eq!(config.relaychain.nodes[0].name, "alice");
        assert_eq!(config.parachains.len(), 1);
        assert!(config.parachains[0].node_keys);
        assert!(!config.finalization);
        assert!(config.types.contains_key("HrmpChannelId"));
    }

    #[test]
    fn test_defaults_reproduce_flag_templates() {
        let config: Config = serde_yaml::from_str(sample_yaml()).unwrap();
        assert_eq!(config.flags.common[0], "--unsafe-ws-external");
        assert_eq!(config.flags.relaychain, vec!["--wasm-execution=Compiled"]);
        assert!(config.flags.parachain.contains(&"--".to_string()));
        assert_eq!(config.ports.relay_ws, 9914);
        assert_eq!(config.base_path.env_key, DEFAULT_BASE_PATH_ENV);
    }

    #[test]
    fn test_validation_errors() {
        // Empty relay node list
        let yaml = r#"
relaychain:
  binary: relaychain
  chain: rococo-local
  nodes: []
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("at least one node"));

        // Empty binary identity
        let yaml = r#"
relaychain:
  binary: ""
  chain: rococo-local
  nodes:
    - name: alice
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_err());

        // Channel looping back to its sender
        let yaml = r#"
relaychain:
  binary: relaychain
  chain: rococo-local
  nodes:
    - name: alice
hrmp_channels:
  - sender: 2000
    recipient: 2000
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("must differ"));
    }

    #[test]
    fn test_profile_referencing_unknown_node_is_rejected() {
        let yaml = r#"
relaychain:
  binary: relaychain
  chain: rococo-local
  nodes:
    - name: alice
profiles:
  broken:
    relaychain: [alice, ferdie]
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("ferdie"));
    }

    #[test]
    fn test_select_profile_keeps_declaration_order() {
        let mut config: Config = serde_yaml::from_str(sample_yaml()).unwrap();
        config.select_profile("smoke").unwrap();

        let relay_names: Vec<&str> = config
            .relaychain
            .nodes
            .iter()
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(relay_names, vec!["alice", "bob"]);

        let para_names: Vec<&str> = config.parachains[0]
            .nodes
            .iter()
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(para_names, vec!["alice"]);
    }

    #[test]
    fn test_select_unknown_profile_fails() {
        let mut config: Config = serde_yaml::from_str(sample_yaml()).unwrap();
        let result = config.select_profile("production");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("production"));
    }

    #[test]
    fn test_hrmp_channel_defaults() {
        let yaml = "sender: 2000\nrecipient: 2001\n";
        let channel: HrmpChannel = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(channel.max_capacity, 8);
        assert_eq!(channel.max_message_size, 512);
    }

    #[test]
    fn test_wants_metrics() {
        let yaml = "name: alice\nmetrics_port: 9610\n";
        let node: NodeConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(!node.expose_metrics);
        assert!(node.wants_metrics());
    }
}
