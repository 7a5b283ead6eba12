#[cfg(test)]
mod launch_descriptor_tests {
    use std::io::Write;
    use tempfile::NamedTempFile;

    // Import from the library crate
    use launchgen::config::Config;
    use launchgen::config_loader;
    use launchgen::descriptor::{emit, to_json};
    use launchgen::identity::MapSource;
    use launchgen::topology::{build_topology, BuildError};

    /// A relay chain with three validators plus one two-collator parachain,
    /// the layout this tool exists to generate.
    const TOPOLOGY: &str = r#"
relaychain:
  binary: relaychain
  chain: rococo-local
  nodes:
    - name: alice
    - name: bob
    - name: charlie
parachains:
  - binary: collator
    id: "2102"
    balance: "1000000000000000000000"
    nodes:
      - name: alice
        expose_metrics: true
      - name: bob
types:
  HrmpChannelId:
    sender: u32
    receiver: u32
finalization: false
profiles:
  smoke:
    relaychain: [alice]
    parachains:
      "2102": [alice]
"#;

    fn identities() -> MapSource {
        MapSource::new()
            .with("RELAYCHAIN_EXECUTABLE", "/usr/local/bin/polkadot")
            .with("COLLATOR_EXECUTABLE", "/usr/local/bin/collator")
    }

    fn write_topology(yaml: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();
        temp_file
    }

    /// Test the full pipeline: YAML file in, launcher JSON out.
    #[test]
    fn test_full_pipeline_produces_launcher_schema() {
        let temp_file = write_topology(TOPOLOGY);
        let config = config_loader::load_config(temp_file.path()).unwrap();
        let resolved = build_topology(&config, &identities()).unwrap();
        let json = to_json(&emit(&resolved)).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        // Relay chain section
        assert_eq!(value["relaychain"]["bin"], "/usr/local/bin/polkadot");
        assert_eq!(value["relaychain"]["chain"], "rococo-local");
        let relay_nodes = value["relaychain"]["nodes"].as_array().unwrap();
        assert_eq!(relay_nodes.len(), 3);
        assert_eq!(relay_nodes[0]["name"], "alice");
        assert_eq!(relay_nodes[0]["wsPort"], 9914);
        assert_eq!(relay_nodes[0]["port"], 30300);
        assert_eq!(relay_nodes[0]["rpcPort"], 9900);
        assert_eq!(relay_nodes[2]["wsPort"], 9916);
        assert_eq!(relay_nodes[2]["port"], 30302);

        // Parachain section
        let para = &value["parachains"][0];
        assert_eq!(para["bin"], "/usr/local/bin/collator");
        assert_eq!(para["id"], "2102");
        assert_eq!(para["balance"], "1000000000000000000000");
        assert_eq!(para["nodes"][0]["wsPort"], 9944);
        assert_eq!(para["nodes"][1]["wsPort"], 9945);

        // Static payload sections
        assert_eq!(value["types"]["HrmpChannelId"]["sender"], "u32");
        assert_eq!(value["simpleParachains"], serde_json::json!([]));
        assert_eq!(value["hrmpChannels"], serde_json::json!([]));
        assert_eq!(value["finalization"], false);
    }

    /// Test that no two nodes share a port of the same kind, across chains.
    #[test]
    fn test_no_port_is_shared_within_a_kind() {
        let config: Config = serde_yaml::from_str(TOPOLOGY).unwrap();
        let resolved = build_topology(&config, &identities()).unwrap();
        let value = serde_json::to_value(emit(&resolved)).unwrap();

        let mut all_nodes: Vec<&serde_json::Value> =
            value["relaychain"]["nodes"].as_array().unwrap().iter().collect();
        for para in value["parachains"].as_array().unwrap() {
            all_nodes.extend(para["nodes"].as_array().unwrap());
        }

        for field in ["wsPort", "port", "rpcPort"] {
            let ports: Vec<u64> = all_nodes
                .iter()
                .map(|n| n[field].as_u64().unwrap())
                .collect();
            let mut unique = ports.clone();
            unique.sort_unstable();
            unique.dedup();
            assert_eq!(ports.len(), unique.len(), "duplicate {} assigned", field);
        }
    }

    /// Test that a missing node key aborts resolution, naming the node,
    /// before any descriptor exists.
    #[test]
    fn test_missing_node_key_aborts_resolution() {
        let yaml = r#"
relaychain:
  binary: relaychain
  chain: rococo-local
  nodes:
    - name: alice
parachains:
  - binary: collator
    id: "2102"
    node_keys: true
    nodes:
      - name: alice
      - name: bob
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let source = identities().with("COLLATOR_ALICE_NODE_KEY", "aa11");

        let err = build_topology(&config, &source).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("bob"), "error should name the node: {}", message);
        assert!(message.contains("COLLATOR_BOB_NODE_KEY"));
    }

    /// Test that emitting the same topology twice is byte-identical.
    #[test]
    fn test_double_emission_is_byte_identical() {
        let config: Config = serde_yaml::from_str(TOPOLOGY).unwrap();

        let first = to_json(&emit(&build_topology(&config, &identities()).unwrap())).unwrap();
        let second = to_json(&emit(&build_topology(&config, &identities()).unwrap())).unwrap();

        assert_eq!(first, second);
    }

    /// Test that profile selection shrinks the network without disturbing
    /// the port ladder's starting points.
    #[test]
    fn test_profile_selection_shrinks_network() {
        let temp_file = write_topology(TOPOLOGY);
        let config =
            config_loader::load_config_with_profile(temp_file.path(), Some("smoke")).unwrap();
        let resolved = build_topology(&config, &identities()).unwrap();

        assert_eq!(resolved.relay.nodes.len(), 1);
        assert_eq!(resolved.relay.nodes[0].name, "alice");
        assert_eq!(resolved.relay.nodes[0].ports.ws, 9914);
        assert_eq!(resolved.parachains[0].nodes.len(), 1);
        assert_eq!(resolved.parachains[0].nodes[0].ports.ws, 9944);
    }

    /// Test that the data-directory root read from the environment
    /// namespace threads into every node's basePath.
    #[test]
    fn test_base_path_root_threads_into_descriptor() {
        let config: Config = serde_yaml::from_str(TOPOLOGY).unwrap();
        let source = identities().with("POLKADOT_LAUNCH_BASE_PATH_BASE", "/tmp/launch");
        let resolved = build_topology(&config, &source).unwrap();
        let value = serde_json::to_value(emit(&resolved)).unwrap();

        assert_eq!(
            value["relaychain"]["nodes"][0]["basePath"],
            "/tmp/launch/alice-0-relaychain"
        );
        assert_eq!(
            value["parachains"][0]["nodes"][1]["basePath"],
            "/tmp/launch/bob-1-collator"
        );

        // Without a root, basePath is omitted rather than emitted as null.
        let resolved = build_topology(&config, &identities()).unwrap();
        let value = serde_json::to_value(emit(&resolved)).unwrap();
        assert!(value["relaychain"]["nodes"][0].get("basePath").is_none());
    }

    /// Test that a metrics-exposing node gets its prometheus flag first, so
    /// later layers can still override it.
    #[test]
    fn test_metrics_flag_leads_the_flag_list() {
        let config: Config = serde_yaml::from_str(TOPOLOGY).unwrap();
        let resolved = build_topology(&config, &identities()).unwrap();
        let value = serde_json::to_value(emit(&resolved)).unwrap();

        let flags = value["parachains"][0]["nodes"][0]["flags"].as_array().unwrap();
        assert_eq!(flags[0], "--prometheus-port=9610");
        // The role template's divider survives composition.
        assert!(flags.iter().any(|f| f == "--"));

        // Bob exposes no metrics; his list starts with the common layer.
        let flags = value["parachains"][0]["nodes"][1]["flags"].as_array().unwrap();
        assert_eq!(flags[0], "--unsafe-ws-external");
    }

    /// Test that hand-pinned duplicate ports are rejected with both owners
    /// named.
    #[test]
    fn test_hand_pinned_duplicate_port_is_rejected() {
        let yaml = r#"
relaychain:
  binary: relaychain
  chain: rococo-local
  nodes:
    - name: alice
      ws_port: 12000
    - name: bob
      ws_port: 12000
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let err = build_topology(&config, &identities()).unwrap_err();

        assert!(matches!(err, BuildError::PortCollision(_)));
        let message = err.to_string();
        assert!(message.contains("12000"));
        assert!(message.contains("alice"));
        assert!(message.contains("bob"));
    }

    /// Test that a genesis override passes through to the descriptor
    /// unmodified.
    #[test]
    fn test_genesis_override_passthrough() {
        let yaml = r#"
relaychain:
  binary: relaychain
  chain: rococo-local
  genesis:
    runtime:
      configuration:
        config:
          validation_upgrade_frequency: 1
  nodes:
    - name: alice
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let resolved = build_topology(&config, &identities()).unwrap();
        let value = serde_json::to_value(emit(&resolved)).unwrap();

        assert_eq!(
            value["relaychain"]["genesis"]["runtime"]["configuration"]["config"]
                ["validation_upgrade_frequency"],
            1
        );
    }

    /// Test channels and simple parachains end to end.
    #[test]
    fn test_channels_and_simple_parachains() {
        let yaml = r#"
relaychain:
  binary: relaychain
  chain: rococo-local
  nodes:
    - name: alice
parachains:
  - binary: collator
    id: "2102"
    nodes:
      - name: alice
simple_parachains:
  - binary: collator
    id: "2103"
    balance: "1000000000000000000000"
hrmp_channels:
  - sender: 2102
    recipient: 2103
  - sender: 2103
    recipient: 2102
    max_capacity: 16
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let resolved = build_topology(&config, &identities()).unwrap();
        let value = serde_json::to_value(emit(&resolved)).unwrap();

        // The collator node took 30400; the simple parachain draws next.
        assert_eq!(value["simpleParachains"][0]["port"], "30401");
        assert_eq!(value["simpleParachains"][0]["balance"], "1000000000000000000000");

        assert_eq!(value["hrmpChannels"][0]["maxCapacity"], 8);
        assert_eq!(value["hrmpChannels"][0]["maxMessageSize"], 512);
        assert_eq!(value["hrmpChannels"][1]["maxCapacity"], 16);
    }
}
