use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use launchgen::config_loader;
use launchgen::descriptor;
use launchgen::identity::EnvSource;
use launchgen::topology;

/// Topology compiler for polkadot-launch test networks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the topology configuration YAML file
    #[arg(short, long)]
    config: PathBuf,

    /// Output path for the launcher configuration ("-" writes to stdout)
    #[arg(short, long, default_value = "launch.json")]
    output: PathBuf,

    /// Profile selecting a subset of the declared nodes
    #[arg(short, long)]
    profile: Option<String>,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Starting launchgen");
    info!("Configuration file: {:?}", args.config);

    // Load the topology, reduced to the requested profile if any
    let config = config_loader::load_config_with_profile(&args.config, args.profile.as_deref())?;

    // Resolve ports, identities, flags and data directories
    let resolved = topology::build_topology(&config, &EnvSource)?;
    info!(
        "Topology: {} relay node(s), {} parachain(s), {} simple parachain(s)",
        resolved.relay.nodes.len(),
        resolved.parachains.len(),
        resolved.simple_parachains.len()
    );

    // Render the launcher configuration
    let launch = descriptor::emit(&resolved);
    let json = descriptor::to_json(&launch)?;

    if args.output == Path::new("-") {
        println!("{}", json);
    } else {
        fs::write(&args.output, format!("{}\n", json)).wrap_err_with(|| {
            format!(
                "Failed to write launcher configuration '{}'",
                args.output.display()
            )
        })?;
        info!("Generated launcher configuration: {:?}", args.output);
        info!("Ready to launch with: polkadot-launch {:?}", args.output);
    }

    Ok(())
}
