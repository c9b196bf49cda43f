use clap::Parser;
use tracing::Level;

mod cli;
mod commands;
mod domain;
mod services;

use cli::Cli;
use commands::{handle_config_commands, handle_runtime_commands};
use services::config::load_config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if handle_config_commands(&cli)? {
        return Ok(());
    }

    let config = load_config(cli.config.as_deref())?;
    let registry = config.build_registry()?;
    tracing::debug!(
        rules = registry.len(),
        unknown_keys = registry.unknown_key_policy().as_str(),
        "default toleration registry ready"
    );

    handle_runtime_commands(&cli, &registry)
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}
