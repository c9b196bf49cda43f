use crate::cli::{Cli, Commands, ConfigCommands};
use crate::domain::models::JsonOut;
use crate::services::config::{default_config_path, load_config};

const BUILTIN_DEFAULTS: &str = "<built-in defaults>";

/// Handles `config` subcommands. Runs before the registry is built so that
/// `config validate` can report a broken config instead of failing startup.
pub fn handle_config_commands(cli: &Cli) -> anyhow::Result<bool> {
    let Commands::Config { command } = &cli.command else {
        return Ok(false);
    };

    // Without an explicit --config or a HOME, only the built-in defaults apply.
    let path = cli
        .config
        .clone()
        .or_else(|| default_config_path().ok())
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| BUILTIN_DEFAULTS.to_string());

    match command {
        ConfigCommands::Show => {
            let cfg = load_config(cli.config.as_deref())?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: &cfg
                    })?
                );
            } else {
                println!("# {}", path);
                print!("{}", toml::to_string_pretty(&cfg)?);
            }
        }
        ConfigCommands::Validate => {
            let cfg = load_config(cli.config.as_deref())?;
            let registry = cfg.build_registry()?;
            let summary = serde_json::json!({
                "path": path,
                "rules": registry.len(),
                "unknown_keys": registry.unknown_key_policy().as_str(),
            });
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: summary
                    })?
                );
            } else {
                println!(
                    "config valid ({} rules, unknown keys: {})",
                    registry.len(),
                    registry.unknown_key_policy().as_str()
                );
            }
        }
    }

    Ok(true)
}
