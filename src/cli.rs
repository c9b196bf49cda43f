use crate::domain::models::{QosClass, TaintEffect, TolerationOperator};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "tolaudit",
    version,
    about = "Flag pod tolerations that deviate from the Kubernetes defaults"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "Config file (default: $HOME/.config/tolaudit/config.toml)"
    )]
    pub config: Option<PathBuf>,
    #[arg(
        short,
        long,
        global = true,
        action = ArgAction::Count,
        help = "Increase log verbosity (-v info, -vv debug, -vvv trace)"
    )]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check every toleration of the given pod documents
    Check {
        /// Pod or PodList JSON file, or `-` for stdin
        source: String,
        #[arg(long, value_enum, help = "QoS class to assume for every pod")]
        qos: Option<QosClass>,
        #[arg(long, default_value_t = false, help = "Exit non-zero when any toleration is modified")]
        strict: bool,
    },
    /// Classify a single toleration
    Eval {
        #[arg(long)]
        key: String,
        #[arg(long, value_enum, default_value_t = TolerationOperator::Exists)]
        operator: TolerationOperator,
        #[arg(long, value_enum, default_value_t = TaintEffect::Unset)]
        effect: TaintEffect,
        #[arg(long)]
        seconds: Option<i64>,
        #[arg(long, value_enum)]
        qos: QosClass,
    },
    /// List the default toleration rules
    Rules,
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Load the configuration and build the rule registry from it
    Validate,
}
