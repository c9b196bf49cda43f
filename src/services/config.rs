use crate::domain::constants::{CONFIG_DIR, CONFIG_FILE_NAME};
use crate::domain::models::{QosClass, QosSet, TaintEffect, TolerationOperator, UnknownKeyPolicy};
use crate::services::registry::{DefaultTolerationRegistry, DefaultTolerationRule, RegistryError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_operator() -> TolerationOperator {
    TolerationOperator::Exists
}

fn default_pressure_effect() -> TaintEffect {
    TaintEffect::NoSchedule
}

fn default_pressure_qos() -> Vec<QosClass> {
    vec![QosClass::Guaranteed, QosClass::Burstable]
}

#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub unknown_keys: UnknownKeyPolicy,
    #[serde(default)]
    pub eviction_delay: Vec<EvictionDelayRuleConfig>,
    #[serde(default)]
    pub pressure: Vec<PressureRuleConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EvictionDelayRuleConfig {
    pub key: String,
    #[serde(default = "default_operator")]
    pub operator: TolerationOperator,
    pub toleration_seconds: i64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PressureRuleConfig {
    pub key: String,
    #[serde(default = "default_operator")]
    pub operator: TolerationOperator,
    #[serde(default = "default_pressure_effect")]
    pub effect: TaintEffect,
    #[serde(default = "default_pressure_qos")]
    pub qos: Vec<QosClass>,
}

impl ConfigFile {
    /// Built-in rules plus the configured ones.
    pub fn build_registry(&self) -> Result<DefaultTolerationRegistry, RegistryError> {
        let mut builder = DefaultTolerationRegistry::builder()
            .with_builtin_rules()
            .unknown_keys(self.unknown_keys);
        for rule in &self.eviction_delay {
            builder.insert(
                rule.key.clone(),
                DefaultTolerationRule::EvictionDelay {
                    operator: rule.operator,
                    toleration_seconds: rule.toleration_seconds,
                },
            )?;
        }
        for rule in &self.pressure {
            builder.insert(
                rule.key.clone(),
                DefaultTolerationRule::Pressure {
                    operator: rule.operator,
                    effect: rule.effect,
                    applies_for: QosSet::of(&rule.qos),
                },
            )?;
        }
        Ok(builder.build())
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    Ok(PathBuf::from(home).join(CONFIG_DIR).join(CONFIG_FILE_NAME))
}

/// Loads `explicit` if given (it must exist), otherwise the per-user config,
/// falling back to defaults when that file is absent.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<ConfigFile> {
    let path = match explicit {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("config file not found: {}", p.display());
            }
            p.to_path_buf()
        }
        None => match default_config_path() {
            Ok(p) if p.exists() => p,
            _ => {
                tracing::debug!("no config file, using built-in defaults");
                return Ok(ConfigFile::default());
            }
        },
    };
    tracing::debug!(path = %path.display(), "loading config");
    let raw = std::fs::read_to_string(&path)?;
    parse_config(&raw).map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))
}

pub fn parse_config(raw: &str) -> anyhow::Result<ConfigFile> {
    Ok(toml::from_str(raw)?)
}
