//! Default toleration registry.
//!
//! Holds the toleration shape Kubernetes injects for each well-known system
//! taint. The registry is built once and only read afterwards.

use crate::domain::constants::{
    DEFAULT_TOLERATION_SECONDS, MEMORY_PRESSURE_TAINT_KEY, NOT_READY_TAINT_KEY,
    UNREACHABLE_TAINT_KEY,
};
use crate::domain::models::{
    QosClass, QosSet, RuleRow, TaintEffect, TolerationOperator, UnknownKeyPolicy,
};
use std::collections::HashMap;

/// Default shape of an injected toleration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultTolerationRule {
    /// NoExecute eviction delay (not-ready/unreachable). Injected for every QoS
    /// class; the effect is never part of the comparison.
    EvictionDelay {
        operator: TolerationOperator,
        toleration_seconds: i64,
    },
    /// Node pressure condition. Only the listed QoS classes receive it.
    Pressure {
        operator: TolerationOperator,
        effect: TaintEffect,
        applies_for: QosSet,
    },
}

impl DefaultTolerationRule {
    pub fn family(&self) -> &'static str {
        match self {
            DefaultTolerationRule::EvictionDelay { .. } => "eviction-delay",
            DefaultTolerationRule::Pressure { .. } => "pressure",
        }
    }

    pub fn applies_for(&self) -> QosSet {
        match self {
            DefaultTolerationRule::EvictionDelay { .. } => QosSet::ALL,
            DefaultTolerationRule::Pressure { applies_for, .. } => *applies_for,
        }
    }
}

const BUILTIN_RULES: &[(&str, DefaultTolerationRule)] = &[
    (
        NOT_READY_TAINT_KEY,
        DefaultTolerationRule::EvictionDelay {
            operator: TolerationOperator::Exists,
            toleration_seconds: DEFAULT_TOLERATION_SECONDS,
        },
    ),
    (
        UNREACHABLE_TAINT_KEY,
        DefaultTolerationRule::EvictionDelay {
            operator: TolerationOperator::Exists,
            toleration_seconds: DEFAULT_TOLERATION_SECONDS,
        },
    ),
    (
        MEMORY_PRESSURE_TAINT_KEY,
        DefaultTolerationRule::Pressure {
            operator: TolerationOperator::Exists,
            effect: TaintEffect::NoSchedule,
            applies_for: QosSet::EMPTY
                .with(QosClass::Guaranteed)
                .with(QosClass::Burstable),
        },
    ),
];

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate default toleration rule for key: {0}")]
    DuplicateKey(String),
    #[error("default toleration rule has an empty key")]
    EmptyKey,
    #[error("toleration_seconds must be positive for key {key} (got {seconds})")]
    InvalidSeconds { key: String, seconds: i64 },
    #[error("pressure rule for key {0} applies to no QoS class")]
    EmptyQosSet(String),
}

#[derive(Debug, Clone)]
pub struct DefaultTolerationRegistry {
    rules: HashMap<String, DefaultTolerationRule>,
    unknown_keys: UnknownKeyPolicy,
}

impl DefaultTolerationRegistry {
    /// Built-in table with the default unknown-key policy.
    pub fn builtin() -> Self {
        Self {
            rules: BUILTIN_RULES
                .iter()
                .map(|(key, rule)| (key.to_string(), *rule))
                .collect(),
            unknown_keys: UnknownKeyPolicy::default(),
        }
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn lookup(&self, key: &str) -> Option<&DefaultTolerationRule> {
        self.rules.get(key)
    }

    pub fn unknown_key_policy(&self) -> UnknownKeyPolicy {
        self.unknown_keys
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Rules sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DefaultTolerationRule)> {
        let mut entries: Vec<_> = self
            .rules
            .iter()
            .map(|(key, rule)| (key.as_str(), rule))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }

    pub fn rule_rows(&self) -> Vec<RuleRow> {
        self.iter()
            .map(|(key, rule)| match rule {
                DefaultTolerationRule::EvictionDelay {
                    operator,
                    toleration_seconds,
                } => RuleRow {
                    key: key.to_string(),
                    family: rule.family().to_string(),
                    operator: *operator,
                    effect: None,
                    toleration_seconds: Some(*toleration_seconds),
                    applies_for: rule.applies_for(),
                },
                DefaultTolerationRule::Pressure {
                    operator, effect, ..
                } => RuleRow {
                    key: key.to_string(),
                    family: rule.family().to_string(),
                    operator: *operator,
                    effect: Some(*effect),
                    toleration_seconds: None,
                    applies_for: rule.applies_for(),
                },
            })
            .collect()
    }
}

impl Default for DefaultTolerationRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Debug, Default)]
pub struct RegistryBuilder {
    rules: HashMap<String, DefaultTolerationRule>,
    unknown_keys: UnknownKeyPolicy,
}

impl RegistryBuilder {
    pub fn with_builtin_rules(mut self) -> Self {
        for (key, rule) in BUILTIN_RULES {
            self.rules.insert(key.to_string(), *rule);
        }
        self
    }

    pub fn unknown_keys(mut self, policy: UnknownKeyPolicy) -> Self {
        self.unknown_keys = policy;
        self
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        rule: DefaultTolerationRule,
    ) -> Result<(), RegistryError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(RegistryError::EmptyKey);
        }
        match rule {
            DefaultTolerationRule::EvictionDelay {
                toleration_seconds, ..
            } if toleration_seconds <= 0 => {
                return Err(RegistryError::InvalidSeconds {
                    key,
                    seconds: toleration_seconds,
                });
            }
            DefaultTolerationRule::Pressure { applies_for, .. } if applies_for.is_empty() => {
                return Err(RegistryError::EmptyQosSet(key));
            }
            _ => {}
        }
        if self.rules.contains_key(&key) {
            return Err(RegistryError::DuplicateKey(key));
        }
        self.rules.insert(key, rule);
        Ok(())
    }

    pub fn build(self) -> DefaultTolerationRegistry {
        DefaultTolerationRegistry {
            rules: self.rules,
            unknown_keys: self.unknown_keys,
        }
    }
}
