use clap::ValueEnum;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Reads an explicit JSON `null` as the type's zero value, the way the API
/// server's decoder does.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// Toleration operator. Kubernetes treats a missing or empty operator as `Equal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
pub enum TolerationOperator {
    Exists,
    #[default]
    #[serde(alias = "")]
    Equal,
}

impl TolerationOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            TolerationOperator::Exists => "Exists",
            TolerationOperator::Equal => "Equal",
        }
    }
}

impl fmt::Display for TolerationOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Taint effect a toleration applies to. `Unset` is the empty effect, which
/// Kubernetes reads as "every effect".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
pub enum TaintEffect {
    #[value(name = "noschedule", alias = "no-schedule")]
    NoSchedule,
    #[value(name = "prefernoschedule", alias = "prefer-no-schedule")]
    PreferNoSchedule,
    #[value(name = "noexecute", alias = "no-execute")]
    NoExecute,
    #[default]
    #[serde(rename = "")]
    #[value(name = "none")]
    Unset,
}

impl TaintEffect {
    pub fn as_str(self) -> &'static str {
        match self {
            TaintEffect::NoSchedule => "NoSchedule",
            TaintEffect::PreferNoSchedule => "PreferNoSchedule",
            TaintEffect::NoExecute => "NoExecute",
            TaintEffect::Unset => "",
        }
    }
}

impl fmt::Display for TaintEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaintEffect::Unset => f.write_str("<none>"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Pod quality-of-service class as reported in `status.qosClass`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum QosClass {
    Guaranteed,
    Burstable,
    BestEffort,
}

impl QosClass {
    pub const ALL: [QosClass; 3] = [
        QosClass::Guaranteed,
        QosClass::Burstable,
        QosClass::BestEffort,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QosClass::Guaranteed => "Guaranteed",
            QosClass::Burstable => "Burstable",
            QosClass::BestEffort => "BestEffort",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            QosClass::Guaranteed => 0b001,
            QosClass::Burstable => 0b010,
            QosClass::BestEffort => 0b100,
        }
    }
}

impl fmt::Display for QosClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bitmask set of QoS classes a default toleration is injected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct QosSet(u8);

impl QosSet {
    pub const EMPTY: QosSet = QosSet(0);
    pub const ALL: QosSet = QosSet(0b111);

    pub const fn with(self, qos: QosClass) -> Self {
        QosSet(self.0 | qos.bit())
    }

    pub fn of(classes: &[QosClass]) -> Self {
        classes.iter().fold(QosSet::EMPTY, |set, qos| set.with(*qos))
    }

    pub const fn contains(self, qos: QosClass) -> bool {
        self.0 & qos.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = QosClass> {
        QosClass::ALL.into_iter().filter(move |qos| self.contains(*qos))
    }
}

impl Serialize for QosSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(None)?;
        for qos in self.iter() {
            seq.serialize_element(&qos)?;
        }
        seq.end()
    }
}

/// One entry of a pod's `spec.tolerations`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toleration {
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub operator: TolerationOperator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub effect: TaintEffect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toleration_seconds: Option<i64>,
}

/// What to do with a toleration whose key has no default rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownKeyPolicy {
    /// Report it as a non-default toleration.
    #[default]
    Modified,
    /// Treat it as untouched.
    Default,
    /// Leave it out of the verdicts entirely.
    Ignore,
}

impl UnknownKeyPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            UnknownKeyPolicy::Modified => "modified",
            UnknownKeyPolicy::Default => "default",
            UnknownKeyPolicy::Ignore => "ignore",
        }
    }
}

// Pod documents: only the fields the checker reads.

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PodDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ObjectMeta,
    #[serde(default, deserialize_with = "null_as_default")]
    pub spec: PodSpec,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: PodStatus,
}

impl PodDocument {
    pub fn namespace(&self) -> &str {
        self.metadata.namespace.as_deref().unwrap_or("default")
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ObjectMeta {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PodSpec {
    #[serde(default, deserialize_with = "null_as_default")]
    pub tolerations: Vec<Toleration>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PodStatus {
    #[serde(default)]
    pub qos_class: Option<QosClass>,
}

// Reports.

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TolerationFinding {
    pub namespace: String,
    pub pod: String,
    pub qos_class: QosClass,
    pub key: String,
    pub operator: TolerationOperator,
    pub effect: TaintEffect,
    pub toleration_seconds: Option<i64>,
    pub reason: String,
}

#[derive(Serialize, Debug)]
pub struct CheckReport {
    pub overall: String,
    pub pods_checked: usize,
    pub compliant_pods: usize,
    pub non_compliant_pods: usize,
    pub tolerations_checked: usize,
    pub ignored_tolerations: usize,
    pub findings: Vec<TolerationFinding>,
}

#[derive(Serialize, Debug)]
pub struct EvalReport {
    pub key: String,
    pub qos_class: QosClass,
    pub verdict: String,
    pub modified: bool,
    pub reason: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct RuleRow {
    pub key: String,
    pub family: String,
    pub operator: TolerationOperator,
    pub effect: Option<TaintEffect>,
    pub toleration_seconds: Option<i64>,
    pub applies_for: QosSet,
}
