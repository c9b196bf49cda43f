//! Toleration evaluator: decides whether a toleration still has the shape
//! Kubernetes injected by default.

use crate::domain::models::{
    QosClass, QosSet, TaintEffect, Toleration, TolerationOperator, UnknownKeyPolicy,
};
use crate::services::registry::{DefaultTolerationRegistry, DefaultTolerationRule};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModificationReason {
    OperatorMismatch {
        expected: TolerationOperator,
        actual: TolerationOperator,
    },
    MissingTolerationSeconds {
        expected: i64,
    },
    TolerationSecondsMismatch {
        expected: i64,
        actual: i64,
    },
    EffectMismatch {
        expected: TaintEffect,
        actual: TaintEffect,
    },
    QosNotEligible {
        qos_class: QosClass,
    },
}

impl fmt::Display for ModificationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModificationReason::OperatorMismatch { expected, actual } => {
                write!(f, "operator {actual} differs from default {expected}")
            }
            ModificationReason::MissingTolerationSeconds { expected } => {
                write!(f, "tolerationSeconds missing (default {expected})")
            }
            ModificationReason::TolerationSecondsMismatch { expected, actual } => {
                write!(f, "tolerationSeconds {actual} differs from default {expected}")
            }
            ModificationReason::EffectMismatch { expected, actual } => {
                write!(f, "effect {actual} differs from default {expected}")
            }
            ModificationReason::QosNotEligible { qos_class } => {
                write!(f, "not injected by default for {qos_class} pods")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Default,
    Modified(ModificationReason),
    /// No default rule exists for the toleration key.
    UnknownKey,
}

impl Verdict {
    /// Collapses the verdict to a boolean, resolving unknown keys with `policy`.
    pub fn is_modified(self, policy: UnknownKeyPolicy) -> bool {
        match self {
            Verdict::Default => false,
            Verdict::Modified(_) => true,
            Verdict::UnknownKey => policy == UnknownKeyPolicy::Modified,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Verdict::Default => "default",
            Verdict::Modified(_) => "modified",
            Verdict::UnknownKey => "unknown_key",
        }
    }
}

pub fn classify(
    registry: &DefaultTolerationRegistry,
    toleration: &Toleration,
    qos: QosClass,
) -> Verdict {
    let Some(rule) = registry.lookup(&toleration.key) else {
        return Verdict::UnknownKey;
    };
    match *rule {
        DefaultTolerationRule::EvictionDelay {
            operator,
            toleration_seconds,
        } => check_eviction_delay(toleration, operator, toleration_seconds),
        DefaultTolerationRule::Pressure {
            operator,
            effect,
            applies_for,
        } => check_pressure(toleration, qos, operator, effect, applies_for),
    }
}

/// True when `toleration` deviates from the default Kubernetes injects for its
/// key on a pod of class `qos`.
pub fn is_toleration_modified(
    registry: &DefaultTolerationRegistry,
    toleration: &Toleration,
    qos: QosClass,
) -> bool {
    classify(registry, toleration, qos).is_modified(registry.unknown_key_policy())
}

// Effect is intentionally not compared for this family.
fn check_eviction_delay(
    toleration: &Toleration,
    operator: TolerationOperator,
    seconds: i64,
) -> Verdict {
    if toleration.operator != operator {
        return Verdict::Modified(ModificationReason::OperatorMismatch {
            expected: operator,
            actual: toleration.operator,
        });
    }
    match toleration.toleration_seconds {
        None => Verdict::Modified(ModificationReason::MissingTolerationSeconds {
            expected: seconds,
        }),
        Some(actual) if actual != seconds => {
            Verdict::Modified(ModificationReason::TolerationSecondsMismatch {
                expected: seconds,
                actual,
            })
        }
        Some(_) => Verdict::Default,
    }
}

fn check_pressure(
    toleration: &Toleration,
    qos: QosClass,
    operator: TolerationOperator,
    effect: TaintEffect,
    applies_for: QosSet,
) -> Verdict {
    if !applies_for.contains(qos) {
        return Verdict::Modified(ModificationReason::QosNotEligible { qos_class: qos });
    }
    if toleration.operator != operator {
        return Verdict::Modified(ModificationReason::OperatorMismatch {
            expected: operator,
            actual: toleration.operator,
        });
    }
    if toleration.effect != effect {
        return Verdict::Modified(ModificationReason::EffectMismatch {
            expected: effect,
            actual: toleration.effect,
        });
    }
    Verdict::Default
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::constants::{
        MEMORY_PRESSURE_TAINT_KEY, NOT_READY_TAINT_KEY, UNREACHABLE_TAINT_KEY,
    };

    fn toleration(
        key: &str,
        operator: TolerationOperator,
        effect: TaintEffect,
        seconds: Option<i64>,
    ) -> Toleration {
        Toleration {
            key: key.to_string(),
            operator,
            value: None,
            effect,
            toleration_seconds: seconds,
        }
    }

    #[test]
    fn default_and_modified_tolerations_table() {
        use TaintEffect::*;
        use TolerationOperator::*;

        let registry = DefaultTolerationRegistry::builtin();
        let cases = [
            (
                toleration(NOT_READY_TAINT_KEY, Exists, NoExecute, Some(300)),
                QosClass::Guaranteed,
                false,
            ),
            (
                toleration(UNREACHABLE_TAINT_KEY, Exists, NoExecute, Some(300)),
                QosClass::Guaranteed,
                false,
            ),
            (
                toleration(UNREACHABLE_TAINT_KEY, Exists, NoExecute, Some(350)),
                QosClass::Guaranteed,
                true,
            ),
            (
                toleration(UNREACHABLE_TAINT_KEY, Equal, NoExecute, Some(300)),
                QosClass::Guaranteed,
                true,
            ),
            (
                toleration(UNREACHABLE_TAINT_KEY, Exists, Unset, Some(300)),
                QosClass::Guaranteed,
                false,
            ),
            (
                toleration(MEMORY_PRESSURE_TAINT_KEY, Exists, NoSchedule, None),
                QosClass::Guaranteed,
                false,
            ),
            (
                toleration(MEMORY_PRESSURE_TAINT_KEY, Exists, NoSchedule, None),
                QosClass::BestEffort,
                true,
            ),
        ];

        for (i, (t, qos, expected)) in cases.iter().enumerate() {
            assert_eq!(
                is_toleration_modified(&registry, t, *qos),
                *expected,
                "case #{} ({} on {})",
                i + 1,
                t.key,
                qos
            );
        }
    }

    #[test]
    fn eviction_delay_default_holds_for_every_qos_class() {
        let registry = DefaultTolerationRegistry::builtin();
        for key in [NOT_READY_TAINT_KEY, UNREACHABLE_TAINT_KEY] {
            let t = toleration(
                key,
                TolerationOperator::Exists,
                TaintEffect::NoExecute,
                Some(300),
            );
            for qos in QosClass::ALL {
                assert!(!is_toleration_modified(&registry, &t, qos), "{key} {qos}");
            }
        }
    }

    #[test]
    fn eviction_delay_ignores_effect_entirely() {
        let registry = DefaultTolerationRegistry::builtin();
        for effect in [
            TaintEffect::NoSchedule,
            TaintEffect::PreferNoSchedule,
            TaintEffect::Unset,
        ] {
            let t = toleration(
                NOT_READY_TAINT_KEY,
                TolerationOperator::Exists,
                effect,
                Some(300),
            );
            assert_eq!(classify(&registry, &t, QosClass::BestEffort), Verdict::Default);
        }
    }

    #[test]
    fn eviction_delay_reasons() {
        let registry = DefaultTolerationRegistry::builtin();
        let missing = toleration(
            NOT_READY_TAINT_KEY,
            TolerationOperator::Exists,
            TaintEffect::NoExecute,
            None,
        );
        assert_eq!(
            classify(&registry, &missing, QosClass::Burstable),
            Verdict::Modified(ModificationReason::MissingTolerationSeconds { expected: 300 })
        );

        let longer = toleration(
            UNREACHABLE_TAINT_KEY,
            TolerationOperator::Exists,
            TaintEffect::NoExecute,
            Some(350),
        );
        assert_eq!(
            classify(&registry, &longer, QosClass::Guaranteed),
            Verdict::Modified(ModificationReason::TolerationSecondsMismatch {
                expected: 300,
                actual: 350
            })
        );

        let equal = toleration(
            UNREACHABLE_TAINT_KEY,
            TolerationOperator::Equal,
            TaintEffect::NoExecute,
            Some(300),
        );
        assert_eq!(
            classify(&registry, &equal, QosClass::Guaranteed),
            Verdict::Modified(ModificationReason::OperatorMismatch {
                expected: TolerationOperator::Exists,
                actual: TolerationOperator::Equal
            })
        );
    }

    #[test]
    fn pressure_rule_checks_operator_and_effect_for_eligible_classes() {
        let registry = DefaultTolerationRegistry::builtin();
        let burstable_default = toleration(
            MEMORY_PRESSURE_TAINT_KEY,
            TolerationOperator::Exists,
            TaintEffect::NoSchedule,
            None,
        );
        assert!(!is_toleration_modified(
            &registry,
            &burstable_default,
            QosClass::Burstable
        ));

        let wrong_effect = toleration(
            MEMORY_PRESSURE_TAINT_KEY,
            TolerationOperator::Exists,
            TaintEffect::NoExecute,
            None,
        );
        assert_eq!(
            classify(&registry, &wrong_effect, QosClass::Guaranteed),
            Verdict::Modified(ModificationReason::EffectMismatch {
                expected: TaintEffect::NoSchedule,
                actual: TaintEffect::NoExecute
            })
        );

        let wrong_operator = toleration(
            MEMORY_PRESSURE_TAINT_KEY,
            TolerationOperator::Equal,
            TaintEffect::NoSchedule,
            None,
        );
        assert!(is_toleration_modified(
            &registry,
            &wrong_operator,
            QosClass::Guaranteed
        ));
    }

    #[test]
    fn pressure_rule_on_ineligible_class_is_always_modified() {
        let registry = DefaultTolerationRegistry::builtin();
        for (operator, effect) in [
            (TolerationOperator::Exists, TaintEffect::NoSchedule),
            (TolerationOperator::Equal, TaintEffect::NoExecute),
            (TolerationOperator::Exists, TaintEffect::Unset),
        ] {
            let t = toleration(MEMORY_PRESSURE_TAINT_KEY, operator, effect, None);
            assert_eq!(
                classify(&registry, &t, QosClass::BestEffort),
                Verdict::Modified(ModificationReason::QosNotEligible {
                    qos_class: QosClass::BestEffort
                })
            );
        }
    }

    #[test]
    fn unknown_keys_follow_registry_policy() {
        let t = toleration(
            "example.com/dedicated",
            TolerationOperator::Exists,
            TaintEffect::NoSchedule,
            None,
        );
        let strict = DefaultTolerationRegistry::builtin();
        assert_eq!(classify(&strict, &t, QosClass::Guaranteed), Verdict::UnknownKey);
        assert!(is_toleration_modified(&strict, &t, QosClass::Guaranteed));

        for policy in [UnknownKeyPolicy::Default, UnknownKeyPolicy::Ignore] {
            let lenient = DefaultTolerationRegistry::builder()
                .with_builtin_rules()
                .unknown_keys(policy)
                .build();
            assert!(!is_toleration_modified(&lenient, &t, QosClass::Guaranteed));
        }
    }

    #[test]
    fn verdicts_are_deterministic() {
        let registry = DefaultTolerationRegistry::builtin();
        let t = toleration(
            MEMORY_PRESSURE_TAINT_KEY,
            TolerationOperator::Exists,
            TaintEffect::NoSchedule,
            None,
        );
        let first = classify(&registry, &t, QosClass::BestEffort);
        for _ in 0..16 {
            assert_eq!(classify(&registry, &t, QosClass::BestEffort), first);
        }
    }

    #[test]
    fn reasons_render_for_reports() {
        let reason = ModificationReason::TolerationSecondsMismatch {
            expected: 300,
            actual: 350,
        };
        assert_eq!(
            reason.to_string(),
            "tolerationSeconds 350 differs from default 300"
        );
        let reason = ModificationReason::QosNotEligible {
            qos_class: QosClass::BestEffort,
        };
        assert_eq!(
            reason.to_string(),
            "not injected by default for BestEffort pods"
        );
    }
}
