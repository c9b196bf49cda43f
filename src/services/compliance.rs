use crate::domain::models::{
    CheckReport, PodDocument, QosClass, TolerationFinding, UnknownKeyPolicy,
};
use crate::services::evaluator::{classify, is_toleration_modified, Verdict};
use crate::services::registry::DefaultTolerationRegistry;

/// Classifies every toleration of every pod and aggregates the findings.
///
/// QoS comes from `status.qosClass` unless `qos_override` is set; a pod with
/// neither is an input error.
pub fn audit_pods(
    registry: &DefaultTolerationRegistry,
    pods: &[PodDocument],
    qos_override: Option<QosClass>,
) -> anyhow::Result<CheckReport> {
    let policy = registry.unknown_key_policy();
    let mut findings = Vec::new();
    let mut non_compliant_pods = 0;
    let mut tolerations_checked = 0;
    let mut ignored_tolerations = 0;

    for pod in pods {
        let Some(qos) = qos_override.or(pod.status.qos_class) else {
            anyhow::bail!(
                "pod {}/{} has no status.qosClass (pass --qos to supply one)",
                pod.namespace(),
                pod.name()
            );
        };

        let before = findings.len();
        for t in &pod.spec.tolerations {
            let verdict = classify(registry, t, qos);
            if verdict == Verdict::UnknownKey && policy == UnknownKeyPolicy::Ignore {
                ignored_tolerations += 1;
                continue;
            }
            tolerations_checked += 1;
            tracing::debug!(
                pod = pod.name(),
                namespace = pod.namespace(),
                key = %t.key,
                verdict = verdict.label(),
                "classified toleration"
            );
            if !is_toleration_modified(registry, t, qos) {
                continue;
            }
            let reason = match verdict {
                Verdict::Modified(reason) => reason.to_string(),
                _ => "no default toleration exists for this key".to_string(),
            };
            findings.push(TolerationFinding {
                namespace: pod.namespace().to_string(),
                pod: pod.name().to_string(),
                qos_class: qos,
                key: t.key.clone(),
                operator: t.operator,
                effect: t.effect,
                toleration_seconds: t.toleration_seconds,
                reason,
            });
        }
        if findings.len() > before {
            non_compliant_pods += 1;
        }
    }

    let overall = if findings.is_empty() {
        "ok"
    } else {
        "non_compliant"
    }
    .to_string();

    tracing::info!(
        pods = pods.len(),
        non_compliant = non_compliant_pods,
        findings = findings.len(),
        "toleration check finished"
    );

    Ok(CheckReport {
        overall,
        pods_checked: pods.len(),
        compliant_pods: pods.len() - non_compliant_pods,
        non_compliant_pods,
        tolerations_checked,
        ignored_tolerations,
        findings,
    })
}
