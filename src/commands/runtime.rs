use crate::cli::{Cli, Commands};
use crate::domain::models::{CheckReport, EvalReport, Toleration};
use crate::services::compliance::audit_pods;
use crate::services::evaluator::{classify, is_toleration_modified, Verdict};
use crate::services::output::{print_report, print_rows};
use crate::services::pods::load_pods;
use crate::services::registry::DefaultTolerationRegistry;
use crate::services::storage::record;

pub fn handle_runtime_commands(
    cli: &Cli,
    registry: &DefaultTolerationRegistry,
) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Check {
            source,
            qos,
            strict,
        } => {
            let pods = load_pods(source)?;
            let report = audit_pods(registry, &pods, *qos)?;
            record(
                "check",
                serde_json::json!({
                    "source": source,
                    "overall": report.overall,
                    "pods": report.pods_checked,
                    "findings": report.findings.len(),
                }),
            );
            let ok = report.overall == "ok";
            print_report(cli.json, ok, &report, check_lines)?;
            if *strict && !ok {
                anyhow::bail!(
                    "{} of {} pods carry non-default tolerations",
                    report.non_compliant_pods,
                    report.pods_checked
                );
            }
        }
        Commands::Eval {
            key,
            operator,
            effect,
            seconds,
            qos,
        } => {
            let toleration = Toleration {
                key: key.clone(),
                operator: *operator,
                value: None,
                effect: *effect,
                toleration_seconds: *seconds,
            };
            let verdict = classify(registry, &toleration, *qos);
            let modified = is_toleration_modified(registry, &toleration, *qos);
            let reason = match verdict {
                Verdict::Modified(reason) => Some(reason.to_string()),
                Verdict::UnknownKey => Some(format!(
                    "no default toleration exists for this key (policy: {})",
                    registry.unknown_key_policy().as_str()
                )),
                Verdict::Default => None,
            };
            let report = EvalReport {
                key: key.clone(),
                qos_class: *qos,
                verdict: verdict.label().to_string(),
                modified,
                reason,
            };
            print_report(cli.json, true, &report, |r| {
                let state = if r.modified { "modified" } else { "default" };
                match &r.reason {
                    Some(reason) => vec![format!("{}\t{}", state, reason)],
                    None => vec![state.to_string()],
                }
            })?;
        }
        Commands::Rules => {
            let rows = registry.rule_rows();
            print_rows(cli.json, &rows, |r| {
                let qos: Vec<&str> = r.applies_for.iter().map(|q| q.as_str()).collect();
                format!(
                    "{}\t{}\toperator={}\teffect={}\tseconds={}\tqos={}",
                    r.key,
                    r.family,
                    r.operator,
                    r.effect.map(|e| e.to_string()).unwrap_or_else(|| "*".to_string()),
                    r.toleration_seconds
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    qos.join(",")
                )
            })?;
        }
        Commands::Config { .. } => {}
    }
    Ok(())
}

fn check_lines(report: &CheckReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .findings
        .iter()
        .map(|f| format!("{}/{}\t{}\t{}", f.namespace, f.pod, f.key, f.reason))
        .collect();
    lines.push(format!(
        "{}: {} pods checked, {} non-compliant, {} tolerations checked",
        report.overall, report.pods_checked, report.non_compliant_pods, report.tolerations_checked
    ));
    lines
}
