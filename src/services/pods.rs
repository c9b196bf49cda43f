use crate::domain::models::PodDocument;
use anyhow::Context;
use serde_json::Value;
use std::io::Read;

/// Reads pod documents from a file path, or stdin when `source` is `-`.
pub fn load_pods(source: &str) -> anyhow::Result<Vec<PodDocument>> {
    let raw = if source == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(source)
            .map_err(|e| anyhow::anyhow!("cannot read pod documents from {}: {}", source, e))?
    };
    parse_pods(&raw)
}

/// Accepts a single `Pod` or a `PodList`/`List` as `kubectl get -o json` prints it.
/// Non-pod items of a mixed `List` are skipped.
pub fn parse_pods(raw: &str) -> anyhow::Result<Vec<PodDocument>> {
    let doc: Value = serde_json::from_str(raw)?;
    let kind = doc.get("kind").and_then(Value::as_str);

    if let Some(items) = doc.get("items") {
        if !matches!(kind, None | Some("PodList") | Some("List")) {
            anyhow::bail!("unsupported document kind: {}", kind.unwrap_or_default());
        }
        let Some(items) = items.as_array() else {
            anyhow::bail!("items must be an array");
        };
        let mut pods = Vec::with_capacity(items.len());
        for item in items {
            match item.get("kind").and_then(Value::as_str) {
                None | Some("Pod") => pods.push(decode_pod(item.clone())?),
                Some(other) => {
                    tracing::warn!(kind = other, "skipping non-pod list item");
                }
            }
        }
        return Ok(pods);
    }

    match kind {
        None | Some("Pod") => Ok(vec![decode_pod(doc)?]),
        Some(other) => anyhow::bail!("unsupported document kind: {}", other),
    }
}

fn decode_pod(doc: Value) -> anyhow::Result<PodDocument> {
    let name = doc
        .pointer("/metadata/name")
        .and_then(Value::as_str)
        .unwrap_or("<unnamed>")
        .to_string();
    serde_json::from_value(doc).with_context(|| format!("invalid pod document {}", name))
}
