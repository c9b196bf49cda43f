/// Taint placed by the node lifecycle controller while a node's Ready condition is false.
pub const NOT_READY_TAINT_KEY: &str = "node.kubernetes.io/not-ready";

/// Taint placed by the node lifecycle controller while a node's Ready condition is unknown.
pub const UNREACHABLE_TAINT_KEY: &str = "node.kubernetes.io/unreachable";

/// Taint placed while a node reports memory pressure.
pub const MEMORY_PRESSURE_TAINT_KEY: &str = "node.kubernetes.io/memory-pressure";

/// Eviction delay the DefaultTolerationSeconds admission plugin injects for
/// not-ready/unreachable tolerations.
pub const DEFAULT_TOLERATION_SECONDS: i64 = 300;

pub const CONFIG_DIR: &str = ".config/tolaudit";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const AUDIT_LOG_FILE_NAME: &str = "audit.jsonl";
