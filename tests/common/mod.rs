#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub pods: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");

        let pods = write_fixture_pods(tmp.path());

        Self {
            _tmp: tmp,
            home,
            pods,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("tolaudit");
        cmd.env("HOME", &self.home);
        cmd
    }

    pub fn pods_arg(&self) -> &str {
        self.pods.to_str().expect("pods path utf8")
    }

    pub fn write_config(&self, raw: &str) -> PathBuf {
        let dir = self.home.join(".config/tolaudit");
        fs::create_dir_all(&dir).expect("create config dir");
        let path = dir.join("config.toml");
        fs::write(&path, raw).expect("write config");
        path
    }

    pub fn write_file(&self, name: &str, raw: &str) -> PathBuf {
        let path = self.home.join(name);
        fs::write(&path, raw).expect("write file");
        path
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }
}

fn write_fixture_pods(base: &Path) -> PathBuf {
    let list = serde_json::json!({
        "apiVersion": "v1",
        "kind": "PodList",
        "items": [
            {
                "apiVersion": "v1",
                "kind": "Pod",
                "metadata": {"name": "frontend-7d9f", "namespace": "shop"},
                "spec": {
                    "containers": [{"name": "web", "image": "nginx:1.27"}],
                    "tolerations": [
                        {"key": "node.kubernetes.io/not-ready", "operator": "Exists",
                         "effect": "NoExecute", "tolerationSeconds": 300},
                        {"key": "node.kubernetes.io/unreachable", "operator": "Exists",
                         "effect": "NoExecute", "tolerationSeconds": 300},
                        {"key": "node.kubernetes.io/memory-pressure", "operator": "Exists",
                         "effect": "NoSchedule"}
                    ]
                },
                "status": {"phase": "Running", "qosClass": "Guaranteed"}
            },
            {
                "apiVersion": "v1",
                "kind": "Pod",
                "metadata": {"name": "worker-0", "namespace": "batch"},
                "spec": {
                    "containers": [{"name": "worker", "image": "busybox"}],
                    "tolerations": [
                        {"key": "node.kubernetes.io/not-ready", "operator": "Exists",
                         "effect": "NoExecute", "tolerationSeconds": 300},
                        {"key": "node.kubernetes.io/unreachable", "operator": "Exists",
                         "effect": "NoExecute", "tolerationSeconds": 350},
                        {"key": "node.kubernetes.io/memory-pressure", "operator": "Exists",
                         "effect": "NoSchedule"}
                    ]
                },
                "status": {"phase": "Running", "qosClass": "BestEffort"}
            }
        ]
    });
    let path = base.join("pods.json");
    fs::write(
        &path,
        serde_json::to_string_pretty(&list).expect("serialize pods"),
    )
    .expect("write pods");
    path
}

pub fn compliant_pod_json() -> String {
    serde_json::json!({
        "kind": "Pod",
        "metadata": {"name": "api", "namespace": "shop"},
        "spec": {"tolerations": [
            {"key": "node.kubernetes.io/unreachable", "operator": "Exists",
             "tolerationSeconds": 300}
        ]},
        "status": {"qosClass": "Burstable"}
    })
    .to_string()
}
