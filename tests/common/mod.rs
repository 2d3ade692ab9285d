#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub pack: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");
        let pack = tmp.path().join("pack-0001");
        fs::create_dir_all(pack.join("logs")).expect("create pack dir");
        Self {
            _tmp: tmp,
            home,
            pack,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("ahs");
        cmd.env("HOME", &self.home).env_remove("RUST_LOG");
        cmd
    }

    pub fn write_yaml(&self, name: &str, record: &Value) -> PathBuf {
        let path = self.pack.join(name);
        fs::write(
            &path,
            serde_yaml::to_string(record).expect("serialize record yaml"),
        )
        .expect("write record");
        path
    }

    pub fn write_json(&self, name: &str, record: &Value) -> PathBuf {
        let path = self.pack.join(name);
        fs::write(
            &path,
            serde_json::to_string_pretty(record).expect("serialize record json"),
        )
        .expect("write record");
        path
    }

    pub fn touch_evidence(&self, rel: &str) {
        let path = self.pack.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create evidence dir");
        }
        fs::write(path, "evidence\n").expect("write evidence");
    }

    pub fn write_config(&self, body: &str) -> PathBuf {
        let path = self.home.join(".config/ahs/config.toml");
        fs::create_dir_all(path.parent().expect("config parent")).expect("create config dir");
        fs::write(&path, body).expect("write config");
        path
    }

    pub fn run_json(&self, args: &[&str], code: i32) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .code(code)
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }
}

/// A record that passes every rule, with local evidence under `logs/`.
pub fn golden_record() -> Value {
    json!({
        "audit_version": "1.0",
        "work_id": "WU-001-reject-negative",
        "timestamp_utc": "2026-01-22T10:00:00Z",
        "repo_ref": "acme/ledger@main",
        "actor": {"human": "reviewer", "agent": "builder"},
        "mini_spec": {
            "summary": "Reject negative transfer amounts",
            "constraints": [
                {"id": "C1", "statement": "negative amounts raise ValueError", "type": "functional"},
                {"id": "C2", "statement": "existing API stays unchanged", "type": "compatibility"}
            ],
            "out_of_scope": ["currency conversion"]
        },
        "check_suite": {
            "location": "tests/test_transfer.py",
            "run_command": "pytest -q",
            "environment": "python3.11 + pytest"
        },
        "first_red": {
            "occurred": true,
            "failing_checks": [{
                "check_id": "test_negative_amount_raises",
                "constraint_ids": ["C1"],
                "evidence_ref": "logs/first_red.txt",
                "coupling": "direct"
            }]
        },
        "diff_set": {
            "base_ref": "abc123",
            "final_ref": "def456",
            "files_changed": [{"path": "ledger/transfer.py", "change_type": "modified"}],
            "rationale": [{"constraint_id": "C1", "note": "guard added"}]
        },
        "final_green": {
            "all_checks_passed": true,
            "run_id": "run-2026-01-22T10:05:00Z",
            "evidence_ref": "logs/final_green.txt",
            "summary_metrics": {"duration_seconds": 1.4, "checks_executed": 12}
        },
        "spec_delta": {"changed": false, "changes": [], "human_decision": "n/a"}
    })
}

pub fn golden_env() -> TestEnv {
    let env = TestEnv::new();
    env.touch_evidence("logs/first_red.txt");
    env.touch_evidence("logs/final_green.txt");
    env
}

pub fn path_str(p: &Path) -> &str {
    p.to_str().expect("utf8 path")
}
