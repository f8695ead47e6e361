// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Configuration file to trained weights.

These tests validate:
- A TOML file fully determines the controller (rule, devices, shape, seed)
- CLI overrides change the built controller
- Recorded history matches the steps taken
*/

use memristor_learning::config::{load_config, CONFIG_FILE_NAME};
use memristor_learning::prelude::*;
use std::collections::HashMap;
use std::fs;
use tempfile::tempdir;

const PES_RUN: &str = r#"
[simulation]
dt = 0.001
seed = 5
logging = true

[network]
in_size = 3
out_size = 2
post_dimensions = 1

[device]
model = "differential"

[learning]
rule = "mPES"
learning_rate = 4000.0
encoders = [[1.0], [-1.0]]
"#;

fn write_config(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, contents).expect("write config");
    (dir, path)
}

#[test]
fn test_pes_run_from_file() {
    let (_dir, path) = write_config(PES_RUN);
    let config = load_config(Some(&path), None).expect("load");
    let mut controller = from_config(&config).expect("build");

    assert_eq!(controller.rule().kind(), RuleKind::Pes);
    assert_eq!(controller.shape(), (2, 3));
    assert_eq!(controller.activity_len(), 4);

    let before = controller.weights().to_owned();
    for k in 1..=5 {
        // pre neuron 0 spikes, positive error
        controller
            .step(k as f64 * 0.001, &[1.0, 0.0, 0.0, 0.5])
            .expect("step");
    }
    let after = controller.weights();

    // row 0 encodes +1: weight pushed down; row 1 encodes -1: weight pushed up
    assert!(after[[0, 0]] < before[[0, 0]]);
    assert!(after[[1, 0]] > before[[1, 0]]);
    assert_eq!(after[[0, 1]], before[[0, 1]]);

    assert_eq!(controller.history("weight").expect("history").len(), 5);
    assert_eq!(controller.history("error").expect("history").len(), 5);
    assert_eq!(controller.history_record().times.len(), 5);
}

#[test]
fn test_cli_override_switches_rule() {
    let (_dir, path) = write_config(PES_RUN);
    let mut cli = HashMap::new();
    cli.insert("rule".to_string(), "bcm".to_string());
    cli.insert("logging".to_string(), "false".to_string());

    let config = load_config(Some(&path), Some(&cli)).expect("load");
    let mut controller = from_config(&config).expect("build");

    assert_eq!(controller.rule().kind(), RuleKind::Bcm);
    assert_eq!(controller.activity_len(), 3 + 2 * 2);
    controller.step(0.001, &[1.0; 7]).expect("step");
    assert!(controller.history("weight").expect("history").is_empty());
}

#[test]
fn test_invalid_file_is_reported() {
    let (_dir, path) = write_config("[network]\nout_size = 0\n[learning]\nrule = \"hebb\"\n");
    let config = load_config(Some(&path), None).expect("load");
    let err = from_config(&config).expect_err("invalid");
    let message = err.to_string();
    assert!(message.contains("network.out_size"));
    assert!(message.contains("learning.rule"));
}

#[test]
fn test_same_file_same_run() {
    let (_dir, path) = write_config(PES_RUN);
    let config = load_config(Some(&path), None).expect("load");
    let mut a = from_config(&config).expect("build");
    let mut b = from_config(&config).expect("build");

    for k in 1..=10 {
        let x = [1.0, (k % 2) as f64, 1.0, 0.1 * k as f64];
        let t = k as f64 * 0.001;
        assert_eq!(a.step(t, &x).expect("step"), b.step(t, &x).expect("step"));
    }
}
