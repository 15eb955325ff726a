// SPDX-FileCopyrightText: 2026 Quill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Quill configuration system.

use std::io::Write;

use quill_config::diagnostic::{ConfigError, suggest_key};
use quill_config::model::QuillConfig;
use quill_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_quill_config() {
    let toml = r#"
[server]
host = "127.0.0.1"
port = 9001
max_frame_bytes = 4096
log_level = "debug"

[llm]
api_key = "gsk-test"
base_url = "http://localhost:1234/v1"
default_model = "llama3-70b-8192"
max_tokens = 64
temperature = 0.2
timeout_secs = 5

[spell]
enabled = false
min_word_length = 4
ignore_capitalized = true
max_edit_distance = 1
dictionary_path = "/usr/share/quill/words.txt"

[cost]
track_costs = false
daily_cost_limit_usd = 5.0
rate_limit_threshold = 0.5
history_limit = 10
usage_file = "/tmp/usage.json"

[metrics]
enabled = false
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 9001);
    assert_eq!(config.server.max_frame_bytes, 4096);
    assert_eq!(config.server.log_level, "debug");
    assert_eq!(config.llm.api_key.as_deref(), Some("gsk-test"));
    assert_eq!(config.llm.default_model, "llama3-70b-8192");
    assert_eq!(config.llm.max_tokens, 64);
    assert_eq!(config.llm.timeout_secs, 5);
    assert!(!config.spell.enabled);
    assert_eq!(config.spell.min_word_length, 4);
    assert!(config.spell.ignore_capitalized);
    assert_eq!(config.spell.max_edit_distance, 1);
    assert_eq!(
        config.spell.dictionary_path.as_deref(),
        Some("/usr/share/quill/words.txt")
    );
    assert!(!config.cost.track_costs);
    assert_eq!(config.cost.daily_cost_limit_usd, 5.0);
    assert_eq!(config.cost.rate_limit_threshold, 0.5);
    assert_eq!(config.cost.history_limit, 10);
    assert_eq!(config.cost.usage_file, "/tmp/usage.json");
    assert!(!config.metrics.enabled);
}

/// Empty TOML yields the compiled defaults.
#[test]
fn empty_toml_yields_defaults() {
    let config = load_and_validate_str("").expect("defaults are valid");
    let defaults = QuillConfig::default();
    assert_eq!(config.server.port, defaults.server.port);
    assert_eq!(config.llm.default_model, defaults.llm.default_model);
    assert_eq!(config.cost.pricing, defaults.cost.pricing);
    assert_eq!(config.cost.rate_limits, defaults.cost.rate_limits);
}

/// Adding a model to the pricing table keeps the default catalogue.
#[test]
fn extra_pricing_entry_merges_with_defaults() {
    let toml = r#"
[cost.pricing.my-model]
input = 0.1
output = 0.2

[cost.rate_limits]
my-model = 60
"#;
    let config = load_and_validate_str(toml).expect("valid");
    assert!(config.cost.pricing.contains_key("my-model"));
    assert!(config.cost.pricing.contains_key("llama3-8b-8192"));
    assert_eq!(config.cost.rate_limits["my-model"], 60);
    assert_eq!(config.cost.rate_limits["gemma-7b-it"], 30);
}

/// Unknown key yields an UnknownKey diagnostic with a suggestion.
#[test]
fn unknown_key_produces_suggestion() {
    let toml = r#"
[server]
prot = 8080
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "prot");
            assert_eq!(suggestion.as_deref(), Some("port"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

/// Unknown key in [spell] is rejected.
#[test]
fn unknown_key_in_spell_is_rejected() {
    let toml = r#"
[spell]
min_word_lenght = 2
"#;
    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("min_word_lenght"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unknown top-level section is rejected.
#[test]
fn unknown_section_is_rejected() {
    let toml = r#"
[database]
path = "x"
"#;
    assert!(load_config_from_str(toml).is_err());
}

/// Wrong value type yields InvalidType.
#[test]
fn wrong_type_produces_invalid_type() {
    let toml = r#"
[server]
port = "eighty"
"#;
    let errors = load_and_validate_str(toml).expect_err("should reject");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key == "server.port")),
        "got: {errors:?}"
    );
}

/// Semantic validation runs after a successful parse.
#[test]
fn validation_errors_are_reported() {
    let toml = r#"
[cost]
rate_limit_threshold = 1.5
history_limit = 0
"#;
    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert_eq!(errors.len(), 2);
    assert!(
        errors
            .iter()
            .all(|e| matches!(e, ConfigError::Validation { .. }))
    );
}

/// An explicit config file is loaded and validated.
#[test]
fn explicit_path_is_loaded() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[server]\nport = 7777").unwrap();

    let config = load_and_validate_path(file.path()).expect("valid file");
    assert_eq!(config.server.port, 7777);
}

/// A missing explicit config file is an error, not a silent default.
#[test]
fn missing_explicit_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let errors = load_and_validate_path(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(&errors[0], ConfigError::Other(msg) if msg.contains("does not exist")));
}

/// Suggestions are exposed for the CLI.
#[test]
fn suggest_key_is_public() {
    assert_eq!(
        suggest_key("daily_cost_limit", &["daily_cost_limit_usd", "track_costs"]),
        Some("daily_cost_limit_usd".to_string())
    );
}
