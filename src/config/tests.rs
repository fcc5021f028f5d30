//! Tests for config functionality.

use crate::config::types::default_template_globs;
use crate::config::{CONFIG_ENV_VAR, CONFIG_FILE_NAME, Config};
use serial_test::serial;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.template_dir, "templates");
    assert_eq!(config.default_template, "essay_writer.txt");
    assert_eq!(config.template_globs, default_template_globs());
    assert_eq!(config.comment_marker, "///");
    assert_eq!(config.selector, "Category");
    assert!(!config.substitute_selector);
    assert!(config.exempt_keys.is_empty());
    assert!(config.inject_timestamp);
    assert_eq!(config.timestamp_key, "Now");
    assert_eq!(config.timestamp_format, "%Y-%m-%d %H:%M:%S UTC");
    assert!(config.events_log.is_none());
    assert_eq!(config.model, "meta-llama/llama-4-scout-17b-16e-instruct");
    assert_eq!(config.max_tokens, 2000);
    assert!((config.temperature - 0.7).abs() < f32::EPSILON);
    assert!(config.user_message.contains("[[.Topic]]"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_minimal_yaml() {
    let config = Config::from_yaml("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
selector: Mode
exempt_keys:
  - Topic
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.selector, "Mode");
    assert_eq!(config.exempt_keys, vec!["Topic"]);

    // Unspecified values should use defaults
    assert_eq!(config.comment_marker, "///");
    assert_eq!(config.max_tokens, 2000);
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r##"
template_dir: prompts
default_template: base.md
template_globs:
  - "*.prompt"
comment_marker: "#"
selector: Level
substitute_selector: true
exempt_keys: [Topic, Audience]
inject_timestamp: false
timestamp_key: Today
timestamp_format: "%Y-%m-%d"
events_log: logs/events.ndjson
model: some/model
max_tokens: 512
temperature: 0.2
user_message: "Go: [[.Topic]]"
"##;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.template_dir, "prompts");
    assert_eq!(config.default_template, "base.md");
    assert_eq!(config.template_globs, vec!["*.prompt"]);
    assert_eq!(config.comment_marker, "#");
    assert_eq!(config.selector, "Level");
    assert!(config.substitute_selector);
    assert_eq!(config.exempt_keys, vec!["Topic", "Audience"]);
    assert!(!config.inject_timestamp);
    assert_eq!(config.timestamp_key, "Today");
    assert_eq!(config.timestamp_format, "%Y-%m-%d");
    assert_eq!(config.events_log.as_deref(), Some("logs/events.ndjson"));
    assert_eq!(config.model, "some/model");
    assert_eq!(config.max_tokens, 512);
    assert_eq!(config.user_message, "Go: [[.Topic]]");
}

#[test]
fn test_unknown_fields_ignored() {
    let yaml = "selector: Category\nfuture_option: 42\n";
    assert!(Config::from_yaml(yaml).is_ok());
}

#[test]
fn test_roundtrip_yaml() {
    let mut config = Config::default();
    config.exempt_keys = vec!["Topic".to_string()];
    config.events_log = Some("events.ndjson".to_string());

    let yaml = config.to_yaml().unwrap();
    let parsed = Config::from_yaml(&yaml).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_invalid_yaml_is_config_error() {
    let err = Config::from_yaml("selector: [unclosed").unwrap_err();
    assert!(err.to_string().starts_with("invalid configuration:"));
}

#[test]
fn test_validation_rejects_bad_values() {
    let cases = [
        ("selector: \"has space\"", "selector"),
        ("timestamp_key: \"9lives\"", "timestamp_key"),
        ("exempt_keys: [\"a-b\"]", "exempt_keys"),
        ("timestamp_format: \"%Q\"", "timestamp_format"),
        ("template_globs: [\"[\"]", "template_globs"),
        ("max_tokens: 0", "max_tokens"),
        ("temperature: 3.5", "temperature"),
        ("template_dir: \"  \"", "template_dir"),
    ];

    for (yaml, field) in cases {
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(
            err.to_string().contains(field),
            "expected error about {} for {:?}, got: {}",
            field,
            yaml,
            err
        );
    }
}

#[test]
fn test_empty_comment_marker_disables_stripping() {
    let config = Config::from_yaml("comment_marker: \"\"").unwrap();
    assert_eq!(config.comment_marker, "");

    let output = config
        .compiler()
        .compile("/// kept\nbody", &crate::bindings::Bindings::new());
    assert_eq!(output, "/// kept\nbody");
}

#[test]
fn test_compile_options_from_config() {
    let config = Config::from_yaml("selector: Mode\nexempt_keys: [Topic]\nsubstitute_selector: true")
        .unwrap();
    let options = config.compile_options();

    assert_eq!(options.selector, "Mode");
    assert!(options.substitute_selector);
    assert!(options.exempt_keys.contains("Topic"));
    assert_eq!(options.comment_marker, "///");

    let compiler = config.compiler();
    assert!(compiler.is_exempt("Topic"));
    assert!(!compiler.is_exempt("Mode"));
}

#[test]
fn test_resolve_template_path() {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path();
    let config = Config::default();

    // Bare names resolve into the template directory
    assert_eq!(
        config.resolve_template_path(Path::new("essay.txt"), base),
        base.join("templates").join("essay.txt")
    );

    // Names with a directory component are used as given
    assert_eq!(
        config.resolve_template_path(Path::new("other/essay.txt"), base),
        base.join("other/essay.txt")
    );

    // Existing files in the working directory win over template_dir
    std::fs::write(base.join("local.txt"), "x").unwrap();
    assert_eq!(
        config.resolve_template_path(Path::new("local.txt"), base),
        base.join("local.txt")
    );
}

#[test]
fn test_events_log_path() {
    let base = Path::new("/work");
    let mut config = Config::default();
    assert!(config.events_log_path(base).is_none());

    config.events_log = Some("  ".to_string());
    assert!(config.events_log_path(base).is_none());

    config.events_log = Some("events.ndjson".to_string());
    assert_eq!(
        config.events_log_path(base),
        Some(base.join("events.ndjson"))
    );
}

#[test]
fn test_template_globset_matches() {
    let globs = Config::default().template_globset().unwrap();
    assert!(globs.is_match("essay_writer.txt"));
    assert!(globs.is_match("notes.md"));
    assert!(!globs.is_match("promptc.yaml"));
}

#[test]
#[serial]
fn test_discover_prefers_explicit_path() {
    let temp_dir = TempDir::new().unwrap();
    let explicit = temp_dir.path().join("custom.yaml");
    std::fs::write(&explicit, "selector: Explicit\n").unwrap();
    std::fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "selector: Local\n").unwrap();

    let config = Config::discover(Some(&explicit), temp_dir.path()).unwrap();
    assert_eq!(config.selector, "Explicit");
}

#[test]
#[serial]
fn test_discover_uses_env_then_local_then_default() {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path();

    // SAFETY: tests touching the environment are serialized.
    unsafe { std::env::remove_var(CONFIG_ENV_VAR) };
    assert_eq!(Config::discover(None, base).unwrap(), Config::default());

    std::fs::write(base.join(CONFIG_FILE_NAME), "selector: Local\n").unwrap();
    assert_eq!(Config::discover(None, base).unwrap().selector, "Local");

    let env_file = base.join("env.yaml");
    std::fs::write(&env_file, "selector: FromEnv\n").unwrap();
    unsafe { std::env::set_var(CONFIG_ENV_VAR, &env_file) };
    let result = Config::discover(None, base);
    unsafe { std::env::remove_var(CONFIG_ENV_VAR) };

    assert_eq!(result.unwrap().selector, "FromEnv");
}

#[test]
#[serial]
fn test_discover_relative_env_path_uses_base() {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path();
    std::fs::create_dir_all(base.join("conf")).unwrap();
    std::fs::write(base.join("conf/env.yaml"), "selector: Relative\n").unwrap();

    // SAFETY: tests touching the environment are serialized.
    unsafe { std::env::set_var(CONFIG_ENV_VAR, "conf/env.yaml") };
    let result = Config::discover(None, base);
    unsafe { std::env::remove_var(CONFIG_ENV_VAR) };

    assert_eq!(result.unwrap().selector, "Relative");
}

#[test]
#[serial]
fn test_discover_missing_explicit_path_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.yaml");
    let err = Config::discover(Some(&missing), temp_dir.path()).unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}
