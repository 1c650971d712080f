use std::time::Duration;

use statecraft::config::{ApiConfig, Config, ConfigError, TodoConfig};
use tempfile::TempDir;

fn write_config(content: &str) -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, content).expect("Failed to write config");
    (temp_dir, path)
}

/// Test that Config::default() produces the expected values.
#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.api.base_url, "https://jsonplaceholder.typicode.com");
    assert_eq!(config.api.timeout(), Duration::from_secs(10));
    assert_eq!(config.api.connect_timeout(), Duration::from_secs(5));
    assert_eq!(config.todo.initial_draft, "Buy groceries");
    assert!(config.validate().is_ok());
}

/// Test that Config::config_path() returns a path ending with the expected filename.
#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("statecraft/config.toml"));
}

/// Test that a missing file falls back to defaults.
#[test]
fn test_missing_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load_from(&temp_dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

/// Test that a partial file keeps defaults for omitted fields.
#[test]
fn test_partial_file_merges_with_defaults() {
    let (_dir, path) = write_config(
        r#"
[api]
base_url = "http://localhost:8080"

[todo]
initial_draft = "Water the plants"
"#,
    );

    let config = Config::load_from(&path).unwrap();

    assert_eq!(
        config,
        Config {
            api: ApiConfig {
                base_url: "http://localhost:8080".to_string(),
                ..ApiConfig::default()
            },
            todo: TodoConfig {
                initial_draft: "Water the plants".to_string(),
            },
        }
    );
}

/// Test that invalid TOML surfaces a parse error naming the file.
#[test]
fn test_parse_error() {
    let (_dir, path) = write_config("[api\nbase_url = ");

    match Config::load_from(&path).unwrap_err() {
        ConfigError::ParseError { path: error_path, .. } => assert_eq!(error_path, path),
        other => panic!("Expected ParseError, got {:?}", other),
    }
}

/// Test that a non-http base URL is rejected.
#[test]
fn test_validation_rejects_non_http_url() {
    let (_dir, path) = write_config("[api]\nbase_url = \"ftp://example.com\"\n");

    match Config::load_from(&path).unwrap_err() {
        ConfigError::ValidationError { message } => {
            assert!(message.contains("must start with http:// or https://"));
        }
        other => panic!("Expected ValidationError, got {:?}", other),
    }
}

/// Test that zero timeouts are rejected.
#[test]
fn test_validation_rejects_zero_timeout() {
    let config = Config {
        api: ApiConfig {
            timeout_seconds: 0,
            ..ApiConfig::default()
        },
        ..Config::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError { .. })
    ));
}

/// Test that the connect timeout may not exceed the request timeout.
#[test]
fn test_validation_rejects_connect_timeout_above_total() {
    let config = Config {
        api: ApiConfig {
            timeout_seconds: 3,
            connect_timeout_seconds: 4,
            ..ApiConfig::default()
        },
        ..Config::default()
    };

    match config.validate().unwrap_err() {
        ConfigError::ValidationError { message } => {
            assert!(message.contains("exceeds api.timeout_seconds"));
        }
        other => panic!("Expected ValidationError, got {:?}", other),
    }
}

/// Test that a serialized config loads back unchanged.
#[test]
fn test_toml_round_trip() {
    let config = Config {
        api: ApiConfig {
            base_url: "https://api.example.com/".to_string(),
            timeout_seconds: 30,
            connect_timeout_seconds: 3,
        },
        todo: TodoConfig {
            initial_draft: "Call mom".to_string(),
        },
    };
    let (_dir, path) = write_config(&toml::to_string(&config).unwrap());

    assert_eq!(Config::load_from(&path).unwrap(), config);
}
