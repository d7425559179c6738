use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;
use tweetboard_config::{Backend, BoardConfigLoader, LoadError};

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

const FILE_YAML: &str = r#"
version: "1"
service:
  backend: http
  base_url: "http://${TB_TEST_HOST}:8080/"
  timeout_secs: 5
compose:
  author: "zig"
page:
  container_id: "feed"
  send_control_id: "send"
logging:
  format: json
  filter: "debug"
"#;

#[test]
#[serial]
fn loads_file_and_expands_placeholders() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(&tmp, "tweetboard.yaml", FILE_YAML);

    let config = temp_env::with_var("TB_TEST_HOST", Some("10.0.0.7"), || {
        BoardConfigLoader::new().with_file(&p).load()
    })
    .expect("load config");

    assert_eq!(config.service.base_url, "http://10.0.0.7:8080/");
    assert_eq!(config.service.timeout_secs, 5);
    assert_eq!(config.compose.author, "zig");
    assert_eq!(config.page.container_id, "feed");
    assert_eq!(config.page.send_control_id, "send");
    assert_eq!(config.logging.format, "json");
}

#[test]
#[serial]
fn env_overrides_win_over_files() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(&tmp, "tweetboard.yaml", FILE_YAML);

    let config = temp_env::with_vars(
        [
            ("TB_TEST_HOST", Some("localhost")),
            ("TWEETBOARD__SERVICE__BACKEND", Some("local")),
            ("TWEETBOARD__SERVICE__TIMEOUT_SECS", Some("30")),
        ],
        || BoardConfigLoader::new().with_file(&p).load(),
    )
    .expect("load config");

    assert_eq!(config.service.backend, Backend::Local);
    assert_eq!(config.service.timeout_secs, 30);
    assert_eq!(config.compose.author, "zig");
}

#[test]
#[serial]
fn missing_optional_file_falls_back_to_defaults() {
    let tmp = TempDir::new().unwrap();
    let config = BoardConfigLoader::new()
        .with_optional_file(tmp.path().join("absent.yaml"))
        .load()
        .expect("defaults are valid");

    assert_eq!(config.service.backend, Backend::Http);
    assert_eq!(config.service.base_url, "http://127.0.0.1:8080/");
    assert_eq!(config.page.container_id, "tweets");
    assert_eq!(config.page.send_control_id, "tweetbtn");
}

#[test]
#[serial]
fn missing_required_file_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let err = BoardConfigLoader::new()
        .with_file(tmp.path().join("absent.yaml"))
        .load()
        .unwrap_err();
    assert!(matches!(err, LoadError::Source(_)));
}

#[test]
#[serial]
fn rejects_non_http_base_url() {
    let err = BoardConfigLoader::new()
        .with_yaml_str("service:\n  base_url: \"ftp://example.com\"\n")
        .load()
        .unwrap_err();
    assert!(matches!(err, LoadError::Invalid(_)));
}

#[test]
#[serial]
fn local_backend_ignores_base_url() {
    let config = BoardConfigLoader::new()
        .with_yaml_str("service:\n  backend: local\n  base_url: \"\"\n")
        .load()
        .expect("local backend needs no url");
    assert_eq!(config.service.backend, Backend::Local);
}

#[test]
#[serial]
fn unknown_backend_is_a_schema_error() {
    let err = BoardConfigLoader::new()
        .with_yaml_str("service:\n  backend: carrier-pigeon\n")
        .load()
        .unwrap_err();
    assert!(matches!(err, LoadError::Schema(_)));
}
