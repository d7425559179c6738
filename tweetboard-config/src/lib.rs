//! Loader for Tweetboard configuration with YAML + environment overlays.
//!
//! Sources are merged in the order they are added, then
//! `TWEETBOARD__SECTION__KEY` environment variables win. String values may
//! reference other variables as `${VAR}`; expansion is applied recursively up
//! to a fixed depth. Every section has defaults, so an empty source is valid.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tweetboard_common::observability::{LogConfig, LogFormat};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;
const ENV_PREFIX: &str = "TWEETBOARD";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Source(#[from] ConfigError),
    #[error("config schema mismatch: {0}")]
    Schema(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub version: Option<String>,
    pub service: ServiceConfig,
    pub compose: ComposeConfig,
    pub page: PageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// The tweet backend's JSON API.
    #[default]
    Http,
    /// An in-process store seeded with the backend's greeting tweets.
    Local,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub backend: Backend,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Http,
            base_url: "http://127.0.0.1:8080/".into(),
            timeout_secs: 15,
        }
    }
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    pub author: String,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            author: "anon".into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub container_id: String,
    pub send_control_id: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            container_id: "tweets".into(),
            send_control_id: "tweetbtn".into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: String,
    pub emit_stderr: bool,
    pub filter: String,
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "text".into(),
            emit_stderr: false,
            filter: "info".into(),
            dir: None,
        }
    }
}

impl LoggingConfig {
    pub fn to_log_config(&self, app_name: &'static str) -> Result<LogConfig, LoadError> {
        let format: LogFormat = self.format.parse().map_err(LoadError::Invalid)?;
        Ok(LogConfig {
            app_name,
            log_dir: self.dir.clone(),
            emit_stderr: self.emit_stderr,
            format,
            default_filter: self.filter.clone(),
        })
    }
}

impl BoardConfig {
    /// Checks applied by [`BoardConfigLoader::load`]. Call again after
    /// changing a loaded config in place.
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.service.backend == Backend::Http {
            let url = self.service.base_url.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(LoadError::Invalid(format!(
                    "service.base_url must be an http(s) URL, got {url:?}"
                )));
            }
        }
        if self.service.timeout_secs == 0 {
            return Err(LoadError::Invalid("service.timeout_secs must be > 0".into()));
        }
        if self.page.container_id.is_empty() || self.page.send_control_id.is_empty() {
            return Err(LoadError::Invalid("page element ids must not be empty".into()));
        }
        Ok(())
    }
}

/// `<config dir>/tweetboard/tweetboard.yaml`, when the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tweetboard").join("tweetboard.yaml"))
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder over the `config` crate wiring (files + env overrides).
pub struct BoardConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for BoardConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardConfigLoader {
    /// Start with no files; `TWEETBOARD__` env overrides are always applied last.
    ///
    /// ```
    /// use tweetboard_config::{Backend, BoardConfigLoader};
    ///
    /// let config = BoardConfigLoader::new()
    ///     .with_yaml_str("version: '1'")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert_eq!(config.service.backend, Backend::Http);
    /// assert_eq!(config.page.container_id, "tweets");
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a YAML/TOML/JSON file that must exist; format is inferred by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that is skipped when missing.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Merge an inline YAML snippet.
    ///
    /// ```
    /// use tweetboard_config::{Backend, BoardConfigLoader};
    ///
    /// let cfg = BoardConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// service:
    ///   backend: local
    /// compose:
    ///   author: "zig"
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.service.backend, Backend::Local);
    /// assert_eq!(cfg.compose.author, "zig");
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Merge all sources, expand `${VAR}` placeholders and validate.
    pub fn load(self) -> Result<BoardConfig, LoadError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: BoardConfig =
            serde_json::from_value(v).map_err(|e| LoadError::Schema(e.to_string()))?;
        typed.validate()?;
        Ok(typed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expands_simple_string() {
        temp_env::with_var("TB_HOST", Some("board.local"), || {
            let mut v = json!("http://${TB_HOST}:8080/");
            expand_env_in_value(&mut v);
            assert_eq!(v, json!("http://board.local:8080/"));
        });
    }

    #[test]
    fn expands_in_array_and_object() {
        temp_env::with_vars([("TB_A", Some("zig")), ("TB_B", Some("qwe"))], || {
            let mut v = json!(["by-$TB_A", { "pair": "${TB_A}+${TB_B}" }, 7, false, null]);
            expand_env_in_value(&mut v);
            assert_eq!(v, json!(["by-zig", { "pair": "zig+qwe" }, 7, false, null]));
        });
    }

    #[test]
    fn expands_recursively_across_env_values() {
        temp_env::with_vars(
            [
                ("TB_PORT", Some("9090")),
                ("TB_HOST", Some("localhost:${TB_PORT}")),
                ("TB_URL", Some("http://${TB_HOST}/")),
            ],
            || {
                let mut v = json!("${TB_URL}");
                expand_env_in_value(&mut v);
                assert_eq!(v, json!("http://localhost:9090/"));
            },
        );
    }

    #[test]
    fn stops_on_cycles() {
        temp_env::with_vars([("TB_X", Some("${TB_Y}")), ("TB_Y", Some("${TB_X}"))], || {
            let mut v = json!("a-${TB_X}-b");
            expand_env_in_value(&mut v);
            let s = v.as_str().unwrap();
            assert!(s.starts_with("a-") && s.ends_with("-b"));
            assert!(s.contains("${"));
        });
    }

    #[test]
    fn unknown_vars_are_left_as_is() {
        let mut v = json!("hi-${TB_DOES_NOT_EXIST}");
        expand_env_in_value(&mut v);
        assert_eq!(v, json!("hi-${TB_DOES_NOT_EXIST}"));
    }

    #[test]
    fn logging_section_maps_to_log_config() {
        let logging = LoggingConfig {
            format: "json".into(),
            emit_stderr: true,
            filter: "tweetboard=debug".into(),
            dir: Some(PathBuf::from("/tmp/tb")),
        };
        let log = logging.to_log_config("tweetboard").unwrap();
        assert_eq!(log.format, LogFormat::Json);
        assert!(log.emit_stderr);
        assert_eq!(log.default_filter, "tweetboard=debug");
        assert_eq!(log.log_dir, Some(PathBuf::from("/tmp/tb")));
    }

    #[test]
    fn validate_catches_edits_after_load() {
        let mut cfg = BoardConfigLoader::new().load().unwrap();
        cfg.service.base_url = "localhost:8080".into();
        assert!(matches!(cfg.validate(), Err(LoadError::Invalid(_))));

        cfg.service.backend = Backend::Local;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn unknown_log_format_is_invalid() {
        let logging = LoggingConfig {
            format: "xml".into(),
            ..LoggingConfig::default()
        };
        assert!(matches!(
            logging.to_log_config("tweetboard"),
            Err(LoadError::Invalid(_))
        ));
    }
}
