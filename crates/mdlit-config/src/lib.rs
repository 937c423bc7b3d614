//! Configuration management for mdlit.
//!
//! Parses `mdlit.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `mention.fallback_icon`
//! - `mention.fallback_label`
//! - `resolver.user_agent`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the enabled extension list.
    pub extensions: Option<Vec<String>>,
    /// Override whether the resolver may use the network.
    pub network: Option<bool>,
    /// Override the network timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdlit.toml";

/// Extensions enabled when `[render]` does not list any.
pub const DEFAULT_EXTENSIONS: [&str; 4] = ["markdownlit", "details", "tasklist", "fenced_code"];

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendering configuration.
    pub render: RenderConfig,
    /// Mention rendering configuration.
    pub mention: MentionConfig,
    /// URL resolver configuration.
    pub resolver: ResolverConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Names of the extensions applied to every render, in order.
    pub extensions: Vec<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|&s| s.to_owned()).collect(),
        }
    }
}

/// Mention rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MentionConfig {
    /// Icon used when a link cannot be resolved.
    pub fallback_icon: String,
    /// Label used when a link cannot be resolved.
    pub fallback_label: String,
}

impl Default for MentionConfig {
    fn default() -> Self {
        Self {
            fallback_icon: "🔗".to_owned(),
            fallback_label: "Link".to_owned(),
        }
    }
}

/// URL resolver configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Whether unknown URLs may be fetched to discover favicon and title.
    pub network: bool,
    /// Global timeout for a single fetch, in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` header sent with fetches.
    pub user_agent: String,
    /// Maximum number of cached resolutions. Unbounded when unset.
    pub cache_capacity: Option<usize>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            network: true,
            timeout_secs: 10,
            user_agent: concat!("mdlit/", env!("CARGO_PKG_VERSION")).to_owned(),
            cache_capacity: None,
        }
    }
}

impl ResolverConfig {
    /// Fetch timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`resolver.user_agent`").
        field: String,
        /// Error message (e.g., "${`MDLIT_AGENT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdlit.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values. The result is validated once more
    /// after overrides.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(extensions) = &settings.extensions {
            self.render.extensions.clone_from(extensions);
        }
        if let Some(network) = settings.network {
            self.resolver.network = network;
        }
        if let Some(timeout_secs) = settings.timeout_secs {
            self.resolver.timeout_secs = timeout_secs;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_render()?;
        require_non_empty(&self.mention.fallback_icon, "mention.fallback_icon")?;
        require_non_empty(&self.mention.fallback_label, "mention.fallback_label")?;
        self.validate_resolver()?;
        Ok(())
    }

    fn validate_render(&self) -> Result<(), ConfigError> {
        for (idx, name) in self.render.extensions.iter().enumerate() {
            require_non_empty(name, "render.extensions")?;
            if self.render.extensions[..idx].contains(name) {
                return Err(ConfigError::Validation(format!(
                    "render.extensions lists \"{name}\" more than once"
                )));
            }
        }
        Ok(())
    }

    fn validate_resolver(&self) -> Result<(), ConfigError> {
        if self.resolver.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "resolver.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        if self.resolver.cache_capacity == Some(0) {
            return Err(ConfigError::Validation(
                "resolver.cache_capacity must be greater than 0".to_owned(),
            ));
        }
        require_non_empty(&self.resolver.user_agent, "resolver.user_agent")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.mention.fallback_icon =
            expand::expand_env(&self.mention.fallback_icon, "mention.fallback_icon")?;
        self.mention.fallback_label =
            expand::expand_env(&self.mention.fallback_label, "mention.fallback_label")?;
        self.resolver.user_agent =
            expand::expand_env(&self.resolver.user_agent, "resolver.user_agent")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(
            config.render.extensions,
            vec!["markdownlit", "details", "tasklist", "fenced_code"]
        );
        assert_eq!(config.mention.fallback_icon, "🔗");
        assert_eq!(config.mention.fallback_label, "Link");
        assert!(config.resolver.network);
        assert_eq!(config.resolver.timeout(), Duration::from_secs(10));
        assert!(config.resolver.user_agent.starts_with("mdlit/"));
        assert_eq!(config.resolver.cache_capacity, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.render.extensions.len(), 4);
        assert_eq!(config.resolver.timeout_secs, 10);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[render]
extensions = ["markdownlit", "tables"]

[mention]
fallback_icon = "🌐"
fallback_label = "Website"

[resolver]
network = false
timeout_secs = 3
user_agent = "docs-bot/1.0"
cache_capacity = 64
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.render.extensions, vec!["markdownlit", "tables"]);
        assert_eq!(config.mention.fallback_icon, "🌐");
        assert_eq!(config.mention.fallback_label, "Website");
        assert!(!config.resolver.network);
        assert_eq!(config.resolver.timeout_secs, 3);
        assert_eq!(config.resolver.user_agent, "docs-bot/1.0");
        assert_eq!(config.resolver.cache_capacity, Some(64));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.resolver.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let mut config = Config::default();
        config.resolver.cache_capacity = Some(0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cache_capacity"));
    }

    #[test]
    fn test_validate_rejects_duplicate_extension() {
        let mut config = Config::default();
        config.render.extensions = vec!["details".to_owned(), "details".to_owned()];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("details"));
    }

    #[test]
    fn test_validate_rejects_blank_fallback_label() {
        let mut config = Config::default();
        config.mention.fallback_label = "  ".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("mention.fallback_label"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        let overrides = CliSettings {
            extensions: Some(vec!["markdownlit".to_owned()]),
            network: Some(false),
            timeout_secs: Some(2),
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.render.extensions, vec!["markdownlit"]);
        assert!(!config.resolver.network);
        assert_eq!(config.resolver.timeout_secs, 2);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.render.extensions.len(), 4);
        assert!(config.resolver.network);
        assert_eq!(config.resolver.timeout_secs, 10);
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdlit.toml");
        std::fs::write(&path, "[resolver]\ntimeout_secs = 4\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.resolver.timeout_secs, 4);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/mdlit.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_file_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdlit.toml");
        std::fs::write(&path, "[resolver]\ntimeout_secs = 0\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_rejects_invalid_cli_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdlit.toml");
        std::fs::write(&path, "").unwrap();
        let overrides = CliSettings {
            timeout_secs: Some(0),
            ..Default::default()
        };

        let err = Config::load(Some(&path), Some(&overrides)).unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_expand_env_vars_user_agent() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("MDLIT_TEST_AGENT", "render-farm");
        }

        let toml = r#"
[resolver]
user_agent = "${MDLIT_TEST_AGENT}/1"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.resolver.user_agent, "render-farm/1");

        unsafe {
            std::env::remove_var("MDLIT_TEST_AGENT");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MDLIT_TEST_MISSING_LABEL");
        }

        let toml = r#"
[mention]
fallback_label = "${MDLIT_TEST_MISSING_LABEL}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("mention.fallback_label"));
    }
}
