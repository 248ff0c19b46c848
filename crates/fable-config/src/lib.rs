//! Configuration management for the fable widget.
//!
//! Parses `fable.toml` configuration files with serde and provides
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
//! - `content.root`
//! - `content.direct_root`
//! - `content.base_url`

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override collection root directory.
    pub root: Option<PathBuf>,
    /// Override network base URL. An empty string disables network fetches.
    pub base_url: Option<String>,
    /// Override widget instance identifier.
    pub widget_id: Option<String>,
    /// Override state directory.
    pub state_dir: Option<PathBuf>,
    /// Override mock mode.
    pub mock: Option<bool>,
    /// Override simulated failure rate.
    pub failure_rate: Option<f64>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "fable.toml";

/// Highest number of tabs: one per supported language.
pub const MAX_TABS: usize = 5;

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content source configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Default fable shown by the widget.
    pub fable: FableConfig,
    /// Widget configuration (paths are relative strings from TOML).
    widget: WidgetConfigRaw,
    /// Mock content configuration.
    pub mock: MockConfig,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Resolved widget configuration (set after loading).
    #[serde(skip)]
    pub widget_resolved: WidgetConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw content configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    root: Option<String>,
    direct_root: Option<String>,
    base_url: Option<String>,
    extensions: Option<Vec<String>>,
    timeout_secs: Option<u64>,
}

/// Resolved content source configuration with absolute paths.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentConfig {
    /// Content collection root.
    pub root: PathBuf,
    /// Alternate base directory for direct loads.
    pub direct_root: PathBuf,
    /// Network root; `None` disables network fetches.
    pub base_url: Option<String>,
    /// Index document extensions, in lookup order.
    pub extensions: Vec<String>,
    /// Network timeout.
    pub timeout: Duration,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self::with_base(Path::new("."))
    }
}

impl ContentConfig {
    fn with_base(base: &Path) -> Self {
        Self {
            root: base.join("src/content/docs"),
            direct_root: base.join("content/docs"),
            base_url: None,
            extensions: vec!["mdx".to_owned(), "md".to_owned()],
            timeout: Duration::from_secs(10),
        }
    }
}

/// Default fable and base-case layout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FableConfig {
    /// Author, possibly `collection/author`.
    pub author: String,
    /// Book identifier.
    pub book: String,
    /// Fable identifier.
    pub name: String,
    /// Fable stored as flat per-language files.
    pub base_case: String,
    /// Directory of the base-case files, relative to the content root.
    pub base_case_dir: String,
}

impl Default for FableConfig {
    fn default() -> Self {
        Self {
            author: "antoine-vincent-arnault".to_owned(),
            book: "livre-1".to_owned(),
            name: "acteon".to_owned(),
            base_case: "acteon".to_owned(),
            base_case_dir: "fr/antoine-vincent-arnault/livre-1/acteon".to_owned(),
        }
    }
}

/// Raw widget configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct WidgetConfigRaw {
    id: Option<String>,
    tabs: Option<Vec<String>>,
    state_dir: Option<String>,
}

/// Resolved widget configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Widget instance identifier, scoping its persisted state.
    pub id: String,
    /// Tab identifiers in display order.
    pub tabs: Vec<String>,
    /// Directory of the persisted key-value store.
    pub state_dir: PathBuf,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self::with_base(Path::new("."))
    }
}

impl WidgetConfig {
    fn with_base(base: &Path) -> Self {
        Self {
            id: "acteon".to_owned(),
            tabs: vec!["1".to_owned(), "2".to_owned(), "3".to_owned()],
            state_dir: base.join(".fable/state"),
        }
    }
}

/// Mock content configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    /// Serve generated demo content instead of documents.
    pub enabled: bool,
    /// Probability of a simulated transient failure.
    pub failure_rate: f64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            failure_rate: 0.05,
        }
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
        /// Config field path (e.g., "`content.base_url`").
        field: String,
        /// Error message (e.g., "${`FABLE_BASE_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `fable.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The result is
    /// validated last.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails, or
    /// the final configuration is invalid.
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
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(root) = &settings.root {
            self.content_resolved.root.clone_from(root);
        }
        if let Some(base_url) = &settings.base_url {
            self.content_resolved.base_url = non_empty(base_url.clone());
        }
        if let Some(id) = &settings.widget_id {
            self.widget_resolved.id.clone_from(id);
        }
        if let Some(state_dir) = &settings.state_dir {
            self.widget_resolved.state_dir.clone_from(state_dir);
        }
        if let Some(mock) = settings.mock {
            self.mock.enabled = mock;
        }
        if let Some(rate) = settings.failure_rate {
            self.mock.failure_rate = rate;
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

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    #[must_use]
    pub fn default_with_base(base: &Path) -> Self {
        Self {
            content: ContentConfigRaw::default(),
            fable: FableConfig::default(),
            widget: WidgetConfigRaw::default(),
            mock: MockConfig::default(),
            content_resolved: ContentConfig::with_base(base),
            widget_resolved: WidgetConfig::with_base(base),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically at the end of [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_content()?;
        self.validate_fable()?;
        self.validate_widget()?;
        self.validate_mock()?;
        Ok(())
    }

    fn validate_content(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.content_resolved.base_url {
            require_http_url(url, "content.base_url")?;
        }
        if self.content_resolved.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "content.extensions cannot be empty".to_owned(),
            ));
        }
        for ext in &self.content_resolved.extensions {
            if ext.is_empty() || ext.contains(['/', '.']) {
                return Err(ConfigError::Validation(format!(
                    "content.extensions contains an invalid extension: {ext:?}"
                )));
            }
        }
        if self.content_resolved.timeout.is_zero() {
            return Err(ConfigError::Validation(
                "content.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_fable(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.fable.author, "fable.author")?;
        require_non_empty(&self.fable.book, "fable.book")?;
        require_non_empty(&self.fable.name, "fable.name")?;
        require_non_empty(&self.fable.base_case, "fable.base_case")?;
        require_non_empty(&self.fable.base_case_dir, "fable.base_case_dir")?;
        Ok(())
    }

    fn validate_widget(&self) -> Result<(), ConfigError> {
        let widget = &self.widget_resolved;
        require_non_empty(&widget.id, "widget.id")?;

        if widget.tabs.is_empty() {
            return Err(ConfigError::Validation(
                "widget.tabs cannot be empty".to_owned(),
            ));
        }
        if widget.tabs.len() > MAX_TABS {
            return Err(ConfigError::Validation(format!(
                "widget.tabs cannot have more than {MAX_TABS} entries"
            )));
        }
        for (i, tab) in widget.tabs.iter().enumerate() {
            require_non_empty(tab, "widget.tabs entry")?;
            if widget.tabs[..i].contains(tab) {
                return Err(ConfigError::Validation(format!(
                    "widget.tabs contains duplicate tab {tab:?}"
                )));
            }
        }
        Ok(())
    }

    fn validate_mock(&self) -> Result<(), ConfigError> {
        let rate = self.mock.failure_rate;
        if !(0.0..=1.0).contains(&rate) {
            return Err(ConfigError::Validation(
                "mock.failure_rate must be between 0 and 1".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let content = &mut self.content;
        if let Some(root) = &content.root {
            content.root = Some(expand::expand_env(root, "content.root")?);
        }
        if let Some(root) = &content.direct_root {
            content.direct_root = Some(expand::expand_env(root, "content.direct_root")?);
        }
        if let Some(url) = &content.base_url {
            content.base_url = Some(expand::expand_env(url, "content.base_url")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));
        let defaults = ContentConfig::with_base(config_dir);

        self.content_resolved = ContentConfig {
            root: resolve(self.content.root.as_deref(), "src/content/docs"),
            direct_root: resolve(self.content.direct_root.as_deref(), "content/docs"),
            base_url: self
                .content
                .base_url
                .clone()
                .and_then(non_empty)
                .map(|url| url.trim_end_matches('/').to_owned()),
            extensions: self.content.extensions.clone().unwrap_or(defaults.extensions),
            timeout: self
                .content
                .timeout_secs
                .map_or(defaults.timeout, Duration::from_secs),
        };

        let defaults = WidgetConfig::with_base(config_dir);
        self.widget_resolved = WidgetConfig {
            id: self.widget.id.clone().unwrap_or(defaults.id),
            tabs: self.widget.tabs.clone().unwrap_or(defaults.tabs),
            state_dir: resolve(self.widget.state_dir.as_deref(), ".fable/state"),
        };
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
