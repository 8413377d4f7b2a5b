//! Configuration loading and root folder resolution
//!
//! Every tunable of the curation tools lives in [`CurateConfig`], an
//! immutable value handed to each component. Values come from, in order:
//!
//! 1. Command-line arguments (`--config`, `--root`)
//! 2. Environment variables (`SNDKIT_CONFIG`, `SNDKIT_ROOT_FOLDER`)
//! 3. TOML configuration file
//! 4. Built-in defaults (code constants)
//!
//! A missing config file is not an error: defaults are used and the caller is
//! told so through [`ConfigSource`], so it can warn once logging is up. A file
//! that exists but does not parse is fatal.

use crate::tags::PriorityTable;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable naming the TOML config file
pub const CONFIG_ENV_VAR: &str = "SNDKIT_CONFIG";

/// Environment variable naming the sample tree root
pub const ROOT_FOLDER_ENV_VAR: &str = "SNDKIT_ROOT_FOLDER";

/// Where a resolved configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Loaded from this TOML file
    File(PathBuf),
    /// Named file (CLI or `SNDKIT_CONFIG`) does not exist; defaults in effect
    Missing(PathBuf),
    /// No file found; compiled defaults in effect
    Defaults,
}

impl ConfigSource {
    /// True when compiled defaults are in effect
    pub fn is_fallback(&self) -> bool {
        !matches!(self, ConfigSource::File(_))
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Missing(path) => {
                write!(f, "built-in defaults ({} not found)", path.display())
            }
            ConfigSource::Defaults => f.write_str("built-in defaults"),
        }
    }
}

/// Curation configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CurateConfig {
    /// Root of the sample tree
    #[serde(default = "default_root_folder")]
    pub root_folder: PathBuf,

    /// Literal, case-sensitive filename suffix selecting sample files
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Substrings every sample filename must contain to survive filtering
    #[serde(default = "default_required_substrings")]
    pub required_substrings: Vec<String>,

    /// Directory names skipped while walking the tree
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,

    #[serde(default)]
    pub priority: PriorityTable,

    #[serde(default)]
    pub manifest: ManifestSettings,

    #[serde(default)]
    pub single_directory: SingleDirectorySettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Static manifest metadata for tree-wide manifest generation
///
/// The instrument name is derived per directory.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ManifestSettings {
    /// Manifest file written into each directory
    #[serde(default = "default_manifest_file_name")]
    pub file_name: String,

    #[serde(default = "default_organization")]
    pub organization: String,

    #[serde(default)]
    pub performer: String,
}

/// Fixed metadata for the single-directory manifest variant
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SingleDirectorySettings {
    #[serde(default = "default_single_directory")]
    pub directory: PathBuf,

    #[serde(default = "default_single_instrument")]
    pub instrument: String,

    #[serde(default = "default_single_organization")]
    pub organization: String,

    #[serde(default = "default_single_performer")]
    pub performer: String,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_root_folder() -> PathBuf {
    PathBuf::from("./")
}

fn default_extension() -> String {
    ".mp3".to_string()
}

fn default_required_substrings() -> Vec<String> {
    vec!["normal".to_string()]
}

fn default_ignore_patterns() -> Vec<String> {
    vec![".git".to_string(), ".svn".to_string(), ".DS_Store".to_string()]
}

fn default_manifest_file_name() -> String {
    "details.json".to_string()
}

fn default_organization() -> String {
    "Philharmonia Orchestra".to_string()
}

fn default_single_directory() -> PathBuf {
    PathBuf::from("./sounds/piano/")
}

fn default_single_instrument() -> String {
    "Acoustic Piano".to_string()
}

fn default_single_organization() -> String {
    "University of Iowa Electronic Music Studios".to_string()
}

fn default_single_performer() -> String {
    "Evan Mazunik".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CurateConfig {
    fn default() -> Self {
        Self {
            root_folder: default_root_folder(),
            extension: default_extension(),
            required_substrings: default_required_substrings(),
            ignore_patterns: default_ignore_patterns(),
            priority: PriorityTable::default(),
            manifest: ManifestSettings::default(),
            single_directory: SingleDirectorySettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ManifestSettings {
    fn default() -> Self {
        Self {
            file_name: default_manifest_file_name(),
            organization: default_organization(),
            performer: String::new(),
        }
    }
}

impl Default for SingleDirectorySettings {
    fn default() -> Self {
        Self {
            directory: default_single_directory(),
            instrument: default_single_instrument(),
            organization: default_single_organization(),
            performer: default_single_performer(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl CurateConfig {
    /// Parse configuration from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CurateConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Resolve configuration using the documented priority order
    ///
    /// **Algorithm:**
    /// 1. Explicit path (CLI) or `SNDKIT_CONFIG`; defaults if it is missing
    /// 2. Platform config file (`<config_dir>/sndkit/curate.toml`) if present
    /// 3. Compiled defaults
    /// 4. Root folder override: `root_override`, then `SNDKIT_ROOT_FOLDER`
    ///
    /// Runs before logging is initialized, so the source is returned for the
    /// caller to report instead of being logged here.
    pub fn resolve(
        config_path: Option<&Path>,
        root_override: Option<&Path>,
    ) -> Result<(Self, ConfigSource)> {
        let explicit = config_path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

        let (mut config, source) = match explicit {
            Some(path) if !path.exists() => (Self::default(), ConfigSource::Missing(path)),
            Some(path) => (Self::load_file(&path)?, ConfigSource::File(path)),
            None => match default_config_path() {
                Some(path) if path.exists() => (Self::load_file(&path)?, ConfigSource::File(path)),
                _ => (Self::default(), ConfigSource::Defaults),
            },
        };

        if let Some(root) = root_override {
            config.root_folder = root.to_path_buf();
        } else if let Some(root) = std::env::var_os(ROOT_FOLDER_ENV_VAR) {
            config.root_folder = PathBuf::from(root);
        }

        Ok((config, source))
    }

    /// Check invariants the components rely on
    pub fn validate(&self) -> Result<()> {
        if self.extension.is_empty() {
            return Err(Error::Config("extension must not be empty".to_string()));
        }
        if self.manifest.file_name.is_empty() {
            return Err(Error::Config("manifest file_name must not be empty".to_string()));
        }
        if self.manifest.file_name.ends_with(&self.extension) {
            return Err(Error::Config(format!(
                "manifest file_name {:?} would be picked up as a sample ({:?})",
                self.manifest.file_name, self.extension
            )));
        }
        self.priority.validate()
    }

    /// True when `file_name` carries the configured sample suffix
    pub fn is_sample(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.extension)
    }
}

/// Platform config file location, e.g. `~/.config/sndkit/curate.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sndkit").join("curate.toml"))
}
