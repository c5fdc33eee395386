//! On-disk configuration.
//!
//! The configuration lives in a TOML file, by default at
//! `<config dir>/scholar/config.toml`:
//!
//! ```toml
//! api_url     = "http://export.arxiv.org/api/query"
//! max_results = 100
//! tags_path   = "/home/alice/.local/share/scholar/tags.db"
//! autocommit  = true
//! ```
//!
//! Every field is optional; missing fields fall back to [`Config::default`].

use super::*;

/// Default arXiv query endpoint.
pub const DEFAULT_API_URL: &str = "http://export.arxiv.org/api/query";

/// Default page size for search queries.
pub const DEFAULT_MAX_RESULTS: usize = 100;

/// Runtime configuration for retrieval and tag storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Endpoint queried by the [`Retriever`]
  pub api_url:     String,
  /// Results requested per search page
  pub max_results: usize,
  /// Location of the tag database
  pub tags_path:   PathBuf,
  /// Commit the tag database after every write
  pub autocommit:  bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      api_url:     DEFAULT_API_URL.to_string(),
      max_results: DEFAULT_MAX_RESULTS,
      tags_path:   Self::default_tags_path(),
      autocommit:  true,
    }
  }
}

impl Config {
  /// Returns the default path for the configuration file.
  ///
  /// - On Unix: `~/.config/scholar/config.toml`
  /// - On macOS: `~/Library/Application Support/scholar/config.toml`
  /// - On Windows: `%APPDATA%\scholar\config.toml`
  /// - Fallback: `./scholar/config.toml`
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("scholar").join("config.toml")
  }

  /// Returns the default path for the tag database.
  ///
  /// - On Unix: `~/.local/share/scholar/tags.db`
  /// - On macOS: `~/Library/Application Support/scholar/tags.db`
  /// - On Windows: `%APPDATA%\scholar\tags.db`
  /// - Fallback: `./scholar/tags.db`
  pub fn default_tags_path() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("scholar").join("tags.db")
  }

  /// Loads the configuration at `path`, or the defaults if no file exists there.
  ///
  /// # Errors
  ///
  /// Fails if the file exists but cannot be read or is not valid TOML.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if !path.exists() {
      debug!("No configuration at {}, using defaults", path.display());
      return Ok(Self::default());
    }
    let content = std::fs::read_to_string(path)?;
    let config: Self = toml::from_str(&content)?;
    if config.max_results == 0 {
      return Err(ScholarError::Config("max_results must be at least 1".to_string()));
    }
    Ok(config)
  }

  /// Writes the configuration to `path`, creating parent directories as needed.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(self)?)?;
    Ok(())
  }

  /// Sets the API endpoint.
  pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
    self.api_url = api_url.into();
    self
  }

  /// Sets the search page size.
  pub fn with_max_results(mut self, max_results: usize) -> Self {
    self.max_results = max_results;
    self
  }

  /// Sets the tag database location.
  pub fn with_tags_path(mut self, tags_path: &Path) -> Self {
    self.tags_path = tags_path.to_path_buf();
    self
  }

  /// Sets whether the tag database commits after every write.
  pub fn with_autocommit(mut self, autocommit: bool) -> Self {
    self.autocommit = autocommit;
    self
  }
}
