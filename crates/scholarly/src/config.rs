//! Configuration for the client and the search view.
//!
//! Configuration lives in a TOML file, by default at
//! `<config dir>/scholarly/config.toml`. Every key is optional; a missing file
//! means every default applies. The endpoint can additionally be overridden
//! through the `SCHOLARLY_ENDPOINT` environment variable.
//!
//! ```toml
//! endpoint = "https://export.arxiv.org/api/query"
//! page_size = 10
//! author_limit = 3
//! scroll_threshold = 3
//! timeout_secs = 30
//! categories = ["Computer Science", "Mathematics", "Physics"]
//! ```

use super::*;

/// Public arXiv query endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://export.arxiv.org/api/query";

/// Papers requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Environment variable that overrides the configured endpoint.
pub const ENDPOINT_ENV: &str = "SCHOLARLY_ENDPOINT";

/// Settings shared by the client and the search view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Base URL of the arXiv query API
  pub endpoint:         String,
  /// Papers requested per page; a shorter page means the listing is exhausted
  pub page_size:        usize,
  /// Authors shown before "et al."
  pub author_limit:     usize,
  /// How many rows from the bottom of a list the next page is requested
  pub scroll_threshold: usize,
  /// Per-request timeout in seconds
  pub timeout_secs:     u64,
  /// `User-Agent` header sent with every request
  pub user_agent:       String,
  /// Category shortcuts, each submitted as a search for its name
  pub categories:       Vec<String>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      endpoint:         DEFAULT_ENDPOINT.to_string(),
      page_size:        DEFAULT_PAGE_SIZE,
      author_limit:     3,
      scroll_threshold: 3,
      timeout_secs:     30,
      user_agent:       format!("scholarly/{}", env!("CARGO_PKG_VERSION")),
      categories:       [
        "Computer Science",
        "Mathematics",
        "Physics",
        "Quantitative Biology",
        "Quantitative Finance",
        "Statistics",
        "Electrical Engineering",
        "Economics",
      ]
      .into_iter()
      .map(String::from)
      .collect(),
    }
  }
}

impl Config {
  /// Returns the default location of the configuration file.
  ///
  /// This is `scholarly/config.toml` inside the platform configuration
  /// directory, falling back to the working directory when none is known.
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("scholarly").join("config.toml")
  }

  /// Reads and validates a configuration file.
  ///
  /// # Errors
  ///
  /// Fails if the file cannot be read, is not valid TOML, or holds an
  /// out-of-range value.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    let config: Self = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
  }

  /// Like [`Config::load`], but a file that does not exist yields the defaults.
  pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if !path.exists() {
      debug!("No configuration at {}, using defaults", path.display());
      return Ok(Self::default());
    }
    Self::load(path)
  }

  /// Writes this configuration as TOML, creating parent directories.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(self)?)?;
    Ok(())
  }

  /// Replaces the endpoint.
  pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
    self.endpoint = endpoint.into();
    self
  }

  /// Applies the `SCHOLARLY_ENDPOINT` override, if it is set and non-empty.
  pub fn with_env_overrides(self) -> Self {
    match std::env::var(ENDPOINT_ENV) {
      Ok(endpoint) if !endpoint.trim().is_empty() => {
        debug!("Endpoint overridden by {}: {}", ENDPOINT_ENV, endpoint);
        self.with_endpoint(endpoint.trim())
      },
      _ => self,
    }
  }

  /// Parses the endpoint.
  pub fn endpoint_url(&self) -> Result<Url> { Ok(Url::parse(&self.endpoint)?) }

  /// The request timeout as a [`Duration`].
  pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }

  /// Checks that every value is usable.
  ///
  /// # Errors
  ///
  /// Returns [`ScholarlyError::Config`] for a zero page size or timeout, and
  /// [`ScholarlyError::Url`] for an endpoint that does not parse.
  pub fn validate(&self) -> Result<()> {
    if self.page_size == 0 {
      return Err(ScholarlyError::Config("page_size must be at least 1".to_string()));
    }
    if self.timeout_secs == 0 {
      return Err(ScholarlyError::Config("timeout_secs must be at least 1".to_string()));
    }
    self.endpoint_url()?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use serial_test::serial;

  use super::*;

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(config.page_size, 10);
    assert!(config.categories.contains(&"Computer Science".to_string()));
    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_default_path() {
    let path = Config::default_path();
    assert!(path.ends_with("scholarly/config.toml") || path.ends_with("scholarly\\config.toml"));
  }

  #[traced_test]
  #[test]
  fn test_partial_file_keeps_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "page_size = 25\ncategories = [\"cs.AI\"]\n").unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.page_size, 25);
    assert_eq!(config.categories, vec!["cs.AI".to_string()]);
    assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(config.author_limit, 3);
  }

  #[test]
  fn test_missing_file_is_default() {
    let dir = tempdir().unwrap();
    let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
  }

  #[test]
  fn test_save_and_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let config = Config::default().with_endpoint("http://localhost:8080/api/query");

    config.save(&path).unwrap();
    assert_eq!(Config::load(&path).unwrap(), config);
  }

  #[test]
  fn test_rejects_zero_page_size() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "page_size = 0\n").unwrap();
    assert!(matches!(Config::load(&path), Err(ScholarlyError::Config(_))));
  }

  #[test]
  fn test_rejects_bad_endpoint() {
    let config = Config::default().with_endpoint("not a url");
    assert!(matches!(config.validate(), Err(ScholarlyError::Url(_))));
  }

  #[test]
  fn test_rejects_bad_toml() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "page_size = \"ten\"\n").unwrap();
    assert!(matches!(Config::load(&path), Err(ScholarlyError::TomlDe(_))));
  }

  #[test]
  #[serial]
  fn test_env_override() {
    std::env::set_var(ENDPOINT_ENV, "http://127.0.0.1:9999/query");
    let config = Config::default().with_env_overrides();
    std::env::remove_var(ENDPOINT_ENV);
    assert_eq!(config.endpoint, "http://127.0.0.1:9999/query");
  }

  #[test]
  #[serial]
  fn test_blank_env_is_ignored() {
    std::env::set_var(ENDPOINT_ENV, "  ");
    let config = Config::default().with_env_overrides();
    std::env::remove_var(ENDPOINT_ENV);
    assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
  }
}
