use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// User-agent string sent with every probe
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout for probes, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of probes in flight
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Redirect hops a probe follows before giving up
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Where the validation summary is written
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,

    /// Also flag same-URL records inside a single import as duplicates
    #[serde(default)]
    pub detect_in_batch_duplicates: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            workers: default_workers(),
            max_redirects: default_max_redirects(),
            report_path: default_report_path(),
            detect_in_batch_duplicates: false,
        }
    }
}

fn default_user_agent() -> String {
    concat!("bookmark-parser/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_workers() -> usize {
    10
}

fn default_max_redirects() -> usize {
    10
}

fn default_report_path() -> PathBuf {
    PathBuf::from("output").join("validation_report.txt")
}

impl Config {
    /// Load configuration from a file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.check()?;
        Ok(config)
    }

    /// Load configuration from default location (~/.config/bookmark-parser/config.yml)
    /// Falls back to default config if file doesn't exist
    pub fn load() -> Self {
        let config_path = crate::utils::get_config_dir().join("config.yml");

        if config_path.exists() {
            match Self::load_from_path(&config_path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to load config from {:?}: {}",
                        config_path, e
                    );
                    eprintln!("Using default configuration");
                    Self::default()
                }
            }
        } else {
            Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn check(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(crate::error::BookmarkError::Config(
                "workers must be at least 1".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(crate::error::BookmarkError::Config(
                "timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.user_agent.starts_with("bookmark-parser/"));
        assert_eq!(config.workers, 10);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(
            config.report_path,
            Path::new("output").join("validation_report.txt")
        );
        assert!(!config.detect_in_batch_duplicates);
    }

    #[test]
    fn test_load_full_config() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        fs::write(
            config_path,
            "user_agent: Custom User Agent\n\
             timeout_secs: 5\n\
             workers: 4\n\
             max_redirects: 2\n\
             report_path: reports/run.txt\n\
             detect_in_batch_duplicates: true\n",
        )
        .unwrap();
        let loaded = Config::load_from_path(config_path).unwrap();

        assert_eq!(loaded.user_agent, "Custom User Agent");
        assert_eq!(loaded.timeout(), Duration::from_secs(5));
        assert_eq!(loaded.workers, 4);
        assert_eq!(loaded.max_redirects, 2);
        assert_eq!(loaded.report_path, Path::new("reports").join("run.txt"));
        assert!(loaded.detect_in_batch_duplicates);
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        fs::write(config_path, "invalid: yaml: content:").unwrap();

        let result = Config::load_from_path(config_path);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_partial_config() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        fs::write(config_path, "timeout_secs: 3\n").unwrap();

        let config = Config::load_from_path(config_path).unwrap();
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.user_agent, default_user_agent());
        assert_eq!(config.workers, default_workers());
    }

    #[rstest]
    #[case("workers: 0\n")]
    #[case("timeout_secs: 0\n")]
    fn test_load_rejects_zero_limits(#[case] yaml: &str) {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), yaml).unwrap();

        let result = Config::load_from_path(temp_file.path());
        assert!(matches!(
            result,
            Err(crate::error::BookmarkError::Config(_))
        ));
    }
}
