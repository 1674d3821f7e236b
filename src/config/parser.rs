use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigResult;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;

    let config: Config = toml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[fetcher]
page-timeout-secs = 20
probe-timeout-secs = 3
user-agent = "sitesift-test/0.1"

[verifier]
max-probes = 5
concurrency = 2

[service]
workers = 1
queue-capacity = 8

[output]
database-path = "./test.db"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.fetcher.page_timeout_secs, 20);
        assert_eq!(config.fetcher.probe_timeout_secs, 3);
        assert_eq!(config.fetcher.user_agent, "sitesift-test/0.1");
        assert_eq!(config.verifier.max_probes, 5);
        assert_eq!(config.service.workers, 1);
        assert_eq!(config.output.database_path, "./test.db");
    }

    #[test]
    fn test_load_empty_config_uses_defaults() {
        let file = create_temp_config("");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.fetcher.page_timeout_secs, 30);
        assert_eq!(config.verifier.max_probes, 10);
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = create_temp_config("[fetcher\npage-timeout-secs = ");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_load_failing_validation() {
        let file = create_temp_config("[verifier]\nmax-probes = 0\n");
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_config(Path::new("/nonexistent/sitesift.toml")),
            Err(ConfigError::Io(_))
        ));
    }
}
