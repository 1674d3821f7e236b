use serde::Deserialize;

/// Main configuration structure for sitesift
///
/// Every section and field has a default, so an empty TOML file (or no file
/// at all) yields a working configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub verifier: VerifierConfig,
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// HTTP fetch behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// Hard timeout for the page fetch (seconds). Pages can be slow.
    #[serde(rename = "page-timeout-secs", default = "default_page_timeout")]
    pub page_timeout_secs: u64,

    /// Hard timeout for each link probe (seconds). Probes run in bulk,
    /// so this is kept short.
    #[serde(rename = "probe-timeout-secs", default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Link verification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct VerifierConfig {
    /// Maximum number of resolved links probed per page
    #[serde(rename = "max-probes", default = "default_max_probes")]
    pub max_probes: usize,

    /// Maximum number of probes in flight at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

/// Background crawl service configuration
///
/// Consumed by the background crawl queue, which library embedders start
/// themselves. The CLI runs one crawl to completion and does not read this
/// section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Number of worker tasks draining the crawl queue
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Bounded queue capacity; enqueue fails once full
    #[serde(rename = "queue-capacity", default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,
}

fn default_page_timeout() -> u64 {
    30
}

fn default_probe_timeout() -> u64 {
    5
}

fn default_user_agent() -> String {
    format!("sitesift/{}", env!("CARGO_PKG_VERSION"))
}

fn default_max_probes() -> usize {
    10
}

fn default_concurrency() -> usize {
    4
}

fn default_workers() -> usize {
    2
}

fn default_queue_capacity() -> usize {
    32
}

fn default_database_path() -> String {
    "./sitesift.db".to_string()
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            page_timeout_secs: default_page_timeout(),
            probe_timeout_secs: default_probe_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            max_probes: default_max_probes(),
            concurrency: default_concurrency(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_populated() {
        let config = Config::default();
        assert_eq!(config.fetcher.page_timeout_secs, 30);
        assert_eq!(config.fetcher.probe_timeout_secs, 5);
        assert!(config.fetcher.user_agent.starts_with("sitesift/"));
        assert_eq!(config.verifier.max_probes, 10);
        assert_eq!(config.verifier.concurrency, 4);
        assert_eq!(config.service.workers, 2);
        assert_eq!(config.service.queue_capacity, 32);
        assert_eq!(config.output.database_path, "./sitesift.db");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.verifier.max_probes, 10);
        assert_eq!(config.output.database_path, "./sitesift.db");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
[verifier]
max-probes = 25
"#,
        )
        .unwrap();
        assert_eq!(config.verifier.max_probes, 25);
        assert_eq!(config.verifier.concurrency, 4);
    }
}
