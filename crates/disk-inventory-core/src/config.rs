use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub ignore_patterns: Vec<String>,
    /// Skip entries whose name starts with `.` or `$`.
    pub skip_hidden: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            ignore_patterns: Vec::new(),
            skip_hidden: true,
        }
    }
}

/// Load `Config.toml` from the working directory if present, then apply
/// `DISK_INVENTORY__*` environment overrides.
pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    build(Config::builder().add_source(ConfigFile::with_name("Config").required(false)))
}

fn build(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<AppConfig, ConfigError> {
    let builder = builder
        .set_default("api_base_url", DEFAULT_API_BASE_URL)?
        .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS)?
        .set_default("ignore_patterns", Vec::<String>::new())?
        .set_default("skip_hidden", true)?
        .add_source(
            Environment::with_prefix("DISK_INVENTORY")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("ignore_patterns")
                .try_parsing(true),
        )
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_defaults_without_file() {
        let config = build(Config::builder()).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.ignore_patterns.is_empty());
        assert!(config.skip_hidden);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let toml = r#"
            api_base_url = "https://inventory.local/api"
            ignore_patterns = ["**/node_modules", "*.tmp"]
            skip_hidden = false
        "#;
        let config =
            build(Config::builder().add_source(ConfigFile::from_str(toml, FileFormat::Toml)))
                .unwrap();
        assert_eq!(config.api_base_url, "https://inventory.local/api");
        assert_eq!(config.ignore_patterns.len(), 2);
        assert!(!config.skip_hidden);
        assert_eq!(config.request_timeout_secs, 30);
    }
}
