use crate::state::DEFAULT_MAX_SESSIONS;
use invoicer_layout::PageSize;
use serde::Deserialize;
use std::path::PathBuf;

/// Environment variable naming the config file (without the `.toml` suffix).
pub const CONFIG_PATH_VAR: &str = "INVOICER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/default";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub document: DocumentConfig,
    #[serde(default)]
    pub loader: LoaderConfig,
    #[serde(default)]
    pub sessions: SessionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 3000 }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentConfig {
    #[serde(default)]
    pub page_size: PageSize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoaderConfig {
    /// Directory of `<id>.json` invoices. Without one, demo data is served.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Invoices kept open in memory; the least recently used is closed first.
    pub max_open: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { max_open: DEFAULT_MAX_SESSIONS }
    }
}

impl Config {
    /// Loads `config/default.toml` (or the file named by `INVOICER_CONFIG`)
    /// and layers `INVOICER__SECTION__KEY` environment variables on top.
    pub fn load() -> Result<Self, config::ConfigError> {
        let path = std::env::var(CONFIG_PATH_VAR)
            .ok()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    /// Like [`Config::load`] with an explicit file. A missing file is not an
    /// error; built-in defaults apply.
    pub fn load_from(path: &str) -> Result<Self, config::ConfigError> {
        let defaults = ServerConfig::default();
        let config: Config = config::Config::builder()
            .set_default("server.host", defaults.host)?
            .set_default("server.port", i64::from(defaults.port))?
            .set_default("document.page_size", PageSize::default().to_string())?
            .set_default("sessions.max_open", DEFAULT_MAX_SESSIONS as i64)?
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("INVOICER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        log::debug!("Loaded configuration from '{}': {:?}", path, config);
        Ok(config)
    }
}
