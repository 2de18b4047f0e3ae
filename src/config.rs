use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the broad catalog file
    #[serde(default = "default_broad_catalog_path")]
    pub broad_catalog_path: String,

    /// Path to the niche catalog file
    #[serde(default = "default_niche_catalog_path")]
    pub niche_catalog_path: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_broad_catalog_path() -> String {
    "data/books.json".to_string()
}

fn default_niche_catalog_path() -> String {
    "data/niche.json".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
