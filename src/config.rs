use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path or http(s) URL of the tab-delimited movie catalog
    #[serde(default = "default_catalog_source")]
    pub catalog_source: String,

    /// Prefix joined with each movie's poster path
    #[serde(default = "default_poster_base_url")]
    pub poster_base_url: String,

    /// Largest `n` accepted by the recommendations endpoint
    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_catalog_source() -> String {
    "data/films.tsv".to_string()
}

fn default_poster_base_url() -> String {
    "https://image.tmdb.org/t/p/w600_and_h900_bestv2".to_string()
}

fn default_max_recommendations() -> usize {
    10
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_source: default_catalog_source(),
            poster_base_url: default_poster_base_url(),
            max_recommendations: default_max_recommendations(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
