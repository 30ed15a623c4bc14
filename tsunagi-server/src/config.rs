use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Server configuration loaded from YAML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ServerSettings,
    pub backend: BackendSettings,
    pub token: TokenSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub body_limit_bytes: usize,
}

/// GraphQL backend the translators call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    pub graphql_url: String,
    pub timeout_secs: u64,
}

/// Signing settings for the bearer tokens minted per request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenSettings {
    pub secret: String,
    pub issuer: String,
    pub ttl_secs: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: String,
}

pub const DEFAULT_TOKEN_SECRET: &str = "change-me";

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            body_limit_bytes: 1024 * 1024,
        }
    }
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            graphql_url: "http://localhost:8000/graphql".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            secret: DEFAULT_TOKEN_SECRET.to_string(),
            issuer: "tsunagi".to_string(),
            ttl_secs: 300,
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: ServerConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = if let Some(path) = config_path {
            Self::load_from_file(path)?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply `TSUNAGI_*` overrides from the given lookup
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(port) = var("TSUNAGI_PORT")
            && let Ok(port_num) = port.parse()
        {
            self.server.port = port_num;
        }

        if let Some(host) = var("TSUNAGI_HOST") {
            self.server.host = host;
        }

        if let Some(url) = var("TSUNAGI_GRAPHQL_URL") {
            self.backend.graphql_url = url;
        }

        if let Some(secret) = var("TSUNAGI_TOKEN_SECRET") {
            self.token.secret = secret;
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend.timeout_secs)
    }
}
