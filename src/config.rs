use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub uploads: UploadsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadsConfig {
    /// Directory the image store writes into
    pub dir: String,
    /// Upload size ceiling in bytes
    pub max_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            // mode=rwc creates the file on first boot
            url: "sqlite://rifa.db?mode=rwc".to_string(),
            max_connections: 10,
        }
    }
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: "public/uploads".to_string(),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            uploads: UploadsConfig::default(),
        }
    }
}

impl Config {
    /// Load from CONFIG_PATH (default config.toml); a missing file is fine and
    /// falls back to defaults. Environment variables override either way.
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        let mut config: Config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => {
                toml::from_str(&config_str).map_err(|e| format!("Failed to parse {config_path}: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Config::default(),
            Err(e) => {
                return Err(format!("Failed to read {config_path}: {e}").into());
            }
        };

        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }
        if let Ok(v) = env::var("UPLOADS_DIR") {
            config.uploads.dir = v;
        }
        if let Ok(v) = env::var("UPLOADS_MAX_BYTES")
            && let Ok(n) = v.parse()
        {
            config.uploads.max_bytes = n;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.uploads.max_bytes, 5 * 1024 * 1024);
        assert_eq!(config.uploads.dir, "public/uploads");
    }
}
