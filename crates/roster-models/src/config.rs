use serde::{Deserialize, Serialize};

/// Top-level configuration for the roster engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RosterConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub reference: ReferenceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which backing store implementation holds team records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Sqlite,
    /// Process-local; records are lost on exit.
    Memory,
}

/// Configuration for the team record store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// Path to the SQLite database file. Created if missing.
    #[serde(default = "default_sqlite_path")]
    pub sqlite_path: String,
    /// Maximum number of records the in-memory backend keeps.
    #[serde(default = "default_memory_capacity")]
    pub memory_max_capacity: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            sqlite_path: default_sqlite_path(),
            memory_max_capacity: default_memory_capacity(),
        }
    }
}

/// Static reference data, loaded once at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferenceConfig {
    /// Player identifier -> attribute record.
    #[serde(default = "default_players_path")]
    pub players_path: String,
    /// Franchise name -> seed snapshot.
    #[serde(default = "default_teams_path")]
    pub teams_path: String,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            players_path: default_players_path(),
            teams_path: default_teams_path(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: default_log_filter(),
        }
    }
}

fn default_sqlite_path() -> String {
    "data/roster.db".to_string()
}
fn default_memory_capacity() -> u64 {
    10_000
}
fn default_players_path() -> String {
    "data/players.json".to_string()
}
fn default_teams_path() -> String {
    "data/teams.json".to_string()
}
fn default_log_filter() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_roster_config() {
        let config = RosterConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: RosterConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn config_from_toml() {
        let toml_str = r#"
[store]
backend = "memory"
memory_max_capacity = 500

[reference]
players_path = "/srv/roster/players.json"
teams_path = "/srv/roster/teams.json"

[logging]
format = "json"
filter = "roster_engine=debug"
"#;

        let config: RosterConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.store.memory_max_capacity, 500);
        assert_eq!(config.store.sqlite_path, "data/roster.db");
        assert_eq!(config.reference.players_path, "/srv/roster/players.json");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.filter, "roster_engine=debug");
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config: RosterConfig = toml::from_str("").unwrap();
        assert_eq!(config, RosterConfig::default());
        assert_eq!(config.store.backend, StoreBackend::Sqlite);
        assert_eq!(config.logging.format, LogFormat::Text);
    }
}
