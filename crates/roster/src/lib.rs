//! Roster - trade evaluation and team record persistence
//!
//! Scores franchise rosters, applies two-team trades to a session's team
//! records, and serves those records back, either from the backing store or
//! from static seed data.
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use roster::models::{RosterConfig, TradeRequest, LookupRequest, LookupMode};
//! use roster::engine::{RosterEngine, ReferenceData};
//! use roster::store::{SqliteStore, MemoryStore, TeamStore};
//! ```

pub use roster_engine as engine;
pub use roster_models as models;
pub use roster_store as store;

use std::sync::Arc;

use anyhow::Context;
use roster_engine::{ReferenceData, RosterEngine};
use roster_models::config::{RosterConfig, StoreBackend, StoreConfig};
use roster_store::{MemoryStore, SqliteStore, TeamStore};

/// Open the configured backing store.
pub fn open_store(config: &StoreConfig) -> Result<Arc<dyn TeamStore>, anyhow::Error> {
    let store: Arc<dyn TeamStore> = match config.backend {
        StoreBackend::Sqlite => Arc::new(
            SqliteStore::open(&config.sqlite_path)
                .with_context(|| format!("Failed to open store DB: {}", config.sqlite_path))?,
        ),
        StoreBackend::Memory => Arc::new(MemoryStore::new(config.memory_max_capacity)),
    };
    Ok(store)
}

/// Build a RosterEngine from configuration: opens the store and loads the
/// reference data.
pub fn build_engine(config: &RosterConfig) -> Result<RosterEngine, anyhow::Error> {
    let store = open_store(&config.store)?;
    let reference =
        ReferenceData::load(&config.reference).context("Failed to load reference data")?;
    Ok(RosterEngine::new(store, Arc::new(reference)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_models::config::ReferenceConfig;
    use roster_models::request::{LookupMode, LookupRequest};

    fn write_reference(dir: &std::path::Path) -> ReferenceConfig {
        let players_path = dir.join("players.json");
        let teams_path = dir.join("teams.json");
        std::fs::write(
            &players_path,
            r#"{"playerData": {"LeBron James": ["LAL", 97, 90, 80, 85, 92, 75, 70]}}"#,
        )
        .unwrap();
        std::fs::write(
            &teams_path,
            r#"{"Lakers": {"players": ["LeBron James"], "picks": [], "score": [90, 80, 85, 92, 75, 70]}}"#,
        )
        .unwrap();
        ReferenceConfig {
            players_path: players_path.to_string_lossy().into_owned(),
            teams_path: teams_path.to_string_lossy().into_owned(),
        }
    }

    #[tokio::test]
    async fn builds_engine_on_memory_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = RosterConfig {
            store: StoreConfig {
                backend: StoreBackend::Memory,
                ..StoreConfig::default()
            },
            reference: write_reference(dir.path()),
            ..RosterConfig::default()
        };

        let engine = build_engine(&config).unwrap();
        let snapshot = engine
            .lookup(&LookupRequest {
                session_id: String::new(),
                team: "Lakers".to_string(),
                mode: LookupMode::StaticFallback,
            })
            .await
            .unwrap();
        assert_eq!(snapshot.players, vec!["LeBron James".to_string()]);
    }

    #[test]
    fn builds_engine_on_sqlite_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = RosterConfig {
            store: StoreConfig {
                sqlite_path: dir.path().join("roster.db").to_string_lossy().into_owned(),
                ..StoreConfig::default()
            },
            reference: write_reference(dir.path()),
            ..RosterConfig::default()
        };
        assert!(build_engine(&config).is_ok());
    }

    #[test]
    fn missing_reference_data_fails() {
        let config = RosterConfig {
            store: StoreConfig {
                backend: StoreBackend::Memory,
                ..StoreConfig::default()
            },
            reference: ReferenceConfig {
                players_path: "/nonexistent/players.json".to_string(),
                teams_path: "/nonexistent/teams.json".to_string(),
            },
            ..RosterConfig::default()
        };
        let err = build_engine(&config).err().unwrap();
        assert!(format!("{err:#}").contains("reference data"));
    }
}
