//! Test support: a scripted in-memory store with call counting and
//! per-team fault injection, plus a small reference data fixture.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use roster_models::player::PlayerAttributes;
use roster_models::store_schema::TeamKey;
use roster_models::team::{Pick, ScoreVector, TeamSnapshot};
use roster_models::wire::WireRecord;
use roster_store::{StoreError, TeamStore};

use crate::reference::ReferenceData;

/// Store call counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCalls {
    pub gets: usize,
    pub puts: usize,
    pub deletes: usize,
}

/// A `TeamStore` that keeps records in a map, counts every call, and fails
/// every operation touching one of its failing teams.
#[derive(Default)]
pub struct ScriptedStore {
    records: Mutex<HashMap<TeamKey, WireRecord>>,
    failing_teams: HashSet<String>,
    gets: AtomicUsize,
    puts: AtomicUsize,
    deletes: AtomicUsize,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(teams: &[&str]) -> Self {
        Self {
            failing_teams: teams.iter().map(|t| t.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Seed a record directly, without counting a put.
    ///
    /// Panics if the record has no key attributes.
    pub fn with_record(self, record: WireRecord) -> Self {
        let key = TeamKey::from_record(&record).expect("seed record must carry Uuid and Team");
        self.records
            .lock()
            .expect("records mutex poisoned")
            .insert(key, record);
        self
    }

    pub fn calls(&self) -> StoreCalls {
        StoreCalls {
            gets: self.gets.load(Ordering::SeqCst),
            puts: self.puts.load(Ordering::SeqCst),
            deletes: self.deletes.load(Ordering::SeqCst),
        }
    }

    pub fn record(&self, key: &TeamKey) -> Option<WireRecord> {
        self.lock().ok()?.get(key).cloned()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<TeamKey, WireRecord>>, StoreError> {
        self.records
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("records mutex poisoned: {e}")))
    }

    fn check_fault(&self, key: &TeamKey) -> Result<(), StoreError> {
        if self.failing_teams.contains(&key.team) {
            return Err(StoreError::Unavailable(format!("simulated fault for {key}")));
        }
        Ok(())
    }
}

#[async_trait]
impl TeamStore for ScriptedStore {
    async fn get(&self, key: &TeamKey) -> Result<Option<WireRecord>, StoreError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.check_fault(key)?;
        Ok(self.lock()?.get(key).cloned())
    }

    async fn put(&self, record: WireRecord) -> Result<(), StoreError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        let key = TeamKey::from_record(&record)
            .ok_or_else(|| StoreError::Validation("record has no key attributes".to_string()))?;
        self.check_fault(&key)?;
        self.lock()?.insert(key, record);
        Ok(())
    }

    async fn delete(&self, key: &TeamKey) -> Result<(), StoreError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check_fault(key)?;
        self.lock()?.remove(key);
        Ok(())
    }
}

fn attrs(overall: u32, categories: [u32; 6]) -> PlayerAttributes {
    PlayerAttributes {
        overall,
        inside_scoring: categories[0],
        outside_scoring: categories[1],
        athleticism: categories[2],
        playmaking: categories[3],
        rebounding: categories[4],
        defending: categories[5],
    }
}

/// Reference data with players `p1..p9` and `q1..q6` and seeds for
/// "Lakers" and "Celtics".
///
/// `p{i}` has overall `91 - i` and categories `[10i, 5i, i, 2i, 3i, 4i]`,
/// except `p9`, whose categories are all 99. Top eight of `p1..p9` scores
/// `[45, 22, 4, 9, 13, 18]`.
///
/// `q{j}` has overall `70 + j` and categories `[7j, j, j, j, j, j]`; all six
/// score `[24, 3, 3, 3, 3, 3]`.
pub fn sample_reference() -> ReferenceData {
    let mut players = HashMap::new();
    for i in 1..=9u32 {
        let categories = if i == 9 {
            [99; 6]
        } else {
            [10 * i, 5 * i, i, 2 * i, 3 * i, 4 * i]
        };
        players.insert(format!("p{i}"), attrs(91 - i, categories));
    }
    for j in 1..=6u32 {
        players.insert(format!("q{j}"), attrs(70 + j, [7 * j, j, j, j, j, j]));
    }

    let mut teams = HashMap::new();
    teams.insert(
        "Lakers".to_string(),
        TeamSnapshot {
            players: (1..=8).map(|i| format!("p{i}")).collect(),
            picks: vec![Pick::new("2026-R1-unprotected")],
            score: ScoreVector::from_categories([45, 22, 4, 9, 13, 18]),
            legacy_score: None,
        },
    );
    teams.insert(
        "Celtics".to_string(),
        TeamSnapshot {
            players: (1..=6).map(|j| format!("q{j}")).collect(),
            picks: vec![],
            score: ScoreVector::from_categories([24, 3, 3, 3, 3, 3]),
            legacy_score: None,
        },
    );

    ReferenceData::new(players, teams)
}
