use std::sync::Arc;

use roster_models::request::LookupMode;
use roster_models::store_schema::TeamKey;
use roster_models::team::TeamSnapshot;
use roster_store::TeamStore;
use tracing::{debug, error};

use crate::codec::decode_versioned;
use crate::error::EngineError;
use crate::reference::ReferenceData;
use crate::score::compute_score;

/// Looks up a team either from the session's stored record or from the
/// static seed data.
pub struct RetrievalService {
    store: Arc<dyn TeamStore>,
    reference: Arc<ReferenceData>,
}

impl RetrievalService {
    pub fn new(store: Arc<dyn TeamStore>, reference: Arc<ReferenceData>) -> Self {
        Self { store, reference }
    }

    pub async fn get_team(
        &self,
        session_id: &str,
        team: &str,
        mode: LookupMode,
    ) -> Result<TeamSnapshot, EngineError> {
        match mode {
            LookupMode::Store => self.from_store(TeamKey::new(session_id, team)).await,
            LookupMode::StaticFallback => self.from_seed(team),
        }
    }

    async fn from_store(&self, key: TeamKey) -> Result<TeamSnapshot, EngineError> {
        let wire = match self.store.get(&key).await {
            Ok(Some(wire)) => wire,
            Ok(None) => return Err(EngineError::NotFound(key)),
            Err(e) => {
                error!(operation = "get", session_id = %key.session_id, team = %key.team, error = %e, "Store read failed");
                return Err(e.into());
            }
        };

        let decoded = decode_versioned(&wire).map_err(|e| {
            error!(operation = "decode", session_id = %key.session_id, team = %key.team, error = %e, "Stored record could not be decoded");
            e
        })?;

        let mut record = decoded.record;
        // Legacy records only kept a scalar; rebuild the categories from the roster.
        if decoded.legacy_score.is_some() && record.score.is_empty() {
            debug!(key = %key, legacy_score = ?decoded.legacy_score, "Recomputing score for legacy record");
            record.score = compute_score(&record.roster, &self.reference).map_err(|e| {
                error!(operation = "rescore", session_id = %key.session_id, team = %key.team, error = %e, "Stored legacy record could not be rescored");
                EngineError::Encoding(format!("legacy record {key} could not be rescored: {e}"))
            })?;
        }

        let mut snapshot = TeamSnapshot::from(record);
        snapshot.legacy_score = decoded.legacy_score;
        Ok(snapshot)
    }

    /// Seed snapshots are per franchise; the session plays no part.
    fn from_seed(&self, team: &str) -> Result<TeamSnapshot, EngineError> {
        self.reference
            .team(team)
            .cloned()
            .ok_or_else(|| EngineError::UnknownTeam(team.to_string()))
    }
}
