use std::sync::Arc;

use roster_models::store_schema::TeamKey;
use roster_store::{StoreError, TeamStore};
use tracing::{error, info};

use crate::error::EngineError;

/// Removes a session's team records.
pub struct DeletionService {
    store: Arc<dyn TeamStore>,
}

impl DeletionService {
    pub fn new(store: Arc<dyn TeamStore>) -> Self {
        Self { store }
    }

    /// Delete every `(session_id, team)` record concurrently.
    ///
    /// Best effort: every delete runs to completion and nothing is rolled
    /// back. Missing records are not an error. An empty list makes no store
    /// calls.
    pub async fn delete_teams(&self, session_id: &str, teams: &[String]) -> Result<(), EngineError> {
        if teams.is_empty() {
            return Ok(());
        }

        let mut handles = Vec::with_capacity(teams.len());
        for team in teams {
            let store = Arc::clone(&self.store);
            let key = TeamKey::new(session_id, team.as_str());
            handles.push((
                team.clone(),
                tokio::spawn(async move { store.delete(&key).await }),
            ));
        }

        let mut failed = Vec::new();
        for (team, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => Err(StoreError::Unavailable(format!("delete task failed: {e}"))),
            };
            if let Err(e) = result {
                error!(operation = "delete", session_id = %session_id, team = %team, error = %e, "Delete failed");
                failed.push(team);
            }
        }

        if failed.is_empty() {
            info!(session_id = %session_id, count = teams.len(), "Teams deleted");
            Ok(())
        } else {
            Err(EngineError::DeleteBatch {
                failed,
                total: teams.len(),
            })
        }
    }
}
