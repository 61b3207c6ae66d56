use std::sync::Arc;

use roster_models::request::{DeleteRequest, LookupRequest, TradeRequest};
use roster_models::team::TeamSnapshot;
use roster_store::TeamStore;
use serde::Serialize;
use tracing::{info, warn};

use crate::coordinator::{TradeCoordinator, TradeOutcome};
use crate::deletion::DeletionService;
use crate::error::{EngineError, ErrorKind};
use crate::reference::ReferenceData;
use crate::retrieval::RetrievalService;

/// Entry point for the three request types. Logs each request on receipt,
/// validates it, and hands it to the matching service.
pub struct RosterEngine {
    coordinator: TradeCoordinator,
    retrieval: RetrievalService,
    deletion: DeletionService,
}

impl RosterEngine {
    pub fn new(store: Arc<dyn TeamStore>, reference: Arc<ReferenceData>) -> Self {
        Self {
            coordinator: TradeCoordinator::new(Arc::clone(&store), Arc::clone(&reference)),
            retrieval: RetrievalService::new(Arc::clone(&store), reference),
            deletion: DeletionService::new(store),
        }
    }

    pub async fn lookup(&self, request: &LookupRequest) -> Result<TeamSnapshot, EngineError> {
        info!(payload = %payload(request), "Lookup request received");
        let result = self.run_lookup(request).await;
        log_client_error("lookup", &result);
        result
    }

    async fn run_lookup(&self, request: &LookupRequest) -> Result<TeamSnapshot, EngineError> {
        request.validate()?;
        self.retrieval
            .get_team(&request.session_id, &request.team, request.mode)
            .await
    }

    /// Apply a trade. Returns `Ok` with per-side write results even when a
    /// write failed; `Err` only when the trade could not be scored.
    pub async fn trade(&self, request: &TradeRequest) -> Result<TradeOutcome, EngineError> {
        info!(payload = %payload(request), "Trade request received");
        let result = self.coordinator.execute_trade(request).await;
        log_client_error("trade", &result);
        result
    }

    pub async fn delete(&self, request: &DeleteRequest) -> Result<(), EngineError> {
        info!(payload = %payload(request), "Delete request received");
        let result = self.run_delete(request).await;
        log_client_error("delete", &result);
        result
    }

    async fn run_delete(&self, request: &DeleteRequest) -> Result<(), EngineError> {
        request.validate()?;
        self.deletion
            .delete_teams(&request.session_id, &request.teams)
            .await
    }
}

fn payload<T: Serialize>(request: &T) -> String {
    serde_json::to_string(request).unwrap_or_else(|e| format!("<unserializable: {e}>"))
}

/// Server faults are logged where they happen; client errors are logged here.
fn log_client_error<T>(operation: &str, result: &Result<T, EngineError>) {
    if let Err(e) = result {
        match e.kind() {
            ErrorKind::ClientInput => warn!(operation, error = %e, "Request rejected"),
            ErrorKind::NotFound => info!(operation, error = %e, "No data for request"),
            ErrorKind::ServerFault => {}
        }
    }
}
