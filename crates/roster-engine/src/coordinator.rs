use std::sync::Arc;

use roster_models::request::{
    TradeRequest, TradeResponse, ValidatedTrade, WriteFailure, TRADE_PARTIES,
};
use roster_models::team::{ScoreVector, TeamRecord};
use roster_store::{StoreError, TeamStore};
use tracing::{error, info};
use uuid::Uuid;

use crate::codec::encode;
use crate::error::EngineError;
use crate::reference::ReferenceData;
use crate::score::compute_score;

/// Result of one side's store write.
#[derive(Debug)]
pub struct WriteOutcome {
    pub team: String,
    pub result: Result<(), EngineError>,
}

/// Per-side write results, index-aligned with the trade's sides.
/// There is no atomicity across sides.
#[derive(Debug)]
pub struct TransactionResult {
    pub writes: Vec<WriteOutcome>,
}

impl TransactionResult {
    pub fn is_success(&self) -> bool {
        self.writes.iter().all(|w| w.result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &EngineError)> {
        self.writes
            .iter()
            .filter_map(|w| w.result.as_ref().err().map(|e| (w.team.as_str(), e)))
    }
}

/// Scores computed for a trade plus what happened to the writes.
#[derive(Debug)]
pub struct TradeOutcome {
    pub trade_id: Uuid,
    pub teams: [String; TRADE_PARTIES],
    pub scores: [ScoreVector; TRADE_PARTIES],
    pub transaction: TransactionResult,
    /// The caller's own franchise, when the request named one.
    pub current_team: Option<String>,
}

impl TradeOutcome {
    /// Score of a team after this trade, or the empty sentinel when the
    /// team was not party to it.
    pub fn score_for(&self, team: &str) -> ScoreVector {
        self.teams
            .iter()
            .position(|t| t == team)
            .map(|i| self.scores[i].clone())
            .unwrap_or_default()
    }

    pub fn to_response(&self) -> TradeResponse {
        TradeResponse {
            trade_id: self.trade_id,
            scores: self.scores.clone(),
            legacy_scores: [self.scores[0].legacy_scalar(), self.scores[1].legacy_scalar()],
            current_team_score: self.current_team.as_deref().map(|t| self.score_for(t)),
            failures: self
                .transaction
                .failures()
                .map(|(team, e)| WriteFailure {
                    team: team.to_string(),
                    error: e.to_string(),
                })
                .collect(),
        }
    }
}

/// Applies a trade: scores both post-trade rosters and writes both team
/// records concurrently.
pub struct TradeCoordinator {
    store: Arc<dyn TeamStore>,
    reference: Arc<ReferenceData>,
}

impl TradeCoordinator {
    pub fn new(store: Arc<dyn TeamStore>, reference: Arc<ReferenceData>) -> Self {
        Self { store, reference }
    }

    /// Validate and execute a client trade request.
    pub async fn execute_trade(&self, request: &TradeRequest) -> Result<TradeOutcome, EngineError> {
        let trade = request.validate()?;
        self.execute(&trade).await
    }

    /// Execute an already-validated trade.
    ///
    /// Both scores are computed before anything is written, so an unknown
    /// player aborts the trade with no store calls. Write failures do not
    /// fail the call; they are reported in the returned transaction result.
    pub async fn execute(&self, trade: &ValidatedTrade) -> Result<TradeOutcome, EngineError> {
        let trade_id = Uuid::new_v4();

        let [first, second] = &trade.sides;
        let scores = [
            compute_score(&first.roster, &self.reference)?,
            compute_score(&second.roster, &self.reference)?,
        ];

        // Fan-out: one full-record replace per side
        let mut handles = Vec::with_capacity(TRADE_PARTIES);
        for (side, score) in trade.sides.iter().zip(&scores) {
            let record = TeamRecord {
                session_id: trade.session_id.clone(),
                team: side.team.clone(),
                roster: side.roster.clone(),
                picks: side.picks.clone(),
                score: score.clone(),
            };
            let wire = encode(&record);
            let store = Arc::clone(&self.store);
            handles.push((side.team.clone(), tokio::spawn(async move { store.put(wire).await })));
        }

        // Collect every outcome; one side failing does not stop the other
        let mut writes = Vec::with_capacity(TRADE_PARTIES);
        for (team, handle) in handles {
            let result = match handle.await {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(EngineError::Store(e)),
                Err(e) => Err(EngineError::Store(StoreError::Unavailable(format!(
                    "write task failed: {e}"
                )))),
            };
            if let Err(e) = &result {
                error!(
                    operation = "put",
                    trade_id = %trade_id,
                    session_id = %trade.session_id,
                    team = %team,
                    error = %e,
                    "Trade write failed"
                );
            }
            writes.push(WriteOutcome { team, result });
        }

        let outcome = TradeOutcome {
            trade_id,
            teams: [first.team.clone(), second.team.clone()],
            scores,
            transaction: TransactionResult { writes },
            current_team: trade.team.clone(),
        };

        info!(
            trade_id = %trade_id,
            session_id = %trade.session_id,
            teams = ?outcome.teams,
            committed = outcome.transaction.is_success(),
            "Trade applied"
        );

        Ok(outcome)
    }
}
