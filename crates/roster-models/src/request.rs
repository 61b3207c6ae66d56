use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::player::PlayerId;
use crate::team::{Pick, ScoreVector};

/// Number of franchises party to a trade.
pub const TRADE_PARTIES: usize = 2;

/// Rejected request shapes, caught before anything reaches the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("sessionId must not be empty")]
    EmptySessionId,

    #[error("{field} contains an empty team name")]
    EmptyTeam { field: &'static str },

    #[error("{field} must have exactly {expected} entries, got {actual}")]
    Arity {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("a team cannot trade with itself: {0}")]
    DuplicateTeam(String),
}

/// Where a lookup reads from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum LookupMode {
    /// The session's persisted record.
    #[default]
    Store,
    /// The pre-seeded snapshot for franchises no trade has touched yet.
    StaticFallback,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LookupRequest {
    #[serde(alias = "Uuid")]
    pub session_id: String,
    #[serde(alias = "Team")]
    pub team: String,
    #[serde(default)]
    pub mode: LookupMode,
}

impl LookupRequest {
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.team.trim().is_empty() {
            return Err(RequestError::EmptyTeam { field: "team" });
        }
        // Static lookups ignore the session, so only store lookups need one.
        if self.mode == LookupMode::Store && self.session_id.trim().is_empty() {
            return Err(RequestError::EmptySessionId);
        }
        Ok(())
    }
}

/// A two-party trade as sent by clients. The three arrays are index-aligned:
/// index 0 is the first team's post-trade state, index 1 the second's.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TradeRequest {
    #[serde(alias = "Uuid")]
    pub session_id: String,
    #[serde(alias = "TradeTeams")]
    pub trade_teams: Vec<String>,
    #[serde(alias = "NewRosters")]
    pub new_rosters: Vec<Vec<PlayerId>>,
    #[serde(alias = "Picks")]
    pub picks: Vec<Vec<Pick>>,
    /// The caller's own franchise, if it wants that team's score echoed back.
    #[serde(default, alias = "Team", skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
}

/// One side of a validated trade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeSide {
    pub team: String,
    pub roster: Vec<PlayerId>,
    pub picks: Vec<Pick>,
}

/// A trade whose arrays have been checked and zipped into sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTrade {
    pub session_id: String,
    pub sides: [TradeSide; TRADE_PARTIES],
    pub team: Option<String>,
}

fn check_arity<T>(field: &'static str, values: &[T]) -> Result<(), RequestError> {
    if values.len() != TRADE_PARTIES {
        return Err(RequestError::Arity {
            field,
            expected: TRADE_PARTIES,
            actual: values.len(),
        });
    }
    Ok(())
}

impl TradeRequest {
    pub fn validate(&self) -> Result<ValidatedTrade, RequestError> {
        if self.session_id.trim().is_empty() {
            return Err(RequestError::EmptySessionId);
        }
        check_arity("tradeTeams", &self.trade_teams)?;
        check_arity("newRosters", &self.new_rosters)?;
        check_arity("picks", &self.picks)?;

        if self.trade_teams.iter().any(|t| t.trim().is_empty()) {
            return Err(RequestError::EmptyTeam {
                field: "tradeTeams",
            });
        }
        if self.trade_teams[0] == self.trade_teams[1] {
            return Err(RequestError::DuplicateTeam(self.trade_teams[0].clone()));
        }

        let side = |i: usize| TradeSide {
            team: self.trade_teams[i].clone(),
            roster: self.new_rosters[i].clone(),
            picks: self.picks[i].clone(),
        };

        Ok(ValidatedTrade {
            session_id: self.session_id.clone(),
            sides: [side(0), side(1)],
            team: self.team.clone(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRequest {
    #[serde(alias = "Uuid")]
    pub session_id: String,
    #[serde(alias = "Teams")]
    pub teams: Vec<String>,
}

impl DeleteRequest {
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.session_id.trim().is_empty() {
            return Err(RequestError::EmptySessionId);
        }
        if self.teams.iter().any(|t| t.trim().is_empty()) {
            return Err(RequestError::EmptyTeam { field: "teams" });
        }
        Ok(())
    }
}

/// A write that did not land during a trade.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WriteFailure {
    pub team: String,
    pub error: String,
}

/// What a trade returns to the client. Scores are present even when a
/// write failed; `failures` lists the sides that were not persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TradeResponse {
    pub trade_id: Uuid,
    pub scores: [ScoreVector; TRADE_PARTIES],
    /// Each side's scalar rating as older clients display it.
    pub legacy_scores: [Option<u64>; TRADE_PARTIES],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_team_score: Option<ScoreVector>,
    #[serde(default)]
    pub failures: Vec<WriteFailure>,
}
