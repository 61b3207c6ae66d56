use std::fmt;

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

/// A draft pick, stored as a single flattened token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Pick(String);

impl Pick {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Flatten the legacy `[year, round, protection]` triple into a token,
    /// e.g. `2026-R1-top-10`.
    pub fn from_parts(year: u32, round: u32, protection: &str) -> Self {
        Self(format!("{year}-R{round}-{protection}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Number of rating categories in a populated score vector.
pub const SCORE_LEN: usize = 6;

/// Six floor-averaged category ratings, or the empty "not applicable" sentinel.
///
/// Only lengths 0 and 6 are representable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct ScoreVector(Vec<u32>);

impl ScoreVector {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn from_categories(values: [u32; SCORE_LEN]) -> Self {
        Self(values.to_vec())
    }

    pub fn zeros() -> Self {
        Self::from_categories([0; SCORE_LEN])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[u32] {
        &self.0
    }

    /// The single-number rating older clients displayed: category sum times ten.
    pub fn legacy_scalar(&self) -> Option<u64> {
        if self.is_empty() {
            return None;
        }
        Some(self.0.iter().map(|&v| u64::from(v)).sum::<u64>() * 10)
    }
}

impl TryFrom<Vec<u32>> for ScoreVector {
    type Error = String;

    fn try_from(values: Vec<u32>) -> Result<Self, Self::Error> {
        match values.len() {
            0 | SCORE_LEN => Ok(Self(values)),
            n => Err(format!(
                "score vector must have 0 or {SCORE_LEN} entries, got {n}"
            )),
        }
    }
}

impl From<ScoreVector> for Vec<u32> {
    fn from(score: ScoreVector) -> Self {
        score.0
    }
}

/// A team's persisted state within one session. Identity is `(session_id, team)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    pub session_id: String,
    pub team: String,
    pub roster: Vec<PlayerId>,
    pub picks: Vec<Pick>,
    pub score: ScoreVector,
}

impl TeamRecord {
    pub fn snapshot(&self) -> TeamSnapshot {
        TeamSnapshot {
            players: self.roster.clone(),
            picks: self.picks.clone(),
            score: self.score.clone(),
            legacy_score: None,
        }
    }
}

impl From<TeamRecord> for TeamSnapshot {
    fn from(record: TeamRecord) -> Self {
        Self {
            players: record.roster,
            picks: record.picks,
            score: record.score,
            legacy_score: None,
        }
    }
}

/// Response shape for a team lookup; also the shape of the static seed data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamSnapshot {
    pub players: Vec<PlayerId>,
    pub picks: Vec<Pick>,
    pub score: ScoreVector,
    /// Scalar rating a legacy record was stored with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_score: Option<u64>,
}
