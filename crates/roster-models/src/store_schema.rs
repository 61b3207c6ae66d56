use std::fmt;

use serde::{Deserialize, Serialize};

use crate::wire::{attr, WireRecord};

/// Logical table holding one row per `(session_id, team)`.
pub const TEAM_TABLE: &str = "team_records";

/// The SQLite schema for team records.
///
/// ```sql
/// CREATE TABLE IF NOT EXISTS team_records (
///     session_id  TEXT NOT NULL,
///     team        TEXT NOT NULL,
///     item_json   TEXT NOT NULL,
///     updated_at  TEXT NOT NULL,
///     PRIMARY KEY (session_id, team)
/// );
/// ```
pub const TEAM_TABLE_DDL: &str = "\
CREATE TABLE IF NOT EXISTS team_records (
    session_id  TEXT NOT NULL,
    team        TEXT NOT NULL,
    item_json   TEXT NOT NULL,
    updated_at  TEXT NOT NULL,
    PRIMARY KEY (session_id, team)
);
CREATE INDEX IF NOT EXISTS idx_team_records_session ON team_records(session_id);
";

/// Composite primary key of a team record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct TeamKey {
    pub session_id: String,
    pub team: String,
}

impl TeamKey {
    pub fn new(session_id: impl Into<String>, team: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            team: team.into(),
        }
    }

    /// Read the key attributes out of a wire record. None if either is
    /// missing or not string-valued.
    pub fn from_record(record: &WireRecord) -> Option<Self> {
        let session_id = record.get(attr::SESSION_ID)?.as_str()?;
        let team = record.get(attr::TEAM)?.as_str()?;
        Some(Self::new(session_id, team))
    }
}

impl fmt::Display for TeamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.session_id, self.team)
    }
}

/// A raw row as stored in SQLite.
#[derive(Debug, Clone)]
pub struct TeamRow {
    pub session_id: String,
    pub team: String,
    pub item_json: String,
    pub updated_at: String,
}
