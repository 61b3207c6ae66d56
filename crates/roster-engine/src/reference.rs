use std::collections::HashMap;

use roster_models::config::ReferenceConfig;
use roster_models::player::{PlayerAttributes, PlayerId};
use roster_models::team::TeamSnapshot;
use serde::Deserialize;
use tracing::info;

use crate::error::EngineError;

/// Read-only reference data: the player attribute table and the seed
/// snapshot of every franchise. Loaded once, then shared behind `Arc`.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    players: HashMap<PlayerId, PlayerAttributes>,
    teams: HashMap<String, TeamSnapshot>,
}

/// The player file is either a bare map or wrapped under `playerData`.
#[derive(Deserialize)]
#[serde(untagged)]
enum PlayerFile {
    Wrapped {
        #[serde(rename = "playerData")]
        player_data: HashMap<PlayerId, PlayerRow>,
    },
    Bare(HashMap<PlayerId, PlayerRow>),
}

/// One player's attributes, either named or as the positional row
/// `[label, overall, inside, outside, athleticism, playmaking, rebounding, defending]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum PlayerRow {
    Named(PlayerAttributes),
    Positional(serde_json::Value, u32, u32, u32, u32, u32, u32, u32),
}

impl From<PlayerRow> for PlayerAttributes {
    fn from(row: PlayerRow) -> Self {
        match row {
            PlayerRow::Named(attrs) => attrs,
            PlayerRow::Positional(_, overall, inside, outside, athleticism, playmaking, rebounding, defending) => {
                PlayerAttributes {
                    overall,
                    inside_scoring: inside,
                    outside_scoring: outside,
                    athleticism,
                    playmaking,
                    rebounding,
                    defending,
                }
            }
        }
    }
}

impl ReferenceData {
    pub fn new(
        players: HashMap<PlayerId, PlayerAttributes>,
        teams: HashMap<String, TeamSnapshot>,
    ) -> Self {
        Self { players, teams }
    }

    /// Load both tables from the configured JSON files.
    pub fn load(config: &ReferenceConfig) -> Result<Self, EngineError> {
        let read = |path: &str| {
            std::fs::read_to_string(path)
                .map_err(|e| EngineError::ReferenceData(format!("failed to read {path}: {e}")))
        };
        let data = Self::from_json(&read(&config.players_path)?, &read(&config.teams_path)?)?;
        info!(
            players = data.players.len(),
            teams = data.teams.len(),
            "Reference data loaded"
        );
        Ok(data)
    }

    pub fn from_json(players_json: &str, teams_json: &str) -> Result<Self, EngineError> {
        let players = match serde_json::from_str::<PlayerFile>(players_json)
            .map_err(|e| EngineError::ReferenceData(format!("player table: {e}")))?
        {
            PlayerFile::Wrapped { player_data } => player_data,
            PlayerFile::Bare(rows) => rows,
        };
        let teams: HashMap<String, TeamSnapshot> = serde_json::from_str(teams_json)
            .map_err(|e| EngineError::ReferenceData(format!("team seeds: {e}")))?;

        Ok(Self {
            players: players
                .into_iter()
                .map(|(id, row)| (id, row.into()))
                .collect(),
            teams,
        })
    }

    pub fn player(&self, id: &str) -> Option<&PlayerAttributes> {
        self.players.get(id)
    }

    pub fn team(&self, name: &str) -> Option<&TeamSnapshot> {
        self.teams.get(name)
    }
}
