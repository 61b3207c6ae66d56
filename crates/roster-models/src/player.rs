use serde::{Deserialize, Serialize};

/// Player identifiers are opaque strings (usually the player's name).
pub type PlayerId = String;

/// The six rating categories that make up a team's score, in score-vector order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    InsideScoring,
    OutsideScoring,
    Athleticism,
    Playmaking,
    Rebounding,
    Defending,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::InsideScoring,
        Category::OutsideScoring,
        Category::Athleticism,
        Category::Playmaking,
        Category::Rebounding,
        Category::Defending,
    ];
}

/// Fixed-width attribute record for one player.
///
/// `overall` is only used for ranking; the six categories feed the score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAttributes {
    pub overall: u32,
    pub inside_scoring: u32,
    pub outside_scoring: u32,
    pub athleticism: u32,
    pub playmaking: u32,
    pub rebounding: u32,
    pub defending: u32,
}

impl PlayerAttributes {
    pub fn category(&self, category: Category) -> u32 {
        match category {
            Category::InsideScoring => self.inside_scoring,
            Category::OutsideScoring => self.outside_scoring,
            Category::Athleticism => self.athleticism,
            Category::Playmaking => self.playmaking,
            Category::Rebounding => self.rebounding,
            Category::Defending => self.defending,
        }
    }

    /// The six category values in score-vector order.
    pub fn categories(&self) -> [u32; 6] {
        Category::ALL.map(|c| self.category(c))
    }
}
