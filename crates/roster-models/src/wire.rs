use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Schema version written by the current encoder.
pub const WIRE_SCHEMA_VERSION: u32 = 2;

/// Records written before version tagging (structured picks, scalar score).
pub const LEGACY_SCHEMA_VERSION: u32 = 1;

/// Attribute names used in a team wire record.
pub mod attr {
    pub const SESSION_ID: &str = "Uuid";
    pub const TEAM: &str = "Team";
    pub const PLAYERS: &str = "Players";
    pub const PICKS: &str = "Picks";
    pub const SCORE: &str = "Score";
    pub const SCHEMA_VERSION: &str = "SchemaVersion";
}

/// A generically typed attribute value, serialized with its type tag:
/// `{"S": "text"}`, `{"N": "42"}`, `{"L": [...]}`.
///
/// Numbers travel as decimal strings, the same as the store's native format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum AttributeValue {
    #[serde(rename = "S")]
    Str(String),
    #[serde(rename = "N")]
    Num(String),
    #[serde(rename = "L")]
    List(Vec<AttributeValue>),
}

impl AttributeValue {
    pub fn string(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    pub fn number(value: impl ToString) -> Self {
        Self::Num(value.to_string())
    }

    pub fn list(values: impl IntoIterator<Item = AttributeValue>) -> Self {
        Self::List(values.into_iter().collect())
    }

    /// The single-letter type tag, for error messages.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Str(_) => "S",
            Self::Num(_) => "N",
            Self::List(_) => "L",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Parse a numeric attribute. Returns None for non-numeric attributes
    /// and for numbers that do not fit `T`.
    pub fn as_number<T: FromStr>(&self) -> Option<T> {
        match self {
            Self::Num(n) => n.parse().ok(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

/// A full store item: attribute name to tagged value.
pub type WireRecord = BTreeMap<String, AttributeValue>;
