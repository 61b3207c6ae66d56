//! Conversion between [`TeamRecord`] and the attribute-tree wire form.
//!
//! Records are tagged with `SchemaVersion`. Version 2 is what [`encode`]
//! writes: picks as string tokens, score as a list of 0 or 6 numbers.
//! Version 1 is the untagged legacy layout: picks as `[year, round,
//! protection]` lists and a single scalar score. Each version has its own
//! decoder and a record is never reinterpreted under another version.

use std::str::FromStr;

use roster_models::team::{Pick, ScoreVector, TeamRecord};
use roster_models::wire::{
    attr, AttributeValue, WireRecord, LEGACY_SCHEMA_VERSION, WIRE_SCHEMA_VERSION,
};

use crate::error::EngineError;

/// A decoded record plus what its wire form said about itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRecord {
    pub record: TeamRecord,
    pub schema_version: u32,
    /// The scalar rating stored by version 1 records.
    pub legacy_score: Option<u64>,
}

pub fn encode(record: &TeamRecord) -> WireRecord {
    let mut wire = WireRecord::new();
    wire.insert(
        attr::SCHEMA_VERSION.to_string(),
        AttributeValue::number(WIRE_SCHEMA_VERSION),
    );
    wire.insert(
        attr::SESSION_ID.to_string(),
        AttributeValue::string(&record.session_id),
    );
    wire.insert(attr::TEAM.to_string(), AttributeValue::string(&record.team));
    wire.insert(
        attr::PLAYERS.to_string(),
        AttributeValue::list(record.roster.iter().map(AttributeValue::string)),
    );
    wire.insert(
        attr::PICKS.to_string(),
        AttributeValue::list(record.picks.iter().map(|p| AttributeValue::string(p.as_str()))),
    );
    wire.insert(
        attr::SCORE.to_string(),
        AttributeValue::list(record.score.values().iter().map(AttributeValue::number)),
    );
    wire
}

/// Decode a wire record of any supported version.
pub fn decode(wire: &WireRecord) -> Result<TeamRecord, EngineError> {
    decode_versioned(wire).map(|decoded| decoded.record)
}

pub fn decode_versioned(wire: &WireRecord) -> Result<DecodedRecord, EngineError> {
    match schema_version(wire)? {
        WIRE_SCHEMA_VERSION => decode_v2(wire),
        LEGACY_SCHEMA_VERSION => decode_v1(wire),
        other => Err(EngineError::Encoding(format!(
            "unsupported schema version {other}"
        ))),
    }
}

/// Untagged records predate versioning and are version 1.
fn schema_version(wire: &WireRecord) -> Result<u32, EngineError> {
    match wire.get(attr::SCHEMA_VERSION) {
        None => Ok(LEGACY_SCHEMA_VERSION),
        Some(value) => value.as_number().ok_or_else(|| {
            EngineError::Encoding(format!(
                "{} must be a non-negative number, got {}",
                attr::SCHEMA_VERSION,
                value.type_tag()
            ))
        }),
    }
}

fn decode_v2(wire: &WireRecord) -> Result<DecodedRecord, EngineError> {
    let picks = list_attr(wire, attr::PICKS)?
        .iter()
        .map(|item| expect_str(attr::PICKS, item).map(Pick::new))
        .collect::<Result<Vec<_>, _>>()?;

    let score_values = list_attr(wire, attr::SCORE)?
        .iter()
        .map(|item| expect_number(attr::SCORE, item))
        .collect::<Result<Vec<u32>, _>>()?;
    let score = ScoreVector::try_from(score_values).map_err(EngineError::Encoding)?;

    Ok(DecodedRecord {
        record: TeamRecord {
            session_id: string_attr(wire, attr::SESSION_ID)?,
            team: string_attr(wire, attr::TEAM)?,
            roster: players(wire)?,
            picks,
            score,
        },
        schema_version: WIRE_SCHEMA_VERSION,
        legacy_score: None,
    })
}

fn decode_v1(wire: &WireRecord) -> Result<DecodedRecord, EngineError> {
    let picks = list_attr(wire, attr::PICKS)?
        .iter()
        .map(legacy_pick)
        .collect::<Result<Vec<_>, _>>()?;

    let legacy_score: u64 = expect_number(attr::SCORE, required(wire, attr::SCORE)?)?;

    Ok(DecodedRecord {
        record: TeamRecord {
            session_id: string_attr(wire, attr::SESSION_ID)?,
            team: string_attr(wire, attr::TEAM)?,
            roster: players(wire)?,
            picks,
            // a scalar cannot be split back into categories
            score: ScoreVector::empty(),
        },
        schema_version: LEGACY_SCHEMA_VERSION,
        legacy_score: Some(legacy_score),
    })
}

fn legacy_pick(item: &AttributeValue) -> Result<Pick, EngineError> {
    let malformed = || {
        EngineError::Encoding(format!(
            "legacy {} entries must be [N year, N round, S protection]",
            attr::PICKS
        ))
    };
    match item.as_list().ok_or_else(malformed)? {
        [year, round, protection] => {
            let year = year.as_number().ok_or_else(malformed)?;
            let round = round.as_number().ok_or_else(malformed)?;
            let protection = protection.as_str().ok_or_else(malformed)?;
            Ok(Pick::from_parts(year, round, protection))
        }
        _ => Err(malformed()),
    }
}

fn players(wire: &WireRecord) -> Result<Vec<String>, EngineError> {
    list_attr(wire, attr::PLAYERS)?
        .iter()
        .map(|item| expect_str(attr::PLAYERS, item).map(str::to_string))
        .collect()
}

fn required<'a>(wire: &'a WireRecord, name: &str) -> Result<&'a AttributeValue, EngineError> {
    wire.get(name)
        .ok_or_else(|| EngineError::Encoding(format!("missing attribute {name}")))
}

fn string_attr(wire: &WireRecord, name: &str) -> Result<String, EngineError> {
    expect_str(name, required(wire, name)?).map(str::to_string)
}

fn list_attr<'a>(wire: &'a WireRecord, name: &str) -> Result<&'a [AttributeValue], EngineError> {
    let value = required(wire, name)?;
    value.as_list().ok_or_else(|| {
        EngineError::Encoding(format!("{name} must be L, got {}", value.type_tag()))
    })
}

fn expect_str<'a>(name: &str, value: &'a AttributeValue) -> Result<&'a str, EngineError> {
    value.as_str().ok_or_else(|| {
        EngineError::Encoding(format!("{name} entries must be S, got {}", value.type_tag()))
    })
}

fn expect_number<T: FromStr>(name: &str, value: &AttributeValue) -> Result<T, EngineError> {
    value.as_number().ok_or_else(|| {
        EngineError::Encoding(format!(
            "{name} must hold non-negative N values, got {}",
            value.type_tag()
        ))
    })
}
