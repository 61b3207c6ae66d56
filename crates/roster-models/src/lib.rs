pub mod config;
pub mod player;
pub mod request;
pub mod store_schema;
pub mod team;
pub mod wire;

pub use config::{LogFormat, LoggingConfig, ReferenceConfig, RosterConfig, StoreBackend, StoreConfig};
pub use player::{Category, PlayerAttributes, PlayerId};
pub use request::{
    DeleteRequest, LookupMode, LookupRequest, RequestError, TradeRequest, TradeResponse,
    TradeSide, ValidatedTrade, WriteFailure, TRADE_PARTIES,
};
pub use store_schema::TeamKey;
pub use team::{Pick, ScoreVector, TeamRecord, TeamSnapshot};
pub use wire::{AttributeValue, WireRecord};
