use roster_models::request::RequestError;
use roster_models::store_schema::TeamKey;
use roster_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    #[error("Unknown team: {0}")]
    UnknownTeam(String),

    #[error("No record for {0}")]
    NotFound(TeamKey),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] RequestError),

    #[error("Reference data error: {0}")]
    ReferenceData(String),

    #[error("Delete failed for {} of {total} teams: {}", .failed.len(), .failed.join(", "))]
    DeleteBatch { failed: Vec<String>, total: usize },
}

/// How an outer surface should report an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request named something that does not exist or is malformed.
    ClientInput,
    /// No data yet for the key; not a fault.
    NotFound,
    ServerFault,
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownPlayer(_) | Self::UnknownTeam(_) | Self::InvalidRequest(_) => {
                ErrorKind::ClientInput
            }
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Store(_) | Self::Encoding(_) | Self::ReferenceData(_) | Self::DeleteBatch { .. } => {
                ErrorKind::ServerFault
            }
        }
    }
}
