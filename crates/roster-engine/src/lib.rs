pub mod codec;
pub mod coordinator;
pub mod deletion;
pub mod engine;
pub mod error;
pub mod reference;
pub mod retrieval;
pub mod score;

pub mod test_support;

pub use coordinator::{TradeCoordinator, TradeOutcome, TransactionResult, WriteOutcome};
pub use deletion::DeletionService;
pub use engine::RosterEngine;
pub use error::{EngineError, ErrorKind};
pub use reference::ReferenceData;
pub use retrieval::RetrievalService;
pub use score::compute_score;
