// Backend Application Layer

pub mod commands;
pub mod error;
pub mod metrics;
pub mod queries;
pub mod state;
pub mod stores;

pub use error::AppError;
pub use metrics::Metrics;
pub use state::AppState;
pub use stores::{EventStores, KvEventStore, MemoryEventStore};

#[cfg(test)]
pub(crate) mod testing;
