pub mod kv_event_store;
pub mod memory_event_store;
pub mod router;

pub use kv_event_store::*;
pub use memory_event_store::*;
pub use router::*;
