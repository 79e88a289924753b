pub mod aggregator;
pub mod retention;

pub use aggregator::*;
pub use retention::*;
