pub mod redis_connector;
pub mod redis_store;

pub use redis_connector::*;
pub use redis_store::*;
