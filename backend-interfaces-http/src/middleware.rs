pub mod body;
pub mod cors;

pub use body::*;
pub use cors::*;
