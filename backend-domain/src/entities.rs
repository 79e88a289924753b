// Domain entities

pub mod event;
pub mod model;
pub mod summary;

pub use event::*;
pub use model::*;
pub use summary::*;
