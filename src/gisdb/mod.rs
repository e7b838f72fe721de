//! The database facade keeping the name index and the coordinate index in agreement.

mod index;

pub use index::{GisDb, MAX_COORD};
