#![doc = include_str!("../README.md")]

mod city;
mod error;
pub mod gisdb;
pub mod kdtree;
pub mod nbst;
mod r#trait;
mod r#type;
mod util;

pub use city::City;
pub use error::{GisError, Result};
pub use gisdb::{GisDb, MAX_COORD};
pub use r#trait::CityIndex;
pub use r#type::Axis;
