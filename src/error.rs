use std::fmt::Debug;
use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GisError {
    #[error("City name must not be empty.")]
    EmptyName,

    #[error("Coordinate ({x}, {y}) outside of the valid range 0..={max}.")]
    CoordinateOutOfRange { x: i32, y: i32, max: i32 },

    #[error("A city already exists at ({x}, {y}).")]
    DuplicateCoordinate { x: i32, y: i32 },
}

pub type Result<T> = std::result::Result<T, GisError>;
