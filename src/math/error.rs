// src/math/error.rs
use crate::math::types::Point2D;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipError {
    #[error("Invalid clip window: min {min:?} exceeds max {max:?}")]
    InvalidWindow { min: Point2D, max: Point2D },

    #[error("Non-finite coordinate for {label}: {point:?}")]
    NonFiniteCoordinate { label: &'static str, point: Point2D },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Export failed: {0}")]
    Export(#[from] std::io::Error),
}

pub type ClipResult<T> = Result<T, ClipError>;
