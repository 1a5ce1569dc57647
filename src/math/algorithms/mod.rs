// src/math/algorithms/mod.rs

// Deklaration der Algorithmus-Module
pub mod bresenham;
pub mod cohen_sutherland;
pub mod outcode;

// Rasterung
pub use self::bresenham::rasterize_line;

// Clipping
pub use self::cohen_sutherland::{
    AlgState, ClipEdge, ClipEngine, ClipOutcome, Phase, StepResult,
};
pub use self::outcode::{OutCode, Region, accept, encode, format_region_code, is_inside, reject};
