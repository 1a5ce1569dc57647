pub mod algorithms;
pub mod error;
pub mod types;
pub mod utils;

// Re-exports für einfache Verwendung
pub use error::{ClipError, ClipResult};
pub use types::*;

// Öffentliche API
pub mod prelude {
    pub use super::{
        algorithms::{
            ClipEdge, ClipEngine, ClipOutcome, OutCode, Phase, Region, StepResult,
            format_region_code, rasterize_line,
        },
        error::{ClipError, ClipResult},
        types::*,
    };
}
