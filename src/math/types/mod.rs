// src/math/types/mod.rs
pub mod window;

pub use window::*;

// Re-export häufig verwendete externe Typen
pub use bevy::math::{IVec2, Vec2};

// Einheitliche Typen für das gesamte Modul
pub type Point2D = Vec2;
/// Liniensegment als `(p1, p2)`; die Reihenfolge ist bedeutsam (P1 wird geclippt).
pub type Segment = (Point2D, Point2D);
