// src/debug/visualization/mod.rs
pub mod gizmos;
pub mod scene;
pub mod svg;
