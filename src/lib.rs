// ./src/lib.rs
pub mod animation;
pub mod debug;
pub mod math;
pub mod setup; // Kamera-Setup
