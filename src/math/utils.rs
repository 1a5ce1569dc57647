// src/math/utils.rs

/// Mathematische Konstanten
pub mod constants {
    /// Ersatzsteigung für senkrechte Segmente (`p1.x == p2.x`) und überlaufende `dy / dx`.
    pub const VERTICAL_SLOPE: f32 = 1.0e6;
}

/// Abstands- und Rundungsfunktionen
pub mod comparison {
    use bevy::math::Vec2;

    /// Manhattan-Abstand, wie ihn die Endpunkt-Auswahl beim Ziehen nutzt
    pub fn manhattan_distance(a: Vec2, b: Vec2) -> f32 {
        (a.x - b.x).abs() + (a.y - b.y).abs()
    }

    /// Rundet halb-auf auf die nächste ganze Zahl (`floor(v + 0.5)`)
    pub fn round_half_up(v: f32) -> i32 {
        (v + 0.5).floor() as i32
    }
}
