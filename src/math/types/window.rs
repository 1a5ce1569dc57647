// src/math/types/window.rs

use crate::math::{error::*, types::*};
use std::fmt;

/// Achsenparalleles Clip-Fenster (Clip Window) für den Linien-Clipper.
///
/// Invariante: `min.x <= max.x` und `min.y <= max.y`, alle Koordinaten endlich.
/// Nur über [`ClipWindow::new`] konstruierbar, damit kein invertiertes Rechteck
/// in den Algorithmus gelangt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipWindow {
    min: Point2D,
    max: Point2D,
}

impl ClipWindow {
    /// Erstellt ein neues Clip-Fenster
    pub fn new(min: Point2D, max: Point2D) -> ClipResult<Self> {
        if !min.is_finite() || !max.is_finite() || min.x > max.x || min.y > max.y {
            return Err(ClipError::InvalidWindow { min, max });
        }

        Ok(Self { min, max })
    }

    pub fn min(&self) -> Point2D {
        self.min
    }

    pub fn max(&self) -> Point2D {
        self.max
    }

    /// Breite des Fensters
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Höhe des Fensters
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Zentrum des Fensters
    pub fn center(&self) -> Point2D {
        (self.min + self.max) * 0.5
    }

    /// Prüft ob ein Punkt im (geschlossenen) Fenster liegt
    pub fn contains_point(&self, point: Point2D) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Die vier Eckpunkte, gegen den Uhrzeigersinn ab unten links
    pub fn corners(&self) -> [Point2D; 4] {
        [
            self.min,                             // unten links
            Point2D::new(self.max.x, self.min.y), // unten rechts
            self.max,                             // oben rechts
            Point2D::new(self.min.x, self.max.y), // oben links
        ]
    }
}

impl fmt::Display for ClipWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ClipWindow(({:.1}, {:.1}) to ({:.1}, {:.1}))",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}
