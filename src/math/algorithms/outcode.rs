// src/math/algorithms/outcode.rs

//! # Outcode Module
//!
//! Region codes for Cohen-Sutherland clipping. Each of the four window
//! boundaries owns one bit; a point outside two boundaries at once (a corner
//! region) carries both bits. A point lies inside the window iff its code is
//! empty.

use crate::math::types::{ClipWindow, Point2D};
use enumflags2::{BitFlags, bitflags};

/// One boundary half-plane of the clip window.
#[bitflags]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    Left = 0b0001,
    Right = 0b0010,
    Bottom = 0b0100,
    Top = 0b1000,
}

/// 4-bit region code of a point relative to a [`ClipWindow`].
pub type OutCode = BitFlags<Region>;

/// Computes the region code of `point` against `window`.
///
/// Horizontal and vertical tests are independent, so a point below-left of the
/// window gets both `Left` and `Bottom`.
pub fn encode(point: Point2D, window: &ClipWindow) -> OutCode {
    let min = window.min();
    let max = window.max();
    let mut code = OutCode::empty();

    if point.x < min.x {
        code |= Region::Left;
    }
    if point.x > max.x {
        code |= Region::Right;
    }
    if point.y < min.y {
        code |= Region::Bottom;
    }
    if point.y > max.y {
        code |= Region::Top;
    }

    code
}

#[inline]
pub fn is_inside(code: OutCode) -> bool {
    code.is_empty()
}

/// Trivial accept: both endpoints inside.
#[inline]
pub fn accept(code1: OutCode, code2: OutCode) -> bool {
    (code1 | code2).is_empty()
}

/// Trivial reject: both endpoints share an outside half-plane.
#[inline]
pub fn reject(code1: OutCode, code2: OutCode) -> bool {
    !(code1 & code2).is_empty()
}

/// Formats a code as the four digits `TBRL` (top, bottom, right, left).
pub fn format_region_code(code: OutCode) -> String {
    [Region::Top, Region::Bottom, Region::Right, Region::Left]
        .iter()
        .map(|region| if code.contains(*region) { '1' } else { '0' })
        .collect()
}
