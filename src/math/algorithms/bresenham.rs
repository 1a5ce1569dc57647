// src/math/algorithms/bresenham.rs

use crate::math::{
    types::{IVec2, Point2D},
    utils::comparison::round_half_up,
};

/// Rastert die Strecke `a -> b` mit dem Bresenham-Algorithmus.
///
/// Beide Endpunkte werden halb-auf gerundet. Das Ergebnis enthält Start- und
/// Endpixel und ist 8-fach zusammenhängend; alle Oktanten werden unterstützt.
pub fn rasterize_line(a: Point2D, b: Point2D) -> Vec<IVec2> {
    let (mut x0, mut y0) = (round_half_up(a.x), round_half_up(a.y));
    let (x1, y1) = (round_half_up(b.x), round_half_up(b.y));

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    let mut pixels = Vec::with_capacity((dx.max(dy) + 1) as usize);
    loop {
        pixels.push(IVec2::new(x0, y0));
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_connected(pixels: &[IVec2]) -> bool {
        pixels.windows(2).all(|w| {
            let d = (w[1] - w[0]).abs();
            d.x <= 1 && d.y <= 1 && d != IVec2::ZERO
        })
    }

    #[test]
    fn test_single_pixel() {
        let pixels = rasterize_line(Point2D::new(3.2, 4.4), Point2D::new(2.6, 3.6));
        assert_eq!(pixels, vec![IVec2::new(3, 4)]);
    }

    #[test]
    fn test_endpoints_are_rounded_and_included() {
        let pixels = rasterize_line(Point2D::new(50.0, 103.125), Point2D::new(144.444, 50.0));
        assert_eq!(pixels.first(), Some(&IVec2::new(50, 103)));
        assert_eq!(pixels.last(), Some(&IVec2::new(144, 50)));
        assert_eq!(pixels.len(), 95); // dx = 94 dominiert
        assert!(is_connected(&pixels));
    }

    #[test]
    fn test_all_octants_connected() {
        let center = Point2D::new(0.0, 0.0);
        for target in [
            Point2D::new(10.0, 3.0),
            Point2D::new(3.0, 10.0),
            Point2D::new(-3.0, 10.0),
            Point2D::new(-10.0, 3.0),
            Point2D::new(-10.0, -3.0),
            Point2D::new(-3.0, -10.0),
            Point2D::new(3.0, -10.0),
            Point2D::new(10.0, -3.0),
        ] {
            let pixels = rasterize_line(center, target);
            assert_eq!(pixels.len(), 11, "Ziel {:?}", target);
            assert!(is_connected(&pixels));
            assert_eq!(*pixels.last().unwrap(), target.as_ivec2());
        }
    }

    #[test]
    fn test_vertical_line() {
        let pixels = rasterize_line(Point2D::new(100.0, 150.0), Point2D::new(100.0, 50.0));
        assert_eq!(pixels.len(), 101);
        assert!(pixels.iter().all(|p| p.x == 100));
    }
}
