// src/debug/visualization/svg.rs
use super::scene::{ClipScene, ScenePrimitive};
use crate::math::{
    error::ClipResult,
    types::{ClipWindow, Point2D},
};
use bevy::log::info;
use bevy::prelude::Color;
use std::path::Path;
use svg::{
    Document, Node,
    node::{
        self,
        element::{Circle, Element, Group, Line, Rectangle},
    },
};

// ===================================================================================
// 1. HILFS-STRUCT für die SVG-Erstellung
// ===================================================================================
/// Baut ein SVG-Dokument im Weltkoordinatensystem auf.
///
/// SVG zählt y nach unten, die Szene nach oben. Jede Koordinate läuft daher
/// durch [`SvgBuilder::flip`], statt eine `scale(1,-1)`-Transformation zu
/// setzen, die auch den Text spiegeln würde.
struct SvgBuilder {
    document: Document,
    world: ClipWindow,
    // Relative Größen, die vom Builder berechnet werden
    stroke_w_normal: f32,
    stroke_w_thin: f32,
    font_size: f32,
}

impl SvgBuilder {
    fn new(world: &ClipWindow, svg_pixel_size: f32) -> Self {
        let (width, height) = (world.width(), world.height());
        let extent = (width + height) / 2.0;

        let background = Rectangle::new()
            .set("x", world.min().x)
            .set("y", world.min().y)
            .set("width", width)
            .set("height", height)
            .set("fill", "#ffffff");

        let document = Document::new()
            .set("width", svg_pixel_size)
            .set("height", svg_pixel_size)
            .set("viewBox", (world.min().x, world.min().y, width, height))
            .add(background);

        Self {
            document,
            world: *world,
            stroke_w_normal: extent * 0.005,
            stroke_w_thin: extent * 0.002,
            font_size: extent * 0.03,
        }
    }

    fn flip(&self, p: Point2D) -> (f32, f32) {
        (p.x, self.world.min().y + self.world.max().y - p.y)
    }

    fn draw_rect(&mut self, window: &ClipWindow, color: Color, dashed: bool) {
        let (x, y) = self.flip(Point2D::new(window.min().x, window.max().y));
        let mut rect = Rectangle::new()
            .set("x", x)
            .set("y", y)
            .set("width", window.width())
            .set("height", window.height())
            .set("fill", "none")
            .set("stroke", hex(color))
            .set("stroke-width", self.stroke_w_thin);
        if dashed {
            let dash = self.stroke_w_normal * 2.0;
            rect = rect.set("stroke-dasharray", format!("{},{}", dash, dash));
        }
        self.push(rect);
    }

    fn draw_line(&mut self, start: Point2D, end: Point2D, color: Color, width: f32) {
        let (x1, y1) = self.flip(start);
        let (x2, y2) = self.flip(end);
        let line = Line::new()
            .set("x1", x1)
            .set("y1", y1)
            .set("x2", x2)
            .set("y2", y2)
            .set("stroke", hex(color))
            .set("stroke-width", self.stroke_w_thin * width);
        self.push(line);
    }

    fn draw_circle(&mut self, center: Point2D, radius: f32, color: Color) {
        let (cx, cy) = self.flip(center);
        let circle = Circle::new()
            .set("cx", cx)
            .set("cy", cy)
            .set("r", radius)
            .set("fill", hex(color));
        self.push(circle);
    }

    fn draw_text(&mut self, position: Point2D, text: &str, color: Color) {
        let (x, y) = self.flip(position);
        let mut element = Element::new("text");
        element.assign("x", x);
        element.assign("y", y);
        element.assign("fill", hex(color));
        element.assign("font-family", "monospace");
        element.assign("font-size", self.font_size);
        element.append(node::Text::new(text));
        self.push(element);
    }

    /// Ein Rasterpixel deckt `[x, x+1] × [y, y+1]` ab
    fn draw_pixel_group(&mut self, pixels: &[(i32, i32)], color: Color) {
        if pixels.is_empty() {
            return;
        }
        let mut group = Group::new()
            .set("class", "raster")
            .set("fill", hex(color));
        for &(px, py) in pixels {
            let (x, y) = self.flip(Point2D::new(px as f32, (py + 1) as f32));
            group = group.add(
                Rectangle::new()
                    .set("x", x)
                    .set("y", y)
                    .set("width", 1)
                    .set("height", 1),
            );
        }
        self.push(group);
    }

    fn push<T: Node>(&mut self, node: T) {
        self.document.append(node);
    }

    fn finish(self) -> Document {
        self.document
    }
}

fn hex(color: Color) -> String {
    let [r, g, b, _] = color.as_rgba_u8();
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

// ===================================================================================
// 2. Szene -> Dokument
// ===================================================================================
/// Übersetzt eine [`ClipScene`] in ein SVG-Dokument, `world` bestimmt die ViewBox.
pub fn scene_to_svg_document(scene: &ClipScene, world: &ClipWindow, svg_pixel_size: f32) -> Document {
    let mut svg = SvgBuilder::new(world, svg_pixel_size);

    // Pixel werden gesammelt und als eine Gruppe pro Farbe geschrieben
    let mut pixels: Vec<(Color, Vec<(i32, i32)>)> = Vec::new();

    for primitive in &scene.primitives {
        match primitive {
            ScenePrimitive::Rect {
                window,
                color,
                dashed,
            } => svg.draw_rect(window, *color, *dashed),
            ScenePrimitive::Line {
                start,
                end,
                color,
                width,
            } => svg.draw_line(*start, *end, *color, *width),
            ScenePrimitive::Point {
                position,
                color,
                radius,
            } => svg.draw_circle(*position, *radius, *color),
            ScenePrimitive::Label {
                position,
                text,
                color,
            } => svg.draw_text(*position, text, *color),
            ScenePrimitive::Pixel { position, color } => {
                match pixels.iter_mut().find(|(c, _)| c == color) {
                    Some((_, list)) => list.push((position.x, position.y)),
                    None => pixels.push((*color, vec![(position.x, position.y)])),
                }
            }
        }
    }

    for (color, list) in &pixels {
        svg.draw_pixel_group(list, *color);
    }

    svg.finish()
}

/// Schreibt den aktuellen Frame als SVG-Datei.
pub fn write_scene_svg(
    path: impl AsRef<Path>,
    scene: &ClipScene,
    world: &ClipWindow,
    svg_pixel_size: f32,
) -> ClipResult<()> {
    let document = scene_to_svg_document(scene, world, svg_pixel_size);
    svg::save(path.as_ref(), &document)?;
    info!("Clip frame SVG '{}' wurde erstellt.", path.as_ref().display());
    Ok(())
}
