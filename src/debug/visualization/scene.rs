// src/debug/visualization/scene.rs

//! Renderer-agnostic description of one animation frame.
//!
//! [`ClipScene`] reads the public state of a [`ClipSession`] and turns it into
//! a flat list of primitives. The gizmo system and the SVG exporter both draw
//! from the same list, so neither re-derives any clipping geometry.

use crate::animation::resources::ClipSession;
use crate::math::algorithms::encode;
use crate::math::prelude::*;
use bevy::prelude::*;

pub const WINDOW_COLOR: Color = Color::rgb(0.0, 0.0, 1.0);
pub const LINE_COLOR: Color = Color::rgb(0.0, 0.0, 0.0);
pub const P1_COLOR: Color = Color::rgb(1.0, 0.0, 0.0);
pub const P2_COLOR: Color = Color::rgb(0.0, 0.7, 0.0);

const ENDPOINT_RADIUS: f32 = 2.0;
const CLIP_LINE_WIDTH: f32 = 2.0;
const CODE_LABEL_OFFSET: Vec2 = Vec2::new(5.0, 5.0);
const NAME_LABEL_OFFSET: Vec2 = Vec2::new(-15.0, -5.0);

/// Farbe, mit der ein Kantenschritt hervorgehoben wird.
pub fn edge_color(edge: Option<ClipEdge>) -> Color {
    match edge {
        Some(ClipEdge::Left) => Color::rgb(1.0, 0.0, 0.0),
        Some(ClipEdge::Right) => Color::rgb(0.0, 0.7, 0.0),
        Some(ClipEdge::Bottom) => Color::rgb(0.0, 0.0, 1.0),
        Some(ClipEdge::Top) => Color::rgb(1.0, 0.5, 0.0),
        None => Color::rgb(0.5, 0.5, 0.5),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScenePrimitive {
    /// Umriss eines achsenparallelen Rechtecks
    Rect {
        window: ClipWindow,
        color: Color,
        dashed: bool,
    },
    Line {
        start: Point2D,
        end: Point2D,
        color: Color,
        width: f32,
    },
    Point {
        position: Point2D,
        color: Color,
        radius: f32,
    },
    Label {
        position: Point2D,
        text: String,
        color: Color,
    },
    /// Ein Rasterpixel der finalen Linie
    Pixel { position: IVec2, color: Color },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipSceneOptions {
    /// Farbige Segmente des letzten Kantenschritts zeigen
    pub highlight_visible: bool,
    pub show_region_codes: bool,
}

impl Default for ClipSceneOptions {
    fn default() -> Self {
        Self {
            highlight_visible: true,
            show_region_codes: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipScene {
    pub primitives: Vec<ScenePrimitive>,
    pub status: String,
}

impl ClipScene {
    pub fn from_session(session: &ClipSession, options: &ClipSceneOptions) -> Self {
        let mut scene = ClipScene::default();
        scene.push_window(&session.window);

        let controller = &session.controller;
        let current = controller.current_segment();
        let previous = controller.previous_segment();
        let codes = controller.codes();

        match (current, previous, codes) {
            (Some(current), Some(previous), Some(codes)) => {
                scene.push_line(current, previous, controller.touched_edge(), options);
                if controller.is_accepted() {
                    for position in rasterize_line(current.0, current.1) {
                        scene.primitives.push(ScenePrimitive::Pixel {
                            position,
                            color: LINE_COLOR,
                        });
                    }
                }
                scene.push_endpoints(current, codes, options);
                scene.status = controller.status().to_string();
            }
            _ => {
                // Idle: die vom Benutzer gesetzte Linie
                let segment = (session.p1, session.p2);
                scene.primitives.push(ScenePrimitive::Line {
                    start: segment.0,
                    end: segment.1,
                    color: LINE_COLOR,
                    width: 1.0,
                });
                let codes = (
                    encode(segment.0, &session.window),
                    encode(segment.1, &session.window),
                );
                scene.push_endpoints(segment, codes, options);
                scene.status = "Set line endpoints and press SPACE to start animation".to_string();
            }
        }

        scene
    }

    fn push_window(&mut self, window: &ClipWindow) {
        self.primitives.push(ScenePrimitive::Rect {
            window: *window,
            color: WINDOW_COLOR,
            dashed: true,
        });
    }

    fn push_line(
        &mut self,
        current: Segment,
        previous: Segment,
        touched_edge: Option<ClipEdge>,
        options: &ClipSceneOptions,
    ) {
        self.primitives.push(ScenePrimitive::Line {
            start: current.0,
            end: current.1,
            color: LINE_COLOR,
            width: 1.0,
        });

        let Some(edge) = touched_edge else {
            return;
        };
        if !options.highlight_visible {
            return;
        }

        let color = edge_color(Some(edge));
        self.primitives.push(ScenePrimitive::Line {
            start: previous.0,
            end: current.0,
            color,
            width: CLIP_LINE_WIDTH,
        });
        if previous.1 != current.1 {
            self.primitives.push(ScenePrimitive::Line {
                start: previous.1,
                end: current.1,
                color,
                width: CLIP_LINE_WIDTH,
            });
        }
    }

    fn push_endpoints(&mut self, segment: Segment, codes: (OutCode, OutCode), options: &ClipSceneOptions) {
        let endpoints = [
            (segment.0, codes.0, P1_COLOR, "P1"),
            (segment.1, codes.1, P2_COLOR, "P2"),
        ];
        for (position, code, color, name) in endpoints {
            self.primitives.push(ScenePrimitive::Point {
                position,
                color,
                radius: ENDPOINT_RADIUS,
            });
            if options.show_region_codes {
                self.primitives.push(ScenePrimitive::Label {
                    position: position + CODE_LABEL_OFFSET,
                    text: format_region_code(code),
                    color: LINE_COLOR,
                });
                self.primitives.push(ScenePrimitive::Label {
                    position: position + NAME_LABEL_OFFSET,
                    text: name.to_string(),
                    color: LINE_COLOR,
                });
            }
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &ScenePrimitive> {
        self.primitives
            .iter()
            .filter(|p| matches!(p, ScenePrimitive::Line { .. }))
    }

    pub fn pixel_count(&self) -> usize {
        self.primitives
            .iter()
            .filter(|p| matches!(p, ScenePrimitive::Pixel { .. }))
            .count()
    }
}
