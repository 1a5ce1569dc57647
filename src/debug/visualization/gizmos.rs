// src/debug/visualization/gizmos.rs
use super::scene::{ClipScene, ClipSceneOptions, ScenePrimitive};
use crate::animation::resources::{AnimationParameters, ClipHighlight, ClipSession};
use bevy::prelude::*;

const DASH_LENGTH: f32 = 4.0;

/// Zeichnet eine gestrichelte Linie aus einzelnen Gizmo-Segmenten.
fn dashed_line_2d(gizmos: &mut Gizmos, start: Vec2, end: Vec2, color: Color) {
    let length = start.distance(end);
    if length <= f32::EPSILON {
        return;
    }
    let direction = (end - start) / length;
    let mut t = 0.0;
    while t < length {
        let dash_end = (t + DASH_LENGTH).min(length);
        gizmos.line_2d(start + direction * t, start + direction * dash_end, color);
        t += 2.0 * DASH_LENGTH;
    }
}

/// System, das den aktuellen Frame der Clipping-Animation als Gizmos zeichnet.
/// Text (Regionscodes, Namen) zeichnet das UI-System.
pub fn draw_clip_scene_system(
    mut gizmos: Gizmos,
    session: Res<ClipSession>,
    highlight: Res<ClipHighlight>,
    params: Res<AnimationParameters>,
) {
    let options = ClipSceneOptions {
        highlight_visible: highlight.visible,
        show_region_codes: params.show_region_codes,
    };
    let scene = ClipScene::from_session(&session, &options);

    for primitive in &scene.primitives {
        match primitive {
            ScenePrimitive::Rect {
                window,
                color,
                dashed,
            } => {
                if *dashed {
                    let corners = window.corners();
                    for i in 0..corners.len() {
                        let next = corners[(i + 1) % corners.len()];
                        dashed_line_2d(&mut gizmos, corners[i], next, *color);
                    }
                } else {
                    let size = Vec2::new(window.width(), window.height());
                    gizmos.rect_2d(window.center(), 0.0, size, *color);
                }
            }
            ScenePrimitive::Line {
                start,
                end,
                color,
                width,
            } => {
                gizmos.line_2d(*start, *end, *color);
                // Breite Linien: parallel versetzt nachzeichnen
                if *width > 1.0 {
                    let normal = (*end - *start).perp().normalize_or_zero() * 0.5;
                    gizmos.line_2d(*start + normal, *end + normal, *color);
                    gizmos.line_2d(*start - normal, *end - normal, *color);
                }
            }
            ScenePrimitive::Point {
                position,
                color,
                radius,
            } => {
                gizmos.circle_2d(*position, *radius, *color);
            }
            ScenePrimitive::Pixel { position, color } => {
                let center = position.as_vec2() + Vec2::splat(0.5);
                gizmos.rect_2d(center, 0.0, Vec2::ONE, *color);
            }
            ScenePrimitive::Label { .. } => {}
        }
    }
}
