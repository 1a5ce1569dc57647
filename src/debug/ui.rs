// ./src/debug/ui.rs
use crate::animation::{
    history::StepHistory,
    resources::*,
    state::AnimationState, // Importiere den State
};
use crate::debug::visualization::scene::{
    ClipScene, ClipSceneOptions, P1_COLOR, P2_COLOR, ScenePrimitive, edge_color,
};
use crate::math::{
    algorithms::{ClipEdge, ClipOutcome, encode, format_region_code},
    types::Point2D,
};
use bevy::prelude::*;
use bevy_egui::{
    EguiContexts,
    egui::{self, Color32, ScrollArea, Slider, Window},
};

fn to_color32(color: Color) -> Color32 {
    let [r, g, b, _] = color.as_rgba_u8();
    Color32::from_rgb(r, g, b)
}

fn format_point(p: Point2D) -> String {
    format!("({:.1}, {:.1})", p.x, p.y)
}

pub fn clip_control_ui_system(
    mut contexts: EguiContexts,
    mut params: ResMut<AnimationParameters>,
    session: Res<ClipSession>,
    history: Res<StepHistory>,
    current_state: Res<State<AnimationState>>, // Um aktuellen Zustand zu lesen
    mut next_state: ResMut<NextState<AnimationState>>, // Für Zustandswechsel
    mut toggle_run: ResMut<ToggleRunRequest>,
    mut randomize: ResMut<RandomizeEndpointsRequest>,
    mut single_step: ResMut<ExecuteSingleStepRequest>,
    mut step_back: ResMut<ExecuteStepBackwardRequest>,
    mut export: ResMut<ExportSvgRequest>,
) {
    let state = *current_state.get();
    let controller = &session.controller;

    Window::new("Cohen-Sutherland Clipping")
        .default_width(340.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading("Status");
            ui.label(format!("Zustand: {:?}", state));
            if controller.is_idle() {
                ui.label("Set line endpoints and press SPACE to start animation");
            } else {
                ui.label(controller.status());
                ui.label(format!("Schritte: {}", controller.step_count()));
            }
            match controller.outcome() {
                Some(ClipOutcome::Accepted) => {
                    ui.label("Line ACCEPTED - Press SPACE to reset");
                }
                Some(ClipOutcome::Rejected) => {
                    ui.label("Line REJECTED - Press SPACE to reset");
                }
                None => {}
            }

            ui.collapsing("Endpunkte", |ui| {
                let (segment, codes) = match (controller.current_segment(), controller.codes()) {
                    (Some(segment), Some(codes)) => (segment, codes),
                    _ => (
                        (session.p1, session.p2),
                        (
                            encode(session.p1, &session.window),
                            encode(session.p2, &session.window),
                        ),
                    ),
                };
                ui.colored_label(
                    to_color32(P1_COLOR),
                    format!(
                        "P1: {}  Code: {}",
                        format_point(segment.0),
                        format_region_code(codes.0)
                    ),
                );
                ui.colored_label(
                    to_color32(P2_COLOR),
                    format!(
                        "P2: {}  Code: {}",
                        format_point(segment.1),
                        format_region_code(codes.1)
                    ),
                );
                if controller.swapped() {
                    ui.label("*Points were swapped during algorithm*");
                }
                if let Some((p1, p2)) = controller.original_segment() {
                    ui.label(format!(
                        "Ausgangslinie: {} - {}",
                        format_point(p1),
                        format_point(p2)
                    ));
                }
                ui.label(format!("Fenster: {}", session.window));
            });

            ui.collapsing("Steuerung", |ui| {
                ui.horizontal(|ui| {
                    let run_label = if state == AnimationState::Idle {
                        "▶ Start"
                    } else {
                        "↺ Reset"
                    };
                    if ui.button(run_label).clicked() {
                        toggle_run.0 = true;
                    }
                    match state {
                        AnimationState::Running => {
                            if ui.button("⏸ Pause").clicked() {
                                next_state.set(AnimationState::Paused);
                            }
                        }
                        AnimationState::Paused => {
                            if ui.button("▶ Weiter").clicked() {
                                next_state.set(AnimationState::Running);
                            }
                        }
                        _ => {}
                    }
                });
                ui.horizontal(|ui| {
                    if ui.button("◀ Schritt Zurück").clicked() {
                        step_back.0 = true;
                    }
                    if ui.button("Schritt Vorwärts ▶").clicked() {
                        single_step.0 = true;
                    }
                });
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(state.allows_editing(), egui::Button::new("🎲 Zufall"))
                        .clicked()
                    {
                        randomize.0 = true;
                    }
                    if ui.button("💾 SVG").clicked() {
                        export.0 = true;
                    }
                });

                ui.separator();

                // Lokale Kopien, damit `params` nur bei echten Änderungen als geändert gilt
                let mut step_delay = params.step_delay_secs;
                if ui
                    .add(Slider::new(&mut step_delay, 0.1..=5.0).text("Schrittdauer (s)"))
                    .changed()
                {
                    params.step_delay_secs = step_delay;
                    params.highlight_secs = step_delay;
                }
                let mut show_codes = params.show_region_codes;
                if ui.checkbox(&mut show_codes, "Regionscodes anzeigen").changed() {
                    params.show_region_codes = show_codes;
                }
            });

            ui.collapsing("Kantenfarben", |ui| {
                for edge in ClipEdge::PRIORITY {
                    ui.colored_label(to_color32(edge_color(Some(edge))), edge.name());
                }
                ui.colored_label(to_color32(edge_color(None)), "keine Kante");
            });

            ui.collapsing("Schrittprotokoll", |ui| {
                if history.is_empty() {
                    ui.label("Keine Historie aufgezeichnet.");
                } else {
                    if let Some(shown) = history.get_current_display_snapshot() {
                        ui.label(format!("Angezeigt: Schritt #{}", shown.step));
                    }
                    ScrollArea::vertical().max_height(160.0).show(ui, |ui| {
                        for snapshot in history.recent(params.step_log_lines) {
                            ui.label(format!("#{}: {}", snapshot.step, snapshot.message));
                        }
                    });
                }
            });

            ui.collapsing("Tastatur & Maus", |ui| {
                ui.label("SPACE: Start / Reset");
                ui.label("P: Pause / Weiter, N: Schritt, B: Schritt zurück");
                ui.label("R: Zufällige Endpunkte, S: SVG exportieren");
                ui.label("Linke Maustaste: P1, Rechte Maustaste: P2, Ziehen: näherer Endpunkt");
            });
        });
}

/// Zeichnet die Text-Primitive der Szene (Regionscodes, Punktnamen) als egui-Overlay.
pub fn draw_scene_labels_system(
    mut contexts: EguiContexts,
    cameras: Query<(&Camera, &GlobalTransform)>,
    session: Res<ClipSession>,
    params: Res<AnimationParameters>,
) {
    if !params.show_region_codes {
        return;
    }
    let Ok((camera, camera_transform)) = cameras.get_single() else {
        return;
    };
    let options = ClipSceneOptions {
        highlight_visible: false,
        show_region_codes: true,
    };
    let scene = ClipScene::from_session(&session, &options);
    let ctx = contexts.ctx_mut();

    let labels = scene.primitives.iter().filter_map(|primitive| match primitive {
        ScenePrimitive::Label {
            position,
            text,
            color,
        } => Some((*position, text, *color)),
        _ => None,
    });
    for (i, (position, text, color)) in labels.enumerate() {
        let Some(screen) = camera.world_to_viewport(camera_transform, position.extend(0.0)) else {
            continue;
        };
        egui::Area::new(egui::Id::new(("clip_scene_label", i)))
            .fixed_pos(egui::pos2(screen.x, screen.y))
            .interactable(false)
            .show(ctx, |ui| {
                ui.colored_label(to_color32(color), text.as_str());
            });
    }
}
