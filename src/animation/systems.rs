// src/animation/systems.rs
use super::{
    history::{StepHistory, StepSnapshot},
    resources::*,
    state::AnimationState,
};
use crate::debug::visualization::{
    scene::{ClipScene, ClipSceneOptions},
    svg::write_scene_svg,
};
use crate::math::types::Point2D;
use bevy::{prelude::*, window::PrimaryWindow};
use bevy_egui::EguiContexts;
use std::time::Duration;

// --- Hilfsfunktionen für Zustandswechsel ---

fn start_run(
    session: &mut ClipSession,
    history: &mut StepHistory,
    timer: &mut StepTimer,
    highlight: &mut ClipHighlight,
    next_state: &mut NextState<AnimationState>,
) {
    if let Err(err) = session.start() {
        warn!("Cannot start clipping run: {}", err);
        return;
    }
    history.clear();
    history.add_snapshot(StepSnapshot::capture(
        &session.controller,
        session.controller.status(),
    ));
    timer.0.reset();
    highlight.hide();
    next_state.set(AnimationState::Running);
    info!("Animation started. Transitioning to Running state.");
}

fn stop_run(
    session: &mut ClipSession,
    history: &mut StepHistory,
    highlight: &mut ClipHighlight,
    next_state: &mut NextState<AnimationState>,
) {
    session.controller.stop();
    history.clear();
    highlight.hide();
    next_state.set(AnimationState::Idle);
    info!("Animation reset. Transitioning to Idle state.");
}

/// Ein Tick des Controllers samt Snapshot. Gibt `true` zurück, wenn der Lauf
/// damit terminal wurde.
fn advance_one_step(
    session: &mut ClipSession,
    history: &mut StepHistory,
    highlight: &mut ClipHighlight,
    next_state: &mut NextState<AnimationState>,
) -> bool {
    let Some(result) = session.controller.tick() else {
        return false;
    };
    history.add_snapshot(StepSnapshot::capture(
        &session.controller,
        result.message.as_str(),
    ));
    if result.touched_edge.is_some() {
        highlight.show();
    }
    if result.is_terminal() {
        next_state.set(AnimationState::Finished);
        info!(
            "Run finished after {} steps, transitioning to Finished state.",
            session.controller.step_count()
        );
        return true;
    }
    false
}

fn cursor_world_position(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cameras: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Point2D> {
    let window = windows.get_single().ok()?;
    let cursor = window.cursor_position()?;
    let (camera, camera_transform) = cameras.get_single().ok()?;
    camera.viewport_to_world_2d(camera_transform, cursor)
}

// --- Eingabe ---

/// Übersetzt Tasten in Anfragen bzw. Zustandswechsel.
pub fn keyboard_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<AnimationState>>,
    mut next_state: ResMut<NextState<AnimationState>>,
    mut toggle_run: ResMut<ToggleRunRequest>,
    mut randomize: ResMut<RandomizeEndpointsRequest>,
    mut single_step: ResMut<ExecuteSingleStepRequest>,
    mut step_back: ResMut<ExecuteStepBackwardRequest>,
    mut export: ResMut<ExportSvgRequest>,
) {
    if keys.just_pressed(KeyCode::Space) {
        toggle_run.0 = true;
    }
    if keys.just_pressed(KeyCode::KeyP) {
        match current_state.get() {
            AnimationState::Running => {
                next_state.set(AnimationState::Paused);
                info!("Animation paused.");
            }
            AnimationState::Paused => {
                next_state.set(AnimationState::Running);
                info!("Animation resumed.");
            }
            _ => {}
        }
    }
    if keys.just_pressed(KeyCode::KeyN) {
        single_step.0 = true;
    }
    if keys.just_pressed(KeyCode::KeyB) {
        step_back.0 = true;
    }
    if keys.just_pressed(KeyCode::KeyR) {
        randomize.0 = true;
    }
    if keys.just_pressed(KeyCode::KeyS) {
        export.0 = true;
    }
}

/// Linksklick setzt P1, Rechtsklick P2, Ziehen bewegt den näheren Endpunkt.
pub fn mouse_input_system(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut contexts: EguiContexts,
    current_state: Res<State<AnimationState>>,
    mut next_state: ResMut<NextState<AnimationState>>,
    mut session: ResMut<ClipSession>,
    mut history: ResMut<StepHistory>,
    mut highlight: ResMut<ClipHighlight>,
) {
    let state = *current_state.get();
    if !state.allows_editing() {
        return;
    }
    // Klicks auf das Panel gehören egui
    if contexts.ctx_mut().wants_pointer_input() {
        return;
    }

    let left = buttons.just_pressed(MouseButton::Left);
    let right = buttons.just_pressed(MouseButton::Right);
    let dragging = buttons.pressed(MouseButton::Left) || buttons.pressed(MouseButton::Right);
    if !left && !right && !dragging {
        return;
    }
    let Some(position) = cursor_world_position(&windows, &cameras) else {
        return;
    };

    let edit = if left {
        PointerEdit::PlaceP1
    } else if right {
        PointerEdit::PlaceP2
    } else {
        PointerEdit::Drag
    };
    apply_pointer_edit(
        edit,
        position,
        state,
        &mut session,
        &mut history,
        &mut highlight,
        &mut next_state,
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointerEdit {
    PlaceP1,
    PlaceP2,
    Drag,
}

/// Ein Klick nach Laufende setzt zuerst auf Idle zurück, Ziehen nicht.
fn apply_pointer_edit(
    edit: PointerEdit,
    position: Point2D,
    state: AnimationState,
    session: &mut ClipSession,
    history: &mut StepHistory,
    highlight: &mut ClipHighlight,
    next_state: &mut NextState<AnimationState>,
) {
    if state == AnimationState::Finished && edit != PointerEdit::Drag {
        stop_run(session, history, highlight, next_state);
    }

    match edit {
        PointerEdit::PlaceP1 => {
            session.p1 = position;
            debug!("P1 placed at {:?}", position);
        }
        PointerEdit::PlaceP2 => {
            session.p2 = position;
            debug!("P2 placed at {:?}", position);
        }
        PointerEdit::Drag => session.drag_closest_endpoint(position),
    }
}

// --- Ablaufsteuerung ---

/// Arbeitet die Anfragen aus Tastatur und UI ab.
pub fn handle_animation_requests_system(
    current_state: Res<State<AnimationState>>,
    mut next_state: ResMut<NextState<AnimationState>>,
    params: Res<AnimationParameters>,
    mut session: ResMut<ClipSession>,
    mut history: ResMut<StepHistory>,
    mut timer: ResMut<StepTimer>,
    mut highlight: ResMut<ClipHighlight>,
    mut toggle_run: ResMut<ToggleRunRequest>,
    mut randomize: ResMut<RandomizeEndpointsRequest>,
    mut single_step: ResMut<ExecuteSingleStepRequest>,
    mut step_back: ResMut<ExecuteStepBackwardRequest>,
) {
    let state = *current_state.get();

    if toggle_run.0 {
        toggle_run.0 = false;
        if state == AnimationState::Idle {
            start_run(
                &mut session,
                &mut history,
                &mut timer,
                &mut highlight,
                &mut next_state,
            );
        } else {
            stop_run(&mut session, &mut history, &mut highlight, &mut next_state);
        }
        // Weitere Anfragen im selben Frame würden auf dem alten Zustand arbeiten
        single_step.0 = false;
        step_back.0 = false;
        randomize.0 = false;
        return;
    }

    if randomize.0 {
        randomize.0 = false;
        if state.allows_editing() {
            match params.world_bounds() {
                Ok(world) => {
                    if state == AnimationState::Finished {
                        stop_run(&mut session, &mut history, &mut highlight, &mut next_state);
                    }
                    session.randomize_endpoints(&mut rand::rng(), &world);
                    info!("Random endpoints: P1 {:?}, P2 {:?}", session.p1, session.p2);
                }
                Err(err) => warn!("Cannot randomize endpoints: {}", err),
            }
        }
    }

    if step_back.0 {
        step_back.0 = false;
        if matches!(state, AnimationState::Paused | AnimationState::Finished) {
            // Extract data from snapshot to drop the borrow of `history`
            let restored = history
                .step_back()
                .map(|snapshot| (snapshot.step, snapshot.controller.clone()));
            match restored {
                Some((step, controller)) => {
                    session.controller = controller;
                    if session.controller.touched_edge().is_some() {
                        highlight.show();
                    } else {
                        highlight.hide();
                    }
                    next_state.set(AnimationState::Paused);
                    info!("Stepped backward to step {}.", step);
                }
                None => info!("Already at the first step, nothing to undo."),
            }
        }
        return;
    }

    if single_step.0 {
        single_step.0 = false;
        if state == AnimationState::Paused {
            advance_one_step(&mut session, &mut history, &mut highlight, &mut next_state);
            debug!("Single step executed: {}", session.controller.status());
        }
    }
}

/// Führt alle `step_delay_secs` einen Schritt aus, solange `Running`.
pub fn animation_driver_system(
    time: Res<Time>,
    mut timer: ResMut<StepTimer>,
    mut session: ResMut<ClipSession>,
    mut history: ResMut<StepHistory>,
    mut highlight: ResMut<ClipHighlight>,
    mut next_state: ResMut<NextState<AnimationState>>,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }
    advance_one_step(&mut session, &mut history, &mut highlight, &mut next_state);
}

/// Blendet die farbigen Clip-Segmente nach `highlight_secs` aus.
pub fn highlight_timer_system(time: Res<Time>, mut highlight: ResMut<ClipHighlight>) {
    if highlight.visible && highlight.timer.tick(time.delta()).just_finished() {
        highlight.hide();
    }
}

/// Überträgt geänderte Zeiten aus den Parametern (z.B. vom UI-Slider) auf die Timer.
pub fn sync_timing_system(
    params: Res<AnimationParameters>,
    mut timer: ResMut<StepTimer>,
    mut highlight: ResMut<ClipHighlight>,
) {
    if !params.is_changed() {
        return;
    }
    let step_delay = Duration::from_secs_f32(params.step_delay_secs.max(0.01));
    if timer.0.duration() != step_delay {
        timer.0.set_duration(step_delay);
        debug!("Step delay set to {:.2}s", params.step_delay_secs);
    }
    highlight
        .timer
        .set_duration(Duration::from_secs_f32(params.highlight_secs.max(0.0)));
}

/// Schreibt den aktuellen Frame als SVG, wenn angefordert.
pub fn export_svg_system(
    mut export: ResMut<ExportSvgRequest>,
    params: Res<AnimationParameters>,
    session: Res<ClipSession>,
    highlight: Res<ClipHighlight>,
) {
    if !export.0 {
        return;
    }
    export.0 = false;

    let options = ClipSceneOptions {
        highlight_visible: highlight.visible,
        show_region_codes: params.show_region_codes,
    };
    let scene = ClipScene::from_session(&session, &options);
    let result = params
        .world_bounds()
        .and_then(|world| write_scene_svg(&params.svg_path, &scene, &world, params.svg_pixel_size));
    if let Err(err) = result {
        error!("SVG export to '{}' failed: {}", params.svg_path, err);
    }
}
