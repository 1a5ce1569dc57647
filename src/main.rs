// ./src/main.rs
use bevy::{log::LogPlugin, prelude::*};
use bevy_egui::EguiPlugin;

// Importiere spezifische Elemente aus unseren Modulen
use clip_anim::{
    animation::{history::StepHistory, resources::*, state::AnimationState, systems::*},
    debug::{
        ui::{clip_control_ui_system, draw_scene_labels_system},
        visualization::gizmos::draw_clip_scene_system,
    },
    math::ClipResult,
    setup::setup_scene,
};

fn build_app(params: AnimationParameters) -> ClipResult<App> {
    params.validate()?;
    let session = ClipSession::from_parameters(&params)?;

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Cohen-Sutherland Line Clipping Animation".into(),
                    resolution: (800.0, 800.0).into(),
                    ..default()
                }),
                ..default()
            })
            .set(LogPlugin {
                filter: params.log_filter.clone(),
                level: bevy::log::Level::INFO,
                ..default()
            }),
    )
    .add_plugins(EguiPlugin)
    .insert_resource(ClearColor(Color::WHITE))
    .insert_resource(session)
    .insert_resource(StepHistory::new(params.history_size)) // Ein Snapshot pro Schritt
    .insert_resource(StepTimer(Timer::from_seconds(
        params.step_delay_secs,
        TimerMode::Repeating,
    )))
    .insert_resource(ClipHighlight::new(params.highlight_secs))
    .insert_resource(params)
    .init_resource::<ToggleRunRequest>()
    .init_resource::<RandomizeEndpointsRequest>()
    .init_resource::<ExecuteSingleStepRequest>()
    .init_resource::<ExecuteStepBackwardRequest>()
    .init_resource::<ExportSvgRequest>()
    .init_state::<AnimationState>()
    .add_systems(Startup, setup_scene)
    .add_systems(
        Update,
        (
            // Block 1: Eingabe und UI setzen Anfragen
            keyboard_input_system,
            mouse_input_system,
            clip_control_ui_system,
            // Block 2: Anfragen abarbeiten, Timer nachführen
            handle_animation_requests_system,
            sync_timing_system,
            // Block 3: Animationsschritt im Takt des Timers
            animation_driver_system.run_if(in_state(AnimationState::Running)),
            highlight_timer_system.run_if(not(in_state(AnimationState::Paused))),
            export_svg_system,
        )
            .chain(),
    )
    .add_systems(
        Update,
        (draw_clip_scene_system, draw_scene_labels_system)
            .after(export_svg_system),
    )
    .add_systems(Update, bevy::window::close_on_esc);

    Ok(app)
}

fn main() {
    match build_app(AnimationParameters::default()) {
        Ok(mut app) => app.run(),
        Err(err) => {
            // Der Logger existiert erst mit der App
            eprintln!("Clipping-Animation konnte nicht starten: {}", err);
            std::process::exit(1);
        }
    }
}
