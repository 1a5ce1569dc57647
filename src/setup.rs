// ./src/setup.rs
use crate::animation::resources::AnimationParameters;
use bevy::{prelude::*, render::camera::ScalingMode};

/// Orthografische 2D-Kamera, die den Weltausschnitt aus den Parametern zeigt.
pub fn setup_scene(mut commands: Commands, params: Res<AnimationParameters>) {
    let world = match params.world_bounds() {
        Ok(world) => world,
        Err(err) => {
            error!("Kein gültiger Weltausschnitt, Kamera nicht erstellt: {}", err);
            return;
        }
    };
    let center = world.center();

    let mut camera = Camera2dBundle::default();
    // Ganzer Weltausschnitt bleibt bei jedem Seitenverhältnis sichtbar
    camera.projection.scaling_mode = ScalingMode::AutoMin {
        min_width: world.width(),
        min_height: world.height(),
    };
    // z aus dem Default beibehalten, sonst liegt alles hinter der Near-Plane
    camera.transform.translation.x = center.x;
    camera.transform.translation.y = center.y;
    commands.spawn(camera);

    info!("Kamera zentriert auf {:?}, Weltausschnitt {}", center, world);
}
