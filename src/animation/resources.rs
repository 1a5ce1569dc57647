// src/animation/resources.rs
use super::controller::AnimationController;
use crate::math::{
    error::{ClipError, ClipResult},
    types::{ClipWindow, Point2D},
};
use bevy::prelude::*;
use rand::Rng;

/// Zentrale Konfiguration der Animation (Fenster, Timing, Ausgabe, Logging).
#[derive(Resource, Debug, Clone)]
pub struct AnimationParameters {
    // --- Geometrie ---
    pub window_min: Point2D,
    pub window_max: Point2D,
    pub initial_p1: Point2D,
    pub initial_p2: Point2D,
    /// Sichtbarer Weltausschnitt der Kamera
    pub world_min: Point2D,
    pub world_max: Point2D,

    // --- Zeitsteuerung ---
    pub step_delay_secs: f32,
    pub highlight_secs: f32,
    pub history_size: usize,

    // --- Ausgabe ---
    pub svg_path: String,
    pub svg_pixel_size: f32,
    pub log_filter: String,

    // --- Visualisierung ---
    pub show_region_codes: bool,
    pub step_log_lines: usize,
}

impl Default for AnimationParameters {
    fn default() -> Self {
        Self {
            // Geometrie
            window_min: Point2D::new(50.0, 50.0),
            window_max: Point2D::new(150.0, 150.0),
            initial_p1: Point2D::new(20.0, 120.0),
            initial_p2: Point2D::new(180.0, 30.0),
            world_min: Point2D::new(0.0, 0.0),
            world_max: Point2D::new(225.0, 225.0),

            // Zeit
            step_delay_secs: 2.0,
            highlight_secs: 2.0,
            history_size: 1000,

            // Ausgabe
            svg_path: "clip_frame.svg".to_string(),
            svg_pixel_size: 800.0,
            log_filter: "wgpu=error,naga=warn,clip_anim=debug".to_string(),

            // Vis
            show_region_codes: true,
            step_log_lines: 8,
        }
    }
}

impl AnimationParameters {
    pub fn clip_window(&self) -> ClipResult<ClipWindow> {
        ClipWindow::new(self.window_min, self.window_max)
    }

    pub fn world_bounds(&self) -> ClipResult<ClipWindow> {
        ClipWindow::new(self.world_min, self.world_max)
    }

    /// Prüft die Konfiguration auf Konsistenz
    pub fn validate(&self) -> ClipResult<()> {
        self.clip_window()?;
        let world = self.world_bounds()?;
        if world.width() <= 0.0 || world.height() <= 0.0 {
            return Err(ClipError::InvalidConfiguration {
                message: format!("World view {} has no area", world),
            });
        }
        if !(self.step_delay_secs > 0.0) || !(self.highlight_secs >= 0.0) {
            return Err(ClipError::InvalidConfiguration {
                message: format!(
                    "Timing must be positive: step delay {}, highlight {}",
                    self.step_delay_secs, self.highlight_secs
                ),
            });
        }
        if !(self.svg_pixel_size > 0.0) {
            return Err(ClipError::InvalidConfiguration {
                message: format!("SVG size must be positive, got {}", self.svg_pixel_size),
            });
        }
        Ok(())
    }
}

/// Der laufende Clipping-Zustand plus die vom Benutzer platzierten Endpunkte.
#[derive(Resource, Debug, Clone)]
pub struct ClipSession {
    pub p1: Point2D,
    pub p2: Point2D,
    pub window: ClipWindow,
    pub controller: AnimationController,
}

impl ClipSession {
    pub fn from_parameters(params: &AnimationParameters) -> ClipResult<Self> {
        Ok(Self {
            p1: params.initial_p1,
            p2: params.initial_p2,
            window: params.clip_window()?,
            controller: AnimationController::new(),
        })
    }

    /// Startet einen neuen Lauf mit den aktuellen Endpunkten
    pub fn start(&mut self) -> ClipResult<()> {
        self.controller.reset(self.p1, self.p2, self.window)
    }

    /// Verschiebt den näheren Endpunkt (Manhattan-Abstand) nach `target`
    pub fn drag_closest_endpoint(&mut self, target: Point2D) {
        use crate::math::utils::comparison::manhattan_distance;
        if manhattan_distance(target, self.p1) < manhattan_distance(target, self.p2) {
            self.p1 = target;
        } else {
            self.p2 = target;
        }
    }

    /// Würfelt beide Endpunkte gleichverteilt innerhalb von `world`
    pub fn randomize_endpoints<R: Rng>(&mut self, rng: &mut R, world: &ClipWindow) {
        let (min, max) = (world.min(), world.max());
        let mut sample = || {
            Point2D::new(
                rng.random_range(min.x..=max.x),
                rng.random_range(min.y..=max.y),
            )
        };
        self.p1 = sample();
        self.p2 = sample();
    }
}

/// Takt der Animation: ein Tick pro Ablauf
#[derive(Resource, Debug)]
pub struct StepTimer(pub Timer);

/// Wie lange die farbigen Clip-Segmente eines Kantenschritts sichtbar bleiben
#[derive(Resource, Debug)]
pub struct ClipHighlight {
    pub timer: Timer,
    pub visible: bool,
}

impl ClipHighlight {
    pub fn new(secs: f32) -> Self {
        Self {
            timer: Timer::from_seconds(secs, TimerMode::Once),
            visible: false,
        }
    }

    pub fn show(&mut self) {
        self.timer.reset();
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

// Anfragen von Tastatur und UI, abgearbeitet von `handle_animation_requests_system`
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct ToggleRunRequest(pub bool);
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct RandomizeEndpointsRequest(pub bool);
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct ExecuteSingleStepRequest(pub bool);
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct ExecuteStepBackwardRequest(pub bool);
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct ExportSvgRequest(pub bool);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters_are_valid() {
        let params = AnimationParameters::default();
        assert!(params.validate().is_ok());
        let window = params.clip_window().unwrap();
        assert_eq!(window.min(), Point2D::new(50.0, 50.0));
        assert_eq!(window.max(), Point2D::new(150.0, 150.0));
    }

    #[test]
    fn test_inverted_window_is_rejected() {
        let params = AnimationParameters {
            window_min: Point2D::new(200.0, 50.0),
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ClipError::InvalidWindow { .. })
        ));
        assert!(ClipSession::from_parameters(&params).is_err());
    }

    #[test]
    fn test_bad_timing_is_rejected() {
        let params = AnimationParameters {
            step_delay_secs: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ClipError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_drag_moves_closer_endpoint() {
        let mut session = ClipSession::from_parameters(&AnimationParameters::default()).unwrap();
        session.drag_closest_endpoint(Point2D::new(25.0, 110.0));
        assert_eq!(session.p1, Point2D::new(25.0, 110.0));
        assert_eq!(session.p2, Point2D::new(180.0, 30.0));

        session.drag_closest_endpoint(Point2D::new(170.0, 40.0));
        assert_eq!(session.p2, Point2D::new(170.0, 40.0));
    }

    #[test]
    fn test_randomized_endpoints_stay_in_world() {
        use rand::{SeedableRng, rngs::StdRng};

        let params = AnimationParameters::default();
        let world = params.world_bounds().unwrap();
        let mut session = ClipSession::from_parameters(&params).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            session.randomize_endpoints(&mut rng, &world);
            assert!(world.contains_point(session.p1));
            assert!(world.contains_point(session.p2));
        }
    }

    #[test]
    fn test_session_start_resets_controller() {
        let mut session = ClipSession::from_parameters(&AnimationParameters::default()).unwrap();
        session.start().unwrap();
        assert_eq!(
            session.controller.current_segment(),
            Some((session.p1, session.p2))
        );
    }
}
