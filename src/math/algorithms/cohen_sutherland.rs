// src/math/algorithms/cohen_sutherland.rs

//! # Cohen-Sutherland Step Engine
//!
//! The classic Cohen-Sutherland line clipper, cut into single units of work so
//! that every intermediate segment can be shown. One call to
//! [`ClipEngine::step`] performs exactly one of:
//!
//! 1. the trivial accept/reject test,
//! 2. the endpoint swap that guarantees P1 lies outside the window,
//! 3. one clip of P1 against a single window boundary.
//!
//! The engine only holds the clip window. The evolving run lives in an
//! [`AlgState`] owned by the caller, so the algorithm can be driven (and tested)
//! without any animation or rendering concern.

use super::outcode::{self, OutCode, Region};
use crate::math::{
    types::{ClipWindow, Point2D, Segment},
    utils::constants,
};
use std::fmt;

/// Upper bound for [`ClipEngine::clip`]. A run needs far fewer steps; the bound
/// only stops float ping-pong on pathological inputs.
const MAX_CLIP_STEPS: usize = 64;

/// A window boundary a clip step was applied to.
///
/// The "no edge" case is expressed as `Option<ClipEdge>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipEdge {
    Left,
    Right,
    Bottom,
    Top,
}

impl ClipEdge {
    /// Order in which the bits of P1's code are tested. First match wins.
    pub const PRIORITY: [ClipEdge; 4] = [
        ClipEdge::Left,
        ClipEdge::Right,
        ClipEdge::Bottom,
        ClipEdge::Top,
    ];

    pub fn region(self) -> Region {
        match self {
            ClipEdge::Left => Region::Left,
            ClipEdge::Right => Region::Right,
            ClipEdge::Bottom => Region::Bottom,
            ClipEdge::Top => Region::Top,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ClipEdge::Left => "LEFT",
            ClipEdge::Right => "RIGHT",
            ClipEdge::Bottom => "BOTTOM",
            ClipEdge::Top => "TOP",
        }
    }

    /// The boundary the next clip of a point with `code` applies to.
    pub fn first_in(code: OutCode) -> Option<ClipEdge> {
        Self::PRIORITY
            .into_iter()
            .find(|edge| code.contains(edge.region()))
    }
}

impl fmt::Display for ClipEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Step cursor of a clipping run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    CheckTrivial,
    EnsureP1Outside,
    ClipAgainstEdge,
}

/// Final decision of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipOutcome {
    Accepted,
    Rejected,
}

/// Mutable record of one clipping run.
///
/// Created by [`ClipEngine::start`] and changed only by [`ClipEngine::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlgState {
    p1: Point2D,
    p2: Point2D,
    code1: OutCode,
    code2: OutCode,
    swapped: bool,
    phase: Phase,
}

impl AlgState {
    pub fn p1(&self) -> Point2D {
        self.p1
    }

    pub fn p2(&self) -> Point2D {
        self.p2
    }

    pub fn code1(&self) -> OutCode {
        self.code1
    }

    pub fn code2(&self) -> OutCode {
        self.code2
    }

    /// Whether the endpoints were swapped at least once during the run.
    pub fn swapped(&self) -> bool {
        self.swapped
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn segment(&self) -> Segment {
        (self.p1, self.p2)
    }

    /// Outcome the next `CheckTrivial` would report, if any.
    pub fn trivial_outcome(&self) -> Option<ClipOutcome> {
        if outcode::accept(self.code1, self.code2) {
            Some(ClipOutcome::Accepted)
        } else if outcode::reject(self.code1, self.code2) {
            Some(ClipOutcome::Rejected)
        } else {
            None
        }
    }

    /// `true` once the run reached a decision; further steps change nothing.
    pub fn is_terminal(&self) -> bool {
        self.phase == Phase::CheckTrivial && self.trivial_outcome().is_some()
    }
}

/// Description of what one [`ClipEngine::step`] did.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Phase that was executed.
    pub phase: Phase,
    /// `Some` iff the run is finished.
    pub outcome: Option<ClipOutcome>,
    /// Boundary clipped in this step; `None` for trivial tests and swaps.
    pub touched_edge: Option<ClipEdge>,
    pub before: Segment,
    pub after: Segment,
    pub message: String,
}

impl StepResult {
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Only meaningful once [`is_terminal`](Self::is_terminal) holds.
    pub fn is_accepted(&self) -> bool {
        self.outcome == Some(ClipOutcome::Accepted)
    }
}

/// Cohen-Sutherland clipper for a fixed window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipEngine {
    window: ClipWindow,
}

impl ClipEngine {
    pub fn new(window: ClipWindow) -> Self {
        Self { window }
    }

    pub fn window(&self) -> &ClipWindow {
        &self.window
    }

    #[inline]
    pub fn encode(&self, point: Point2D) -> OutCode {
        outcode::encode(point, &self.window)
    }

    /// Fresh run state for the segment `p1 → p2`, positioned at `CheckTrivial`.
    pub fn start(&self, p1: Point2D, p2: Point2D) -> AlgState {
        AlgState {
            p1,
            p2,
            code1: self.encode(p1),
            code2: self.encode(p2),
            swapped: false,
            phase: Phase::CheckTrivial,
        }
    }

    /// Advances `state` by exactly one unit of work.
    ///
    /// Once a terminal result was returned the state sits at `CheckTrivial` with
    /// a decided outcome, so calling again returns the same decision without
    /// touching the state.
    pub fn step(&self, state: &mut AlgState) -> StepResult {
        let before = state.segment();
        let phase = state.phase;

        let (outcome, touched_edge, message) = match phase {
            Phase::CheckTrivial => self.check_trivial(state),
            Phase::EnsureP1Outside => self.ensure_p1_outside(state),
            Phase::ClipAgainstEdge => self.clip_against_edge(state),
        };

        StepResult {
            phase,
            outcome,
            touched_edge,
            before,
            after: state.segment(),
            message,
        }
    }

    /// Runs a whole clip without animation. Returns the visible part of the
    /// segment, or `None` if it lies completely outside.
    ///
    /// The returned endpoints may be swapped relative to the input.
    pub fn clip(&self, p1: Point2D, p2: Point2D) -> Option<Segment> {
        let mut state = self.start(p1, p2);
        for _ in 0..MAX_CLIP_STEPS {
            let result = self.step(&mut state);
            match result.outcome {
                Some(ClipOutcome::Accepted) => return Some(result.after),
                Some(ClipOutcome::Rejected) => return None,
                None => {}
            }
        }
        bevy::log::warn!(
            "Cohen-Sutherland did not converge within {} steps for {:?} -> {:?}",
            MAX_CLIP_STEPS,
            p1,
            p2
        );
        None
    }

    fn check_trivial(&self, state: &mut AlgState) -> (Option<ClipOutcome>, Option<ClipEdge>, String) {
        match state.trivial_outcome() {
            Some(ClipOutcome::Accepted) => (
                Some(ClipOutcome::Accepted),
                None,
                "Line ACCEPTED - both endpoints inside window or clipped properly".to_string(),
            ),
            Some(ClipOutcome::Rejected) => (
                Some(ClipOutcome::Rejected),
                None,
                "Line REJECTED - line completely outside window".to_string(),
            ),
            None => {
                state.phase = Phase::EnsureP1Outside;
                (
                    None,
                    None,
                    "Checking trivial accept/reject: neither trivially accepted nor rejected, continuing"
                        .to_string(),
                )
            }
        }
    }

    fn ensure_p1_outside(&self, state: &mut AlgState) -> (Option<ClipOutcome>, Option<ClipEdge>, String) {
        state.phase = Phase::ClipAgainstEdge;

        if outcode::is_inside(state.code1) {
            std::mem::swap(&mut state.p1, &mut state.p2);
            std::mem::swap(&mut state.code1, &mut state.code2);
            state.swapped = true;
            (
                None,
                None,
                "Swapped endpoints - ensuring P1 is outside the window".to_string(),
            )
        } else {
            (
                None,
                None,
                "P1 is already outside window, no need to swap".to_string(),
            )
        }
    }

    fn clip_against_edge(&self, state: &mut AlgState) -> (Option<ClipOutcome>, Option<ClipEdge>, String) {
        let min = self.window.min();
        let max = self.window.max();
        let (p1, p2) = (state.p1, state.p2);

        let vertical = p2.x == p1.x;
        let raw_slope = (p2.y - p1.y) / (p2.x - p1.x);
        // Senkrecht oder subnormales dx: Steigung begrenzt, keine Division durch m
        let steep = vertical || !raw_slope.is_finite();
        let m = if vertical {
            constants::VERTICAL_SLOPE
        } else if steep {
            constants::VERTICAL_SLOPE.copysign(raw_slope)
        } else {
            raw_slope
        };
        let can_divide = !steep && m != 0.0;

        let edge = ClipEdge::first_in(state.code1);
        // `start` und `ensure_p1_outside` lassen P1 hier immer außerhalb
        debug_assert!(
            edge.is_some(),
            "ClipAgainstEdge with P1 inside the window: {:?}",
            state
        );
        match edge {
            Some(ClipEdge::Left) => {
                state.p1.y += (min.x - state.p1.x) * m;
                state.p1.x = min.x;
            }
            Some(ClipEdge::Right) => {
                state.p1.y += (max.x - state.p1.x) * m;
                state.p1.x = max.x;
            }
            Some(ClipEdge::Bottom) => {
                if can_divide {
                    state.p1.x += (min.y - state.p1.y) / m;
                }
                state.p1.y = min.y;
            }
            Some(ClipEdge::Top) => {
                if can_divide {
                    state.p1.x += (max.y - state.p1.y) / m;
                }
                state.p1.y = max.y;
            }
            None => {}
        }

        state.code1 = self.encode(state.p1);
        state.phase = Phase::CheckTrivial;

        let message = match edge {
            Some(edge) => format!("Clipped against {} edge of window", edge),
            None => "P1 has no outside bit, nothing to clip".to_string(),
        };
        (None, edge, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn engine() -> ClipEngine {
        ClipEngine::new(
            ClipWindow::new(Point2D::new(50.0, 50.0), Point2D::new(150.0, 150.0)).unwrap(),
        )
    }

    /// Führt Schritte bis zum Ende aus und sammelt alle Ergebnisse.
    fn run_to_end(engine: &ClipEngine, state: &mut AlgState) -> Vec<StepResult> {
        let mut results = Vec::new();
        for _ in 0..MAX_CLIP_STEPS {
            let result = engine.step(state);
            let terminal = result.is_terminal();
            results.push(result);
            if terminal {
                return results;
            }
        }
        panic!("run did not terminate: {:?}", state);
    }

    fn touched_edges(results: &[StepResult]) -> Vec<ClipEdge> {
        results.iter().filter_map(|r| r.touched_edge).collect()
    }

    #[test]
    fn test_diagonal_line_clips_left_then_right() {
        let engine = engine();
        let mut state = engine.start(Point2D::new(20.0, 120.0), Point2D::new(180.0, 30.0));
        let results = run_to_end(&engine, &mut state);

        let edges = touched_edges(&results);
        assert!(edges.contains(&ClipEdge::Left));
        assert!(edges.contains(&ClipEdge::Right));

        let left = results
            .iter()
            .find(|r| r.touched_edge == Some(ClipEdge::Left))
            .unwrap();
        assert_relative_eq!(left.after.0.x, 50.0);
        assert_relative_eq!(left.after.0.y, 103.125);

        let right = results
            .iter()
            .find(|r| r.touched_edge == Some(ClipEdge::Right))
            .unwrap();
        assert_relative_eq!(right.after.0.x, 150.0);
        assert_relative_eq!(right.after.0.y, 46.875);

        let last = results.last().unwrap();
        assert!(last.is_terminal());
        assert!(last.is_accepted());
        assert!(last.message.contains("ACCEPTED"));
        assert!(state.swapped());

        // Endsegment liegt vollständig im Fenster
        assert!(engine.window().contains_point(last.after.0));
        assert!(engine.window().contains_point(last.after.1));
    }

    #[test]
    fn test_line_left_of_window_is_rejected_immediately() {
        let engine = engine();
        let mut state = engine.start(Point2D::new(-10.0, -10.0), Point2D::new(-5.0, -5.0));
        let result = engine.step(&mut state);

        assert_eq!(result.phase, Phase::CheckTrivial);
        assert_eq!(result.outcome, Some(ClipOutcome::Rejected));
        assert!(result.message.contains("REJECTED"));
        assert_eq!(result.touched_edge, None);
        assert_eq!(result.before, result.after);
    }

    #[test]
    fn test_vertical_line_clips_bottom_and_top() {
        let engine = engine();
        let mut state = engine.start(Point2D::new(100.0, 0.0), Point2D::new(100.0, 300.0));
        let results = run_to_end(&engine, &mut state);

        let edges = touched_edges(&results);
        assert_eq!(edges, vec![ClipEdge::Bottom, ClipEdge::Top]);

        let last = results.last().unwrap();
        assert!(last.is_accepted());
        let (a, b) = last.after;
        let (low, high) = if a.y < b.y { (a, b) } else { (b, a) };
        assert_eq!(low, Point2D::new(100.0, 50.0));
        assert_eq!(high, Point2D::new(100.0, 150.0));
        assert!(a.is_finite() && b.is_finite());
    }

    #[test]
    fn test_terminal_state_is_idempotent() {
        let engine = engine();
        let mut state = engine.start(Point2D::new(20.0, 120.0), Point2D::new(180.0, 30.0));
        let results = run_to_end(&engine, &mut state);
        let final_state = state;
        let final_result = results.last().unwrap().clone();

        for _ in 0..3 {
            let again = engine.step(&mut state);
            assert_eq!(state, final_state);
            assert_eq!(again.outcome, final_result.outcome);
            assert_eq!(again.after, final_result.after);
            assert_eq!(again.touched_edge, None);
        }
    }

    #[test]
    fn test_swap_moves_outside_point_to_p1() {
        let engine = engine();
        let mut state = engine.start(Point2D::new(100.0, 100.0), Point2D::new(200.0, 100.0));

        let first = engine.step(&mut state);
        assert!(!first.is_terminal());
        assert!(first.message.contains("neither trivially accepted nor rejected"));
        assert_eq!(state.phase(), Phase::EnsureP1Outside);

        let swap = engine.step(&mut state);
        assert_eq!(swap.phase, Phase::EnsureP1Outside);
        assert_eq!(swap.touched_edge, None);
        assert!(state.swapped());
        assert!(!state.code1().is_empty());
        assert_eq!(state.p1(), Point2D::new(200.0, 100.0));
        assert_eq!(state.phase(), Phase::ClipAgainstEdge);
    }

    #[test]
    fn test_no_swap_when_p1_already_outside() {
        let engine = engine();
        let mut state = engine.start(Point2D::new(0.0, 100.0), Point2D::new(100.0, 100.0));
        engine.step(&mut state);
        let result = engine.step(&mut state);
        assert!(!state.swapped());
        assert!(result.message.contains("no need to swap"));
        assert_eq!(result.before, result.after);
    }

    #[test]
    fn test_corner_point_clips_one_boundary_per_step() {
        let engine = engine();
        // P1 ist links UND oben; LEFT hat Vorrang
        let mut state = engine.start(Point2D::new(0.0, 200.0), Point2D::new(100.0, 100.0));
        engine.step(&mut state);
        engine.step(&mut state);
        let clip = engine.step(&mut state);

        assert_eq!(clip.touched_edge, Some(ClipEdge::Left));
        assert_eq!(state.phase(), Phase::CheckTrivial);
        assert_relative_eq!(state.p1().x, 50.0);
        assert_relative_eq!(state.p1().y, 150.0);
    }

    #[test]
    fn test_horizontal_guard_keeps_x() {
        let engine = engine();
        // Von außen konstruierter Zustand: horizontales Segment mit TOP-Bit
        let mut state = AlgState {
            p1: Point2D::new(100.0, 200.0),
            p2: Point2D::new(120.0, 200.0),
            code1: Region::Top.into(),
            code2: Region::Top.into(),
            swapped: false,
            phase: Phase::ClipAgainstEdge,
        };
        let result = engine.step(&mut state);
        assert_eq!(result.touched_edge, Some(ClipEdge::Top));
        assert_eq!(state.p1(), Point2D::new(100.0, 150.0));
    }

    #[test]
    fn test_subnormal_dx_stays_finite() {
        let engine = ClipEngine::new(
            ClipWindow::new(Point2D::new(0.0, 0.0), Point2D::new(10.0, 10.0)).unwrap(),
        );
        // dy / dx läuft über: LEFT-Clip, Tausch, dann TOP-Clip
        let (p1, p2) = (Point2D::new(-1e-40, 9.0), Point2D::new(1e-40, 10.5));
        assert!(((p2.y - p1.y) / (p2.x - p1.x)).is_infinite());

        let mut state = engine.start(p1, p2);
        let results = run_to_end(&engine, &mut state);
        let last = results.last().unwrap();
        assert_eq!(last.outcome, Some(ClipOutcome::Accepted));
        assert_eq!(
            touched_edges(&results),
            vec![ClipEdge::Left, ClipEdge::Top]
        );
        for p in [last.after.0, last.after.1] {
            assert!(p.is_finite(), "{:?}", p);
            assert!(engine.window().contains_point(p));
        }
        assert_relative_eq!(state.p1().y, 10.0);
    }

    #[test]
    fn test_degenerate_segment_never_clips() {
        let engine = engine();
        let inside = Point2D::new(75.0, 75.0);
        let mut state = engine.start(inside, inside);
        assert_eq!(engine.step(&mut state).outcome, Some(ClipOutcome::Accepted));

        let outside = Point2D::new(10.0, 75.0);
        let mut state = engine.start(outside, outside);
        assert_eq!(engine.step(&mut state).outcome, Some(ClipOutcome::Rejected));
    }

    #[test]
    fn test_clip_matches_stepwise_result() {
        let engine = engine();
        let clipped = engine
            .clip(Point2D::new(20.0, 120.0), Point2D::new(180.0, 30.0))
            .unwrap();
        assert_relative_eq!(clipped.1.x, 50.0);
        assert_relative_eq!(clipped.1.y, 103.125);
        assert_relative_eq!(clipped.0.y, 50.0);
        assert_relative_eq!(clipped.0.x, 144.44444, epsilon = 1e-3);

        assert!(
            engine
                .clip(Point2D::new(0.0, 0.0), Point2D::new(40.0, 200.0))
                .is_none()
        );
    }

    #[test]
    fn test_random_segments_converge_inside_window() {
        let engine = engine();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..500 {
            let p1 = Point2D::new(rng.random_range(-100.0..300.0), rng.random_range(-100.0..300.0));
            let p2 = Point2D::new(rng.random_range(-100.0..300.0), rng.random_range(-100.0..300.0));
            let mut state = engine.start(p1, p2);

            let mut steps = 0;
            while !engine.step(&mut state).is_terminal() {
                steps += 1;
                assert!(steps < 40, "keine Konvergenz für {:?} -> {:?}", p1, p2);
            }

            if state.trivial_outcome() == Some(ClipOutcome::Accepted) {
                let grown = ClipWindow::new(
                    engine.window().min() - Point2D::splat(1e-3),
                    engine.window().max() + Point2D::splat(1e-3),
                )
                .unwrap();
                assert!(grown.contains_point(state.p1()));
                assert!(grown.contains_point(state.p2()));
            }
        }
    }

    #[test]
    fn test_first_in_priority() {
        assert_eq!(ClipEdge::first_in(OutCode::empty()), None);
        assert_eq!(
            ClipEdge::first_in(Region::Top | Region::Right),
            Some(ClipEdge::Right)
        );
        assert_eq!(
            ClipEdge::first_in(Region::Bottom | Region::Left),
            Some(ClipEdge::Left)
        );
        assert_eq!(ClipEdge::Bottom.to_string(), "BOTTOM");
    }
}
