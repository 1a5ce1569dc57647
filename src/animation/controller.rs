// src/animation/controller.rs

//! Owns one Cohen-Sutherland run across animation ticks.
//!
//! The controller is plain data: a host (the bevy scheduler in this app, or a
//! test) calls [`AnimationController::tick`] once per animation step and reads
//! the accessors to draw the intermediate picture. Independent controllers
//! share nothing.

use crate::math::{
    algorithms::{AlgState, ClipEdge, ClipEngine, ClipOutcome, OutCode, Phase, StepResult},
    error::{ClipError, ClipResult},
    types::{ClipWindow, Point2D, Segment},
};
use bevy::log::{debug, info};

/// External view of the controller state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Idle,
    Running,
    Terminal(ClipOutcome),
}

#[derive(Debug, Clone, PartialEq)]
struct ClipRun {
    engine: ClipEngine,
    state: AlgState,
    original: Segment,
    previous: Segment,
    touched_edge: Option<ClipEdge>,
    outcome: Option<ClipOutcome>,
    status: String,
    steps: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationController {
    run: Option<ClipRun>,
}

impl AnimationController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new run for `p1 → p2` against `window`, discarding any run in
    /// progress. On error the previous run is kept unchanged.
    ///
    /// The window itself is validated by [`ClipWindow::new`]; here only the
    /// endpoints are checked.
    pub fn reset(&mut self, p1: Point2D, p2: Point2D, window: ClipWindow) -> ClipResult<()> {
        for (label, point) in [("P1", p1), ("P2", p2)] {
            if !point.is_finite() {
                return Err(ClipError::NonFiniteCoordinate { label, point });
            }
        }

        let engine = ClipEngine::new(window);
        let state = engine.start(p1, p2);
        info!(
            "Clipping run started: {:?} -> {:?} against {} (codes {:?} / {:?})",
            p1,
            p2,
            window,
            state.code1(),
            state.code2()
        );

        self.run = Some(ClipRun {
            engine,
            state,
            original: (p1, p2),
            previous: (p1, p2),
            touched_edge: None,
            outcome: None,
            status: "Animation started...".to_string(),
            steps: 0,
        });
        Ok(())
    }

    /// Abandons the current run and returns to `Idle`.
    pub fn stop(&mut self) {
        if self.run.take().is_some() {
            debug!("Clipping run stopped");
        }
    }

    /// Performs one unit of algorithmic progress.
    ///
    /// Returns `None` without doing anything when idle or already terminal.
    pub fn tick(&mut self) -> Option<StepResult> {
        let run = self.run.as_mut()?;
        if run.outcome.is_some() {
            return None;
        }

        let result = run.engine.step(&mut run.state);
        run.steps += 1;
        run.previous = result.before;
        run.touched_edge = result.touched_edge;
        run.outcome = result.outcome;
        run.status = format!("Step: {} - {}", run.steps, result.message);

        debug!(
            "Step {} ({:?}): {} | edge {:?} | {:?} -> {:?}",
            run.steps, result.phase, result.message, result.touched_edge, result.before, result.after
        );
        if let Some(outcome) = result.outcome {
            info!(
                "Clipping run finished after {} steps: {:?}, segment {:?}",
                run.steps, outcome, result.after
            );
        }

        Some(result)
    }

    pub fn lifecycle(&self) -> Lifecycle {
        match &self.run {
            None => Lifecycle::Idle,
            Some(run) => match run.outcome {
                Some(outcome) => Lifecycle::Terminal(outcome),
                None => Lifecycle::Running,
            },
        }
    }

    pub fn is_idle(&self) -> bool {
        self.run.is_none()
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    pub fn is_accepted(&self) -> bool {
        self.outcome() == Some(ClipOutcome::Accepted)
    }

    pub fn outcome(&self) -> Option<ClipOutcome> {
        self.run.as_ref().and_then(|run| run.outcome)
    }

    /// Current endpoints `(p1, p2)`; after a swap P1 is the former P2.
    pub fn current_segment(&self) -> Option<Segment> {
        self.run.as_ref().map(|run| run.state.segment())
    }

    /// Segment as it was before the last tick.
    pub fn previous_segment(&self) -> Option<Segment> {
        self.run.as_ref().map(|run| run.previous)
    }

    /// Segment passed to the last `reset`.
    pub fn original_segment(&self) -> Option<Segment> {
        self.run.as_ref().map(|run| run.original)
    }

    pub fn codes(&self) -> Option<(OutCode, OutCode)> {
        self.run
            .as_ref()
            .map(|run| (run.state.code1(), run.state.code2()))
    }

    /// Boundary clipped by the last tick, if that tick was an edge clip.
    pub fn touched_edge(&self) -> Option<ClipEdge> {
        self.run.as_ref().and_then(|run| run.touched_edge)
    }

    pub fn swapped(&self) -> bool {
        self.run.as_ref().is_some_and(|run| run.state.swapped())
    }

    pub fn phase(&self) -> Option<Phase> {
        self.run.as_ref().map(|run| run.state.phase())
    }

    pub fn window(&self) -> Option<&ClipWindow> {
        self.run.as_ref().map(|run| run.engine.window())
    }

    pub fn status(&self) -> &str {
        self.run.as_ref().map_or("", |run| run.status.as_str())
    }

    pub fn step_count(&self) -> usize {
        self.run.as_ref().map_or(0, |run| run.steps)
    }
}
