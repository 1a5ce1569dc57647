// src/animation/history.rs
use super::controller::AnimationController;
use bevy::prelude::*;
use std::collections::VecDeque;

// StepSnapshot definiert, was pro Animationsschritt gespeichert wird.
#[derive(Clone, Debug)]
pub struct StepSnapshot {
    pub step: usize,
    pub message: String,
    pub controller: AnimationController,
}

impl StepSnapshot {
    pub fn capture(controller: &AnimationController, message: impl Into<String>) -> Self {
        Self {
            step: controller.step_count(),
            message: message.into(),
            controller: controller.clone(),
        }
    }
}

// StepHistory verwaltet die Sammlung von Snapshots eines Clipping-Laufs.
#[derive(Resource, Debug)]
pub struct StepHistory {
    pub snapshots: VecDeque<StepSnapshot>,
    pub max_size: usize,
    /// Index des aktuell *angezeigten* Snapshots in der `snapshots` VecDeque.
    pub current_display_snapshot_index: Option<usize>,
}

impl StepHistory {
    pub fn new(max_size: usize) -> Self {
        let max_size = max_size.max(1);
        Self {
            snapshots: VecDeque::with_capacity(max_size),
            max_size,
            current_display_snapshot_index: None,
        }
    }

    pub fn add_snapshot(&mut self, snapshot: StepSnapshot) {
        if self.snapshots.len() == self.max_size {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(snapshot);
        // Nach dem Hinzufügen wird der neue Snapshot zum aktuell angezeigten
        self.current_display_snapshot_index = Some(self.snapshots.len() - 1);
    }

    pub fn get_current_display_snapshot(&self) -> Option<&StepSnapshot> {
        self.current_display_snapshot_index
            .and_then(|idx| self.snapshots.get(idx))
    }

    /// Geht einen Snapshot zurück und verwirft alles danach, damit ein
    /// weiterer Tick die Historie sauber fortsetzt.
    pub fn step_back(&mut self) -> Option<&StepSnapshot> {
        let current_idx = self.current_display_snapshot_index?;
        if current_idx == 0 {
            return None;
        }
        let prev_idx = current_idx - 1;
        self.snapshots.truncate(prev_idx + 1);
        self.current_display_snapshot_index = Some(prev_idx);
        self.snapshots.get(prev_idx)
    }

    /// Die letzten `count` Einträge, älteste zuerst
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &StepSnapshot> {
        let skip = self.snapshots.len().saturating_sub(count);
        self.snapshots.iter().skip(skip)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.current_display_snapshot_index = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::types::{ClipWindow, Point2D};

    fn started_controller() -> AnimationController {
        let mut controller = AnimationController::new();
        let window =
            ClipWindow::new(Point2D::new(50.0, 50.0), Point2D::new(150.0, 150.0)).unwrap();
        controller
            .reset(Point2D::new(20.0, 120.0), Point2D::new(180.0, 30.0), window)
            .unwrap();
        controller
    }

    #[test]
    fn test_eviction_keeps_newest() {
        let mut history = StepHistory::new(3);
        let mut controller = started_controller();
        history.add_snapshot(StepSnapshot::capture(&controller, "start"));
        for _ in 0..4 {
            let result = controller.tick().unwrap();
            history.add_snapshot(StepSnapshot::capture(&controller, result.message));
        }

        assert_eq!(history.len(), 3);
        let steps: Vec<usize> = history.snapshots.iter().map(|s| s.step).collect();
        assert_eq!(steps, vec![2, 3, 4]);
        assert_eq!(history.current_display_snapshot_index, Some(2));
        assert_eq!(history.get_current_display_snapshot().unwrap().step, 4);
    }

    #[test]
    fn test_step_back_restores_earlier_controller() {
        let mut history = StepHistory::new(10);
        let mut controller = started_controller();
        history.add_snapshot(StepSnapshot::capture(&controller, "start"));
        controller.tick();
        history.add_snapshot(StepSnapshot::capture(&controller, "check"));
        controller.tick();
        history.add_snapshot(StepSnapshot::capture(&controller, "swap"));

        let restored = history.step_back().unwrap().controller.clone();
        assert_eq!(restored.step_count(), 1);
        assert_eq!(history.len(), 2);

        assert_eq!(history.step_back().unwrap().step, 0);
        assert!(history.step_back().is_none());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_recent_and_clear() {
        let mut history = StepHistory::new(10);
        let controller = started_controller();
        for i in 0..5 {
            history.add_snapshot(StepSnapshot::capture(&controller, format!("m{}", i)));
        }
        let recent: Vec<&str> = history.recent(2).map(|s| s.message.as_str()).collect();
        assert_eq!(recent, vec!["m3", "m4"]);

        history.clear();
        assert!(history.is_empty());
        assert!(history.get_current_display_snapshot().is_none());
        assert!(history.step_back().is_none());
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut history = StepHistory::new(0);
        let controller = started_controller();
        history.add_snapshot(StepSnapshot::capture(&controller, "a"));
        history.add_snapshot(StepSnapshot::capture(&controller, "b"));
        assert_eq!(history.len(), 1);
    }
}
