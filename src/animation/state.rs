use bevy::prelude::*;

#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AnimationState {
    #[default] // Startzustand: Endpunkte setzen
    Idle,
    Running,
    Paused,
    /// Lauf ist terminal (akzeptiert oder verworfen)
    Finished,
}

impl AnimationState {
    /// Endpunkte dürfen nur vor oder nach einem Lauf bewegt werden
    pub fn allows_editing(self) -> bool {
        matches!(self, AnimationState::Idle | AnimationState::Finished)
    }
}
