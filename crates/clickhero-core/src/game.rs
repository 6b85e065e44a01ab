use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Start,
    Game,
    Wrapup,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseTrigger {
    Action,
    PlaybackEnded,
}

impl GamePhase {
    /// The only valid phase changes. `None` means the trigger does not move
    /// this phase; an action during `Game` belongs to the input resolver.
    pub fn next(self, trigger: PhaseTrigger) -> Option<GamePhase> {
        match (self, trigger) {
            (GamePhase::Start, PhaseTrigger::Action) => Some(GamePhase::Game),
            (GamePhase::Game, PhaseTrigger::PlaybackEnded) => Some(GamePhase::Wrapup),
            (GamePhase::Wrapup, PhaseTrigger::Action) => Some(GamePhase::Game),
            _ => None,
        }
    }
}
