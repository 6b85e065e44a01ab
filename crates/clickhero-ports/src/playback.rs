use crate::types::Seconds;

#[derive(thiserror::Error, Debug)]
pub enum PlaybackError {
    #[error("audio locked: {0}")]
    Locked(String),
    #[error("backend error: {0}")]
    Backend(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PlaybackStatus {
    pub playing: bool,
    pub paused: bool,
    pub finished: bool,
}

impl PlaybackStatus {
    /// Track ran out on its own, as opposed to being paused mid-way.
    pub fn ended(self) -> bool {
        self.finished && !self.playing && !self.paused
    }
}

pub trait PlaybackClockPort {
    fn current_time_s(&self) -> Seconds;
    fn duration_s(&self) -> Option<Seconds>;
    fn status(&self) -> PlaybackStatus;

    fn is_playing(&self) -> bool {
        self.status().playing
    }

    fn is_finished(&self) -> bool {
        self.status().finished
    }

    fn start(&mut self, cue_s: Seconds) -> Result<(), PlaybackError>;
    fn pause(&mut self) -> Result<(), PlaybackError>;
    fn resume(&mut self) -> Result<(), PlaybackError>;
    fn stop(&mut self) -> Result<(), PlaybackError>;
}
