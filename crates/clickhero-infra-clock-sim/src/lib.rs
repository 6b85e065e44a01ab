use clickhero_ports::playback::{PlaybackClockPort, PlaybackError, PlaybackStatus};
use clickhero_ports::types::Seconds;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SimState {
    Stopped,
    Playing,
    Paused,
    Finished,
}

#[derive(Debug)]
struct Inner {
    duration_s: Seconds,
    position_s: Seconds,
    state: SimState,
}

/// Deterministic stand-in for an audio source. Time only moves when the
/// driver calls [`SimulatedPlayback::advance`]; clones share one clock so a
/// frame loop can keep a handle while the engine owns another.
#[derive(Clone, Debug)]
pub struct SimulatedPlayback {
    inner: Arc<Mutex<Inner>>,
}

impl SimulatedPlayback {
    pub fn new(duration_s: Seconds) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                duration_s: duration_s.max(0.0),
                position_s: 0.0,
                state: SimState::Stopped,
            })),
        }
    }

    pub fn advance(&self, dt_s: Seconds) {
        let mut inner = self.inner.lock();
        if inner.state != SimState::Playing {
            return;
        }
        inner.position_s += dt_s.max(0.0);
        if inner.position_s >= inner.duration_s {
            inner.position_s = inner.duration_s;
            inner.state = SimState::Finished;
        }
    }

    pub fn seek(&self, position_s: Seconds) {
        let mut inner = self.inner.lock();
        inner.position_s = position_s.clamp(0.0, inner.duration_s);
    }
}

impl PlaybackClockPort for SimulatedPlayback {
    fn current_time_s(&self) -> Seconds {
        self.inner.lock().position_s
    }

    fn duration_s(&self) -> Option<Seconds> {
        Some(self.inner.lock().duration_s)
    }

    fn status(&self) -> PlaybackStatus {
        let state = self.inner.lock().state;
        PlaybackStatus {
            playing: state == SimState::Playing,
            paused: state == SimState::Paused,
            finished: state == SimState::Finished,
        }
    }

    fn start(&mut self, cue_s: Seconds) -> Result<(), PlaybackError> {
        let mut inner = self.inner.lock();
        if cue_s >= inner.duration_s {
            return Err(PlaybackError::Backend(format!(
                "cue {cue_s}s is past the end of a {}s track",
                inner.duration_s
            )));
        }
        inner.position_s = cue_s.max(0.0);
        inner.state = SimState::Playing;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlaybackError> {
        let mut inner = self.inner.lock();
        if inner.state == SimState::Playing {
            inner.state = SimState::Paused;
        }
        Ok(())
    }

    fn resume(&mut self) -> Result<(), PlaybackError> {
        let mut inner = self.inner.lock();
        if inner.state == SimState::Paused {
            inner.state = SimState::Playing;
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), PlaybackError> {
        let mut inner = self.inner.lock();
        inner.state = SimState::Stopped;
        inner.position_s = 0.0;
        Ok(())
    }
}
