use clickhero_domain_chart::{CueVisibility, MusicEvent, Timeline};
use clickhero_ports::types::Seconds;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FiredEvent {
    pub index: usize,
    pub event: MusicEvent,
}

pub struct EventDispatcher {
    timeline: Arc<Timeline>,
    cursor: usize,
}

impl EventDispatcher {
    pub fn new(timeline: Arc<Timeline>) -> Self {
        Self {
            timeline,
            cursor: 0,
        }
    }

    /// Fires every event whose time has been crossed, not just the next one,
    /// so frame drops and seeks never leave events behind.
    pub fn advance(&mut self, now_s: Seconds, cues: &mut CueVisibility) -> Vec<FiredEvent> {
        let mut fired = Vec::new();
        while let Some(event) = self.timeline.event_at(self.cursor) {
            if event.time_s > now_s {
                break;
            }
            cues.apply(event.tags);
            fired.push(FiredEvent {
                index: self.cursor,
                event: *event,
            });
            self.cursor += 1;
        }
        fired
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_done(&self) -> bool {
        self.cursor >= self.timeline.len()
    }
}
