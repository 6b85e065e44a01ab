use crate::model::{CueId, EventTag, MusicEvent};
use clickhero_ports::types::Seconds;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("event {index} at {time_s}s is not a finite, non-negative time")]
    InvalidTime { index: usize, time_s: Seconds },
    #[error("event {index} at {time_s}s comes before the previous event at {previous_s}s")]
    OutOfOrder {
        index: usize,
        previous_s: Seconds,
        time_s: Seconds,
    },
    #[error("event {index} both shows and hides cue {cue:?}")]
    ConflictingCueTags { index: usize, cue: CueId },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    events: Vec<MusicEvent>,
}

impl Timeline {
    pub fn new(events: Vec<MusicEvent>) -> Result<Self, ScheduleError> {
        let mut previous_s: Option<Seconds> = None;
        for (index, event) in events.iter().enumerate() {
            let time_s = event.time_s;
            if !time_s.is_finite() || time_s < 0.0 {
                return Err(ScheduleError::InvalidTime { index, time_s });
            }
            if let Some(previous_s) = previous_s {
                if time_s < previous_s {
                    return Err(ScheduleError::OutOfOrder {
                        index,
                        previous_s,
                        time_s,
                    });
                }
            }
            for cue in CueId::ALL {
                if event.tags.contains(EventTag::CueOn(cue))
                    && event.tags.contains(EventTag::CueOff(cue))
                {
                    return Err(ScheduleError::ConflictingCueTags { index, cue });
                }
            }
            previous_s = Some(time_s);
        }
        Ok(Self { events })
    }

    pub fn event_at(&self, index: usize) -> Option<&MusicEvent> {
        self.events.get(index)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn is_clickable(&self, index: usize) -> bool {
        self.events
            .get(index)
            .map(MusicEvent::is_clickable)
            .unwrap_or(false)
    }

    pub fn events(&self) -> &[MusicEvent] {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &MusicEvent> {
        self.events.iter()
    }

    pub fn first_at_or_after(&self, time_s: Seconds) -> usize {
        self.events.partition_point(|event| event.time_s < time_s)
    }

    pub fn clickable_count(&self) -> usize {
        self.events.iter().filter(|event| event.is_clickable()).count()
    }
}
