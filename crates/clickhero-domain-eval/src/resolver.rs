use crate::stats::ScoreStats;
use crate::threshold::{AccuracyTier, ThresholdTable};
use clickhero_domain_chart::{MusicEvent, Timeline};
use clickhero_ports::types::{Rgba, Seconds};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolverConfig {
    pub max_window_s: Seconds,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { max_window_s: 0.5 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub event_index: usize,
    pub offset_s: Seconds,
    pub tier: AccuracyTier,
    pub score: i64,
    pub message: String,
    pub color: Rgba,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EventRuntimeState {
    index: usize,
    event: MusicEvent,
    consumed_at_s: Option<Seconds>,
    result: Option<ScoreResult>,
}

impl EventRuntimeState {
    fn new(index: usize, event: MusicEvent) -> Self {
        Self {
            index,
            event,
            consumed_at_s: None,
            result: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn event(&self) -> &MusicEvent {
        &self.event
    }

    pub fn consumed_at_s(&self) -> Option<Seconds> {
        self.consumed_at_s
    }

    pub fn result(&self) -> Option<&ScoreResult> {
        self.result.as_ref()
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed_at_s.is_some()
    }

    fn is_candidate(&self, now_s: Seconds, max_window_s: Seconds) -> bool {
        self.event.is_clickable()
            && !self.is_consumed()
            && (now_s - self.event.time_s).abs() <= max_window_s
    }
}

/// Matches each discrete player action to the nearest unconsumed clickable
/// event and scores it. Every event is consumed at most once.
pub struct InputResolver {
    config: ResolverConfig,
    table: ThresholdTable,
    states: Vec<EventRuntimeState>,
    stats: ScoreStats,
    expiry_cursor: usize,
}

impl InputResolver {
    pub fn new(timeline: &Timeline, config: ResolverConfig, table: ThresholdTable) -> Self {
        let states = timeline
            .iter()
            .enumerate()
            .map(|(index, event)| EventRuntimeState::new(index, *event))
            .collect();
        Self {
            config,
            table,
            states,
            stats: ScoreStats::default(),
            expiry_cursor: 0,
        }
    }

    pub fn resolve(&mut self, now_s: Seconds) -> Option<ScoreResult> {
        let prev = self.nearest_before(now_s);
        let next = self.nearest_at_or_after(now_s);

        let chosen = match (prev, next) {
            (Some(prev), Some(next)) => {
                let prev_distance = now_s - self.states[prev].event.time_s;
                let next_distance = self.states[next].event.time_s - now_s;
                if prev_distance <= next_distance {
                    prev
                } else {
                    next
                }
            }
            (Some(only), None) | (None, Some(only)) => only,
            (None, None) => {
                self.stats.record_whiff();
                debug!(now_s, "action matched no event");
                return None;
            }
        };

        let state = &mut self.states[chosen];
        let offset_s = now_s - state.event.time_s;
        let class = self.table.classify(offset_s);
        let result = ScoreResult {
            event_index: state.index,
            offset_s,
            tier: class.tier,
            score: class.score,
            message: class.message.to_string(),
            color: class.color,
        };
        state.consumed_at_s = Some(now_s);
        state.result = Some(result.clone());
        self.stats.record(class.tier, class.score);

        debug!(
            event_index = result.event_index,
            offset_s,
            tier = class.tier.label(),
            "action scored"
        );
        Some(result)
    }

    /// Expired events are not consumed, but they are never matched afterwards.
    pub fn expire_through(&mut self, now_s: Seconds) -> Vec<usize> {
        let mut expired = Vec::new();
        while let Some(state) = self.states.get(self.expiry_cursor) {
            if now_s - state.event.time_s <= self.config.max_window_s {
                break;
            }
            if state.event.is_clickable() && !state.is_consumed() {
                expired.push(state.index);
            }
            self.expiry_cursor += 1;
        }
        for _ in &expired {
            self.stats.record_expired();
        }
        expired
    }

    // Events this far behind a playback cue were never playable; they are
    // neither counted as expired nor matched.
    pub fn skip_before(&mut self, time_s: Seconds) {
        let skipped = self.split_point(time_s);
        if skipped > self.expiry_cursor {
            debug!(skipped, time_s, "events before cue skipped");
            self.expiry_cursor = skipped;
        }
    }

    pub fn states(&self) -> &[EventRuntimeState] {
        &self.states
    }

    pub fn state(&self, index: usize) -> Option<&EventRuntimeState> {
        self.states.get(index)
    }

    pub fn stats(&self) -> &ScoreStats {
        &self.stats
    }

    pub fn cumulative_score(&self) -> i64 {
        self.stats.score
    }

    pub fn config(&self) -> ResolverConfig {
        self.config
    }

    pub fn table(&self) -> &ThresholdTable {
        &self.table
    }

    fn split_point(&self, now_s: Seconds) -> usize {
        self.states
            .partition_point(|state| state.event.time_s < now_s)
    }

    // Walks back from the split so the first candidate found is the latest one
    // strictly before `now_s`, i.e. the closest.
    fn nearest_before(&self, now_s: Seconds) -> Option<usize> {
        let max_window_s = self.config.max_window_s;
        let split = self.split_point(now_s).max(self.expiry_cursor);
        self.states[self.expiry_cursor..split]
            .iter()
            .rev()
            .take_while(|state| now_s - state.event.time_s <= max_window_s)
            .find(|state| state.is_candidate(now_s, max_window_s))
            .map(|state| state.index)
    }

    fn nearest_at_or_after(&self, now_s: Seconds) -> Option<usize> {
        let max_window_s = self.config.max_window_s;
        let split = self.split_point(now_s).max(self.expiry_cursor);
        self.states[split..]
            .iter()
            .take_while(|state| state.event.time_s - now_s <= max_window_s)
            .find(|state| state.is_candidate(now_s, max_window_s))
            .map(|state| state.index)
    }
}
