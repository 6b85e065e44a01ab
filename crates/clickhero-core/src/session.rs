use crate::dispatcher::{EventDispatcher, FiredEvent};
use crate::game::GamePhase;
use clickhero_domain_chart::{CueVisibility, Timeline};
use clickhero_domain_eval::{
    EventRuntimeState, InputResolver, ResolverConfig, ScoreResult, ScoreStats, ThresholdTable,
};
use clickhero_ports::types::Seconds;
use std::sync::Arc;

pub struct PlaySession {
    timeline: Arc<Timeline>,
    dispatcher: EventDispatcher,
    resolver: InputResolver,
    cue_visibility: CueVisibility,
    last_action_s: Option<Seconds>,
    last_result: Option<ScoreResult>,
    phase: GamePhase,
}

impl PlaySession {
    pub fn new(
        timeline: Arc<Timeline>,
        config: ResolverConfig,
        table: ThresholdTable,
        phase: GamePhase,
    ) -> Self {
        Self {
            dispatcher: EventDispatcher::new(timeline.clone()),
            resolver: InputResolver::new(&timeline, config, table),
            timeline,
            cue_visibility: CueVisibility::default(),
            last_action_s: None,
            last_result: None,
            phase,
        }
    }

    pub fn advance(&mut self, now_s: Seconds) -> Vec<FiredEvent> {
        self.dispatcher.advance(now_s, &mut self.cue_visibility)
    }

    pub fn resolve_action(&mut self, now_s: Seconds) -> Option<ScoreResult> {
        self.last_action_s = Some(now_s);
        let result = self.resolver.resolve(now_s);
        if result.is_some() {
            self.last_result = result.clone();
        }
        result
    }

    pub fn expire_through(&mut self, now_s: Seconds) -> Vec<usize> {
        self.resolver.expire_through(now_s)
    }

    pub fn skip_before(&mut self, time_s: Seconds) {
        self.resolver.skip_before(time_s);
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        self.resolver.config()
    }

    pub fn timeline(&self) -> &Arc<Timeline> {
        &self.timeline
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        self.phase = phase;
    }

    pub fn cursor(&self) -> usize {
        self.dispatcher.cursor()
    }

    pub fn is_dispatch_done(&self) -> bool {
        self.dispatcher.is_done()
    }

    pub fn cue_visibility(&self) -> CueVisibility {
        self.cue_visibility
    }

    pub fn cumulative_score(&self) -> i64 {
        self.resolver.cumulative_score()
    }

    pub fn last_action_s(&self) -> Option<Seconds> {
        self.last_action_s
    }

    pub fn last_result(&self) -> Option<&ScoreResult> {
        self.last_result.as_ref()
    }

    pub fn stats(&self) -> &ScoreStats {
        self.resolver.stats()
    }

    pub fn event_states(&self) -> &[EventRuntimeState] {
        self.resolver.states()
    }
}
