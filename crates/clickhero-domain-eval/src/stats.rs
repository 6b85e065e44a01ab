use crate::threshold::AccuracyTier;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreStats {
    pub score: i64,
    pub perfect: u32,
    pub great: u32,
    pub good: u32,
    pub ok: u32,
    pub miss: u32,
    /// Clickable events whose window closed without any action.
    pub expired: u32,
    /// Actions that found no candidate event.
    pub whiffs: u32,
    pub combo: u32,
    pub max_combo: u32,
}

impl ScoreStats {
    pub fn record(&mut self, tier: AccuracyTier, score: i64) {
        self.score += score;
        match tier {
            AccuracyTier::Perfect => self.perfect += 1,
            AccuracyTier::Great => self.great += 1,
            AccuracyTier::Good => self.good += 1,
            AccuracyTier::Ok => self.ok += 1,
            AccuracyTier::Miss => self.miss += 1,
        }
        if tier.is_hit() {
            self.combo += 1;
            self.max_combo = self.max_combo.max(self.combo);
        } else {
            self.combo = 0;
        }
    }

    pub fn record_expired(&mut self) {
        self.expired += 1;
        self.combo = 0;
    }

    pub fn record_whiff(&mut self) {
        self.whiffs += 1;
    }

    pub fn count(&self, tier: AccuracyTier) -> u32 {
        match tier {
            AccuracyTier::Perfect => self.perfect,
            AccuracyTier::Great => self.great,
            AccuracyTier::Good => self.good,
            AccuracyTier::Ok => self.ok,
            AccuracyTier::Miss => self.miss,
        }
    }

    pub fn hits(&self) -> u32 {
        self.perfect + self.great + self.good + self.ok
    }

    pub fn accuracy(&self) -> f32 {
        let judged = self.hits() + self.miss + self.expired;
        if judged == 0 {
            0.0
        } else {
            self.hits() as f32 / judged as f32
        }
    }
}
