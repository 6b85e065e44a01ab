use clickhero_ports::storage::TimingWindowsDto;
use clickhero_ports::types::{Rgba, Seconds};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AccuracyTier {
    Perfect,
    Great,
    Good,
    Ok,
    Miss,
}

impl AccuracyTier {
    pub const ALL: [AccuracyTier; 5] = [
        AccuracyTier::Perfect,
        AccuracyTier::Great,
        AccuracyTier::Good,
        AccuracyTier::Ok,
        AccuracyTier::Miss,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AccuracyTier::Perfect => "PERFECT",
            AccuracyTier::Great => "GREAT",
            AccuracyTier::Good => "GOOD",
            AccuracyTier::Ok => "OK",
            AccuracyTier::Miss => "MISS",
        }
    }

    pub fn is_hit(self) -> bool {
        self != AccuracyTier::Miss
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ThresholdError {
    #[error("{tier:?} threshold must be positive, got {threshold_s}s")]
    NonPositive {
        tier: AccuracyTier,
        threshold_s: Seconds,
    },
    #[error("{tier:?} threshold {threshold_s}s does not exceed the previous tier's {previous_s}s")]
    NotAscending {
        tier: AccuracyTier,
        threshold_s: Seconds,
        previous_s: Seconds,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdRow {
    pub tier: AccuracyTier,
    pub threshold_s: Seconds,
    pub score: i64,
    pub message: &'static str,
    pub color: Rgba,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Classification {
    pub tier: AccuracyTier,
    pub score: i64,
    pub message: &'static str,
    pub color: Rgba,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdTable {
    rows: [ThresholdRow; 5],
}

const CREAM: Rgba = Rgba::opaque(0xFB, 0xF2, 0xB2);
const TEAL: Rgba = Rgba::opaque(0x18, 0xA5, 0xB1);
const DARK_BLUE: Rgba = Rgba::opaque(0x28, 0x30, 0x6A);
const GREY: Rgba = Rgba::opaque(0x9A, 0x9A, 0x9A);
const RED: Rgba = Rgba::opaque(0xD1, 0x39, 0x38);

impl ThresholdTable {
    pub fn from_windows(windows: TimingWindowsDto) -> Result<Self, ThresholdError> {
        let rows = tier_rows(windows);

        let mut previous_s = 0.0;
        for row in &rows {
            if row.threshold_s.is_nan() || row.threshold_s <= 0.0 {
                return Err(ThresholdError::NonPositive {
                    tier: row.tier,
                    threshold_s: row.threshold_s,
                });
            }
            if row.threshold_s <= previous_s {
                return Err(ThresholdError::NotAscending {
                    tier: row.tier,
                    threshold_s: row.threshold_s,
                    previous_s,
                });
            }
            previous_s = row.threshold_s;
        }

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[ThresholdRow] {
        &self.rows
    }

    /// Picks the first tier whose threshold is strictly greater than the
    /// distance, so a distance landing exactly on a boundary falls into the
    /// next, less strict tier.
    pub fn classify(&self, offset_s: Seconds) -> Classification {
        let distance = offset_s.abs();
        let row = self
            .rows
            .iter()
            .find(|row| distance < row.threshold_s)
            .unwrap_or(&self.rows[self.rows.len() - 1]);
        Classification {
            tier: row.tier,
            score: row.score,
            message: row.message,
            color: row.color,
        }
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self {
            rows: tier_rows(TimingWindowsDto::default()),
        }
    }
}

fn tier_rows(windows: TimingWindowsDto) -> [ThresholdRow; 5] {
    [
        row(AccuracyTier::Perfect, windows.perfect, 1000, "Perfect!", CREAM),
        row(AccuracyTier::Great, windows.great, 500, "Great!", TEAL),
        row(AccuracyTier::Good, windows.good, 250, "Good!", DARK_BLUE),
        row(AccuracyTier::Ok, windows.ok, 100, "OK", GREY),
        row(AccuracyTier::Miss, Seconds::INFINITY, 0, "Miss", RED),
    ]
}

fn row(
    tier: AccuracyTier,
    threshold_s: Seconds,
    score: i64,
    message: &'static str,
    color: Rgba,
) -> ThresholdRow {
    ThresholdRow {
        tier,
        threshold_s,
        score,
        message,
        color,
    }
}
