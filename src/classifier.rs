use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::classifier::{DEAD_ZONE_THRESHOLD, STRICT_THRESHOLD};
use crate::data::{RawRecord, Record, Sentiment};
use crate::errors::ScoringFailure;
use crate::scoring::{PolarityScorer, checked_polarity};
use crate::utils::scorable_text;

/// Threshold rule used to map a polarity onto a sentiment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdMode {
    /// `p > 0` is positive, `p < 0` is negative, exactly zero is neutral.
    #[default]
    Strict,
    /// Polarities within `[-0.05, 0.05]` (inclusive) are neutral.
    #[serde(alias = "dead_zone", alias = "dead-zone")]
    DeadZone,
}

impl ThresholdMode {
    /// Absolute polarity a score must exceed to be non-neutral.
    pub const fn threshold(&self) -> f64 {
        match self {
            ThresholdMode::Strict => STRICT_THRESHOLD,
            ThresholdMode::DeadZone => DEAD_ZONE_THRESHOLD,
        }
    }

    /// Map a polarity onto a sentiment. Boundary values are neutral.
    pub fn classify_polarity(&self, polarity: f64) -> Sentiment {
        let threshold = self.threshold();
        if polarity > threshold {
            Sentiment::Positive
        } else if polarity < -threshold {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

/// Sentiment plus the polarity it was derived from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Verdict {
    /// Derived sentiment label.
    pub sentiment: Sentiment,
    /// Scorer output; `None` when the text was blank and the scorer was skipped.
    pub polarity: Option<f64>,
}

/// Maps raw post text onto a sentiment via a [`PolarityScorer`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Classifier {
    mode: ThresholdMode,
}

impl Classifier {
    /// Create a classifier using `mode` thresholds.
    pub fn new(mode: ThresholdMode) -> Self {
        Self { mode }
    }

    /// Configured threshold mode.
    pub fn mode(&self) -> ThresholdMode {
        self.mode
    }

    /// Classify `text`.
    ///
    /// Missing or whitespace-only text is `Neutral` and never reaches the scorer.
    /// Scorer failures are returned to the caller for that single text.
    pub fn classify<S>(&self, text: Option<&str>, scorer: &S) -> Result<Verdict, ScoringFailure>
    where
        S: PolarityScorer + ?Sized,
    {
        let Some(normalized) = scorable_text(text) else {
            return Ok(Verdict {
                sentiment: Sentiment::Neutral,
                polarity: None,
            });
        };
        let polarity = checked_polarity(scorer.score(&normalized)?)?;
        Ok(Verdict {
            sentiment: self.mode.classify_polarity(polarity),
            polarity: Some(polarity),
        })
    }

    /// Label a loaded row, substituting `Neutral` when scoring fails.
    ///
    /// The failure, if any, is returned alongside the record so callers can
    /// count it without aborting the batch.
    pub fn label<S>(&self, raw: RawRecord, scorer: &S) -> (Record, Option<ScoringFailure>)
    where
        S: PolarityScorer + ?Sized,
    {
        match self.classify(raw.text.as_deref(), scorer) {
            Ok(verdict) => (raw.label(verdict.sentiment, verdict.polarity), None),
            Err(failure) => {
                debug!(
                    "[sentiment:classifier] scoring failed for '{}' record, using Neutral: {}",
                    raw.category, failure
                );
                (raw.label(Sentiment::Neutral, None), Some(failure))
            }
        }
    }
}
