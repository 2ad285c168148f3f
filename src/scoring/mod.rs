//! Polarity scoring capability.
//!
//! The pipeline only depends on [`PolarityScorer`]; backends are swappable:
//! - [`LexiconScorer`] is the built-in word-list backend.
//! - [`FixedScorer`] returns configured scores and is meant for deterministic tests.
//! - [`DeadlineScorer`] bounds any backend with a per-call deadline.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::constants::classifier::{POLARITY_MAX, POLARITY_MIN};
use crate::errors::ScoringFailure;

/// Built-in lexicon backend.
pub mod lexicon;

pub use lexicon::LexiconScorer;

/// Narrow scoring interface: text in, polarity in `[-1, 1]` out.
///
/// Implementations must be deterministic for a fixed text so aggregates are
/// reproducible across runs.
pub trait PolarityScorer: Send + Sync {
    /// Score `text`, which the caller has already whitespace-normalized and
    /// guaranteed non-empty.
    fn score(&self, text: &str) -> Result<f64, ScoringFailure>;
}

impl<S: PolarityScorer + ?Sized> PolarityScorer for Arc<S> {
    fn score(&self, text: &str) -> Result<f64, ScoringFailure> {
        (**self).score(text)
    }
}

impl<S: PolarityScorer + ?Sized> PolarityScorer for Box<S> {
    fn score(&self, text: &str) -> Result<f64, ScoringFailure> {
        (**self).score(text)
    }
}

/// Reject non-finite scores and clamp finite ones into `[-1, 1]`.
pub fn checked_polarity(value: f64) -> Result<f64, ScoringFailure> {
    if !value.is_finite() {
        return Err(ScoringFailure::NonFinite { value });
    }
    Ok(value.clamp(POLARITY_MIN, POLARITY_MAX))
}

/// Deterministic stub returning per-text overrides or a default score.
#[derive(Clone, Debug, Default)]
pub struct FixedScorer {
    default: f64,
    overrides: HashMap<String, Result<f64, ScoringFailure>>,
}

impl FixedScorer {
    /// Create a stub that returns `default` for every unknown text.
    pub fn new(default: f64) -> Self {
        Self {
            default,
            overrides: HashMap::new(),
        }
    }

    /// Return `polarity` whenever the scored text equals `text`.
    pub fn with_score(mut self, text: impl Into<String>, polarity: f64) -> Self {
        self.overrides.insert(text.into(), Ok(polarity));
        self
    }

    /// Fail with `failure` whenever the scored text equals `text`.
    pub fn with_failure(mut self, text: impl Into<String>, failure: ScoringFailure) -> Self {
        self.overrides.insert(text.into(), Err(failure));
        self
    }
}

impl PolarityScorer for FixedScorer {
    fn score(&self, text: &str) -> Result<f64, ScoringFailure> {
        match self.overrides.get(text) {
            Some(result) => result.clone(),
            None => Ok(self.default),
        }
    }
}

/// Wraps a scorer with a per-call deadline.
///
/// The inner call is not interrupted; a score that arrives after the deadline
/// is discarded and reported as [`ScoringFailure::DeadlineExceeded`].
#[derive(Clone, Debug)]
pub struct DeadlineScorer<S> {
    inner: S,
    deadline: Duration,
}

impl<S: PolarityScorer> DeadlineScorer<S> {
    /// Bound `inner` with `deadline`.
    pub fn new(inner: S, deadline: Duration) -> Self {
        Self { inner, deadline }
    }

    /// Configured per-call deadline.
    pub fn deadline(&self) -> Duration {
        self.deadline
    }
}

impl<S: PolarityScorer> PolarityScorer for DeadlineScorer<S> {
    fn score(&self, text: &str) -> Result<f64, ScoringFailure> {
        let started = Instant::now();
        let result = self.inner.score(text);
        let elapsed = started.elapsed();
        if elapsed > self.deadline {
            return Err(ScoringFailure::DeadlineExceeded {
                elapsed,
                deadline: self.deadline,
            });
        }
        result
    }
}
