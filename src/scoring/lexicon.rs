use std::collections::{HashMap, HashSet};

use super::{PolarityScorer, checked_polarity};
use crate::errors::ScoringFailure;
use crate::utils::word_tokens;

/// Polarity multiplier applied to a word preceded by a negation.
const NEGATION_FACTOR: f64 = -0.5;
/// How many preceding tokens are checked for a negation.
const NEGATION_WINDOW: usize = 3;

/// Word-list polarity scorer tuned for disaster-related posts.
///
/// The score is the mean polarity of matched words after negation and
/// intensifier adjustments, clamped to `[-1, 1]`. Texts without any lexicon
/// word score `0.0`.
#[derive(Clone, Debug)]
pub struct LexiconScorer {
    words: HashMap<String, f64>,
    negations: HashSet<String>,
    intensifiers: HashMap<String, f64>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    /// Create a scorer with the built-in word lists.
    pub fn new() -> Self {
        let positive_words = [
            ("good", 0.7),
            ("great", 0.8),
            ("excellent", 1.0),
            ("amazing", 0.6),
            ("awesome", 1.0),
            ("best", 1.0),
            ("better", 0.5),
            ("safe", 0.5),
            ("safely", 0.5),
            ("survived", 0.4),
            ("survivor", 0.3),
            ("rescued", 0.5),
            ("rescue", 0.3),
            ("recover", 0.4),
            ("recovery", 0.4),
            ("relief", 0.4),
            ("help", 0.3),
            ("helpful", 0.6),
            ("support", 0.3),
            ("thank", 0.5),
            ("thanks", 0.5),
            ("grateful", 0.7),
            ("hope", 0.4),
            ("hopeful", 0.5),
            ("brave", 0.6),
            ("strong", 0.4),
            ("quick", 0.3),
            ("fast", 0.2),
            ("calm", 0.3),
            ("restored", 0.5),
            ("rebuild", 0.3),
            ("donate", 0.3),
            ("volunteer", 0.3),
            ("pray", 0.2),
            ("blessed", 0.6),
            ("love", 0.5),
            ("happy", 0.8),
            ("well", 0.2),
        ];
        let negative_words = [
            ("bad", -0.7),
            ("awful", -1.0),
            ("terrible", -1.0),
            ("horrible", -1.0),
            ("worst", -1.0),
            ("worse", -0.4),
            ("sad", -0.5),
            ("tragic", -0.8),
            ("tragedy", -0.8),
            ("disaster", -0.5),
            ("devastating", -0.9),
            ("devastated", -0.8),
            ("destroyed", -0.7),
            ("damage", -0.4),
            ("damaged", -0.4),
            ("dead", -0.6),
            ("death", -0.6),
            ("deaths", -0.6),
            ("died", -0.6),
            ("killed", -0.8),
            ("victim", -0.5),
            ("victims", -0.5),
            ("injured", -0.6),
            ("missing", -0.4),
            ("trapped", -0.6),
            ("panic", -0.6),
            ("fear", -0.6),
            ("scared", -0.6),
            ("afraid", -0.6),
            ("worried", -0.5),
            ("danger", -0.5),
            ("dangerous", -0.6),
            ("slow", -0.3),
            ("late", -0.3),
            ("failed", -0.5),
            ("fail", -0.5),
            ("angry", -0.5),
            ("loss", -0.4),
            ("lost", -0.3),
            ("homeless", -0.5),
            ("evacuate", -0.2),
            ("collapsed", -0.6),
            ("poor", -0.4),
            ("chaos", -0.6),
        ];
        let negations = [
            "not", "no", "never", "neither", "nobody", "nothing", "none", "cannot", "cant",
            "can't", "don't", "dont", "doesn't", "doesnt", "didn't", "didnt", "won't", "wont",
            "isn't", "isnt", "aren't", "arent", "wasn't", "wasnt", "hardly", "barely",
        ];
        let intensifiers = [
            ("very", 1.3),
            ("really", 1.3),
            ("extremely", 1.5),
            ("so", 1.2),
            ("totally", 1.3),
            ("incredibly", 1.5),
            ("absolutely", 1.5),
            ("slightly", 0.5),
            ("somewhat", 0.7),
        ];

        Self {
            words: positive_words
                .iter()
                .chain(negative_words.iter())
                .map(|(word, score)| (word.to_string(), *score))
                .collect(),
            negations: negations.iter().map(|word| word.to_string()).collect(),
            intensifiers: intensifiers
                .iter()
                .map(|(word, factor)| (word.to_string(), *factor))
                .collect(),
        }
    }

    /// Add or replace a word polarity.
    pub fn with_word(mut self, word: impl AsRef<str>, polarity: f64) -> Self {
        self.words.insert(word.as_ref().to_lowercase(), polarity);
        self
    }

    /// Number of polarity-bearing words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True when no polarity-bearing words are configured.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn adjusted_polarity(&self, tokens: &[String], idx: usize, base: f64) -> f64 {
        let mut polarity = base;
        if idx > 0
            && let Some(factor) = self.intensifiers.get(&tokens[idx - 1])
        {
            polarity *= factor;
        }
        let window_start = idx.saturating_sub(NEGATION_WINDOW);
        if tokens[window_start..idx]
            .iter()
            .any(|token| self.negations.contains(token))
        {
            polarity *= NEGATION_FACTOR;
        }
        polarity
    }
}

impl PolarityScorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<f64, ScoringFailure> {
        let tokens = word_tokens(text);
        let mut total = 0.0;
        let mut matched = 0usize;
        for (idx, token) in tokens.iter().enumerate() {
            if let Some(base) = self.words.get(token) {
                total += self.adjusted_polarity(&tokens, idx, *base);
                matched += 1;
            }
        }
        if matched == 0 {
            return Ok(0.0);
        }
        checked_polarity(total / matched as f64)
    }
}
