// Next-pitch recommendation engine.
//
// Filters the historical table by the query context, groups the matching
// pitches by the pitch that was thrown, scores each group by its weighted
// rate of favourable outcomes, and returns the best few.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use tracing::debug;

use crate::config::{ScoringConfig, ScoringWeights};
use crate::outcome::{classify, OutcomeKind};
use crate::pitch::{Handedness, PitchEvent, PitchType};

/// Upper bound on the number of recommendations returned.
pub const MAX_RECOMMENDATIONS: usize = 5;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecommendError {
    #[error("no usable historical data: {reason}")]
    DataUnavailable { reason: String },

    #[error("invalid scoring weight `{field}`: {message}")]
    InvalidWeights { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Query and result types
// ---------------------------------------------------------------------------

/// Which historical pitches a query looks at. `None` matches anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterContext {
    pub previous_pitch_type: Option<PitchType>,
    pub pitcher_hand: Option<Handedness>,
    pub hitter_hand: Option<Handedness>,
}

impl FilterContext {
    /// A context that matches every event.
    pub fn any() -> Self {
        FilterContext::default()
    }

    pub fn with_previous(mut self, pitch: PitchType) -> Self {
        self.previous_pitch_type = Some(pitch);
        self
    }

    pub fn with_pitcher(mut self, hand: Handedness) -> Self {
        self.pitcher_hand = Some(hand);
        self
    }

    pub fn with_hitter(mut self, hand: Handedness) -> Self {
        self.hitter_hand = Some(hand);
        self
    }

    /// A set previous pitch never matches a first pitch (no previous).
    pub fn matches(&self, event: &PitchEvent) -> bool {
        self.previous_pitch_type
            .map_or(true, |p| event.previous_pitch_type == Some(p))
            && self.pitcher_hand.map_or(true, |h| event.pitcher_hand == h)
            && self.hitter_hand.map_or(true, |h| event.hitter_hand == h)
    }
}

/// One ranked candidate for the next pitch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResult {
    pub pitch_type: PitchType,
    /// Number of matching historical pitches of this type.
    pub sample_size: u32,
    /// Share of the sample landing in any scored outcome, unweighted.
    pub success_rate: f64,
    /// Weighted sum of per-outcome rates; the ranking key.
    pub weighted_success_rate: f64,
    /// `weighted_success_rate` shrunk toward the table-wide score. Display
    /// only.
    pub smoothed_success_rate: f64,
    /// Counts for the five scored outcomes (zero-filled).
    pub component_counts: BTreeMap<OutcomeKind, u32>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Running outcome tally for one group of pitches.
#[derive(Debug, Default, Clone)]
struct Tally {
    total: u32,
    counts: BTreeMap<OutcomeKind, u32>,
}

impl Tally {
    fn add(&mut self, kind: OutcomeKind) {
        self.total += 1;
        if kind.is_scored() {
            *self.counts.entry(kind).or_insert(0) += 1;
        }
    }

    fn count(&self, kind: OutcomeKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    fn score(&self, weights: &ScoringWeights) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let n = f64::from(self.total);
        OutcomeKind::SCORED
            .iter()
            .map(|&k| weights.weight_for(k) * f64::from(self.count(k)) / n)
            .sum()
    }

    fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let favourable: u32 = self.counts.values().sum();
        f64::from(favourable) / f64::from(self.total)
    }

    fn component_counts(&self) -> BTreeMap<OutcomeKind, u32> {
        OutcomeKind::SCORED
            .iter()
            .map(|&k| (k, self.count(k)))
            .collect()
    }
}

/// Ranking order: higher score, then larger sample, then pitch code.
fn rank_order(a: &RecommendationResult, b: &RecommendationResult) -> Ordering {
    b.weighted_success_rate
        .partial_cmp(&a.weighted_success_rate)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.sample_size.cmp(&a.sample_size))
        .then_with(|| a.pitch_type.code().cmp(b.pitch_type.code()))
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Rank candidate next pitches for `context`.
///
/// 1. Reject an empty table or invalid weights.
/// 2. Keep events matching the context (unset fields are wildcards).
/// 3. Classify each event's outcome, applying the weak-contact threshold.
/// 4. Group by the pitch thrown and score each group.
/// 5. Sort by score desc, sample size desc, pitch code asc.
/// 6. Keep the top [`MAX_RECOMMENDATIONS`].
///
/// A context with no matching history yields `Ok(vec![])`.
pub fn recommend(
    events: &[PitchEvent],
    context: &FilterContext,
    scoring: &ScoringConfig,
) -> Result<Vec<RecommendationResult>, RecommendError> {
    if events.is_empty() {
        return Err(RecommendError::DataUnavailable {
            reason: "the pitch table is empty".into(),
        });
    }
    scoring.weights.validate()?;

    let mut overall = Tally::default();
    let mut groups: HashMap<PitchType, Tally> = HashMap::new();
    for event in events {
        let kind = classify(
            event.outcome,
            event.exit_velocity_mph,
            scoring.weak_contact_mph,
        );
        overall.add(kind);
        if context.matches(event) {
            groups.entry(event.next_pitch_type).or_default().add(kind);
        }
    }

    let matched: u32 = groups.values().map(|t| t.total).sum();
    debug!(
        ?context,
        matched,
        groups = groups.len(),
        "filtered pitch table"
    );
    if groups.is_empty() {
        return Ok(Vec::new());
    }

    let prior = overall.score(&scoring.weights);
    let m = scoring.prior_strength.max(0.0);

    let mut results: Vec<RecommendationResult> = groups
        .into_iter()
        .map(|(pitch_type, tally)| {
            let score = tally.score(&scoring.weights);
            let n = f64::from(tally.total);
            let smoothed = if m > 0.0 {
                (n * score + m * prior) / (n + m)
            } else {
                score
            };
            RecommendationResult {
                pitch_type,
                sample_size: tally.total,
                success_rate: tally.success_rate(),
                weighted_success_rate: score,
                smoothed_success_rate: smoothed,
                component_counts: tally.component_counts(),
            }
        })
        .collect();

    results.sort_by(rank_order);
    results.truncate(MAX_RECOMMENDATIONS);
    Ok(results)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
