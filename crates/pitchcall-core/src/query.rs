// Query-side helpers: turning user selections into a `FilterContext` and
// listing the values worth offering for each filter.

use std::str::FromStr;

use crate::engine::FilterContext;
use crate::pitch::{Handedness, PitchEvent, PitchType};

/// A single filter choice: anything, or one specific value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<T> {
    Any,
    Only(T),
}

impl<T> Selection<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Selection::Any => None,
            Selection::Only(v) => Some(v),
        }
    }
}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Selection::Any, Selection::Only)
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    /// "any", "*" and the empty string select everything.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "*" || s.eq_ignore_ascii_case("any") {
            return Ok(Selection::Any);
        }
        s.parse().map(Selection::Only)
    }
}

impl FilterContext {
    /// Build a context from the three user selections.
    pub fn from_selections(
        previous: Selection<PitchType>,
        pitcher: Selection<Handedness>,
        hitter: Selection<Handedness>,
    ) -> Self {
        FilterContext {
            previous_pitch_type: previous.into_option(),
            pitcher_hand: pitcher.into_option(),
            hitter_hand: hitter.into_option(),
        }
    }
}

/// Distinct values present in the table for each filter, in first-seen
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub previous_pitch_types: Vec<PitchType>,
    pub pitcher_hands: Vec<Handedness>,
    pub hitter_hands: Vec<Handedness>,
}

impl FilterOptions {
    pub fn from_events(events: &[PitchEvent]) -> Self {
        let mut options = FilterOptions::default();
        for event in events {
            if let Some(prev) = event.previous_pitch_type {
                push_unique(&mut options.previous_pitch_types, prev);
            }
            push_unique(&mut options.pitcher_hands, event.pitcher_hand);
            push_unique(&mut options.hitter_hands, event.hitter_hand);
        }
        options
    }
}

fn push_unique<T: PartialEq>(values: &mut Vec<T>, value: T) {
    if !values.contains(&value) {
        values.push(value);
    }
}
