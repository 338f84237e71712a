// Pitch outcome classification.
//
// Every pitch lands in exactly one `OutcomeKind`. When several signals apply
// (a swinging strike that ends the at-bat is also a strikeout) the kind that
// comes first in declaration order wins, so `Ord` on the enum is the
// classification priority.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a single pitch, in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Strikeout,
    SwingingStrike,
    CalledStrike,
    Foul,
    WeakContact,
    Hit,
    Ball,
    Other,
}

impl OutcomeKind {
    /// The five kinds that contribute to the weighted success score.
    pub const SCORED: [OutcomeKind; 5] = [
        OutcomeKind::Strikeout,
        OutcomeKind::SwingingStrike,
        OutcomeKind::CalledStrike,
        OutcomeKind::Foul,
        OutcomeKind::WeakContact,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OutcomeKind::Strikeout => "strikeout",
            OutcomeKind::SwingingStrike => "swinging_strike",
            OutcomeKind::CalledStrike => "called_strike",
            OutcomeKind::Foul => "foul",
            OutcomeKind::WeakContact => "weak_contact",
            OutcomeKind::Hit => "hit",
            OutcomeKind::Ball => "ball",
            OutcomeKind::Other => "other",
        }
    }

    /// Whether this kind counts toward the weighted success score.
    pub fn is_scored(&self) -> bool {
        OutcomeKind::SCORED.contains(self)
    }

    /// A batted ball may be reclassified as weak contact.
    fn is_batted(&self) -> bool {
        matches!(
            self,
            OutcomeKind::WeakContact | OutcomeKind::Hit | OutcomeKind::Other
        )
    }

    /// Map Statcast's `events` (plate-appearance result, only set on the
    /// final pitch) and `description` (pitch result) columns to a kind.
    ///
    /// Weak contact is not decided here; it depends on a configurable exit
    /// velocity threshold and is applied by [`classify`].
    pub fn from_statcast(events: Option<&str>, description: &str) -> Self {
        let events = events.map(str::trim).unwrap_or("");
        let description = description.trim();

        if matches!(events, "strikeout" | "strikeout_double_play") {
            return OutcomeKind::Strikeout;
        }
        match description {
            "swinging_strike" | "swinging_strike_blocked" | "swinging_pitchout"
            | "missed_bunt" => return OutcomeKind::SwingingStrike,
            "called_strike" => return OutcomeKind::CalledStrike,
            "foul" | "foul_tip" | "foul_bunt" | "bunt_foul_tip" | "foul_pitchout" => {
                return OutcomeKind::Foul
            }
            _ => {}
        }
        if matches!(events, "single" | "double" | "triple" | "home_run") {
            return OutcomeKind::Hit;
        }
        match description {
            "ball" | "blocked_ball" | "intent_ball" | "pitchout" => OutcomeKind::Ball,
            _ => OutcomeKind::Other,
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Final classification of a recorded outcome.
///
/// Batted balls (hits, outs in play) with a known exit velocity strictly
/// below `weak_contact_mph` become `WeakContact`. Strikes and balls are never
/// reclassified.
pub fn classify(
    recorded: OutcomeKind,
    exit_velocity_mph: Option<f64>,
    weak_contact_mph: f64,
) -> OutcomeKind {
    if !recorded.is_batted() {
        return recorded;
    }
    match exit_velocity_mph {
        Some(ev) if ev.is_finite() && ev < weak_contact_mph => OutcomeKind::WeakContact,
        _ => recorded,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
