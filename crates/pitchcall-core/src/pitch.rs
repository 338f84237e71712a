// Pitch-level data model: pitch types, handedness, and historical pitch events.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::outcome::OutcomeKind;

// ---------------------------------------------------------------------------
// PitchType
// ---------------------------------------------------------------------------

/// Statcast pitch classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PitchType {
    FourSeamFastball,
    Sinker,
    Cutter,
    Slider,
    Sweeper,
    Slurve,
    Curveball,
    KnuckleCurve,
    SlowCurve,
    Changeup,
    Splitter,
    Forkball,
    Screwball,
    Knuckleball,
    Eephus,
}

impl PitchType {
    /// Every pitch type, in the order the glossary lists them.
    pub const ALL: [PitchType; 15] = [
        PitchType::FourSeamFastball,
        PitchType::Sinker,
        PitchType::Cutter,
        PitchType::Slider,
        PitchType::Sweeper,
        PitchType::Slurve,
        PitchType::Curveball,
        PitchType::KnuckleCurve,
        PitchType::SlowCurve,
        PitchType::Changeup,
        PitchType::Splitter,
        PitchType::Forkball,
        PitchType::Screwball,
        PitchType::Knuckleball,
        PitchType::Eephus,
    ];

    /// The two-letter Statcast code (e.g. "FF", "SL").
    pub fn code(&self) -> &'static str {
        match self {
            PitchType::FourSeamFastball => "FF",
            PitchType::Sinker => "SI",
            PitchType::Cutter => "FC",
            PitchType::Slider => "SL",
            PitchType::Sweeper => "ST",
            PitchType::Slurve => "SV",
            PitchType::Curveball => "CU",
            PitchType::KnuckleCurve => "KC",
            PitchType::SlowCurve => "CS",
            PitchType::Changeup => "CH",
            PitchType::Splitter => "FS",
            PitchType::Forkball => "FO",
            PitchType::Screwball => "SC",
            PitchType::Knuckleball => "KN",
            PitchType::Eephus => "EP",
        }
    }

    /// Human-readable pitch name.
    pub fn display_name(&self) -> &'static str {
        match self {
            PitchType::FourSeamFastball => "Four-Seam Fastball",
            PitchType::Sinker => "Sinker",
            PitchType::Cutter => "Cutter",
            PitchType::Slider => "Slider",
            PitchType::Sweeper => "Sweeper",
            PitchType::Slurve => "Slurve",
            PitchType::Curveball => "Curveball",
            PitchType::KnuckleCurve => "Knuckle Curve",
            PitchType::SlowCurve => "Slow Curve",
            PitchType::Changeup => "Changeup",
            PitchType::Splitter => "Splitter",
            PitchType::Forkball => "Forkball",
            PitchType::Screwball => "Screwball",
            PitchType::Knuckleball => "Knuckleball",
            PitchType::Eephus => "Eephus",
        }
    }

    /// Parse a Statcast code or a display name, case-insensitively.
    ///
    /// "FA" (generic fastball in older Statcast exports) maps to the
    /// four-seamer. Returns `None` for anything else.
    pub fn from_code(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("FA") {
            return Some(PitchType::FourSeamFastball);
        }
        PitchType::ALL
            .iter()
            .copied()
            .find(|p| s.eq_ignore_ascii_case(p.code()) || s.eq_ignore_ascii_case(p.display_name()))
    }
}

impl fmt::Display for PitchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for PitchType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PitchType::from_code(s).ok_or_else(|| ParseError::UnknownPitchType(s.trim().to_string()))
    }
}

// ---------------------------------------------------------------------------
// Handedness
// ---------------------------------------------------------------------------

/// Which side a pitcher throws from or a hitter stands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// Single-letter Statcast code ("L" / "R").
    pub fn code(&self) -> &'static str {
        match self {
            Handedness::Left => "L",
            Handedness::Right => "R",
        }
    }

    /// Parse "L"/"R" or "left"/"right", case-insensitively.
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l" | "left" => Some(Handedness::Left),
            "r" | "right" => Some(Handedness::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Handedness {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Handedness::from_code(s).ok_or_else(|| ParseError::UnknownHandedness(s.trim().to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown pitch type `{0}`")]
    UnknownPitchType(String),

    #[error("unknown handedness `{0}` (expected L or R)")]
    UnknownHandedness(String),
}

// ---------------------------------------------------------------------------
// PitchEvent
// ---------------------------------------------------------------------------

/// One historical pitch, paired with the pitch thrown before it in the same
/// plate appearance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitchEvent {
    /// Pitch thrown immediately before; `None` for the first pitch of a
    /// plate appearance.
    pub previous_pitch_type: Option<PitchType>,
    /// The pitch actually thrown.
    pub next_pitch_type: PitchType,
    pub pitcher_hand: Handedness,
    pub hitter_hand: Handedness,
    /// Recorded result of the pitch. Weak contact is usually derived later
    /// from `exit_velocity_mph`, see [`crate::outcome::classify`].
    pub outcome: OutcomeKind,
    /// Exit velocity, present only for batted balls.
    pub exit_velocity_mph: Option<f64>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
