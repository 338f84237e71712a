// Historical pitch table loading.
//
// Reads Statcast pitch-by-pitch CSV exports. Each row becomes a
// `PitchEvent` paired with the pitch thrown just before it in the same plate
// appearance.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::config::DataConfig;
use crate::engine::RecommendError;
use crate::outcome::OutcomeKind;
use crate::pitch::{Handedness, PitchEvent, PitchType};

/// Columns the loader cannot work without.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "pitch_type",
    "p_throws",
    "stand",
    "events",
    "description",
    "launch_speed",
];

/// Columns that identify a pitch's position within a game.
const SEQUENCE_COLUMNS: &[&str] = &["game_pk", "at_bat_number", "pitch_number"];

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("missing required columns: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("{path} produced zero usable pitches")]
    Empty { path: String },
}

impl From<DatasetError> for RecommendError {
    fn from(err: DatasetError) -> Self {
        RecommendError::DataUnavailable {
            reason: err.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Raw CSV row (private)
// ---------------------------------------------------------------------------

/// Statcast CSV row. Extra columns are ignored; unparseable numbers read as
/// missing.
#[derive(Debug, Deserialize)]
struct RawPitchRow {
    pitch_type: String,
    p_throws: String,
    stand: String,
    #[serde(default)]
    events: Option<String>,
    description: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    launch_speed: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    game_pk: Option<i64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    at_bat_number: Option<i64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pitch_number: Option<i64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    game_year: Option<i32>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    year: Option<i32>,
    #[serde(default)]
    game_date: Option<String>,
}

impl RawPitchRow {
    fn season(&self) -> Option<i32> {
        self.game_year.or(self.year).or_else(|| {
            self.game_date
                .as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
                .map(|d| d.year())
        })
    }

    fn plate_appearance(&self) -> Option<(i64, i64)> {
        Some((self.game_pk?, self.at_bat_number?))
    }
}

/// Per-load counters, logged once at the end.
#[derive(Debug, Default)]
struct LoadStats {
    malformed: usize,
    out_of_season: usize,
    unknown_pitch: usize,
    bad_handedness: usize,
}

// ---------------------------------------------------------------------------
// Reader-based loader
// ---------------------------------------------------------------------------

/// Parse pitch events from any CSV source.
///
/// Rows are ordered by `game_pk`, `at_bat_number`, `pitch_number` when all
/// three columns exist, otherwise file order is kept. Without the plate
/// appearance columns every row follows the row before it.
pub fn load_events_from_reader<R: Read>(
    rdr: R,
    min_year: Option<i32>,
) -> Result<Vec<PitchEvent>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(rdr);
    let headers = reader
        .headers()
        .map_err(|e| DatasetError::Csv {
            path: "<reader>".into(),
            source: e,
        })?
        .clone();
    let has_column = |name: &str| headers.iter().any(|h| h == name);

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !has_column(**c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DatasetError::MissingColumns { columns: missing });
    }
    let sequenced = SEQUENCE_COLUMNS.iter().all(|c| has_column(*c));
    let keyed_by_plate_appearance = has_column("game_pk") && has_column("at_bat_number");

    let mut stats = LoadStats::default();
    let mut rows = Vec::new();
    for result in reader.deserialize::<RawPitchRow>() {
        match result {
            Ok(raw) => rows.push(raw),
            Err(e) => {
                debug!("skipping malformed pitch row: {}", e);
                stats.malformed += 1;
            }
        }
    }

    if sequenced {
        rows.sort_by_key(|r| (r.game_pk, r.at_bat_number, r.pitch_number));
    }

    let mut events = Vec::with_capacity(rows.len());
    // Last retained pitch and the plate appearance it belonged to.
    let mut last: Option<(Option<(i64, i64)>, PitchType)> = None;

    for raw in rows {
        if let (Some(min), Some(season)) = (min_year, raw.season()) {
            if season < min {
                stats.out_of_season += 1;
                last = None;
                continue;
            }
        }

        let Some(pitch) = PitchType::from_code(&raw.pitch_type) else {
            debug!("skipping pitch with unknown type '{}'", raw.pitch_type.trim());
            stats.unknown_pitch += 1;
            last = None;
            continue;
        };

        let (Some(pitcher_hand), Some(hitter_hand)) = (
            Handedness::from_code(&raw.p_throws),
            Handedness::from_code(&raw.stand),
        ) else {
            debug!(
                "skipping pitch with bad handedness p_throws='{}' stand='{}'",
                raw.p_throws, raw.stand
            );
            stats.bad_handedness += 1;
            last = None;
            continue;
        };

        let plate_appearance = raw.plate_appearance();
        let previous_pitch_type = match last {
            Some((prev_pa, prev_pitch))
                if !keyed_by_plate_appearance
                    || (plate_appearance.is_some() && prev_pa == plate_appearance) =>
            {
                Some(prev_pitch)
            }
            _ => None,
        };

        events.push(PitchEvent {
            previous_pitch_type,
            next_pitch_type: pitch,
            pitcher_hand,
            hitter_hand,
            outcome: OutcomeKind::from_statcast(raw.events.as_deref(), &raw.description),
            exit_velocity_mph: raw.launch_speed.filter(|v| v.is_finite()),
        });
        last = Some((plate_appearance, pitch));
    }

    info!(
        loaded = events.len(),
        malformed = stats.malformed,
        out_of_season = stats.out_of_season,
        unknown_pitch = stats.unknown_pitch,
        bad_handedness = stats.bad_handedness,
        "pitch table parsed"
    );

    Ok(events)
}

// ---------------------------------------------------------------------------
// Path-based loader
// ---------------------------------------------------------------------------

/// Load the pitch table named by the data config. Fails if no usable pitch
/// remains.
pub fn load_events(data: &DataConfig) -> Result<Vec<PitchEvent>, DatasetError> {
    let path = Path::new(&data.path);
    let file = std::fs::File::open(path).map_err(|e| DatasetError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let events = load_events_from_reader(file, data.min_year).map_err(|e| match e {
        DatasetError::Csv { source, .. } => DatasetError::Csv {
            path: path.display().to_string(),
            source,
        },
        other => other,
    })?;

    if events.is_empty() {
        return Err(DatasetError::Empty {
            path: path.display().to_string(),
        });
    }
    Ok(events)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
