// Integration tests: fixture CSV -> loader -> recommendation engine.

use pitchcall_core::config::{DataConfig, ScoringConfig, ScoringWeights};
use pitchcall_core::dataset::{self, DatasetError};
use pitchcall_core::outcome::OutcomeKind;
use pitchcall_core::pitch::{Handedness, PitchEvent, PitchType};
use pitchcall_core::query::{FilterOptions, Selection};
use pitchcall_core::{recommend, FilterContext, RecommendError};

// ===========================================================================
// Test helpers
// ===========================================================================

const FIXTURE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/statcast_sample.csv"
);

fn data_config(min_year: Option<i32>) -> DataConfig {
    DataConfig {
        path: FIXTURE.into(),
        min_year,
    }
}

/// The 2023 rows of the fixture.
fn recent_events() -> Vec<PitchEvent> {
    dataset::load_events(&data_config(Some(2021))).expect("fixture should load")
}

fn ranked_codes(context: &FilterContext) -> Vec<&'static str> {
    recommend(&recent_events(), context, &ScoringConfig::default())
        .unwrap()
        .iter()
        .map(|r| r.pitch_type.code())
        .collect()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// ===========================================================================
// Loading
// ===========================================================================

#[test]
fn fixture_respects_min_year() {
    assert_eq!(recent_events().len(), 18);
    let all = dataset::load_events(&data_config(None)).unwrap();
    assert_eq!(all.len(), 20);
}

#[test]
fn fixture_links_pitches_within_plate_appearances() {
    let events = recent_events();
    let first_pitches = events
        .iter()
        .filter(|e| e.previous_pitch_type.is_none())
        .count();
    // Six plate appearances in 2023.
    assert_eq!(first_pitches, 6);
}

#[test]
fn filter_options_from_fixture() {
    let options = FilterOptions::from_events(&recent_events());
    assert_eq!(
        options.previous_pitch_types,
        vec![
            PitchType::FourSeamFastball,
            PitchType::Slider,
            PitchType::Changeup
        ]
    );
    assert_eq!(options.pitcher_hands, vec![Handedness::Right, Handedness::Left]);
    assert_eq!(options.hitter_hands, vec![Handedness::Left, Handedness::Right]);
}

// ===========================================================================
// Recommendations
// ===========================================================================

#[test]
fn after_slider_any_hands() {
    let context = FilterContext::any().with_previous(PitchType::Slider);
    let results = recommend(&recent_events(), &context, &ScoringConfig::default()).unwrap();

    let codes: Vec<&str> = results.iter().map(|r| r.pitch_type.code()).collect();
    assert_eq!(codes, vec!["CU", "CH", "FF", "SI"]);

    assert_close(results[0].weighted_success_rate, 0.35);
    assert_close(results[1].weighted_success_rate, (0.35 + 0.10) / 2.0);
    assert_eq!(results[1].sample_size, 2);

    // The fastball group: a 101 mph single, a 74.5 mph out, a whiff.
    assert_eq!(results[2].sample_size, 3);
    assert_eq!(results[2].component_counts[&OutcomeKind::WeakContact], 1);
    assert_eq!(results[2].component_counts[&OutcomeKind::SwingingStrike], 1);
    assert_close(results[2].weighted_success_rate, (0.15 + 0.25) / 3.0);
    assert_close(results[2].success_rate, 2.0 / 3.0);

    assert_close(results[3].weighted_success_rate, 0.0);
}

#[test]
fn after_slider_righty_vs_lefty() {
    let context = FilterContext::from_selections(
        "SL".parse().unwrap(),
        "R".parse().unwrap(),
        "L".parse().unwrap(),
    );
    assert_eq!(ranked_codes(&context), vec!["CU", "FF", "CH", "SI"]);
}

#[test]
fn after_fastball_only_sliders() {
    let context = FilterContext::any().with_previous(PitchType::FourSeamFastball);
    let results = recommend(&recent_events(), &context, &ScoringConfig::default()).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].pitch_type, PitchType::Slider);
    assert_eq!(results[0].sample_size, 4);
    assert_close(results[0].weighted_success_rate, (2.0 * 0.25 + 0.10) / 4.0);
}

#[test]
fn unseen_context_is_empty_result() {
    let context = FilterContext::from_selections(
        Selection::Only(PitchType::Curveball),
        Selection::Any,
        Selection::Any,
    );
    assert!(ranked_codes(&context).is_empty());
}

#[test]
fn custom_weights_change_the_ranking() {
    let context = FilterContext::any().with_previous(PitchType::Slider);
    let mut scoring = ScoringConfig::default();
    // Only weak contact matters.
    scoring.weights = ScoringWeights::from_slice(&[0.0, 0.0, 0.0, 0.0, 1.0]).unwrap();

    let results = recommend(&recent_events(), &context, &scoring).unwrap();
    assert_eq!(results[0].pitch_type, PitchType::FourSeamFastball);
}

#[test]
fn empty_table_and_bad_weights_are_errors() {
    let err = recommend(&[], &FilterContext::any(), &ScoringConfig::default()).unwrap_err();
    assert!(matches!(err, RecommendError::DataUnavailable { .. }));

    let mut scoring = ScoringConfig::default();
    scoring.weights.strikeout = -1.0;
    let err = recommend(&recent_events(), &FilterContext::any(), &scoring).unwrap_err();
    assert!(matches!(err, RecommendError::InvalidWeights { .. }));
}

#[test]
fn missing_columns_surface_as_data_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("thin.csv");
    std::fs::write(&path, "pitch_type,p_throws,stand\nFF,R,R\n").unwrap();

    let data = DataConfig {
        path: path.display().to_string(),
        min_year: None,
    };
    let err = dataset::load_events(&data).unwrap_err();
    assert!(matches!(err, DatasetError::MissingColumns { .. }));

    let err: RecommendError = err.into();
    assert!(err.to_string().contains("missing required columns"));
}
