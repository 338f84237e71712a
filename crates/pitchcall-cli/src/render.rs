// Plain-text and JSON rendering of recommendations, filter options and the
// glossary.

use serde::Serialize;
use std::fmt::Write;

use pitchcall_core::engine::{FilterContext, RecommendationResult};
use pitchcall_core::glossary::{METRIC_GLOSSARY, PITCH_GLOSSARY};
use pitchcall_core::query::FilterOptions;

pub const NO_DATA_MESSAGE: &str = "No data available for the selected filters.";

/// JSON envelope for a recommendation query.
#[derive(Debug, Serialize)]
struct RecommendationReport<'a> {
    context: &'a FilterContext,
    recommendations: &'a [RecommendationResult],
}

fn describe_context(context: &FilterContext) -> String {
    let prev = context
        .previous_pitch_type
        .map_or("any pitch".to_string(), |p| p.to_string());
    let pitcher = context.pitcher_hand.map_or("any", |h| h.code());
    let hitter = context.hitter_hand.map_or("any", |h| h.code());
    format!("after {prev} (pitcher {pitcher}, hitter {hitter})")
}

fn percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Ranked table, or the no-data message for an empty result.
pub fn recommendation_table(context: &FilterContext, results: &[RecommendationResult]) -> String {
    if results.is_empty() {
        return format!("{NO_DATA_MESSAGE}\n");
    }

    let mut out = String::new();
    let _ = writeln!(out, "Top {} pitch recommendations {}", results.len(), describe_context(context));
    let _ = writeln!(
        out,
        "{:<5} {:<20} {:>9} {:>9} {:>9} {:>7}",
        "Rank", "Pitch Type", "Success", "Weighted", "Smoothed", "N"
    );
    for (i, r) in results.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<5} {:<20} {:>9} {:>9} {:>9} {:>7}",
            i + 1,
            r.pitch_type.display_name(),
            percent(r.success_rate),
            percent(r.weighted_success_rate),
            percent(r.smoothed_success_rate),
            r.sample_size
        );
    }
    out
}

pub fn recommendation_json(
    context: &FilterContext,
    results: &[RecommendationResult],
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&RecommendationReport {
        context,
        recommendations: results,
    })
}

pub fn options_text(options: &FilterOptions) -> String {
    let join = |items: Vec<&str>| items.join(", ");
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Previous pitch: any, {}",
        join(options.previous_pitch_types.iter().map(|p| p.code()).collect())
    );
    let _ = writeln!(
        out,
        "Pitcher hand:   any, {}",
        join(options.pitcher_hands.iter().map(|h| h.code()).collect())
    );
    let _ = writeln!(
        out,
        "Hitter hand:    any, {}",
        join(options.hitter_hands.iter().map(|h| h.code()).collect())
    );
    out
}

pub fn glossary_text() -> String {
    let mut out = String::from("Pitch types\n");
    for entry in PITCH_GLOSSARY {
        let _ = writeln!(
            out,
            "  {:<3} {:<20} {}",
            entry.pitch.code(),
            entry.pitch.display_name(),
            entry.description
        );
    }
    out.push_str("\nKey\n");
    for entry in METRIC_GLOSSARY {
        let _ = writeln!(out, "  {}: {}", entry.term, entry.description);
    }
    out
}
