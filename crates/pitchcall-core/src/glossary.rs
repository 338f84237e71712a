// Static reference tables shown next to the recommendations.

use crate::pitch::PitchType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PitchGlossaryEntry {
    pub pitch: PitchType,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricGlossaryEntry {
    pub term: &'static str,
    pub description: &'static str,
}

/// One entry per [`PitchType`], in `PitchType::ALL` order.
pub const PITCH_GLOSSARY: &[PitchGlossaryEntry] = &[
    PitchGlossaryEntry {
        pitch: PitchType::FourSeamFastball,
        description: "Hardest, straightest fastball; backspin keeps it riding through the zone.",
    },
    PitchGlossaryEntry {
        pitch: PitchType::Sinker,
        description: "Two-seam fastball with arm-side run and downward movement.",
    },
    PitchGlossaryEntry {
        pitch: PitchType::Cutter,
        description: "Fastball with a late, short break toward the glove side.",
    },
    PitchGlossaryEntry {
        pitch: PitchType::Slider,
        description: "Hard breaking ball with tight glove-side and downward break.",
    },
    PitchGlossaryEntry {
        pitch: PitchType::Sweeper,
        description: "Slider variant with large horizontal break and little drop.",
    },
    PitchGlossaryEntry {
        pitch: PitchType::Slurve,
        description: "Breaking ball between a slider and a curveball in speed and shape.",
    },
    PitchGlossaryEntry {
        pitch: PitchType::Curveball,
        description: "Slower breaking ball with pronounced top-to-bottom drop.",
    },
    PitchGlossaryEntry {
        pitch: PitchType::KnuckleCurve,
        description: "Curveball thrown with a knuckle grip for a sharper, harder break.",
    },
    PitchGlossaryEntry {
        pitch: PitchType::SlowCurve,
        description: "Very slow, looping curveball used to upset timing.",
    },
    PitchGlossaryEntry {
        pitch: PitchType::Changeup,
        description: "Off-speed pitch with fastball arm action and reduced velocity.",
    },
    PitchGlossaryEntry {
        pitch: PitchType::Splitter,
        description: "Split-finger fastball that tumbles late below the zone.",
    },
    PitchGlossaryEntry {
        pitch: PitchType::Forkball,
        description: "Slower, deeper-gripped cousin of the splitter with heavy drop.",
    },
    PitchGlossaryEntry {
        pitch: PitchType::Screwball,
        description: "Breaking ball that moves arm-side, opposite to a curveball.",
    },
    PitchGlossaryEntry {
        pitch: PitchType::Knuckleball,
        description: "Thrown with almost no spin, producing erratic movement.",
    },
    PitchGlossaryEntry {
        pitch: PitchType::Eephus,
        description: "Extremely slow, high-arcing lob.",
    },
];

/// Definitions of the columns in the recommendation table.
pub const METRIC_GLOSSARY: &[MetricGlossaryEntry] = &[
    MetricGlossaryEntry {
        term: "Success Rate",
        description: "Share of pitches ending in a strikeout, swinging strike, called strike, foul, or weak contact.",
    },
    MetricGlossaryEntry {
        term: "Weighted Success Rate",
        description: "Weighted sum of the favourable-outcome rates; the ranking key.",
    },
    MetricGlossaryEntry {
        term: "Smoothed Success Rate",
        description: "Weighted success rate adjusted toward the overall average to account for small samples.",
    },
    MetricGlossaryEntry {
        term: "Occurrences",
        description: "Number of times the selected pitch sequence occurred.",
    },
];

/// Glossary entry for a pitch type.
pub fn pitch_entry(pitch: PitchType) -> Option<&'static PitchGlossaryEntry> {
    PITCH_GLOSSARY.iter().find(|e| e.pitch == pitch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pitch_type_has_an_entry_in_order() {
        let listed: Vec<PitchType> = PITCH_GLOSSARY.iter().map(|e| e.pitch).collect();
        assert_eq!(listed, PitchType::ALL.to_vec());
        for pitch in PitchType::ALL {
            assert!(pitch_entry(pitch).is_some(), "missing glossary entry for {pitch}");
        }
    }

    #[test]
    fn metric_terms_are_unique() {
        let mut terms: Vec<&str> = METRIC_GLOSSARY.iter().map(|e| e.term).collect();
        terms.sort_unstable();
        terms.dedup();
        assert_eq!(terms.len(), METRIC_GLOSSARY.len());
    }
}
