//! Risk classification of search records.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

use super::normalize::{coerce_harmful, NormalizedRecord};
use crate::types::SearchRecord;

/// The fixed set of risk buckets shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Anxiety,
    Depression,
    Isolation,
    Suicide,
    /// Non-harmful records, plus harmful ones with an unrecognized label
    NoRisk,
}

impl RiskCategory {
    /// All buckets in display order.
    pub const ALL: [RiskCategory; 5] = [
        RiskCategory::Anxiety,
        RiskCategory::Depression,
        RiskCategory::Isolation,
        RiskCategory::Suicide,
        RiskCategory::NoRisk,
    ];

    /// Position of this bucket in [`RiskCategory::ALL`].
    pub fn index(self) -> usize {
        match self {
            RiskCategory::Anxiety => 0,
            RiskCategory::Depression => 1,
            RiskCategory::Isolation => 2,
            RiskCategory::Suicide => 3,
            RiskCategory::NoRisk => 4,
        }
    }

    /// Display label (e.g., "No Risk").
    pub fn label(self) -> &'static str {
        match self {
            RiskCategory::Anxiety => "Anxiety",
            RiskCategory::Depression => "Depression",
            RiskCategory::Isolation => "Isolation",
            RiskCategory::Suicide => "Suicide",
            RiskCategory::NoRisk => "No Risk",
        }
    }

    /// Match a prediction label against the four harmful buckets.
    ///
    /// The label is trimmed and compared case-insensitively.
    pub fn from_prediction(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "anxiety" => Some(RiskCategory::Anxiety),
            "depression" => Some(RiskCategory::Depression),
            "isolation" => Some(RiskCategory::Isolation),
            "suicide" => Some(RiskCategory::Suicide),
            _ => None,
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for RiskCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(category) = RiskCategory::from_prediction(s) {
            return Ok(category);
        }
        match s.trim().to_lowercase().as_str() {
            "no risk" | "no_risk" | "no-risk" | "norisk" => Ok(RiskCategory::NoRisk),
            _ => Err(format!("unknown risk category: {}", s)),
        }
    }
}

/// Classifier output for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Coerced upstream verdict
    pub harmful: bool,
    /// Display bucket
    pub category: RiskCategory,
}

impl Classification {
    /// Classify from an already-coerced flag and the raw prediction label.
    pub fn from_parts(harmful: bool, prediction: Option<&str>) -> Self {
        let category = if harmful {
            prediction
                .and_then(RiskCategory::from_prediction)
                .unwrap_or(RiskCategory::NoRisk)
        } else {
            RiskCategory::NoRisk
        };
        Self { harmful, category }
    }

    /// Harmful, but shown under "No Risk" because the label is unrecognized.
    ///
    /// Such records count toward the harmful side of the ratio while sitting
    /// in the `NoRisk` bucket of the category histogram.
    pub fn is_unrecognized_harmful(&self) -> bool {
        self.harmful && self.category == RiskCategory::NoRisk
    }
}

/// Classify a raw record.
pub fn classify(record: &SearchRecord) -> Classification {
    Classification::from_parts(
        coerce_harmful(record.is_harmful.as_ref()),
        record.raw_prediction(),
    )
}

/// A normalized record together with its classification.
///
/// This is the unit the aggregator and drill-down resolver consume.
#[derive(Debug, Clone)]
pub struct ClassifiedRecord<'a, Tz: TimeZone> {
    pub normalized: NormalizedRecord<'a, Tz>,
    pub classification: Classification,
}

impl<'a, Tz: TimeZone> ClassifiedRecord<'a, Tz> {
    /// Classify an already-normalized record.
    pub fn new(normalized: NormalizedRecord<'a, Tz>) -> Self {
        let classification =
            Classification::from_parts(normalized.harmful, normalized.record.raw_prediction());
        Self {
            normalized,
            classification,
        }
    }

    pub fn record(&self) -> &'a SearchRecord {
        self.normalized.record
    }

    pub fn instant(&self) -> &DateTime<Tz> {
        &self.normalized.instant
    }

    pub fn is_harmful(&self) -> bool {
        self.classification.harmful
    }

    pub fn category(&self) -> RiskCategory {
        self.classification.category
    }

    /// Local hour of day, 0-23.
    pub fn hour(&self) -> u8 {
        self.normalized.instant.hour() as u8
    }

    /// Local day of week, 0 = Sunday.
    pub fn weekday(&self) -> u8 {
        self.normalized.instant.weekday().num_days_from_sunday() as u8
    }

    pub fn local_date(&self) -> NaiveDate {
        self.normalized.local_date()
    }
}
