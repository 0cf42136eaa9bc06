//! Drill-down predicates: the inverse of the aggregate views.
//!
//! Each [`DrillDown`] names one bucket of one view. Applied to the same
//! windowed, classified records the snapshot was built from, it selects
//! exactly the records that bucket counted.

use chrono::{NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use super::classify::{ClassifiedRecord, RiskCategory};
use super::snapshot::UNKNOWN_PREDICTION;
use crate::format::{day_name, parse_hour_label};

/// A clicked aggregate bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "bucket", content = "value", rename_all = "snake_case")]
pub enum DrillDown {
    /// A slice of the harmful/non-harmful ratio
    Harmful(bool),
    /// A bar of the five-bucket category histogram
    Category(RiskCategory),
    /// Harmful records in one local hour (0-23)
    Hour(u8),
    /// Harmful records on one day of week (0=Sunday)
    Weekday(u8),
    /// Every windowed record on one local date
    Date(NaiveDate),
    /// Harmful records with a numeric sentiment on one local date
    SentimentDate(NaiveDate),
    /// Harmful records with a usable time spent on one local date
    ExposureDate(NaiveDate),
    /// Harmful records with this raw prediction label
    Prediction(String),
}

impl DrillDown {
    /// Whether a windowed record belongs to this bucket.
    pub fn matches<Tz: TimeZone>(&self, record: &ClassifiedRecord<'_, Tz>) -> bool {
        match self {
            DrillDown::Harmful(flag) => record.is_harmful() == *flag,
            DrillDown::Category(category) => record.category() == *category,
            DrillDown::Hour(hour) => record.is_harmful() && record.hour() == *hour,
            DrillDown::Weekday(day) => record.is_harmful() && record.weekday() == *day,
            DrillDown::Date(date) => record.local_date() == *date,
            DrillDown::SentimentDate(date) => {
                record.is_harmful()
                    && record.local_date() == *date
                    && record.normalized.sentiment.value().is_some()
            }
            DrillDown::ExposureDate(date) => {
                record.is_harmful()
                    && record.local_date() == *date
                    && record.normalized.time_spent.value().is_some()
            }
            DrillDown::Prediction(label) => {
                let recorded = record.record().raw_prediction();
                record.is_harmful() && recorded.unwrap_or(UNKNOWN_PREDICTION) == label.as_str()
            }
        }
    }

    /// Title for the detail view (e.g., "Maya's Searches at 2PM").
    pub fn title(&self, child_name: Option<&str>) -> String {
        let prefix = child_name
            .filter(|name| !name.trim().is_empty())
            .map(|name| format!("{}'s ", name.trim()))
            .unwrap_or_default();

        let body = match self {
            DrillDown::Harmful(true) => "Harmful Searches".to_string(),
            DrillDown::Harmful(false) => "Non-Harmful Searches".to_string(),
            DrillDown::Category(category) => format!("{} Searches", category.label()),
            DrillDown::Hour(hour) => {
                let period = if *hour < 12 { "AM" } else { "PM" };
                let hour12 = match hour % 12 {
                    0 => 12,
                    h => h,
                };
                format!("Searches at {}{}", hour12, period)
            }
            DrillDown::Weekday(day) => format!("{} Searches", day_name(*day)),
            DrillDown::Date(date) => format!("Searches on {}", date),
            DrillDown::SentimentDate(date) => format!("Scored Harmful Searches on {}", date),
            DrillDown::ExposureDate(date) => format!("Harmful Search Exposure on {}", date),
            DrillDown::Prediction(label) => format!("{} Searches", label),
        };

        format!("{}{}", prefix, body)
    }
}

impl std::str::FromStr for DrillDown {
    type Err = String;

    /// Parse `harmful`, `safe`, or `<kind>:<value>` (e.g., `hour:14`, `hour:2pm`,
    /// `category:anxiety`, `date:2024-03-01`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "harmful" => return Ok(DrillDown::Harmful(true)),
            "safe" | "non-harmful" | "not-harmful" => return Ok(DrillDown::Harmful(false)),
            _ => {}
        }

        let (kind, value) = s
            .split_once(':')
            .ok_or_else(|| format!("invalid bucket: {}", s))?;
        let value = value.trim();
        let parse_date = |v: &str| {
            NaiveDate::parse_from_str(v, "%Y-%m-%d")
                .map_err(|e| format!("invalid date {}: {}", v, e))
        };

        match kind.trim().to_lowercase().as_str() {
            "harmful" => match value.to_lowercase().as_str() {
                "true" => Ok(DrillDown::Harmful(true)),
                "false" => Ok(DrillDown::Harmful(false)),
                _ => Err(format!("invalid harmful flag: {}", value)),
            },
            "category" => value.parse().map(DrillDown::Category),
            "hour" => {
                let hour = value
                    .parse::<u8>()
                    .ok()
                    .filter(|h| *h < 24)
                    .or_else(|| parse_hour_label(value))
                    .ok_or_else(|| format!("invalid hour: {}", value))?;
                Ok(DrillDown::Hour(hour))
            }
            "weekday" | "day" => value
                .parse::<u8>()
                .ok()
                .filter(|d| *d < 7)
                .map(DrillDown::Weekday)
                .ok_or_else(|| format!("invalid weekday: {}", value)),
            "date" => parse_date(value).map(DrillDown::Date),
            "sentiment-date" => parse_date(value).map(DrillDown::SentimentDate),
            "exposure-date" => parse_date(value).map(DrillDown::ExposureDate),
            "prediction" if !value.is_empty() => Ok(DrillDown::Prediction(value.to_string())),
            _ => Err(format!("invalid bucket: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_buckets() {
        assert_eq!("harmful".parse::<DrillDown>(), Ok(DrillDown::Harmful(true)));
        assert_eq!("safe".parse::<DrillDown>(), Ok(DrillDown::Harmful(false)));
        assert_eq!("hour:14".parse::<DrillDown>(), Ok(DrillDown::Hour(14)));
        assert_eq!("hour:2pm".parse::<DrillDown>(), Ok(DrillDown::Hour(14)));
        assert_eq!("hour:12am".parse::<DrillDown>(), Ok(DrillDown::Hour(0)));
        assert_eq!("weekday:6".parse::<DrillDown>(), Ok(DrillDown::Weekday(6)));
        assert_eq!(
            "category:No Risk".parse::<DrillDown>(),
            Ok(DrillDown::Category(RiskCategory::NoRisk))
        );
        assert_eq!(
            "sentiment-date:2024-03-01".parse::<DrillDown>(),
            Ok(DrillDown::SentimentDate(date(2024, 3, 1)))
        );
        assert_eq!(
            "prediction:Stress".parse::<DrillDown>(),
            Ok(DrillDown::Prediction("Stress".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!("hour:24".parse::<DrillDown>().is_err());
        assert!("weekday:7".parse::<DrillDown>().is_err());
        assert!("date:yesterday".parse::<DrillDown>().is_err());
        assert!("colour:red".parse::<DrillDown>().is_err());
        assert!("prediction:".parse::<DrillDown>().is_err());
    }

    #[test]
    fn test_titles() {
        assert_eq!(
            DrillDown::Category(RiskCategory::Anxiety).title(Some("Maya")),
            "Maya's Anxiety Searches"
        );
        assert_eq!(DrillDown::Hour(14).title(None), "Searches at 2PM");
        assert_eq!(DrillDown::Hour(0).title(None), "Searches at 12AM");
        assert_eq!(DrillDown::Weekday(2).title(None), "Tuesday Searches");
        assert_eq!(
            DrillDown::Date(date(2024, 3, 1)).title(Some(" ")),
            "Searches on 2024-03-01"
        );
        assert_eq!(DrillDown::Harmful(false).title(None), "Non-Harmful Searches");
    }
}
