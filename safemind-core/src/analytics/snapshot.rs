//! Aggregate views over a windowed, classified record set.
//!
//! [`aggregate`] is a pure function: the same input slice always yields the
//! same [`AggregateSnapshot`]. Each view is computed by its own pass so a
//! record missing one field (sentiment, time spent) only drops out of the
//! view that needs it.

use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeZone};
use serde::Serialize;

use super::classify::{ClassifiedRecord, RiskCategory};
use super::drilldown::DrillDown;
use super::window::{ResolvedWindow, TimeWindow};
use crate::format::{format_duration_secs, format_minutes};

/// Label used for harmful records without a prediction.
///
/// A record whose prediction is literally `"Unknown"` lands in the same
/// ranking row and the same `prediction:Unknown` drill-down as an unlabeled
/// one; the two cannot be told apart downstream.
pub const UNKNOWN_PREDICTION: &str = "Unknown";

// ============================================
// Views
// ============================================

/// Harmful vs. non-harmful record counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HarmfulRatio {
    pub harmful: usize,
    pub non_harmful: usize,
}

impl HarmfulRatio {
    pub fn total(&self) -> usize {
        self.harmful + self.non_harmful
    }

    /// Share of harmful records, 0-100. Zero for an empty set.
    pub fn harmful_percentage(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            (self.harmful as f64 / self.total() as f64) * 100.0
        }
    }
}

/// Five-bucket histogram over [`RiskCategory`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub anxiety: usize,
    pub depression: usize,
    pub isolation: usize,
    pub suicide: usize,
    pub no_risk: usize,
}

impl CategoryCounts {
    pub fn get(&self, category: RiskCategory) -> usize {
        match category {
            RiskCategory::Anxiety => self.anxiety,
            RiskCategory::Depression => self.depression,
            RiskCategory::Isolation => self.isolation,
            RiskCategory::Suicide => self.suicide,
            RiskCategory::NoRisk => self.no_risk,
        }
    }

    fn increment(&mut self, category: RiskCategory) {
        let slot = match category {
            RiskCategory::Anxiety => &mut self.anxiety,
            RiskCategory::Depression => &mut self.depression,
            RiskCategory::Isolation => &mut self.isolation,
            RiskCategory::Suicide => &mut self.suicide,
            RiskCategory::NoRisk => &mut self.no_risk,
        };
        *slot += 1;
    }

    /// Buckets in display order.
    pub fn iter(&self) -> impl Iterator<Item = (RiskCategory, usize)> + '_ {
        RiskCategory::ALL.iter().map(move |&c| (c, self.get(c)))
    }

    pub fn total(&self) -> usize {
        self.iter().map(|(_, count)| count).sum()
    }
}

/// Harmful record count by local hour (0-23).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourlyHistogram {
    pub counts: [usize; 24],
}

impl Default for HourlyHistogram {
    fn default() -> Self {
        Self { counts: [0; 24] }
    }
}

impl HourlyHistogram {
    /// Hour with the most harmful activity; lowest hour wins ties.
    pub fn peak_hour(&self) -> Option<u8> {
        peak_index(&self.counts)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Harmful record count by day of week (0=Sunday, 6=Saturday).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WeekdayHistogram {
    pub counts: [usize; 7],
}

impl WeekdayHistogram {
    /// Day with the most harmful activity; lowest index wins ties.
    pub fn busiest_day(&self) -> Option<u8> {
        peak_index(&self.counts)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

fn peak_index(counts: &[usize]) -> Option<u8> {
    let max = *counts.iter().max()?;
    if max == 0 {
        return None;
    }
    counts.iter().position(|&c| c == max).map(|i| i as u8)
}

/// Severity band of a daily mean sentiment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    High,
    Moderate,
    Low,
}

impl RiskLevel {
    /// Band for a sentiment score: below -1.4 is high, up to -0.6 moderate.
    pub fn from_sentiment(score: f64) -> Self {
        if score < -1.4 {
            RiskLevel::High
        } else if score <= -0.6 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::High => "High Risk",
            RiskLevel::Moderate => "Moderate Risk",
            RiskLevel::Low => "Low Risk",
        }
    }
}

/// Mean sentiment of harmful records on one local day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentPoint {
    pub date: NaiveDate,
    pub mean: f64,
    /// Number of records averaged
    pub samples: usize,
}

impl SentimentPoint {
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_sentiment(self.mean)
    }
}

/// Total exposure time of harmful records on one local day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExposurePoint {
    pub date: NaiveDate,
    pub seconds: f64,
    /// Number of records summed
    pub samples: usize,
}

impl ExposurePoint {
    /// e.g., "2 minutes"
    pub fn minutes_display(&self) -> String {
        format_minutes(self.seconds)
    }

    /// e.g., "1m 45s"
    pub fn duration_display(&self) -> String {
        format_duration_secs(self.seconds)
    }
}

/// Harmful record count for one raw prediction label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRank {
    pub label: String,
    pub count: usize,
}

/// One non-empty bucket of any view, with the predicate that reproduces it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketCount {
    pub bucket: DrillDown,
    pub count: usize,
}

/// Every dashboard view for one (records, window) pair.
///
/// Rebuilt from scratch on each change; never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateSnapshot {
    /// The window the views were built for
    pub window: TimeWindow,
    /// Number of records inside the window
    pub total_records: usize,
    pub harmful_ratio: HarmfulRatio,
    pub category_counts: CategoryCounts,
    pub hourly: HourlyHistogram,
    pub weekday: WeekdayHistogram,
    /// Ascending by date
    pub sentiment_trend: Vec<SentimentPoint>,
    /// Ascending by date
    pub exposure_trend: Vec<ExposurePoint>,
    /// Most frequent recent raw prediction among harmful records
    pub dominant_category: Option<String>,
    /// Raw prediction labels of harmful records, most frequent first
    pub risk_categories: Vec<CategoryRank>,
}

impl AggregateSnapshot {
    pub fn is_empty(&self) -> bool {
        self.total_records == 0
    }

    /// All non-empty buckets, each paired with its drill-down predicate.
    ///
    /// Resolving `bucket` against the same records and window yields exactly
    /// `count` records.
    pub fn buckets(&self) -> Vec<BucketCount> {
        let mut buckets = Vec::new();
        let mut push = |bucket: DrillDown, count: usize| {
            if count > 0 {
                buckets.push(BucketCount { bucket, count });
            }
        };

        push(DrillDown::Harmful(true), self.harmful_ratio.harmful);
        push(DrillDown::Harmful(false), self.harmful_ratio.non_harmful);
        for (category, count) in self.category_counts.iter() {
            push(DrillDown::Category(category), count);
        }
        for (hour, &count) in self.hourly.counts.iter().enumerate() {
            push(DrillDown::Hour(hour as u8), count);
        }
        for (day, &count) in self.weekday.counts.iter().enumerate() {
            push(DrillDown::Weekday(day as u8), count);
        }
        for point in &self.sentiment_trend {
            push(DrillDown::SentimentDate(point.date), point.samples);
        }
        for point in &self.exposure_trend {
            push(DrillDown::ExposureDate(point.date), point.samples);
        }
        for rank in &self.risk_categories {
            push(DrillDown::Prediction(rank.label.clone()), rank.count);
        }

        buckets
    }
}

// ============================================
// Aggregation
// ============================================

/// Build every view from a windowed, classified record set.
///
/// `recent` is the trailing window the dominant-category view prefers.
pub fn aggregate<Tz: TimeZone>(
    window: &TimeWindow,
    windowed: &[ClassifiedRecord<'_, Tz>],
    recent: &ResolvedWindow,
) -> AggregateSnapshot {
    AggregateSnapshot {
        window: window.clone(),
        total_records: windowed.len(),
        harmful_ratio: harmful_ratio(windowed),
        category_counts: category_counts(windowed),
        hourly: hourly_histogram(windowed),
        weekday: weekday_histogram(windowed),
        sentiment_trend: sentiment_trend(windowed),
        exposure_trend: exposure_trend(windowed),
        dominant_category: dominant_category(windowed, recent),
        risk_categories: risk_category_ranking(windowed),
    }
}

pub fn harmful_ratio<Tz: TimeZone>(records: &[ClassifiedRecord<'_, Tz>]) -> HarmfulRatio {
    let harmful = records.iter().filter(|r| r.is_harmful()).count();
    HarmfulRatio {
        harmful,
        non_harmful: records.len() - harmful,
    }
}

pub fn category_counts<Tz: TimeZone>(records: &[ClassifiedRecord<'_, Tz>]) -> CategoryCounts {
    let mut counts = CategoryCounts::default();
    for record in records {
        counts.increment(record.category());
    }
    counts
}

pub fn hourly_histogram<Tz: TimeZone>(records: &[ClassifiedRecord<'_, Tz>]) -> HourlyHistogram {
    let mut histogram = HourlyHistogram::default();
    for record in records.iter().filter(|r| r.is_harmful()) {
        histogram.counts[usize::from(record.hour())] += 1;
    }
    histogram
}

pub fn weekday_histogram<Tz: TimeZone>(
    records: &[ClassifiedRecord<'_, Tz>],
) -> WeekdayHistogram {
    let mut histogram = WeekdayHistogram::default();
    for record in records.iter().filter(|r| r.is_harmful()) {
        histogram.counts[usize::from(record.weekday())] += 1;
    }
    histogram
}

pub fn sentiment_trend<Tz: TimeZone>(records: &[ClassifiedRecord<'_, Tz>]) -> Vec<SentimentPoint> {
    let mut by_date: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for record in records.iter().filter(|r| r.is_harmful()) {
        if let Some(score) = record.normalized.sentiment.value() {
            let entry = by_date.entry(record.local_date()).or_insert((0.0, 0));
            entry.0 += score;
            entry.1 += 1;
        }
    }

    by_date
        .into_iter()
        .map(|(date, (sum, samples))| SentimentPoint {
            date,
            mean: sum / samples as f64,
            samples,
        })
        .collect()
}

pub fn exposure_trend<Tz: TimeZone>(records: &[ClassifiedRecord<'_, Tz>]) -> Vec<ExposurePoint> {
    let mut by_date: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for record in records.iter().filter(|r| r.is_harmful()) {
        if let Some(seconds) = record.normalized.time_spent.value() {
            let entry = by_date.entry(record.local_date()).or_insert((0.0, 0));
            entry.0 += seconds;
            entry.1 += 1;
        }
    }

    by_date
        .into_iter()
        .map(|(date, (seconds, samples))| ExposurePoint {
            date,
            seconds,
            samples,
        })
        .collect()
}

/// The most frequent raw prediction among harmful records.
///
/// Records inside `recent` are preferred; when none fall there, all harmful
/// records are used. Ties go to the label seen first. `None` when no record
/// in that pool has a label.
pub fn dominant_category<Tz: TimeZone>(
    records: &[ClassifiedRecord<'_, Tz>],
    recent: &ResolvedWindow,
) -> Option<String> {
    let harmful: Vec<&ClassifiedRecord<'_, Tz>> =
        records.iter().filter(|r| r.is_harmful()).collect();
    if harmful.is_empty() {
        return None;
    }

    let in_recent: Vec<_> = harmful
        .iter()
        .copied()
        .filter(|r| recent.contains(r.instant()))
        .collect();
    let pool = if in_recent.is_empty() {
        harmful
    } else {
        in_recent
    };

    let mut tallies: Vec<(&str, usize)> = Vec::new();
    for label in pool.iter().filter_map(|r| r.record().raw_prediction()) {
        match tallies.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, count)) => *count += 1,
            None => tallies.push((label, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for &(label, count) in &tallies {
        if best.map_or(true, |(_, max)| count > max) {
            best = Some((label, count));
        }
    }
    // An unlabeled pool has no dominant category
    best.map(|(label, _)| label.to_string())
}

/// Harmful records per raw prediction label, most frequent first.
pub fn risk_category_ranking<Tz: TimeZone>(
    records: &[ClassifiedRecord<'_, Tz>],
) -> Vec<CategoryRank> {
    let mut ranking: Vec<CategoryRank> = Vec::new();
    for record in records.iter().filter(|r| r.is_harmful()) {
        let label = record
            .record()
            .raw_prediction()
            .unwrap_or(UNKNOWN_PREDICTION);
        match ranking.iter_mut().find(|rank| rank.label == label) {
            Some(rank) => rank.count += 1,
            None => ranking.push(CategoryRank {
                label: label.to_string(),
                count: 1,
            }),
        }
    }
    // Stable sort keeps first-seen order among equal counts
    ranking.sort_by(|a, b| b.count.cmp(&a.count));
    ranking
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::normalize::normalize_records;
    use crate::types::{HarmfulFlag, NumericValue, SearchRecord, TimestampValue};
    use chrono::FixedOffset;

    fn tz() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rec(ts: &str, harmful: bool, prediction: Option<&str>) -> SearchRecord {
        SearchRecord {
            query: "q".to_string(),
            date_and_time: Some(TimestampValue::Text(ts.to_string())),
            is_harmful: Some(HarmfulFlag::Bool(harmful)),
            predicted_result: prediction.map(str::to_string),
            ..Default::default()
        }
    }

    fn classified<'a>(records: &'a [SearchRecord]) -> Vec<ClassifiedRecord<'a, FixedOffset>> {
        normalize_records(records, &tz())
            .into_iter()
            .map(ClassifiedRecord::new)
            .collect()
    }

    fn unbounded() -> ResolvedWindow {
        TimeWindow::All.resolve_on(date(2024, 3, 10))
    }

    #[test]
    fn test_empty_input_yields_empty_views() {
        let snapshot = aggregate::<FixedOffset>(&TimeWindow::All, &[], &unbounded());
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.harmful_ratio, HarmfulRatio::default());
        assert_eq!(snapshot.category_counts.total(), 0);
        assert_eq!(snapshot.hourly.total(), 0);
        assert_eq!(snapshot.weekday.total(), 0);
        assert!(snapshot.sentiment_trend.is_empty());
        assert!(snapshot.exposure_trend.is_empty());
        assert_eq!(snapshot.dominant_category, None);
        assert!(snapshot.buckets().is_empty());
    }

    #[test]
    fn test_ratio_and_categories_cover_every_record() {
        let records = vec![
            rec("2024-03-01T10:00:00Z", true, Some("anxiety")),
            rec("2024-03-01T11:00:00Z", true, Some("Depression")),
            rec("2024-03-01T12:00:00Z", true, Some("stress")),
            rec("2024-03-01T13:00:00Z", false, Some("anxiety")),
            rec("2024-03-01T14:00:00Z", false, None),
        ];
        let windowed = classified(&records);

        let ratio = harmful_ratio(&windowed);
        assert_eq!((ratio.harmful, ratio.non_harmful), (3, 2));
        assert_eq!(ratio.harmful_percentage(), 60.0);

        let counts = category_counts(&windowed);
        assert_eq!(counts.anxiety, 1);
        assert_eq!(counts.depression, 1);
        assert_eq!(counts.no_risk, 3);
        assert_eq!(counts.total(), windowed.len());
    }

    #[test]
    fn test_hour_and_weekday_histograms_count_harmful_only() {
        // 2024-03-05 is a Tuesday
        let records = vec![
            rec("2024-03-05, 02:15:30 pm", true, Some("anxiety")),
            rec("2024-03-05, 02:45:00 pm", true, Some("suicide")),
            rec("2024-03-05, 02:50:00 pm", false, None),
            rec("2024-03-06, 09:00:00 am", true, Some("isolation")),
        ];
        let windowed = classified(&records);

        let hourly = hourly_histogram(&windowed);
        assert_eq!(hourly.counts[14], 2);
        assert_eq!(hourly.counts[9], 1);
        assert_eq!(hourly.total(), 3);
        assert_eq!(hourly.peak_hour(), Some(14));

        let weekday = weekday_histogram(&windowed);
        assert_eq!(weekday.counts[2], 2);
        assert_eq!(weekday.counts[3], 1);
        assert_eq!(weekday.busiest_day(), Some(2));
    }

    #[test]
    fn test_sentiment_trend_means_per_day() {
        let mut a = rec("2024-03-01T08:00:00Z", true, Some("anxiety"));
        a.sentiment_score = Some(NumericValue::Number(-0.5));
        let mut b = rec("2024-03-01T18:00:00Z", true, Some("anxiety"));
        b.sentiment_score = Some(NumericValue::Text("-1.5".into()));
        let mut c = rec("2024-02-28T18:00:00Z", true, Some("anxiety"));
        c.sentiment_score = Some(NumericValue::Number(-2.0));
        let mut not_numeric = rec("2024-03-01T19:00:00Z", true, Some("anxiety"));
        not_numeric.sentiment_score = Some(NumericValue::Text("high".into()));
        let mut safe = rec("2024-03-01T20:00:00Z", false, None);
        safe.sentiment_score = Some(NumericValue::Number(5.0));

        let records = vec![a, b, c, not_numeric, safe];
        let trend = sentiment_trend(&classified(&records));

        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].date, date(2024, 2, 28));
        assert_eq!(trend[0].risk_level(), RiskLevel::High);
        assert_eq!(trend[1].date, date(2024, 3, 1));
        assert_eq!(trend[1].mean, -1.0);
        assert_eq!(trend[1].samples, 2);
        assert_eq!(trend[1].risk_level(), RiskLevel::Moderate);
    }

    #[test]
    fn test_exposure_trend_sums_composite_durations() {
        let mut a = rec("2024-03-01T08:00:00Z", true, Some("anxiety"));
        a.total_time_spent = Some(NumericValue::Number(30.0));
        let mut b = rec("2024-03-01T09:00:00Z", true, Some("anxiety"));
        b.total_time_spent = Some(NumericValue::Text("1m 15s".into()));
        let mut missing = rec("2024-03-01T10:00:00Z", true, Some("anxiety"));
        missing.total_time_spent = None;

        let records = vec![a, b, missing];
        let windowed = classified(&records);
        let trend = exposure_trend(&windowed);

        assert_eq!(trend.len(), 1);
        assert_eq!(trend[0].date, date(2024, 3, 1));
        assert_eq!(trend[0].seconds, 105.0);
        assert_eq!(trend[0].samples, 2);
        assert_eq!(trend[0].minutes_display(), "2 minutes");

        // The record without time spent still counts everywhere else
        assert_eq!(hourly_histogram(&windowed).total(), 3);
    }

    #[test]
    fn test_dominant_category_prefers_recent_window() {
        let records = vec![
            rec("2024-02-01T08:00:00Z", true, Some("depression")),
            rec("2024-02-02T08:00:00Z", true, Some("depression")),
            rec("2024-02-03T08:00:00Z", true, Some("depression")),
            rec("2024-03-08T08:00:00Z", true, Some("anxiety")),
        ];
        let recent = TimeWindow::last_week().resolve_on(date(2024, 3, 10));
        let windowed = classified(&records);

        assert_eq!(
            dominant_category(&windowed, &recent),
            Some("anxiety".to_string())
        );

        // Nothing recent: fall back to the whole harmful set
        let stale = TimeWindow::last_week().resolve_on(date(2025, 1, 1));
        assert_eq!(
            dominant_category(&windowed, &stale),
            Some("depression".to_string())
        );
    }

    #[test]
    fn test_dominant_category_ties_go_to_first_seen() {
        let records = vec![
            rec("2024-03-08T08:00:00Z", true, Some("isolation")),
            rec("2024-03-08T09:00:00Z", true, Some("anxiety")),
            rec("2024-03-08T10:00:00Z", true, Some("anxiety")),
            rec("2024-03-08T11:00:00Z", true, Some("isolation")),
            rec("2024-03-08T12:00:00Z", false, Some("suicide")),
        ];
        let windowed = classified(&records);
        assert_eq!(
            dominant_category(&windowed, &unbounded()),
            Some("isolation".to_string())
        );
    }

    #[test]
    fn test_dominant_category_without_labels() {
        let records = vec![
            rec("2024-03-08T08:00:00Z", true, None),
            rec("2024-03-08T09:00:00Z", false, Some("anxiety")),
        ];
        let windowed = classified(&records);
        assert_eq!(dominant_category(&windowed, &unbounded()), None);

        // Unlabeled recent records shadow labeled older ones
        let records = vec![
            rec("2024-03-01T08:00:00Z", true, Some("depression")),
            rec("2024-03-09T08:00:00Z", true, None),
            rec("2024-03-10T08:00:00Z", true, None),
        ];
        let windowed = classified(&records);
        let recent = TimeWindow::last_week().resolve_on(date(2024, 3, 10));
        assert_eq!(dominant_category(&windowed, &recent), None);
    }

    #[test]
    fn test_risk_category_ranking() {
        let records = vec![
            rec("2024-03-08T08:00:00Z", true, Some("stress")),
            rec("2024-03-08T09:00:00Z", true, None),
            rec("2024-03-08T10:00:00Z", true, Some("anxiety")),
            rec("2024-03-08T11:00:00Z", true, Some("anxiety")),
            rec("2024-03-08T12:00:00Z", false, Some("suicide")),
        ];
        let ranking = risk_category_ranking(&classified(&records));
        let labels: Vec<_> = ranking.iter().map(|r| (r.label.as_str(), r.count)).collect();
        assert_eq!(labels, vec![("anxiety", 2), ("stress", 1), ("Unknown", 1)]);
    }

    #[test]
    fn test_literal_unknown_label_shares_the_unlabeled_bucket() {
        let records = vec![
            rec("2024-03-08T08:00:00Z", true, None),
            rec("2024-03-08T09:00:00Z", true, Some("Unknown")),
            rec("2024-03-08T10:00:00Z", true, Some("stress")),
        ];
        let windowed = classified(&records);

        let ranking = risk_category_ranking(&windowed);
        let labels: Vec<_> = ranking.iter().map(|r| (r.label.as_str(), r.count)).collect();
        assert_eq!(labels, vec![(UNKNOWN_PREDICTION, 2), ("stress", 1)]);

        let bucket = DrillDown::Prediction(UNKNOWN_PREDICTION.to_string());
        let rows: Vec<_> = windowed.iter().filter(|r| bucket.matches(r)).collect();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let mut a = rec("2024-03-01T08:00:00Z", true, Some("anxiety"));
        a.sentiment_score = Some(NumericValue::Number(-0.3));
        a.total_time_spent = Some(NumericValue::Number(12.0));
        let records = vec![a, rec("2024-03-02T08:00:00Z", false, None)];
        let windowed = classified(&records);

        let first = aggregate(&TimeWindow::All, &windowed, &unbounded());
        let second = aggregate(&TimeWindow::All, &windowed, &unbounded());
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
