//! Risk analytics engine
//!
//! Ties the pipeline stages together for one time zone and one clock.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                         RISK ENGINE                              │
//! │                                                                  │
//! │  SearchRecord[] ──► normalize ──► window ──► classify ──┐        │
//! │                     (drop bad     (whole local  (harmful,│        │
//! │                      timestamps)   days)        category)│        │
//! │                                                          ▼        │
//! │                                   ┌──────────────┬─────────────┐ │
//! │                                   │  aggregate   │   resolve   │ │
//! │                                   │ (8 views)    │ (predicate) │ │
//! │                                   └──────┬───────┴──────┬──────┘ │
//! └──────────────────────────────────────────┼──────────────┼────────┘
//!                                            ▼              ▼
//!                                  AggregateSnapshot   SearchRecord subset
//! ```
//!
//! Snapshot and drill-down share the first three stages, so a bucket's count
//! and its drill-down row count cannot drift apart.
//!
//! ## Usage
//!
//! ```rust
//! use safemind_core::analytics::{DrillDown, RiskEngine, TimeWindow};
//! use safemind_core::SearchRecord;
//!
//! let records: Vec<SearchRecord> = serde_json::from_str(r#"[
//!     {"query": "q", "dateAndTime": "2024-03-05, 02:15:30 pm",
//!      "isHarmful": true, "predictedResult": "anxiety"}
//! ]"#).unwrap();
//!
//! let engine = RiskEngine::new(chrono::Utc);
//! let snapshot = engine.snapshot(&records, &TimeWindow::All);
//! assert_eq!(snapshot.hourly.counts[14], 1);
//!
//! let rows = engine.resolve(&records, &snapshot.window, &DrillDown::Hour(14));
//! assert_eq!(rows.len(), 1);
//! ```

use chrono::{DateTime, Local, TimeZone, Utc};

use super::classify::ClassifiedRecord;
use super::drilldown::DrillDown;
use super::normalize::{normalize_records, normalize_timestamp};
use super::snapshot::{aggregate, AggregateSnapshot};
use super::window::{ResolvedWindow, TimeWindow};
use crate::config::AnalyticsConfig;
use crate::error::InvalidTimestamp;
use crate::types::SearchRecord;

/// Default trailing window for the dominant-category view.
pub const DEFAULT_DOMINANT_LOOKBACK_DAYS: u32 = 7;

/// Stateless analytics over search records.
///
/// Holds only the clock and tuning knobs; every call takes its records and
/// window as arguments and returns fresh values.
#[derive(Debug, Clone)]
pub struct RiskEngine<Tz: TimeZone> {
    now: DateTime<Tz>,
    dominant_lookback_days: u32,
}

impl RiskEngine<Local> {
    /// Engine on the host's local time zone and clock.
    pub fn local() -> Self {
        Self::new(Local)
    }
}

impl<Tz: TimeZone> RiskEngine<Tz> {
    /// Engine in `tz`, reading the system clock.
    pub fn new(tz: Tz) -> Self {
        Self::at(Utc::now().with_timezone(&tz))
    }

    /// Engine pinned to a fixed "now".
    pub fn at(now: DateTime<Tz>) -> Self {
        Self {
            now,
            dominant_lookback_days: DEFAULT_DOMINANT_LOOKBACK_DAYS,
        }
    }

    /// Apply the tunables from configuration.
    pub fn with_config(self, config: &AnalyticsConfig) -> Self {
        self.with_dominant_lookback_days(config.dominant_lookback_days)
    }

    pub fn with_dominant_lookback_days(mut self, days: u32) -> Self {
        self.dominant_lookback_days = days.max(1);
        self
    }

    pub fn now(&self) -> &DateTime<Tz> {
        &self.now
    }

    pub fn timezone(&self) -> Tz {
        self.now.timezone()
    }

    /// Parse one raw timestamp in the engine's time zone.
    pub fn normalize(&self, raw: &str) -> Result<DateTime<Tz>, InvalidTimestamp> {
        normalize_timestamp(raw, &self.timezone())
    }

    /// Resolve a window against the engine's clock.
    pub fn resolve_window(&self, window: &TimeWindow) -> ResolvedWindow {
        window.resolve(&self.now)
    }

    /// Records whose timestamp is valid and inside `window`, in input order.
    pub fn filter<'a>(
        &self,
        records: &'a [SearchRecord],
        window: &TimeWindow,
    ) -> Vec<&'a SearchRecord> {
        self.windowed(records, window)
            .into_iter()
            .map(|r| r.record())
            .collect()
    }

    /// Normalize, window and classify `records`.
    pub fn windowed<'a>(
        &self,
        records: &'a [SearchRecord],
        window: &TimeWindow,
    ) -> Vec<ClassifiedRecord<'a, Tz>> {
        let bounds = self.resolve_window(window);
        let windowed: Vec<_> = normalize_records(records, &self.timezone())
            .into_iter()
            .filter(|r| bounds.contains(&r.instant))
            .map(ClassifiedRecord::new)
            .collect();

        tracing::debug!(
            input = records.len(),
            windowed = windowed.len(),
            first_day = ?bounds.first_day,
            last_day = ?bounds.last_day,
            "Applied time window"
        );
        windowed
    }

    /// Build every view from an already-windowed set.
    pub fn aggregate(
        &self,
        window: &TimeWindow,
        windowed: &[ClassifiedRecord<'_, Tz>],
    ) -> AggregateSnapshot {
        let recent = TimeWindow::last_n_days(self.dominant_lookback_days).resolve(&self.now);
        aggregate(window, windowed, &recent)
    }

    /// Full pipeline: normalize, window, classify and aggregate.
    pub fn snapshot(&self, records: &[SearchRecord], window: &TimeWindow) -> AggregateSnapshot {
        let windowed = self.windowed(records, window);
        let snapshot = self.aggregate(window, &windowed);

        tracing::debug!(
            records = snapshot.total_records,
            harmful = snapshot.harmful_ratio.harmful,
            "Built aggregate snapshot"
        );
        snapshot
    }

    /// The records behind one bucket, in input order.
    pub fn resolve<'a>(
        &self,
        records: &'a [SearchRecord],
        window: &TimeWindow,
        bucket: &DrillDown,
    ) -> Vec<&'a SearchRecord> {
        self.resolve_detailed(records, window, bucket)
            .into_iter()
            .map(|r| r.record())
            .collect()
    }

    /// The records behind one bucket with their normalized fields, in input order.
    pub fn resolve_detailed<'a>(
        &self,
        records: &'a [SearchRecord],
        window: &TimeWindow,
        bucket: &DrillDown,
    ) -> Vec<ClassifiedRecord<'a, Tz>> {
        let rows: Vec<_> = self
            .windowed(records, window)
            .into_iter()
            .filter(|r| bucket.matches(r))
            .collect();

        tracing::debug!(bucket = ?bucket, rows = rows.len(), "Resolved drill-down");
        rows
    }
}

/// Order drill-down rows newest first. Membership is unchanged.
pub fn newest_first<Tz: TimeZone>(rows: &mut [ClassifiedRecord<'_, Tz>]) {
    rows.sort_by(|a, b| b.instant().cmp(a.instant()));
}
