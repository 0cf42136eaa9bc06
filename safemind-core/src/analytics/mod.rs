//! Risk analytics for search activity
//!
//! The pipeline runs in five stages, each in its own module:
//! - [`normalize`]: raw timestamps and loosely-typed fields into typed values
//! - [`window`]: whole-day time windows resolved against "now"
//! - [`classify`]: harmful flag and display category per record
//! - [`snapshot`]: the dashboard views over a windowed record set
//! - [`drilldown`]: predicates that select the records behind one bucket
//!
//! [`engine::RiskEngine`] drives them for a given clock and time zone.

pub mod classify;
pub mod drilldown;
pub mod engine;
pub mod normalize;
pub mod snapshot;
pub mod window;

pub use classify::{classify, Classification, ClassifiedRecord, RiskCategory};
pub use drilldown::DrillDown;
pub use engine::{newest_first, RiskEngine, DEFAULT_DOMINANT_LOOKBACK_DAYS};
pub use normalize::{normalize_timestamp, FieldValue, NormalizedRecord};
pub use snapshot::{
    AggregateSnapshot, BucketCount, CategoryCounts, CategoryRank, ExposurePoint, HarmfulRatio,
    HourlyHistogram, RiskLevel, SentimentPoint, WeekdayHistogram, UNKNOWN_PREDICTION,
};
pub use window::{ResolvedWindow, TimeWindow, WindowAnchor};
