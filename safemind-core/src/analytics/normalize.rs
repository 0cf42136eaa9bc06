//! Boundary normalization for search records.
//!
//! Every loosely-typed record field is coerced here, once, into a tagged
//! value. Downstream stages (window filter, classifier, aggregator) only
//! ever see [`NormalizedRecord`]s and never re-inspect the raw record.
//!
//! ## Timestamp formats
//!
//! Tried in order, first success wins:
//!
//! 1. Contains `T`: ISO-8601. An explicit offset is honoured; a bare
//!    date-time is read as local time.
//! 2. `YYYY-MM-DD, HH:MM:SS am|pm`: the extension's composite format, read
//!    as local time. Once a string has this shape, a bad component makes
//!    it invalid outright.
//! 3. A handful of free-form layouts (RFC 2822, `YYYY-MM-DD HH:MM:SS`,
//!    `MM/DD/YYYY, hh:mm:ss AM`, bare dates, ...). Bare dates are local
//!    midnight.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use crate::error::{InvalidNumericField, InvalidTimestamp};
use crate::types::{HarmfulFlag, NumericValue, SearchRecord};

const NAIVE_ISO_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

const FREE_FORM_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y, %I:%M:%S %p",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
    "%b %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M:%S",
];

const FREE_FORM_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
];

// ============================================
// Timestamps
// ============================================

/// Parse a raw record timestamp into an instant in `tz`.
pub fn normalize_timestamp<Tz: TimeZone>(
    raw: &str,
    tz: &Tz,
) -> Result<DateTime<Tz>, InvalidTimestamp> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(InvalidTimestamp::new(raw));
    }

    if value.contains('T') {
        if let Some(instant) = parse_iso(value, tz) {
            return Ok(instant);
        }
    }

    if let Some(composite) = parse_composite(value, tz) {
        return composite.ok_or_else(|| InvalidTimestamp::new(raw));
    }

    parse_free_form(value, tz).ok_or_else(|| InvalidTimestamp::new(raw))
}

fn parse_iso<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(tz));
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(tz));
    }
    NAIVE_ISO_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .and_then(|naive| localize(tz, &naive))
}

/// Parse the `YYYY-MM-DD, HH:MM:SS am|pm` layout.
///
/// Returns `None` when the string does not have the shape at all, and
/// `Some(None)` when it does but a component is bad.
fn parse_composite<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<Option<DateTime<Tz>>> {
    if !value.contains('-') || !value.contains(',') {
        return None;
    }
    let (date_part, time_part) = value.split_once(',')?;
    let mut date_fields = date_part.trim().split('-');
    let (year, month, day) = (date_fields.next()?, date_fields.next()?, date_fields.next()?);
    if date_fields.next().is_some() || year.len() != 4 {
        return None;
    }

    Some(composite_instant(year, month, day, time_part.trim(), tz))
}

fn composite_instant<Tz: TimeZone>(
    year: &str,
    month: &str,
    day: &str,
    time_part: &str,
    tz: &Tz,
) -> Option<DateTime<Tz>> {
    let date = NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)?;

    let mut pieces = time_part.split_whitespace();
    let clock = pieces.next()?;
    let period = pieces.next().map(str::to_ascii_lowercase);
    if pieces.next().is_some() {
        return None;
    }

    let mut clock_fields = clock.split(':');
    let hours: u32 = clock_fields.next()?.parse().ok()?;
    let minutes: u32 = clock_fields.next()?.parse().ok()?;
    let seconds: u32 = clock_fields.next()?.parse().ok()?;
    if clock_fields.next().is_some() {
        return None;
    }

    let hour24 = match period.as_deref() {
        Some("am") if hours == 12 => 0,
        Some("pm") if hours < 12 => hours + 12,
        Some("am") | Some("pm") | None => hours,
        Some(_) => return None,
    };

    let time = NaiveTime::from_hms_opt(hour24, minutes, seconds)?;
    localize(tz, &date.and_time(time))
}

fn parse_free_form<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(tz));
    }
    if let Some(naive) = FREE_FORM_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    {
        return localize(tz, &naive);
    }
    FREE_FORM_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .and_then(|date| localize(tz, &date.and_time(NaiveTime::MIN)))
}

/// Attach `tz` to a wall-clock time. Ambiguous times take the earlier
/// instant; times skipped by a DST jump are invalid.
fn localize<Tz: TimeZone>(tz: &Tz, naive: &NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => None,
    }
}

// ============================================
// Flags and numeric fields
// ============================================

/// Coerce `isHarmful` to a boolean.
///
/// Strings are true only when they equal `"true"` ignoring case; other JSON
/// values follow the usual truthiness rules.
pub fn coerce_harmful(flag: Option<&HarmfulFlag>) -> bool {
    match flag {
        None => false,
        Some(HarmfulFlag::Bool(b)) => *b,
        Some(HarmfulFlag::Text(s)) => s.trim().eq_ignore_ascii_case("true"),
        Some(HarmfulFlag::Other(value)) => match value {
            serde_json::Value::Null => false,
            serde_json::Value::Bool(b) => *b,
            serde_json::Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()),
            serde_json::Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
        },
    }
}

/// A coerced optional field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<T> {
    /// Field absent or null
    Missing,
    /// Field present and usable
    Valid(T),
    /// Field present but unusable
    Invalid(InvalidNumericField),
}

impl<T: Copy> FieldValue<T> {
    /// The usable value, if any.
    pub fn value(&self) -> Option<T> {
        match self {
            FieldValue::Valid(v) => Some(*v),
            FieldValue::Missing | FieldValue::Invalid(_) => None,
        }
    }
}

/// Coerce `sentimentScore` to a finite number.
pub fn coerce_sentiment(value: Option<&NumericValue>) -> FieldValue<f64> {
    let Some(value) = value else {
        return FieldValue::Missing;
    };
    let parsed = match value {
        NumericValue::Number(n) => Some(*n),
        NumericValue::Text(s) => s.trim().parse::<f64>().ok(),
        NumericValue::Other(_) => None,
    };
    match parsed {
        Some(v) if v.is_finite() => FieldValue::Valid(v),
        _ => FieldValue::Invalid(InvalidNumericField::Sentiment(display_raw(value))),
    }
}

/// Coerce `totalTimeSpent` to a non-negative number of seconds.
pub fn coerce_time_spent(value: Option<&NumericValue>) -> FieldValue<f64> {
    let Some(value) = value else {
        return FieldValue::Missing;
    };
    let parsed = match value {
        NumericValue::Number(n) if n.is_finite() && *n >= 0.0 => Some(*n),
        NumericValue::Number(_) | NumericValue::Other(_) => None,
        NumericValue::Text(s) => parse_time_spent(s),
    };
    match parsed {
        Some(v) => FieldValue::Valid(v),
        None => FieldValue::Invalid(InvalidNumericField::TimeSpent(display_raw(value))),
    }
}

/// Parse a time-spent string into seconds.
///
/// Accepts a plain decimal (`"90"`, `"12.5"`) or `<int><unit>` tokens with
/// units `h`, `m`, `s` (`"2m 15s"`, `"1h"`).
pub fn parse_time_spent(raw: &str) -> Option<f64> {
    let value = raw.trim().to_ascii_lowercase();
    if value.is_empty() {
        return None;
    }
    if let Ok(secs) = value.parse::<f64>() {
        return (secs.is_finite() && secs >= 0.0).then_some(secs);
    }

    let mut total: u64 = 0;
    let mut digits = String::new();
    let mut saw_unit = false;
    for ch in value.chars() {
        match ch {
            '0'..='9' => digits.push(ch),
            'h' | 'm' | 's' => {
                let amount: u64 = digits.parse().ok()?;
                let scale = match ch {
                    'h' => 3600,
                    'm' => 60,
                    _ => 1,
                };
                total = total.checked_add(amount.checked_mul(scale)?)?;
                digits.clear();
                saw_unit = true;
            }
            c if c.is_whitespace() => {
                if !digits.is_empty() {
                    return None;
                }
            }
            _ => return None,
        }
    }

    (saw_unit && digits.is_empty()).then_some(total as f64)
}

fn display_raw(value: &NumericValue) -> String {
    match value {
        NumericValue::Number(n) => n.to_string(),
        NumericValue::Text(s) => s.clone(),
        NumericValue::Other(v) => v.to_string(),
    }
}

// ============================================
// Normalized records
// ============================================

/// A record with every field coerced and a valid instant attached.
#[derive(Debug, Clone)]
pub struct NormalizedRecord<'a, Tz: TimeZone> {
    /// Position of the record in the caller's input slice
    pub index: usize,
    /// The untouched input record
    pub record: &'a SearchRecord,
    /// Canonical instant, in the engine's time zone
    pub instant: DateTime<Tz>,
    /// Coerced `isHarmful`
    pub harmful: bool,
    pub sentiment: FieldValue<f64>,
    pub time_spent: FieldValue<f64>,
}

impl<'a, Tz: TimeZone> NormalizedRecord<'a, Tz> {
    /// Normalize one record, failing only on its timestamp.
    pub fn from_record(
        index: usize,
        record: &'a SearchRecord,
        tz: &Tz,
    ) -> Result<Self, InvalidTimestamp> {
        let raw = record.raw_timestamp().unwrap_or_default();
        let instant = normalize_timestamp(raw, tz)?;

        Ok(Self {
            index,
            record,
            instant,
            harmful: coerce_harmful(record.is_harmful.as_ref()),
            sentiment: coerce_sentiment(record.sentiment_score.as_ref()),
            time_spent: coerce_time_spent(record.total_time_spent.as_ref()),
        })
    }

    /// Local calendar date of the record.
    pub fn local_date(&self) -> NaiveDate {
        self.instant.date_naive()
    }
}

/// Normalize a batch, dropping records whose timestamp is invalid.
pub fn normalize_records<'a, Tz: TimeZone>(
    records: &'a [SearchRecord],
    tz: &Tz,
) -> Vec<NormalizedRecord<'a, Tz>> {
    let normalized: Vec<_> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match NormalizedRecord::from_record(index, record, tz) {
            Ok(normalized) => Some(normalized),
            Err(e) => {
                tracing::trace!(index, error = %e, "Excluding record");
                None
            }
        })
        .collect();

    tracing::debug!(
        input = records.len(),
        valid = normalized.len(),
        "Normalized record timestamps"
    );
    normalized
}
