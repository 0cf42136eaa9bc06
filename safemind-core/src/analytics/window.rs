//! Time windows for dashboard filtering.
//!
//! Every window is a closed range of whole local calendar days, so a window
//! check reduces to comparing a record's local date against the first and
//! last day. This is equivalent to `[startOfDay(first), endOfDay(last)]`
//! and is immune to DST gaps at midnight.

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::format::format_display_date;

/// Which day a last-N-days window ends on.
///
/// The dashboard and the detail view historically disagreed here, so the
/// caller must choose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowAnchor {
    /// Ends at the end of today; covers today and the N-1 days before it
    #[default]
    Today,
    /// Ends at the end of yesterday; covers the N days before today
    Yesterday,
}

impl std::str::FromStr for WindowAnchor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "today" => Ok(WindowAnchor::Today),
            "yesterday" => Ok(WindowAnchor::Yesterday),
            _ => Err(format!("unknown window anchor: {}", s)),
        }
    }
}

/// A requested time window. Constructed fresh per filter change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeWindow {
    /// Today only
    Today,
    /// The last N days
    LastNDays { days: u32, anchor: WindowAnchor },
    /// Sunday through Saturday of the current week
    ThisWeek,
    /// One calendar day
    SpecificDate { date: NaiveDate },
    /// Inclusive day range; a missing bound is open on that side
    CustomRange {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    /// No time restriction
    All,
}

impl Default for TimeWindow {
    fn default() -> Self {
        TimeWindow::last_week()
    }
}

impl TimeWindow {
    /// Last N days ending today.
    pub fn last_n_days(days: u32) -> Self {
        TimeWindow::LastNDays {
            days,
            anchor: WindowAnchor::Today,
        }
    }

    /// The dashboard's default: last 7 days ending today.
    pub fn last_week() -> Self {
        TimeWindow::last_n_days(7)
    }

    /// Resolve against the local date of `now`.
    pub fn resolve<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> ResolvedWindow {
        self.resolve_on(now.date_naive())
    }

    /// Resolve against an explicit "today".
    pub fn resolve_on(&self, today: NaiveDate) -> ResolvedWindow {
        match self {
            TimeWindow::Today => ResolvedWindow::days(today, today),
            TimeWindow::LastNDays { days: 0, .. } => ResolvedWindow::empty(),
            TimeWindow::LastNDays { days, anchor } => {
                let last = match anchor {
                    WindowAnchor::Today => Some(today),
                    WindowAnchor::Yesterday => today.checked_sub_days(Days::new(1)),
                };
                let Some(last) = last else {
                    return ResolvedWindow::empty();
                };
                // Past the calendar's start the window is open on that side
                ResolvedWindow {
                    first_day: last.checked_sub_days(Days::new(u64::from(*days) - 1)),
                    last_day: Some(last),
                }
            }
            TimeWindow::ThisWeek => {
                let offset = u64::from(today.weekday().num_days_from_sunday());
                ResolvedWindow {
                    first_day: today.checked_sub_days(Days::new(offset)),
                    last_day: today.checked_add_days(Days::new(6 - offset)),
                }
            }
            TimeWindow::SpecificDate { date } => ResolvedWindow::days(*date, *date),
            TimeWindow::CustomRange { start, end } => ResolvedWindow {
                first_day: *start,
                last_day: *end,
            },
            TimeWindow::All => ResolvedWindow::unbounded(),
        }
    }

    /// Human-readable description of the window as of `today`.
    pub fn describe(&self, today: NaiveDate) -> String {
        let resolved = self.resolve_on(today);
        match self {
            TimeWindow::Today => {
                format!("Showing data for today ({})", format_display_date(today))
            }
            TimeWindow::SpecificDate { date } => {
                format!("Showing data for {}", format_display_date(*date))
            }
            TimeWindow::ThisWeek => format!(
                "Showing this week's data ({})",
                resolved.describe_range()
            ),
            TimeWindow::LastNDays { days, .. } => format!(
                "Showing the last {} day{} ({})",
                days,
                if *days == 1 { "" } else { "s" },
                resolved.describe_range()
            ),
            TimeWindow::CustomRange { .. } if resolved.is_unbounded() => {
                "Showing all data".to_string()
            }
            TimeWindow::CustomRange { .. } => {
                format!("Showing data from {}", resolved.describe_range())
            }
            TimeWindow::All => "Showing all available data".to_string(),
        }
    }
}

/// A window resolved to concrete inclusive day bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedWindow {
    /// First included local day; `None` means unbounded
    pub first_day: Option<NaiveDate>,
    /// Last included local day; `None` means unbounded
    pub last_day: Option<NaiveDate>,
}

impl ResolvedWindow {
    fn days(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            first_day: Some(first),
            last_day: Some(last),
        }
    }

    /// A window no day falls into.
    fn empty() -> Self {
        Self {
            first_day: Some(NaiveDate::MAX),
            last_day: Some(NaiveDate::MIN),
        }
    }

    fn unbounded() -> Self {
        Self {
            first_day: None,
            last_day: None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.first_day.is_none() && self.last_day.is_none()
    }

    /// Whether a local calendar day falls inside the window.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.first_day.map_or(true, |first| date >= first)
            && self.last_day.map_or(true, |last| date <= last)
    }

    /// Whether an instant falls inside the window, judged on its local date.
    pub fn contains<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> bool {
        self.contains_date(instant.date_naive())
    }

    fn describe_range(&self) -> String {
        match (self.first_day, self.last_day) {
            (Some(first), Some(last)) => format!(
                "{} to {}",
                format_display_date(first),
                format_display_date(last)
            ),
            (Some(first), None) => format!("{} onwards", format_display_date(first)),
            (None, Some(last)) => format!("up to {}", format_display_date(last)),
            (None, None) => "all dates".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDateTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(s: &str) -> DateTime<FixedOffset> {
        let tz = FixedOffset::east_opt(3600).unwrap();
        let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
        tz.from_local_datetime(&naive).unwrap()
    }

    #[test]
    fn test_today_bounds() {
        let window = TimeWindow::Today.resolve(&at("2024-03-10 12:00:00"));
        assert!(window.contains(&at("2024-03-10 00:00:00")));
        assert!(window.contains(&at("2024-03-10 23:59:59")));
        assert!(!window.contains(&at("2024-03-09 23:59:59")));
        assert!(!window.contains(&at("2024-03-11 00:00:00")));
    }

    #[test]
    fn test_last_seven_days_anchored_today() {
        let window = TimeWindow::last_week().resolve(&at("2024-03-10 12:00:00"));
        assert_eq!(window.first_day, Some(date(2024, 3, 4)));
        assert_eq!(window.last_day, Some(date(2024, 3, 10)));
        assert!(window.contains(&at("2024-03-04 00:00:01")));
        assert!(!window.contains(&at("2024-03-03 23:59:59")));
        assert!(window.contains(&at("2024-03-10 23:59:59")));
    }

    #[test]
    fn test_last_seven_days_anchored_yesterday() {
        let window = TimeWindow::LastNDays {
            days: 7,
            anchor: WindowAnchor::Yesterday,
        }
        .resolve(&at("2024-03-10 12:00:00"));
        assert_eq!(window.first_day, Some(date(2024, 3, 3)));
        assert_eq!(window.last_day, Some(date(2024, 3, 9)));
        assert!(window.contains(&at("2024-03-03 00:00:01")));
        assert!(!window.contains(&at("2024-03-02 23:59:59")));
        assert!(!window.contains(&at("2024-03-10 08:00:00")));
    }

    #[test]
    fn test_zero_days_is_empty() {
        let window = TimeWindow::last_n_days(0).resolve_on(date(2024, 3, 10));
        assert!(!window.contains_date(date(2024, 3, 10)));
        assert!(!window.contains_date(date(2024, 3, 11)));
    }

    #[test]
    fn test_huge_day_counts_open_the_lower_bound() {
        let today = date(2024, 3, 10);
        let window = TimeWindow::last_n_days(u32::MAX).resolve_on(today);
        assert_eq!(window.first_day, None);
        assert_eq!(window.last_day, Some(today));
        assert!(window.contains_date(date(1, 1, 1)));
        assert!(!window.contains_date(date(2024, 3, 11)));

        let window = TimeWindow::LastNDays {
            days: u32::MAX,
            anchor: WindowAnchor::Yesterday,
        }
        .resolve_on(NaiveDate::MIN);
        assert!(!window.contains_date(NaiveDate::MIN));
    }

    #[test]
    fn test_this_week_at_calendar_edges() {
        let window = TimeWindow::ThisWeek.resolve_on(NaiveDate::MAX);
        assert!(window.contains_date(NaiveDate::MAX));

        let window = TimeWindow::ThisWeek.resolve_on(NaiveDate::MIN);
        assert!(window.contains_date(NaiveDate::MIN));
    }

    #[test]
    fn test_this_week_runs_sunday_to_saturday() {
        // 2024-03-13 is a Wednesday
        let window = TimeWindow::ThisWeek.resolve_on(date(2024, 3, 13));
        assert_eq!(window.first_day, Some(date(2024, 3, 10)));
        assert_eq!(window.last_day, Some(date(2024, 3, 16)));
    }

    #[test]
    fn test_specific_date_matches_local_day() {
        let window = TimeWindow::SpecificDate {
            date: date(2024, 3, 5),
        }
        .resolve_on(date(2024, 3, 10));
        assert!(window.contains(&at("2024-03-05 00:30:00")));
        assert!(!window.contains(&at("2024-03-04 23:30:00")));
    }

    #[test]
    fn test_custom_range_with_missing_bound() {
        let open_end = TimeWindow::CustomRange {
            start: Some(date(2024, 3, 1)),
            end: None,
        }
        .resolve_on(date(2024, 3, 10));
        assert!(open_end.contains_date(date(2030, 1, 1)));
        assert!(!open_end.contains_date(date(2024, 2, 29)));

        let open_both = TimeWindow::CustomRange {
            start: None,
            end: None,
        }
        .resolve_on(date(2024, 3, 10));
        assert!(open_both.is_unbounded());
    }

    #[test]
    fn test_describe() {
        let today = date(2024, 3, 10);
        assert_eq!(
            TimeWindow::Today.describe(today),
            "Showing data for today (10 Mar 2024)"
        );
        assert_eq!(
            TimeWindow::last_week().describe(today),
            "Showing the last 7 days (04 Mar 2024 to 10 Mar 2024)"
        );
        assert_eq!(TimeWindow::All.describe(today), "Showing all available data");
    }

    #[test]
    fn test_window_serde_shape() {
        let json = serde_json::to_value(TimeWindow::last_week()).unwrap();
        assert_eq!(json["kind"], "last_n_days");
        assert_eq!(json["days"], 7);
        assert_eq!(json["anchor"], "today");
    }
}
