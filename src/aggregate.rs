//! Date-bucketed views over task collections
//!
//! These are the pure routines behind the daily, calendar and statistics views: grouping
//! tasks per calendar day, building a 30-day rolling summary, and counting completion
//! status. They only ever read the tasks they are given, and they never look at the
//! system clock: "today" is a parameter, so callers wanting the current window pass
//! `Local::now().date_naive()` themselves.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// How many days the rolling daily summary covers (the reference day included)
pub const ROLLING_WINDOW_DAYS: usize = 30;

/// Per-day counters of one calendar day of the rolling window
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// The day, as a `YYYY-MM-DD` string
    pub date: String,
    /// How many tasks are assigned to this day
    pub total: u32,
    /// How many of them are completed
    pub completed: u32,
}

/// Aggregate completed/pending counts over a task collection.
///
/// The counters are signed: callers pass counts in, and `pending` is plain
/// `total - completed` without clamping, so inconsistent inputs show up as a
/// negative pending count instead of being silently masked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub completed: i64,
    pub pending: i64,
}

/// Format a day the way the backend keys tasks (`YYYY-MM-DD`)
pub fn format_day(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Group tasks by their calendar day.
///
/// Buckets are keyed by the exact `date` string of each task (malformed dates are
/// carried verbatim, they just make a bucket of their own). Within a bucket, tasks keep
/// the order of the input. Days with no task get no bucket: zero-filling is the
/// business of [`rolling_daily_stats`], not of the grouping.
pub fn group_by_date(tasks: &[Task]) -> HashMap<&str, Vec<&Task>> {
    let mut buckets: HashMap<&str, Vec<&Task>> = HashMap::new();

    for task in tasks {
        buckets.entry(task.date())
            .or_insert_with(Vec::new)
            .push(task);
    }

    buckets
}

/// Build the per-day summary of the 30 days ending at `reference_date`.
///
/// The result always contains exactly [`ROLLING_WINDOW_DAYS`] entries, sorted by
/// ascending date, one per day of `[reference_date - 29, reference_date]`, counting the
/// tasks whose `date` string matches that day exactly. Days without tasks stay at zero,
/// and tasks outside the window (or with a date that parses to nothing at all) are
/// ignored.
pub fn rolling_daily_stats(tasks: &[Task], reference_date: NaiveDate) -> Vec<DailySummary> {
    let mut stats: HashMap<String, DailySummary> = HashMap::new();

    for days_back in 0..ROLLING_WINDOW_DAYS {
        let day = format_day(reference_date - Duration::days(days_back as i64));
        stats.insert(day.clone(), DailySummary{ date: day, total: 0, completed: 0 });
    }

    for task in tasks {
        if let Some(stat) = stats.get_mut(task.date()) {
            stat.total += 1;
            if task.completed() {
                stat.completed += 1;
            }
        }
    }

    let mut summaries: Vec<DailySummary> = stats.into_iter().map(|(_, stat)| stat).collect();
    summaries.sort_by(|a, b| a.date.cmp(&b.date));
    summaries
}

/// Derive the completed/pending split from a collection's counts.
///
/// `pending` is `total_count - completed_count`, kept as-is even when the caller hands
/// over a completed count larger than the total
pub fn status_summary(total_count: i64, completed_count: i64) -> StatusSummary {
    StatusSummary {
        completed: completed_count,
        pending: total_count - completed_count,
    }
}

/// First and last day of the month containing `date`, as `YYYY-MM-DD` strings.
///
/// This is the inclusive range the calendar view fetches
pub fn month_bounds(date: NaiveDate) -> (String, String) {
    let first = date.with_day(1)
        .unwrap(/* day 1 exists in every month */);
    let first_of_next = match date.month() {
        12 => NaiveDate::from_ymd_opt(date.year() + 1, 1, 1),
        month => NaiveDate::from_ymd_opt(date.year(), month + 1, 1),
    }.unwrap(/* the first of a month is always a valid date */);
    let last = first_of_next.pred_opt()
        .unwrap(/* first_of_next is at least year 1, this cannot underflow */);

    (format_day(first), format_day(last))
}
