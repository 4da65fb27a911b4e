//! Progress derived from a plan's completion log.
//!
//! One log per calendar day of the reference month counts as full credit;
//! the plan's kind and target count are deliberately not consulted. The
//! result is recomputed on every log toggle, never cached.

use chrono::{Datelike, Months, NaiveDate};

use mandalart_db::models::ActionLog;

/// Number of days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    // Last day of the month = the day before the first of the next month.
    date.with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        .map_or(0, |last| last.day())
}

/// Percentage of the reference month's days carrying a log entry, capped
/// at 100.
pub fn month_progress(logs: &[ActionLog], reference: NaiveDate) -> f32 {
    let days = days_in_month(reference);
    if days == 0 {
        return 0.0;
    }

    let in_month = logs
        .iter()
        .filter(|log| {
            log.log_date.year() == reference.year() && log.log_date.month() == reference.month()
        })
        .count();

    (100.0 * in_month as f32 / days as f32).min(100.0)
}
