// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Contribution streak analysis.
//!
//! The current streak is the run of non-zero days ending at the last day the
//! calendar reports. It is not compared against today's date: a stale
//! calendar whose last day has contributions reads as an active streak, and a
//! calendar that does not yet contain today reads from the previous day.

use chrono::NaiveDate;

use crate::{
    error::Outcome,
    model::{ContributionDay, StreakStats},
    upstream::RawCalendar,
};

/// Computes streak statistics over a day series in any order.
///
/// Days are sorted by date before scanning, so the result does not depend on
/// input order.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use readme_stats::{ContributionDay, analyze_days};
///
/// let day = |d: u32, count: u64| ContributionDay {
///     date: NaiveDate::from_ymd_opt(2024, 1, d,).unwrap(),
///     count,
/// };
/// let stats = analyze_days(vec![day(1, 3,), day(2, 0,), day(3, 5,), day(4, 2,)],);
/// assert_eq!(stats.total_contributions, 10);
/// assert_eq!(stats.longest_streak, 2);
/// assert_eq!(stats.current_streak, 2);
/// ```
pub fn analyze_days(mut days: Vec<ContributionDay,>,) -> StreakStats
{
    days.sort_by_key(|day| day.date,);

    let total_contributions = days.iter().map(|day| day.count,).sum();

    let mut running = 0u64;
    let mut longest = 0u64;
    for day in &days {
        if day.count > 0 {
            running += 1;
        } else {
            longest = longest.max(running,);
            running = 0;
        }
    }
    // The trailing run is never closed by a zero day.
    longest = longest.max(running,);

    let current_streak = match days.last() {
        Some(last,) if last.count > 0 => running,
        _ => 0,
    };

    StreakStats {
        total_contributions,
        current_streak,
        longest_streak: longest,
        start_date: days.first().map(|day| day.date,),
        end_date: days.last().map(|day| day.date,),
    }
}

/// Flattens and validates a raw calendar, then analyzes it.
///
/// A missing calendar, an unparseable date or a negative count yields
/// [`Outcome::Degraded`] carrying zeroed statistics.
pub fn analyze_calendar(calendar: &RawCalendar,) -> Outcome<StreakStats,>
{
    match flatten_calendar(calendar,) {
        Ok(days,) => Outcome::Complete(analyze_days(days,),),
        Err(reason,) => Outcome::degraded(StreakStats::default(), reason,),
    }
}

fn flatten_calendar(calendar: &RawCalendar,) -> Result<Vec<ContributionDay,>, String,>
{
    let weeks = calendar.weeks.as_ref().ok_or("contribution calendar is missing",)?;

    let mut days = Vec::with_capacity(weeks.len() * 7,);
    for raw in weeks.iter().flat_map(|week| week.contribution_days.iter(),) {
        let date_text = raw.date.as_deref().ok_or("contribution day without date",)?;
        let date = NaiveDate::parse_from_str(date_text, "%Y-%m-%d",)
            .map_err(|e| format!("invalid contribution date '{date_text}': {e}"),)?;
        let count = raw.contribution_count.ok_or_else(|| format!("missing count for {date}"),)?;
        let count = u64::try_from(count,)
            .map_err(|_| format!("negative contribution count {count} for {date}"),)?;
        days.push(ContributionDay {
            date, count,
        },);
    }

    Ok(days,)
}
