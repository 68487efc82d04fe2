//! Pure period predicates.
//!
//! `should_reset` and `should_break_streak` are evaluated independently and
//! may disagree: exactly one elapsed period resets the completed flag
//! without breaking the streak (the one-period grace window).

use chrono::{Datelike, Duration, Months, NaiveDate};
use habitflow_core::{Frequency, Habit, Time};

/// Start of the calendar day containing `date`, as a UTC instant.
fn day_start(date: NaiveDate) -> Time {
    date.and_hms_opt(0, 0, 0)
        .unwrap_or_default()
        .and_utc()
}

/// Most recent Monday 00:00 at or before `now`.
fn week_start(now: Time) -> Time {
    let today = now.date_naive();
    let days_from_monday = i64::from(today.weekday().num_days_from_monday());
    day_start(today - Duration::days(days_from_monday))
}

/// First day of `now`'s month at 00:00.
fn month_start(now: Time) -> Time {
    let today = now.date_naive();
    day_start(today.with_day(1).unwrap_or(today))
}

/// Whether a habit's completed-today flag must be cleared as of `now`.
///
/// Compares calendar period boundaries, not rolling windows: a daily habit
/// completed at 23:59 resets one minute later.
pub fn should_reset(habit: &Habit, now: Time) -> bool {
    let Some(last) = habit.last_completed_at else {
        return false;
    };

    match habit.frequency {
        Frequency::Daily => last.date_naive() < now.date_naive(),
        Frequency::Weekly => last < week_start(now),
        Frequency::Monthly => last < month_start(now),
    }
}

/// Whether a habit's streak must be broken as of `now`.
///
/// One missed period is tolerated before the streak breaks: a daily streak
/// survives a completion from yesterday, and breaks only once the last
/// completion is two or more days old.
pub fn should_break_streak(habit: &Habit, now: Time) -> bool {
    if habit.current_streak == 0 {
        return false;
    }
    let Some(last) = habit.last_completed_at else {
        return false;
    };

    match habit.frequency {
        Frequency::Daily => {
            let yesterday = now.date_naive() - Duration::days(1);
            last.date_naive() < yesterday
        }
        Frequency::Weekly => last < now - Duration::days(7),
        Frequency::Monthly => {
            // Calendar-month subtraction with day clamping (Mar 31 -> Feb 28).
            let cutoff = now
                .checked_sub_months(Months::new(1))
                .unwrap_or(now);
            last < cutoff
        }
    }
}

/// The next instant at which the habit's period rolls over.
pub fn next_reset_time(habit: &Habit, now: Time) -> Time {
    let today = now.date_naive();
    match habit.frequency {
        Frequency::Daily => day_start(today + Duration::days(1)),
        Frequency::Weekly => week_start(now) + Duration::days(7),
        Frequency::Monthly => {
            let first = today.with_day(1).unwrap_or(today);
            let next_month = first
                .checked_add_months(Months::new(1))
                .unwrap_or(first);
            day_start(next_month)
        }
    }
}

/// Fraction of expected completions achieved over `total_days`, capped at 1.
pub fn completion_rate(completions: u32, total_days: u32, frequency: Frequency) -> f64 {
    let expected = match frequency {
        Frequency::Daily => total_days,
        Frequency::Weekly => total_days.div_ceil(7),
        Frequency::Monthly => total_days.div_ceil(30),
    };

    if expected == 0 {
        return 0.0;
    }
    (f64::from(completions) / f64::from(expected)).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use habitflow_core::{Category, UserId};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> Time {
        chrono::Utc
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .single()
            .unwrap()
    }

    fn habit_with(frequency: Frequency, last: Option<Time>, streak: u32) -> Habit {
        let mut habit = Habit::new(
            UserId::from("user_1"),
            "Test habit",
            Category::Other,
            frequency,
        )
        .unwrap();
        habit.last_completed_at = last;
        habit.current_streak = streak;
        habit.completed_today = last.is_some();
        habit
    }

    #[test]
    fn daily_reset_only_on_earlier_calendar_date() {
        let now = utc(2024, 6, 15, 8, 0);

        let same_day = habit_with(Frequency::Daily, Some(utc(2024, 6, 15, 0, 5)), 1);
        assert!(!should_reset(&same_day, now));

        let yesterday = habit_with(Frequency::Daily, Some(utc(2024, 6, 14, 23, 59)), 1);
        assert!(should_reset(&yesterday, now));

        let never = habit_with(Frequency::Daily, None, 0);
        assert!(!should_reset(&never, now));
    }

    #[test]
    fn daily_break_tolerates_one_missed_day() {
        let now = utc(2024, 6, 15, 8, 0);

        let today = habit_with(Frequency::Daily, Some(utc(2024, 6, 15, 1, 0)), 5);
        assert!(!should_break_streak(&today, now));

        let yesterday = habit_with(Frequency::Daily, Some(utc(2024, 6, 14, 12, 0)), 5);
        assert!(!should_break_streak(&yesterday, now));

        let two_days = habit_with(Frequency::Daily, Some(utc(2024, 6, 13, 12, 0)), 5);
        assert!(should_break_streak(&two_days, now));
    }

    #[test]
    fn reset_and_break_disagree_after_one_elapsed_day() {
        let now = utc(2024, 6, 15, 8, 0);
        let habit = habit_with(Frequency::Daily, Some(utc(2024, 6, 14, 12, 0)), 5);

        assert!(should_reset(&habit, now));
        assert!(!should_break_streak(&habit, now));
    }

    #[test]
    fn zero_streak_never_breaks() {
        let now = utc(2024, 6, 15, 8, 0);
        let habit = habit_with(Frequency::Daily, Some(utc(2024, 6, 1, 12, 0)), 0);
        assert!(!should_break_streak(&habit, now));
    }

    #[test]
    fn weekly_resets_at_monday_boundary() {
        // 2024-06-17 is a Monday.
        let monday = utc(2024, 6, 17, 9, 0);

        let last_sunday = habit_with(Frequency::Weekly, Some(utc(2024, 6, 16, 20, 0)), 2);
        assert!(should_reset(&last_sunday, monday));

        let this_monday = habit_with(Frequency::Weekly, Some(utc(2024, 6, 17, 1, 0)), 2);
        assert!(!should_reset(&this_monday, monday));

        // Mid-week, a completion from earlier the same week holds.
        let wednesday = utc(2024, 6, 19, 9, 0);
        let monday_completion = habit_with(Frequency::Weekly, Some(utc(2024, 6, 17, 10, 0)), 2);
        assert!(!should_reset(&monday_completion, wednesday));
    }

    #[test]
    fn weekly_break_uses_seven_day_cutoff() {
        let now = utc(2024, 6, 17, 9, 0);

        let six_days = habit_with(Frequency::Weekly, Some(utc(2024, 6, 11, 10, 0)), 3);
        assert!(!should_break_streak(&six_days, now));

        let eight_days = habit_with(Frequency::Weekly, Some(utc(2024, 6, 9, 8, 0)), 3);
        assert!(should_break_streak(&eight_days, now));
    }

    #[test]
    fn monthly_resets_at_first_of_month() {
        let now = utc(2024, 7, 1, 6, 0);

        let june = habit_with(Frequency::Monthly, Some(utc(2024, 6, 30, 23, 0)), 1);
        assert!(should_reset(&june, now));

        let july = habit_with(Frequency::Monthly, Some(utc(2024, 7, 1, 1, 0)), 1);
        assert!(!should_reset(&july, now));
    }

    #[test]
    fn monthly_break_clamps_short_months() {
        // Mar 31 minus one month clamps to Feb 29 (leap year).
        let now = utc(2024, 3, 31, 12, 0);

        let before_clamp = habit_with(Frequency::Monthly, Some(utc(2024, 2, 28, 12, 0)), 2);
        assert!(should_break_streak(&before_clamp, now));

        let recent = habit_with(Frequency::Monthly, Some(utc(2024, 3, 10, 12, 0)), 2);
        assert!(!should_break_streak(&recent, now));
    }

    #[test]
    fn next_reset_time_is_upcoming_midnight_for_daily() {
        let now = utc(2024, 6, 15, 8, 0);
        let habit = habit_with(Frequency::Daily, None, 0);
        assert_eq!(next_reset_time(&habit, now), utc(2024, 6, 16, 0, 0));
    }

    #[test]
    fn completion_rate_is_capped() {
        assert_eq!(completion_rate(10, 7, Frequency::Daily), 1.0);
        assert_eq!(completion_rate(0, 0, Frequency::Daily), 0.0);
        assert!((completion_rate(2, 14, Frequency::Weekly) - 1.0).abs() < f64::EPSILON);
    }
}
