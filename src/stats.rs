use crate::dates::{
    DateError, format_date, month_dates, parse_date, week_dates, week_end, week_start,
};
use crate::models::{ChartPoint, DailyStats, MonthlyStats, StepRecord, StreakInfo, WeeklyStats};
use chrono::NaiveDate;
use std::collections::BTreeSet;

pub fn daily_stats(records: &[StepRecord], date: &str, goal_steps: u64) -> DailyStats {
    let steps = steps_on(records, date).unwrap_or(0);
    let achievement_rate = if goal_steps > 0 {
        rounded_div(steps.saturating_mul(100), goal_steps)
    } else {
        0
    };

    DailyStats {
        date: date.to_string(),
        steps,
        goal_steps,
        achievement_rate,
        is_goal_achieved: steps >= goal_steps,
    }
}

pub fn weekly_stats(records: &[StepRecord], reference: NaiveDate, goal_steps: u64) -> WeeklyStats {
    let totals = Totals::over(records, &week_dates(reference), goal_steps);

    WeeklyStats {
        week_start: format_date(week_start(reference)),
        week_end: format_date(week_end(reference)),
        total_steps: totals.total_steps,
        average_steps: totals.average(),
        days_recorded: totals.days_recorded,
        days_achieved: totals.days_achieved,
    }
}

pub fn monthly_stats(
    records: &[StepRecord],
    month: &str,
    goal_steps: u64,
) -> Result<MonthlyStats, DateError> {
    let totals = Totals::over(records, &month_dates(month)?, goal_steps);

    Ok(MonthlyStats {
        month: month.to_string(),
        total_steps: totals.total_steps,
        average_steps: totals.average(),
        days_recorded: totals.days_recorded,
        days_achieved: totals.days_achieved,
    })
}

/// Current and longest runs of consecutive achieved days.
///
/// The current streak only counts when `today` itself is achieved; a run that ended
/// yesterday is reported through `longest_streak` and `last_achieved_date` only.
/// Records whose date does not parse are skipped.
pub fn streak(records: &[StepRecord], goal_steps: u64, today: NaiveDate) -> StreakInfo {
    let achieved: BTreeSet<NaiveDate> = records
        .iter()
        .filter(|record| record.steps >= goal_steps)
        .filter_map(|record| parse_date(&record.date).ok())
        .collect();

    let Some(last) = achieved.last().copied() else {
        return StreakInfo::default();
    };

    let mut current_streak = 0;
    let mut cursor = Some(today);
    while let Some(day) = cursor.filter(|day| achieved.contains(day)) {
        current_streak += 1;
        cursor = day.pred_opt();
    }

    let mut longest_streak = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;
    for &day in &achieved {
        run = match previous.and_then(|prev| prev.succ_opt()) {
            Some(next) if next == day => run + 1,
            _ => 1,
        };
        longest_streak = longest_streak.max(run);
        previous = Some(day);
    }

    StreakInfo {
        current_streak,
        longest_streak,
        last_achieved_date: Some(format_date(last)),
    }
}

/// One point per requested date, in the caller's order; missing days are zero.
pub fn chart_data(records: &[StepRecord], dates: &[String]) -> Vec<ChartPoint> {
    dates
        .iter()
        .map(|date| ChartPoint {
            date: date.clone(),
            steps: steps_on(records, date).unwrap_or(0),
        })
        .collect()
}

#[derive(Default)]
struct Totals {
    total_steps: u64,
    days_recorded: u32,
    days_achieved: u32,
}

impl Totals {
    fn over(records: &[StepRecord], dates: &[String], goal_steps: u64) -> Self {
        let mut totals = Self::default();
        for steps in dates.iter().filter_map(|date| steps_on(records, date)) {
            totals.total_steps = totals.total_steps.saturating_add(steps);
            totals.days_recorded += 1;
            if steps >= goal_steps {
                totals.days_achieved += 1;
            }
        }
        totals
    }

    fn average(&self) -> u64 {
        if self.days_recorded == 0 {
            0
        } else {
            rounded_div(self.total_steps, u64::from(self.days_recorded))
        }
    }
}

fn steps_on(records: &[StepRecord], date: &str) -> Option<u64> {
    records
        .iter()
        .find(|record| record.date == date)
        .map(|record| record.steps)
}

/// Division rounding halves up, like `round(a / b)` on non-negative values.
fn rounded_div(numerator: u64, denominator: u64) -> u64 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    if remainder >= denominator - remainder {
        quotient + 1
    } else {
        quotient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::add_days;

    fn record(date: &str, steps: u64) -> StepRecord {
        StepRecord::new(date, steps, "")
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 12).unwrap()
    }

    fn sample() -> Vec<StepRecord> {
        vec![
            record("2026-02-12", 10000),
            record("2026-02-11", 8500),
            record("2026-02-10", 6000),
            record("2026-02-09", 9000),
            record("2026-02-08", 5000),
        ]
    }

    #[test]
    fn daily_stats_for_recorded_day() {
        let stats = daily_stats(&sample(), "2026-02-12", 8000);
        assert_eq!(stats.date, "2026-02-12");
        assert_eq!(stats.steps, 10000);
        assert_eq!(stats.goal_steps, 8000);
        assert_eq!(stats.achievement_rate, 125);
        assert!(stats.is_goal_achieved);
    }

    #[test]
    fn daily_stats_for_missing_day_is_zero() {
        let stats = daily_stats(&sample(), "2026-02-07", 8000);
        assert_eq!(stats.steps, 0);
        assert_eq!(stats.achievement_rate, 0);
        assert!(!stats.is_goal_achieved);
    }

    #[test]
    fn zero_goal_has_no_rate_but_counts_as_achieved() {
        let stats = daily_stats(&sample(), "2026-02-12", 0);
        assert_eq!(stats.achievement_rate, 0);
        assert!(stats.is_goal_achieved);
    }

    #[test]
    fn achievement_rate_rounds_half_up() {
        let rate = |steps, goal| daily_stats(&[record("2026-02-12", steps)], "2026-02-12", goal);
        assert_eq!(rate(1, 200).achievement_rate, 1);
        assert_eq!(rate(1, 201).achievement_rate, 0);
        assert_eq!(rate(5333, 8000).achievement_rate, 67);
    }

    #[test]
    fn weekly_stats_aggregate_monday_to_sunday() {
        let stats = weekly_stats(&sample(), today(), 8000);
        assert_eq!(stats.week_start, "2026-02-09");
        assert_eq!(stats.week_end, "2026-02-15");
        // 2026-02-08 is the Sunday of the previous week.
        assert_eq!(stats.total_steps, 33500);
        assert_eq!(stats.days_recorded, 4);
        assert_eq!(stats.days_achieved, 3);
        assert_eq!(stats.average_steps, 8375);
    }

    #[test]
    fn weekly_stats_without_records() {
        let stats = weekly_stats(&[], today(), 8000);
        assert_eq!(stats.total_steps, 0);
        assert_eq!(stats.average_steps, 0);
        assert_eq!(stats.days_recorded, 0);
    }

    #[test]
    fn weekly_counts_stay_within_bounds() {
        let records: Vec<_> = (0..30)
            .map(|offset| record(&add_days("2026-01-20", offset).unwrap(), (offset as u64) * 700))
            .collect();
        let mut day = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        for _ in 0..40 {
            for goal in [0, 4000, 8000, 100_000] {
                let stats = weekly_stats(&records, day, goal);
                assert!(stats.days_achieved <= stats.days_recorded);
                assert!(stats.days_recorded <= 7);
            }
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn monthly_stats_aggregate_whole_month() {
        let mut records = sample();
        records.push(record("2026-01-31", 20000));
        records.push(record("2026-03-01", 20000));
        let stats = monthly_stats(&records, "2026-02", 8000).unwrap();
        assert_eq!(stats.month, "2026-02");
        assert_eq!(stats.total_steps, 38500);
        assert_eq!(stats.days_recorded, 5);
        assert_eq!(stats.days_achieved, 3);
        assert_eq!(stats.average_steps, 7700);
        assert!(monthly_stats(&records, "February", 8000).is_err());
    }

    #[test]
    fn streak_of_empty_history() {
        assert_eq!(
            streak(&[], 8000, today()),
            StreakInfo {
                current_streak: 0,
                longest_streak: 0,
                last_achieved_date: None,
            }
        );
    }

    #[test]
    fn streak_without_achieved_days() {
        let records = vec![record("2026-02-12", 100), record("2026-02-11", 7999)];
        assert_eq!(streak(&records, 8000, today()), StreakInfo::default());
    }

    #[test]
    fn current_streak_counts_back_from_today() {
        let records = vec![
            record("2026-02-12", 8000),
            record("2026-02-11", 9000),
            record("2026-02-10", 8500),
        ];
        assert_eq!(streak(&records, 8000, today()).current_streak, 3);
    }

    #[test]
    fn current_streak_breaks_on_a_missed_day() {
        let records = vec![
            record("2026-02-12", 8000),
            record("2026-02-11", 5000),
            record("2026-02-10", 9000),
        ];
        let info = streak(&records, 8000, today());
        assert_eq!(info.current_streak, 1);
        assert_eq!(info.longest_streak, 1);
    }

    #[test]
    fn current_streak_needs_today() {
        let records = vec![record("2026-02-11", 9000), record("2026-02-10", 9000)];
        let info = streak(&records, 8000, today());
        assert_eq!(info.current_streak, 0);
        assert_eq!(info.longest_streak, 2);
        assert_eq!(info.last_achieved_date.as_deref(), Some("2026-02-11"));
    }

    #[test]
    fn longest_streak_spans_history() {
        let records = vec![
            record("2026-02-12", 9000),
            record("2026-02-08", 9000),
            record("2026-02-06", 9000),
            record("2026-02-05", 9000),
            record("2026-02-07", 9000),
        ];
        let info = streak(&records, 8000, today());
        assert_eq!(info.longest_streak, 4);
        assert_eq!(info.current_streak, 1);
        assert_eq!(info.last_achieved_date.as_deref(), Some("2026-02-12"));
    }

    #[test]
    fn longest_streak_crosses_month_and_year() {
        let records = vec![
            record("2025-12-30", 9000),
            record("2025-12-31", 9000),
            record("2026-01-01", 9000),
            record("2026-01-02", 9000),
            record("2026-01-04", 9000),
        ];
        assert_eq!(streak(&records, 8000, today()).longest_streak, 4);
    }

    #[test]
    fn streak_ignores_unparseable_dates() {
        let records = vec![record("2026-02-12", 9000), record("yesterday", 9000)];
        let info = streak(&records, 8000, today());
        assert_eq!(info.current_streak, 1);
        assert_eq!(info.longest_streak, 1);
    }

    #[test]
    fn chart_data_keeps_caller_order() {
        let records = vec![record("2026-02-11", 6000)];
        let dates = vec![
            "2026-02-10".to_string(),
            "2026-02-11".to_string(),
            "2026-02-12".to_string(),
            "2026-02-11".to_string(),
        ];
        let points = chart_data(&records, &dates);
        let steps: Vec<_> = points.iter().map(|point| (point.date.as_str(), point.steps)).collect();
        assert_eq!(
            steps,
            vec![
                ("2026-02-10", 0),
                ("2026-02-11", 6000),
                ("2026-02-12", 0),
                ("2026-02-11", 6000),
            ]
        );
    }
}
