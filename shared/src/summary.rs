//! Date-range bucketing for dashboard summaries
//!
//! Raw food, exercise and sleep entries are reduced to dated points, then
//! grouped into per-day or per-week (Monday start) buckets. Every day of the
//! requested range gets a bucket, even when nothing was logged.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One logged value on a calendar day
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SummaryPoint {
    Food { date: NaiveDate, calories: f64 },
    Exercise { date: NaiveDate, calories_burned: f64 },
    Sleep { date: NaiveDate, hours: f64 },
}

impl SummaryPoint {
    pub fn date(&self) -> NaiveDate {
        match self {
            SummaryPoint::Food { date, .. }
            | SummaryPoint::Exercise { date, .. }
            | SummaryPoint::Sleep { date, .. } => *date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryBucket {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub calories_in: f64,
    pub calories_burned: f64,
    pub workouts: u32,
    pub sleep_hours: f64,
    pub food_entries: u32,
}

impl SummaryBucket {
    fn empty(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            calories_in: 0.0,
            calories_burned: 0.0,
            workouts: 0,
            sleep_hours: 0.0,
            food_entries: 0,
        }
    }

    fn add(&mut self, point: &SummaryPoint) {
        match *point {
            SummaryPoint::Food { calories, .. } => {
                self.calories_in += calories;
                self.food_entries += 1;
            }
            SummaryPoint::Exercise { calories_burned, .. } => {
                self.calories_burned += calories_burned;
                self.workouts += 1;
            }
            SummaryPoint::Sleep { hours, .. } => self.sleep_hours += hours,
        }
    }
}

/// Dashboard range selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SummaryRange {
    #[default]
    Week,
    Month,
}

impl SummaryRange {
    pub fn days(&self) -> i64 {
        match self {
            SummaryRange::Week => 7,
            SummaryRange::Month => 30,
        }
    }

    /// Inclusive range ending on `end`; `None` when the start would fall
    /// before the first representable date
    pub fn bounds(&self, end: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        let start = end.checked_sub_signed(Duration::days(self.days() - 1))?;
        Some((start, end))
    }
}

impl FromStr for SummaryRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" | "7d" => Ok(SummaryRange::Week),
            "month" | "30d" => Ok(SummaryRange::Month),
            _ => Err(format!("Invalid range '{}'. Must be 'week' or 'month'", s)),
        }
    }
}

/// Totals and per-day averages for a whole range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: u32,
    pub total_calories_in: f64,
    pub total_calories_burned: f64,
    pub total_workouts: u32,
    pub total_sleep_hours: f64,
    pub avg_calories_in: f64,
    pub avg_calories_burned: f64,
    pub avg_sleep_hours: f64,
}

/// Monday of the week containing `date`, if representable
pub fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_signed(Duration::days(date.weekday().num_days_from_monday() as i64))
}

/// One bucket per calendar day in `[start, end]`
pub fn bucket_daily(start: NaiveDate, end: NaiveDate, points: &[SummaryPoint]) -> Vec<SummaryBucket> {
    if end < start {
        return Vec::new();
    }

    let mut buckets: Vec<SummaryBucket> = start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|d| SummaryBucket::empty(d, d))
        .collect();

    for point in points {
        let date = point.date();
        if date < start || date > end {
            continue;
        }
        let idx = (date - start).num_days() as usize;
        buckets[idx].add(point);
    }

    buckets
}

/// Monday-start weekly buckets, clipped to `[start, end]`
pub fn bucket_weekly(start: NaiveDate, end: NaiveDate, points: &[SummaryPoint]) -> Vec<SummaryBucket> {
    let mut weeks: Vec<SummaryBucket> = Vec::new();

    for day in bucket_daily(start, end, points) {
        // A Monday before the first representable date is before `start` too
        let monday = week_start(day.start).map_or(start, |m| m.max(start));
        match weeks.last_mut() {
            Some(week) if week.start == monday => {
                week.end = day.end;
                week.calories_in += day.calories_in;
                week.calories_burned += day.calories_burned;
                week.workouts += day.workouts;
                week.sleep_hours += day.sleep_hours;
                week.food_entries += day.food_entries;
            }
            _ => {
                let mut week = day;
                week.start = monday;
                weeks.push(week);
            }
        }
    }

    weeks
}

/// Totals over the range; averages divide by every day in the range
pub fn summarize(start: NaiveDate, end: NaiveDate, points: &[SummaryPoint]) -> RangeSummary {
    let daily = bucket_daily(start, end, points);
    let days = daily.len() as u32;

    let total_calories_in: f64 = daily.iter().map(|b| b.calories_in).sum();
    let total_calories_burned: f64 = daily.iter().map(|b| b.calories_burned).sum();
    let total_workouts: u32 = daily.iter().map(|b| b.workouts).sum();
    let total_sleep_hours: f64 = daily.iter().map(|b| b.sleep_hours).sum();

    let avg = |total: f64| if days == 0 { 0.0 } else { total / days as f64 };

    RangeSummary {
        start,
        end,
        days,
        total_calories_in,
        total_calories_burned,
        total_workouts,
        total_sleep_hours,
        avg_calories_in: avg(total_calories_in),
        avg_calories_burned: avg(total_calories_burned),
        avg_sleep_hours: avg(total_sleep_hours),
    }
}
