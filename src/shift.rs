//! The mill's operational day runs 06:00 to 06:00 local time instead of
//! midnight to midnight, because pressing shifts span midnight. Everything
//! here is pure arithmetic over naive local wall-clock times; the single
//! `Local::now()` read happens in [`OperationalDay::current`].

use chrono::{Duration, Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Hour the operational day starts and ends at.
pub const DAY_START_HOUR: u32 = 6;

/// Minutes in a full operational day.
const DAY_MINUTES: i64 = 24 * 60;

/// The 24-hour operational window an instant falls in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationalDay {
    /// Always at 06:00:00 local time.
    pub day_start: NaiveDateTime,
    /// `day_start` + 24h, i.e. 06:00:00 the next day.
    pub day_end: NaiveDateTime,
    /// True between 18:00 and 06:00.
    pub is_night_shift: bool,
    /// Whole minutes elapsed since `day_start`, in `[0, 1440)`.
    pub minutes_since_start: i64,
    /// How far through the window the instant lies, in `[0, 100]`.
    pub progress_percent: f64,
}

impl OperationalDay {
    /// Classify `now` into the operational day it belongs to.
    pub fn containing(now: NaiveDateTime) -> Self {
        let hour = now.hour();
        let is_night_shift = hour >= 18 || hour < DAY_START_HOUR;

        // Before 06:00 we are still in yesterday's window.
        let start_date = if hour >= DAY_START_HOUR {
            now.date()
        } else {
            now.date() - Duration::days(1)
        };
        let day_start = start_date
            .and_hms_opt(DAY_START_HOUR, 0, 0)
            .expect("06:00:00 is a valid time of day");
        let day_end = day_start + Duration::days(1);

        let minutes_since_start = (now - day_start).num_minutes();
        let progress_percent =
            (minutes_since_start as f64 / DAY_MINUTES as f64 * 100.0).clamp(0.0, 100.0);

        Self {
            day_start,
            day_end,
            is_night_shift,
            minutes_since_start,
            progress_percent,
        }
    }

    /// The operational day containing the current local wall-clock time.
    pub fn current() -> Self {
        Self::containing(Local::now().naive_local())
    }

    /// Whether `instant` falls inside this window.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.day_start <= instant && instant < self.day_end
    }

    /// Arabic shift label as displayed in the original UI.
    pub fn shift_label_ar(&self) -> &'static str {
        if self.is_night_shift {
            "نوبة ليلية"
        } else {
            "نوبة نهارية"
        }
    }
}

/// Format `instant` for display inside `day`'s rebased clock, where display
/// hour 0 corresponds to 06:00 real time.
///
/// Offsets outside the window fall back to a bare date: the day before
/// `day_start` for negative offsets, the day after for offsets past 24h.
///
/// Known quirk carried over from the original: callers pass the *current*
/// operational day, so a timestamp from three days ago still renders as the
/// "previous day" date rather than its own. Kept as-is on purpose.
pub fn format_in_day(instant: NaiveDateTime, day: &OperationalDay) -> String {
    // Floored minutes, so an instant seconds before 06:00 is still outside.
    let offset = (instant - day.day_start).num_seconds().div_euclid(60);

    if offset < 0 {
        let prev = day.day_start - Duration::days(1);
        return prev.format("%m/%d/%Y").to_string();
    }
    if offset >= DAY_MINUTES {
        let next = day.day_start + Duration::days(1);
        return next.format("%m/%d/%Y").to_string();
    }

    let hours = offset / 60;
    let minutes = offset % 60;
    let display_hour = (hours as u32 + DAY_START_HOUR) % 24;
    let display = day
        .day_start
        .date()
        .and_hms_opt(display_hour, minutes as u32, 0)
        .expect("rebased display time is a valid time of day");
    display.format("%I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn just_before_six_belongs_to_yesterday() {
        let day = OperationalDay::containing(at(2024, 11, 15, 5, 59, 59));
        assert!(day.is_night_shift);
        assert_eq!(day.day_start, at(2024, 11, 14, 6, 0, 0));
        assert_eq!(day.day_end, at(2024, 11, 15, 6, 0, 0));
        assert_eq!(day.minutes_since_start, 1439);
    }

    #[test]
    fn six_sharp_starts_a_new_day() {
        let day = OperationalDay::containing(at(2024, 11, 15, 6, 0, 0));
        assert!(!day.is_night_shift);
        assert_eq!(day.day_start, at(2024, 11, 15, 6, 0, 0));
        assert_eq!(day.minutes_since_start, 0);
        assert_eq!(day.progress_percent, 0.0);
    }

    #[test]
    fn six_pm_is_halfway_and_night_shift() {
        let day = OperationalDay::containing(at(2024, 11, 15, 18, 0, 0));
        assert!(day.is_night_shift);
        assert_eq!(day.minutes_since_start, 720);
        assert_eq!(day.progress_percent, 50.0);
    }

    #[test]
    fn last_minute_of_the_window() {
        let day = OperationalDay::containing(at(2024, 11, 16, 5, 59, 0));
        assert_eq!(day.day_start, at(2024, 11, 15, 6, 0, 0));
        assert_eq!(day.minutes_since_start, 1439);
        assert!((day.progress_percent - 99.93).abs() < 0.01);
    }

    #[test]
    fn window_is_exactly_24_hours_and_contains_now() {
        for now in [
            at(2024, 3, 1, 0, 0, 0),
            at(2024, 3, 1, 6, 0, 0),
            at(2024, 3, 1, 12, 30, 45),
            at(2024, 3, 1, 23, 59, 59),
        ] {
            let day = OperationalDay::containing(now);
            assert_eq!(day.day_end - day.day_start, Duration::days(1));
            assert_eq!(day.day_start.time().hour(), 6);
            assert_eq!(day.day_start.time().minute(), 0);
            assert!(day.day_start <= now && now < day.day_end);
            assert!(day.contains(now));
        }
    }

    #[test]
    fn night_shift_matches_hour_set() {
        for hour in 0..24 {
            let day = OperationalDay::containing(at(2024, 7, 10, hour, 30, 0));
            assert_eq!(day.is_night_shift, hour >= 18 || hour < 6, "hour {hour}");
        }
    }

    #[test]
    fn minutes_increase_within_a_day_and_reset_at_boundary() {
        let earlier = OperationalDay::containing(at(2024, 7, 10, 9, 0, 0));
        let later = OperationalDay::containing(at(2024, 7, 10, 17, 0, 0));
        assert!(later.minutes_since_start > earlier.minutes_since_start);

        let next = OperationalDay::containing(at(2024, 7, 11, 6, 0, 0));
        assert_eq!(next.minutes_since_start, 0);
        assert_eq!(next.day_start, at(2024, 7, 11, 6, 0, 0));
    }

    #[test]
    fn shift_labels() {
        let night = OperationalDay::containing(at(2024, 7, 10, 2, 0, 0));
        assert_eq!(night.shift_label_ar(), "نوبة ليلية");
        let dayside = OperationalDay::containing(at(2024, 7, 10, 10, 0, 0));
        assert_eq!(dayside.shift_label_ar(), "نوبة نهارية");
    }

    #[test]
    fn format_rebases_hours_onto_six_am() {
        let day = OperationalDay::containing(at(2024, 11, 15, 12, 0, 0));

        // 06:00 real = hour 0 of the display clock
        assert_eq!(format_in_day(at(2024, 11, 15, 6, 0, 0), &day), "06:00 AM");
        // 18:30 real = 12h30 into the window
        assert_eq!(format_in_day(at(2024, 11, 15, 18, 30, 0), &day), "06:30 PM");
        // 01:15 real next calendar day, still inside the window
        assert_eq!(format_in_day(at(2024, 11, 16, 1, 15, 0), &day), "01:15 AM");
    }

    #[test]
    fn seconds_before_the_window_start_are_outside() {
        let day = OperationalDay::containing(at(2024, 11, 15, 12, 0, 0));

        // 05:59:30 is 30 seconds shy of the window. Truncating the offset
        // toward zero would round it up to minute 0 and pull it inside.
        assert!(!day.contains(at(2024, 11, 15, 5, 59, 30)));
        assert_eq!(
            format_in_day(at(2024, 11, 15, 5, 59, 30), &day),
            "11/14/2024"
        );

        // A few seconds past 06:00 is minute 0 of the display clock.
        assert!(day.contains(at(2024, 11, 15, 6, 0, 30)));
        assert_eq!(format_in_day(at(2024, 11, 15, 6, 0, 30), &day), "06:00 AM");
    }

    #[test]
    fn format_falls_back_to_dates_outside_the_window() {
        let day = OperationalDay::containing(at(2024, 11, 15, 12, 0, 0));

        // Before the window: previous day's date. This is also where the
        // carried-over quirk shows: any historical instant lands here.
        assert_eq!(
            format_in_day(at(2024, 11, 12, 9, 0, 0), &day),
            "11/14/2024"
        );
        // At or past the window end: next day's date.
        assert_eq!(
            format_in_day(at(2024, 11, 16, 6, 0, 0), &day),
            "11/16/2024"
        );
    }
}
