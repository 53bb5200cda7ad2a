//! Day-number to calendar-date mapping for the study period.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc, Weekday};

/// The fixed study calendar: a start date, a length in days, and the set of
/// weekdays that count as weekend for scheduling purposes.
///
/// The weekend set is configuration rather than a constant because the same
/// plan is published against a Saturday/Sunday calendar and a
/// Friday/Saturday (UAE) calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    pub start_date: NaiveDate,
    pub total_days: u32,
    pub weekend: Vec<Weekday>,
}

impl Calendar {
    /// Calendar date for a 1-based day number
    pub fn date_for_day(&self, day: u32) -> NaiveDate {
        self.start_date + Duration::days(i64::from(day) - 1)
    }

    /// 1-based day number for a calendar date. Dates before the start map
    /// to zero or negative numbers; callers clamp where needed.
    pub fn day_for_date(&self, date: NaiveDate) -> i64 {
        (date - self.start_date).num_days() + 1
    }

    /// The day number `now` falls on, clamped to a minimum of 1:
    /// `ceil((now - start) / 1 day) + 1`. Single source of truth for
    /// "today"; no component caches a day number.
    pub fn current_day(&self, now: DateTime<Utc>) -> u32 {
        let start = self.start_date.and_time(NaiveTime::MIN).and_utc();
        let secs = (now - start).num_seconds();
        let elapsed = secs.div_euclid(86_400) + i64::from(secs.rem_euclid(86_400) > 0);
        elapsed.saturating_add(1).max(1) as u32
    }

    /// Whether a day number lands on a configured weekend weekday
    pub fn is_weekend(&self, day: u32) -> bool {
        self.weekend.contains(&self.date_for_day(day).weekday())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn calendar() -> Calendar {
        Calendar {
            start_date: NaiveDate::from_ymd_opt(2026, 2, 14).unwrap(),
            total_days: 68,
            weekend: vec![Weekday::Sat, Weekday::Sun],
        }
    }

    #[test]
    fn day_mapping_round_trips() {
        let cal = calendar();
        for day in 1..=cal.total_days {
            assert_eq!(cal.day_for_date(cal.date_for_day(day)), i64::from(day));
        }
    }

    #[test]
    fn current_day_at_midnight_matches_day_number() {
        let cal = calendar();
        for day in [1, 2, 34, 68] {
            let midnight = cal.date_for_day(day).and_time(NaiveTime::MIN).and_utc();
            assert_eq!(cal.current_day(midnight), day);
        }
    }

    #[test]
    fn current_day_rounds_partial_days_up() {
        // Mid-day instants resolve to the next day number; the ceil-plus-one
        // formula is shared with the original clients.
        let cal = calendar();
        let noon = Utc.with_ymd_and_hms(2026, 2, 14, 12, 0, 0).unwrap();
        assert_eq!(cal.current_day(noon), 2);
    }

    #[test]
    fn current_day_clamps_before_the_start() {
        let cal = calendar();
        let before = Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap();
        assert_eq!(cal.current_day(before), 1);
    }

    #[test]
    fn weekend_set_is_configurable() {
        let mut cal = calendar();
        // Feb 14 2026 is a Saturday.
        assert!(cal.is_weekend(1));
        assert!(cal.is_weekend(2));
        assert!(!cal.is_weekend(3));

        cal.weekend = vec![Weekday::Fri, Weekday::Sat];
        assert!(cal.is_weekend(1));
        assert!(!cal.is_weekend(2));
        assert!(cal.is_weekend(7));
    }
}
