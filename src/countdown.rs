//! Exam countdown shown on the dashboard

use chrono::{DateTime, Duration, Utc};

use crate::config::ExamConfig;

pub const STARTED: &str = "EXAM STARTED";

pub const EXAM_FORMAT_REMINDER: [&str; 3] = [
    "Allowed: One A4-size helping sheet (double-sided).",
    "4 Questions: Spot errors, Fill in blanks, Concept explanations.",
    "Tip: If you forget a function name, describe the intent clearly.",
];

// A century; keeps the offset inside chrono's range
const MAX_HOURS: i64 = 24 * 366 * 100;

#[derive(Debug, Clone)]
pub struct Countdown {
    target: DateTime<Utc>,
    started: bool,
}

impl Countdown {
    pub fn new(target: DateTime<Utc>) -> Self {
        Self {
            target,
            started: false,
        }
    }

    /// Target from config, or `countdown_hours` after `entered`
    pub fn for_exam(exam: &ExamConfig, entered: DateTime<Utc>) -> Self {
        let target = exam.starts_at.unwrap_or_else(|| {
            let hours = i64::try_from(exam.countdown_hours)
                .unwrap_or(MAX_HOURS)
                .min(MAX_HOURS);
            entered
                .checked_add_signed(Duration::hours(hours))
                .unwrap_or(entered)
        });
        Self::new(target)
    }

    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    /// `"{h}h {m}m {s}s"` until the target, then `EXAM STARTED` for good.
    /// Hours wrap at a day.
    pub fn display(&mut self, now: DateTime<Utc>) -> String {
        if self.started {
            return STARTED.to_string();
        }

        let remaining = self.target - now;
        if remaining < Duration::zero() {
            self.started = true;
            return STARTED.to_string();
        }

        let secs = remaining.num_seconds();
        let hours = (secs / 3600) % 24;
        let minutes = (secs / 60) % 60;
        let seconds = secs % 60;
        format!("{}h {}m {}s", hours, minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 11, 25, h, m, s).unwrap()
    }

    #[test]
    fn test_format() {
        let mut countdown = Countdown::new(at(20, 0, 0));
        assert_eq!(countdown.display(at(9, 0, 0)), "11h 0m 0s");
        assert_eq!(countdown.display(at(19, 58, 55)), "0h 1m 5s");
        assert_eq!(countdown.display(at(20, 0, 0)), "0h 0m 0s");
    }

    #[test]
    fn test_hours_wrap_at_a_day() {
        let mut countdown = Countdown::new(at(10, 0, 0) + Duration::days(1));
        assert_eq!(countdown.display(at(9, 0, 0)), "1h 0m 0s");
    }

    #[test]
    fn test_started_latches() {
        let mut countdown = Countdown::new(at(20, 0, 0));
        assert_eq!(countdown.display(at(20, 0, 1)), STARTED);
        assert!(countdown.has_started());
        // A clock that jumps backwards does not restart the timer
        assert_eq!(countdown.display(at(9, 0, 0)), STARTED);
    }

    #[test]
    fn test_for_exam_defaults_to_hours_after_entry() {
        let exam = ExamConfig::default();
        let countdown = Countdown::for_exam(&exam, at(1, 0, 0));
        assert_eq!(countdown.target(), at(12, 0, 0));

        let fixed = ExamConfig {
            starts_at: Some(at(23, 0, 0)),
            ..ExamConfig::default()
        };
        assert_eq!(Countdown::for_exam(&fixed, at(1, 0, 0)).target(), at(23, 0, 0));
    }
}
