use chrono::{DateTime, Duration, Utc};
use qtty::Seconds;

/// A period during which an observation may be performed, optionally repeating.
///
/// `repeat` is [`TimingWindow::FOREVER_REPEATING`] for endless repetition and
/// [`TimingWindow::NON_REPEATING`] for a single window. `period` is `None`
/// when the window does not repeat.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimingWindow {
    pub start: DateTime<Utc>,
    pub duration: Seconds,
    pub repeat: i32,
    pub period: Option<Seconds>,
}

impl TimingWindow {
    pub const INFINITE_DURATION_FLAG: i32 = -1;
    /// Three years and a day.
    pub const INFINITE_DURATION: Seconds = Seconds::new((3.0 * 365.0 + 1.0) * 86_400.0);
    pub const FOREVER_REPEATING: i32 = -1;
    pub const NON_REPEATING: i32 = 0;
    pub const OCS_INFINITE_REPEATS: i32 = 1000;

    pub fn new(start: DateTime<Utc>, duration: Seconds, repeat: i32, period: Option<Seconds>) -> Self {
        Self {
            start,
            duration,
            repeat,
            period,
        }
    }

    /// A single window that never closes.
    pub fn open_from(start: DateTime<Utc>) -> Self {
        Self::new(start, Self::INFINITE_DURATION, Self::NON_REPEATING, None)
    }

    pub fn is_infinite(&self) -> bool {
        self.duration.value() >= Self::INFINITE_DURATION.value()
    }

    pub fn repeats_forever(&self) -> bool {
        self.repeat == Self::FOREVER_REPEATING || self.repeat >= Self::OCS_INFINITE_REPEATS
    }

    /// End of the first occurrence of the window.
    pub fn first_end(&self) -> DateTime<Utc> {
        self.start + Duration::milliseconds((self.duration.value() * 1000.0).round() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn open_window_is_infinite_and_single() {
        let start = Utc.with_ymd_and_hms(2020, 7, 1, 0, 0, 0).unwrap();
        let w = TimingWindow::open_from(start);
        assert!(w.is_infinite());
        assert!(!w.repeats_forever());
        assert_eq!(w.period, None);
    }

    #[test]
    fn ocs_repeat_count_means_forever() {
        let start = Utc.with_ymd_and_hms(2020, 7, 1, 0, 0, 0).unwrap();
        let w = TimingWindow::new(start, Seconds::new(3600.0), 1000, Some(Seconds::new(86_400.0)));
        assert!(w.repeats_forever());
        assert_eq!(w.first_end(), Utc.with_ymd_and_hms(2020, 7, 1, 1, 0, 0).unwrap());
    }
}
