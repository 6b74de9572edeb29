//! Duration helpers shared by the time-accounting code.
//!
//! All charged and awarded times in the model are `qtty::Seconds`; the sky toolkit
//! works in days. These helpers keep the zero element and the summation in one place.

use qtty::{Day, Days, Quantity, Second, Seconds, Unit};

/// The identity element for duration sums.
pub const ZERO_TIME: Seconds = Seconds::new(0.0);

/// Sums an iterator of durations, starting from [`ZERO_TIME`].
///
/// ```ignore
/// use qtty::Seconds;
/// use gemsched::units::sum_durations;
///
/// let total = sum_durations([Seconds::new(30.0), Seconds::new(90.0)]);
/// assert_eq!(total.value(), 120.0);
/// ```
pub fn sum_durations<I>(durations: I) -> Seconds
where
    I: IntoIterator<Item = Seconds>,
{
    durations.into_iter().fold(ZERO_TIME, |acc, d| acc + d)
}

/// Converts a duration in any time unit into days.
#[inline]
pub fn as_days<U>(q: Quantity<U>) -> Days
where
    U: Unit<Dim = <Day as Unit>::Dim>,
{
    q.to::<Day>()
}

/// Converts a duration in any time unit into seconds.
#[inline]
pub fn as_seconds<U>(q: Quantity<U>) -> Seconds
where
    U: Unit<Dim = <Second as Unit>::Dim>,
{
    q.to::<Second>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtty::{Hour, Minute};

    #[test]
    fn sum_of_nothing_is_zero() {
        let total = sum_durations(Vec::<Seconds>::new());
        assert_eq!(total.value(), 0.0);
    }

    #[test]
    fn sums_in_order() {
        let total = sum_durations([Seconds::new(1.5), Seconds::new(2.5), Seconds::new(6.0)]);
        assert!((total.value() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn seconds_to_days() {
        let days = as_days(Seconds::new(86_400.0));
        assert!((days.value() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn hours_and_minutes_to_seconds() {
        let s = as_seconds(Quantity::<Hour>::new(1.0)) + as_seconds(Quantity::<Minute>::new(1.0));
        assert!((s.value() - 3_660.0).abs() < 1e-9);
    }
}
