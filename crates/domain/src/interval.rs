use chrono::{Duration, Local, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl From<std::ops::RangeInclusive<NaiveDate>> for Interval {
    fn from(value: std::ops::RangeInclusive<NaiveDate>) -> Self {
        Interval {
            first: *value.start(),
            last: *value.end(),
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
pub enum DefaultInterval {
    All,
    _1Y = 365,
    _6M = 182,
    _3M = 91,
    _1M = 30,
}

#[must_use]
pub fn init_interval(dates: &[NaiveDate], default_interval: DefaultInterval) -> Interval {
    let today = Local::now().date_naive();
    let mut first = dates.iter().copied().min().unwrap_or(today);

    if default_interval != DefaultInterval::All
        && dates.iter().copied().max().unwrap_or(today)
            >= today - Duration::days(default_interval as i64)
    {
        first = today - Duration::days(default_interval as i64);
    }

    Interval { first, last: today }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_init_interval_without_dates() {
        let today = Local::now().date_naive();
        assert_eq!(
            init_interval(&[], DefaultInterval::All),
            Interval {
                first: today,
                last: today
            }
        );
    }

    #[test]
    fn test_init_interval_with_recent_dates() {
        let today = Local::now().date_naive();
        let dates = [today - Duration::days(10), today - Duration::days(1)];
        assert_eq!(
            init_interval(&dates, DefaultInterval::_1M),
            Interval {
                first: today - Duration::days(30),
                last: today
            }
        );
    }

    #[test]
    fn test_init_interval_with_old_dates() {
        let today = Local::now().date_naive();
        let dates = [today - Duration::days(400), today - Duration::days(395)];
        assert_eq!(
            init_interval(&dates, DefaultInterval::_1M),
            Interval {
                first: today - Duration::days(400),
                last: today
            }
        );
    }
}
