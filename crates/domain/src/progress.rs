use chrono::{Local, NaiveDate};

use crate::{CreateError, DeleteError, ReadError, ValidationError};

#[allow(async_fn_in_trait)]
pub trait ProgressService {
    async fn get_progress(&self) -> Result<Vec<ProgressEntry>, ReadError>;
    async fn add_progress_entry(&self, entry: ProgressEntry)
    -> Result<ProgressEntry, CreateError>;
    async fn delete_progress_entry(&self, date: NaiveDate) -> Result<NaiveDate, DeleteError>;

    fn validate_progress_date(&self, date: &str) -> Result<NaiveDate, ValidationError> {
        match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(parsed_date) => {
                if parsed_date <= Local::now().date_naive() {
                    Ok(parsed_date)
                } else {
                    Err(ValidationError::Other(
                        "Date must not be in the future".into(),
                    ))
                }
            }
            Err(_) => Err(ValidationError::Other("Invalid date".into())),
        }
    }

    fn validate_progress_weight(&self, weight: &str) -> Result<f32, ValidationError> {
        match weight.replace(',', ".").trim().parse::<f32>() {
            Ok(parsed_weight) => {
                if parsed_weight > 0.0 {
                    Ok(parsed_weight)
                } else {
                    Err(ValidationError::Other(
                        "Weight must be a positive decimal number".into(),
                    ))
                }
            }
            Err(_) => Err(ValidationError::Other(
                "Weight must be a decimal number".into(),
            )),
        }
    }

    /// An empty input means the measurement was not taken.
    fn validate_circumference(&self, value: &str) -> Result<Option<f32>, ValidationError> {
        if value.trim().is_empty() {
            return Ok(None);
        }
        self.validate_progress_weight(value).map(Some).map_err(|_| {
            ValidationError::Other("Measurement must be a positive decimal number".into())
        })
    }

    #[must_use]
    fn avg_weight(&self, entries: &[ProgressEntry]) -> Vec<(NaiveDate, f32)> {
        avg_weight(entries)
    }

    #[must_use]
    fn total_change(&self, entries: &[ProgressEntry]) -> Option<f32> {
        total_change(entries)
    }
}

#[allow(async_fn_in_trait)]
pub trait ProgressRepository {
    async fn read_progress(&self) -> Result<Vec<ProgressEntry>, ReadError>;
    async fn create_progress_entry(&self, entry: ProgressEntry)
    -> Result<ProgressEntry, CreateError>;
    async fn delete_progress_entry(&self, date: NaiveDate) -> Result<NaiveDate, DeleteError>;
}

/// Body measurements logged for one date. At most one entry exists per date;
/// adding an entry for an existing date replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEntry {
    pub date: NaiveDate,
    pub weight: f32,
    pub waist: Option<f32>,
    pub chest: Option<f32>,
    pub hips: Option<f32>,
}

/// Centered moving average of the logged weights, used as trend line. The
/// window extends up to `RADIUS` entries (not days) to each side.
#[must_use]
pub fn avg_weight(entries: &[ProgressEntry]) -> Vec<(NaiveDate, f32)> {
    const RADIUS: usize = 4;

    let mut entries = entries.to_vec();
    entries.sort_by_key(|entry| entry.date);

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let window = &entries[i.saturating_sub(RADIUS)..=usize::min(i + RADIUS, entries.len() - 1)];
            #[allow(clippy::cast_precision_loss)]
            let avg = window.iter().map(|e| e.weight).sum::<f32>() / window.len() as f32;
            (entry.date, avg)
        })
        .collect()
}

/// Difference between the latest and the earliest logged weight. `None` for
/// fewer than two entries.
#[must_use]
pub fn total_change(entries: &[ProgressEntry]) -> Option<f32> {
    if entries.len() < 2 {
        return None;
    }
    let first = entries.iter().min_by_key(|entry| entry.date)?;
    let last = entries.iter().max_by_key(|entry| entry.date)?;
    Some(last.weight - first.weight)
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn entry(days: i32, weight: f32) -> ProgressEntry {
        ProgressEntry {
            date: from_num_days(days),
            weight,
            waist: None,
            chest: None,
            hips: None,
        }
    }

    #[rstest]
    #[case::no_entries(vec![], vec![])]
    #[case::one_entry(vec![entry(0, 80.0)], vec![(from_num_days(0), 80.0)])]
    #[case::fewer_entries_than_radius(
        vec![entry(0, 80.0), entry(2, 82.0), entry(3, 79.0), entry(5, 79.0)],
        vec![
            (from_num_days(0), 80.0),
            (from_num_days(2), 80.0),
            (from_num_days(3), 80.0),
            (from_num_days(5), 80.0),
        ],
    )]
    #[case::more_entries_than_radius(
        vec![
            entry(0, 81.0),
            entry(2, 82.0),
            entry(3, 83.0),
            entry(5, 84.0),
            entry(6, 85.0),
            entry(8, 86.0),
            entry(9, 87.0),
            entry(10, 88.0),
            entry(12, 89.0),
        ],
        vec![
            (from_num_days(0), 83.0),
            (from_num_days(2), 83.5),
            (from_num_days(3), 84.0),
            (from_num_days(5), 84.5),
            (from_num_days(6), 85.0),
            (from_num_days(8), 85.5),
            (from_num_days(9), 86.0),
            (from_num_days(10), 86.5),
            (from_num_days(12), 87.0),
        ],
    )]
    fn test_avg_weight(
        #[case] entries: Vec<ProgressEntry>,
        #[case] expected: Vec<(NaiveDate, f32)>,
    ) {
        assert_eq!(avg_weight(&entries), expected);
    }

    #[test]
    fn test_avg_weight_unsorted_input() {
        assert_eq!(
            avg_weight(&[entry(5, 90.0), entry(0, 80.0)]),
            vec![(from_num_days(0), 85.0), (from_num_days(5), 85.0)]
        );
    }

    #[test]
    fn test_total_change() {
        assert_eq!(total_change(&[]), None);
        assert_eq!(total_change(&[entry(0, 80.0)]), None);
        assert_approx_eq!(
            total_change(&[entry(0, 80.0), entry(7, 78.5)]).unwrap(),
            -1.5,
            0.001
        );
        assert_approx_eq!(
            total_change(&[entry(7, 78.5), entry(0, 80.0), entry(14, 81.0)]).unwrap(),
            1.0,
            0.001
        );
    }

    struct Validator;
    impl ProgressService for Validator {
        async fn get_progress(&self) -> Result<Vec<ProgressEntry>, crate::ReadError> {
            Ok(vec![])
        }
        async fn add_progress_entry(
            &self,
            entry: ProgressEntry,
        ) -> Result<ProgressEntry, crate::CreateError> {
            Ok(entry)
        }
        async fn delete_progress_entry(
            &self,
            date: NaiveDate,
        ) -> Result<NaiveDate, crate::DeleteError> {
            Ok(date)
        }
    }

    #[test]
    fn test_validate_progress_date() {
        assert!(Validator.validate_progress_date("2000-01-31").is_ok());
        assert!(Validator.validate_progress_date("2000-13-01").is_err());
        assert!(Validator.validate_progress_date("9999-01-01").is_err());
        assert!(Validator.validate_progress_date("yesterday").is_err());
    }

    #[rstest]
    #[case("80.5", Ok(80.5))]
    #[case("80,5", Ok(80.5))]
    #[case("0", Err(()))]
    #[case("-1", Err(()))]
    #[case("heavy", Err(()))]
    fn test_validate_progress_weight(#[case] weight: &str, #[case] expected: Result<f32, ()>) {
        assert_eq!(
            Validator.validate_progress_weight(weight).map_err(|_| ()),
            expected
        );
    }

    #[rstest]
    #[case("", Ok(None))]
    #[case("91.5", Ok(Some(91.5)))]
    #[case("0", Err(()))]
    fn test_validate_circumference(
        #[case] value: &str,
        #[case] expected: Result<Option<f32>, ()>,
    ) {
        assert_eq!(
            Validator.validate_circumference(value).map_err(|_| ()),
            expected
        );
    }

    fn from_num_days(days: i32) -> NaiveDate {
        NaiveDate::from_num_days_from_ce_opt(days).unwrap()
    }
}
