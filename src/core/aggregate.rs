//! Summary values derived from record collections.
//!
//! Replaces the scattered filter-and-count idiom the pages would otherwise
//! each reimplement.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error("cannot aggregate over an empty collection")]
    EmptyInput,
}

/// Record carrying a domain status string, resolvable through the registry.
pub trait StatusTagged {
    fn status(&self) -> &str;
}

pub fn count_by<T>(records: &[T], predicate: impl Fn(&T) -> bool) -> usize {
    records.iter().filter(|r| predicate(r)).count()
}

pub fn count_by_status<T: StatusTagged>(records: &[T], status: &str) -> usize {
    count_by(records, |r| r.status() == status)
}

/// Mean of a numeric field. Empty input is an error, not a silent NaN; the
/// caller substitutes a placeholder display value.
pub fn percent_average<T>(
    records: &[T],
    field: impl Fn(&T) -> f64,
) -> Result<f64, AggregateError> {
    if records.is_empty() {
        return Err(AggregateError::EmptyInput);
    }
    let sum: f64 = records.iter().map(field).sum();
    Ok(sum / records.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Record {
        status: &'static str,
        score: f64,
    }

    impl StatusTagged for Record {
        fn status(&self) -> &str {
            self.status
        }
    }

    fn records() -> Vec<Record> {
        vec![
            Record { status: "completed", score: 80.0 },
            Record { status: "completed", score: 90.0 },
            Record { status: "ready", score: 0.0 },
        ]
    }

    #[test]
    fn counts_by_status() {
        let records = records();
        assert_eq!(count_by_status(&records, "completed"), 2);
        assert_eq!(count_by_status(&records, "ready"), 1);
        assert_eq!(count_by_status(&records, "pending"), 0);
    }

    #[test]
    fn counts_by_predicate() {
        let records = records();
        assert_eq!(count_by(&records, |r| r.score > 50.0), 2);
    }

    #[test]
    fn percent_average_of_values() {
        let completed: Vec<Record> = records()
            .into_iter()
            .filter(|r| r.status == "completed")
            .collect();
        let avg = percent_average(&completed, |r| r.score).unwrap();
        assert!((avg - 85.0).abs() < f64::EPSILON);
    }

    #[test]
    fn percent_average_of_empty_input_errors() {
        let empty: Vec<Record> = Vec::new();
        assert_eq!(
            percent_average(&empty, |r| r.score),
            Err(AggregateError::EmptyInput)
        );
    }
}
