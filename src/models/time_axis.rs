use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

use super::Horizon;

/// Longest accepted horizon: one hundred years of months.
pub const MAX_HORIZON_MONTHS: i64 = 1200;

/// Consecutive calendar months of a planning horizon.
///
/// `months[i]` is the first day of the i-th month and `index[i] == i`; every
/// growth formula is written against `index`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeAxis {
    months: Vec<NaiveDate>,
    index: Vec<usize>,
}

impl TimeAxis {
    /// Build `count` month-start dates beginning at the month of `anchor`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use capacity_planner::models::TimeAxis;
    ///
    /// let axis = TimeAxis::generate(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(), 3).unwrap();
    /// assert_eq!(axis.labels(), vec!["2025-12", "2026-01", "2026-02"]);
    /// assert_eq!(axis.index(), &[0, 1, 2]);
    /// ```
    pub fn generate(anchor: NaiveDate, count: i64) -> Result<Self, PlannerError> {
        if count <= 0 {
            return Err(PlannerError::InvalidHorizon(format!(
                "horizon must be at least one month, got {count}"
            )));
        }
        if count > MAX_HORIZON_MONTHS {
            return Err(PlannerError::InvalidHorizon(format!(
                "horizon must be at most {MAX_HORIZON_MONTHS} months, got {count}"
            )));
        }
        let first = anchor.with_day(1).ok_or_else(|| {
            PlannerError::InvalidHorizon(format!("cannot take month start of {anchor}"))
        })?;

        let count = usize::try_from(count).map_err(|_| {
            PlannerError::InvalidHorizon(format!("horizon of {count} months is too long"))
        })?;
        let months = (0..count)
            .map(|i| {
                u32::try_from(i)
                    .ok()
                    .and_then(|i| first.checked_add_months(Months::new(i)))
                    .ok_or_else(|| {
                        PlannerError::InvalidHorizon(format!(
                            "month {i} after {first} is out of calendar range"
                        ))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            index: (0..count).collect(),
            months,
        })
    }

    /// Build the axis described by a scenario horizon.
    pub fn from_horizon(horizon: &Horizon) -> Result<Self, PlannerError> {
        Self::generate(horizon.anchor_date()?, horizon.months)
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn months(&self) -> &[NaiveDate] {
        &self.months
    }

    pub fn index(&self) -> &[usize] {
        &self.index
    }

    pub fn first(&self) -> Option<NaiveDate> {
        self.months.first().copied()
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.months.last().copied()
    }

    /// Month labels formatted `YYYY-MM`.
    pub fn labels(&self) -> Vec<String> {
        self.months.iter().map(|m| month_label(*m)).collect()
    }

    /// Calendar days of every month on the axis.
    pub fn days_in_months(&self) -> Vec<u32> {
        self.months.iter().map(|m| days_in_month(*m)).collect()
    }

    /// Clamp a month index into the axis (used for checkpoint annotations).
    pub fn clamp_index(&self, month: usize) -> usize {
        month.min(self.len().saturating_sub(1))
    }
}

/// `YYYY-MM`
pub fn month_label(month: NaiveDate) -> String {
    month.format("%Y-%m").to_string()
}

/// Number of days in the calendar month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = (date.year(), date.month());
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(start), Some(next)) => (next - start).num_days() as u32,
        // Only reachable at the very end of chrono's calendar range
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_horizon_length() {
        let axis = TimeAxis::from_horizon(&Horizon::default()).unwrap();
        assert_eq!(axis.len(), 25);
        assert_eq!(axis.first(), Some(ymd(2025, 12, 1)));
        assert_eq!(axis.last(), Some(ymd(2027, 12, 1)));
    }

    #[test]
    fn test_months_strictly_consecutive() {
        let axis = TimeAxis::generate(ymd(2025, 12, 1), 25).unwrap();
        for pair in axis.months().windows(2) {
            assert!(pair[1] > pair[0]);
            assert_eq!(pair[1], pair[0].checked_add_months(Months::new(1)).unwrap());
            assert_eq!(pair[1].day(), 1);
        }
    }

    #[test]
    fn test_index_aligned() {
        let axis = TimeAxis::generate(ymd(2024, 1, 1), 7).unwrap();
        assert_eq!(axis.index(), &[0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(axis.index().len(), axis.months().len());
    }

    #[test]
    fn test_mid_month_anchor_snaps_to_first() {
        let axis = TimeAxis::generate(ymd(2026, 5, 19), 2).unwrap();
        assert_eq!(axis.months(), &[ymd(2026, 5, 1), ymd(2026, 6, 1)]);
    }

    #[test]
    fn test_non_positive_horizon() {
        assert!(matches!(
            TimeAxis::generate(ymd(2025, 12, 1), 0),
            Err(PlannerError::InvalidHorizon(_))
        ));
        assert!(matches!(
            TimeAxis::generate(ymd(2025, 12, 1), -4),
            Err(PlannerError::InvalidHorizon(_))
        ));
    }

    #[test]
    fn test_horizon_upper_bound() {
        let axis = TimeAxis::generate(ymd(2025, 12, 1), MAX_HORIZON_MONTHS).unwrap();
        assert_eq!(axis.len(), 1200);
        assert!(matches!(
            TimeAxis::generate(ymd(2025, 12, 1), MAX_HORIZON_MONTHS + 1),
            Err(PlannerError::InvalidHorizon(_))
        ));
    }

    #[test]
    fn test_labels() {
        let axis = TimeAxis::generate(ymd(2025, 11, 1), 3).unwrap();
        assert_eq!(axis.labels(), vec!["2025-11", "2025-12", "2026-01"]);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(ymd(2025, 12, 1)), 31);
        assert_eq!(days_in_month(ymd(2026, 2, 1)), 28);
        assert_eq!(days_in_month(ymd(2028, 2, 1)), 29);
        assert_eq!(days_in_month(ymd(2026, 4, 1)), 30);
    }

    #[test]
    fn test_clamp_index() {
        let axis = TimeAxis::generate(ymd(2025, 12, 1), 10).unwrap();
        assert_eq!(axis.clamp_index(12), 9);
        assert_eq!(axis.clamp_index(3), 3);
    }
}
