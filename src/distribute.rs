use chrono::NaiveDate;
use rand::Rng;
use std::collections::BTreeMap;

/// Errors produced while building a [`CommitPlan`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// The end date falls before the start date.
    #[error("End date {end} must not be before start date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Builds a range, rejecting `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PlanError> {
        if end < start {
            return Err(PlanError::InvalidRange { start, end });
        }
        Ok(DateRange { start, end })
    }

    /// First day of the range.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days in the range, both ends included.
    pub fn days(&self) -> usize {
        (self.end.signed_duration_since(self.start).num_days() + 1) as usize
    }

    /// Every day of the range in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }
}

/// How many commits land on each day of a [`DateRange`].
///
/// Every day of the range is present, including days with zero commits.
/// Iteration is always chronological.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitPlan {
    range: DateRange,
    days: BTreeMap<NaiveDate, u32>,
}

impl CommitPlan {
    /// Sum of all per-day counts.
    pub fn total(&self) -> u32 {
        self.days.values().sum()
    }

    /// Number of days that receive at least one commit.
    pub fn active_days(&self) -> usize {
        self.days.values().filter(|c| **c > 0).count()
    }

    /// The days the plan covers.
    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Commits planned for `date`, or `None` if the date is out of range.
    pub fn get(&self, date: &NaiveDate) -> Option<u32> {
        self.days.get(date).copied()
    }

    /// `(date, count)` pairs in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, u32)> + '_ {
        self.days.iter().map(|(d, c)| (*d, *c))
    }
}

/// Spreads `total` commits over every day from `start` to `end` inclusive.
///
/// Each commit is assigned to a day picked uniformly at random, so some days
/// may stay empty while others get several commits. The counts always add up
/// to `total`. Pass a seeded generator to get a reproducible plan.
///
/// # Errors
///
/// Returns [`PlanError::InvalidRange`] when `end` precedes `start`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use gitaura::distribute::distribute;
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
/// let mut rng = StdRng::seed_from_u64(7);
///
/// let plan = distribute(start, end, 5, &mut rng).unwrap();
/// assert_eq!(plan.range().days(), 3);
/// assert_eq!(plan.total(), 5);
/// ```
pub fn distribute<R: Rng + ?Sized>(
    start: NaiveDate,
    end: NaiveDate,
    total: u32,
    rng: &mut R,
) -> Result<CommitPlan, PlanError> {
    let range = DateRange::new(start, end)?;
    let buckets: Vec<NaiveDate> = range.dates().collect();

    let mut days: BTreeMap<NaiveDate, u32> = buckets.iter().map(|d| (*d, 0)).collect();

    for _ in 0..total {
        let pick = buckets[rng.gen_range(0..buckets.len())];
        if let Some(count) = days.get_mut(&pick) {
            *count += 1;
        }
    }

    Ok(CommitPlan { range, days })
}
