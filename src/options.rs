//! # Schedule options
//!
//! [`ScheduleOptions`] carries everything a [`Schedule`] can be configured with: the number of
//! legs, whether the initial team order is shuffled, and the timeline bounds. A schedule runs on
//! week numbers or on calendar dates, but never on both; the four bounds are kept as individual
//! options so that a half-specified range is caught at validation time rather than silently
//! defaulted.
//!
//! [`Schedule`]: crate::Schedule
use chrono::NaiveDate;

use crate::dispatch::{DateRange, Timeline, TimelineError, WeekRange};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The configuration of a schedule.
///
/// The default is two legs with a shuffled team order and no explicit timeline, in which case
/// dispatch falls back to the default season window of the current year.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleOptions {
    pub legs: u32,
    pub shuffle: bool,
    pub start_week: Option<u32>,
    pub end_week: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ScheduleOptions {
    /// Creates a new [`Builder`].
    #[inline]
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Resolves the configured bounds into a [`Timeline`], falling back to the default season
    /// window of `year` when no bounds are set.
    ///
    /// # Errors
    ///
    /// Returns a [`TimelineError`] if week and date bounds are mixed, if only one bound of a
    /// range is set, or if the resulting range is malformed.
    pub(crate) fn timeline(&self, year: i32) -> Result<Timeline, TimelineError> {
        let weeks = self.start_week.is_some() || self.end_week.is_some();
        let dates = self.start_date.is_some() || self.end_date.is_some();

        if weeks && dates {
            return Err(TimelineError::MixedBounds);
        }

        if weeks {
            let start = self.start_week.ok_or(TimelineError::MissingBound("start week"))?;
            let end = self.end_week.ok_or(TimelineError::MissingBound("end week"))?;

            return Ok(Timeline::Weeks(WeekRange::new(start, end)?));
        }

        if dates {
            let start = self.start_date.ok_or(TimelineError::MissingBound("start date"))?;
            let end = self.end_date.ok_or(TimelineError::MissingBound("end date"))?;

            return Ok(Timeline::Dates(DateRange::new(start, end)?));
        }

        Ok(Timeline::Dates(DateRange::season(year)))
    }
}

impl Default for ScheduleOptions {
    #[inline]
    fn default() -> Self {
        Self {
            legs: 2,
            shuffle: true,
            start_week: None,
            end_week: None,
            start_date: None,
            end_date: None,
        }
    }
}

/// A builder for [`ScheduleOptions`].
#[derive(Clone, Debug, Default)]
pub struct Builder {
    options: ScheduleOptions,
}

impl Builder {
    /// Sets how often the full round-robin repeats.
    pub fn legs(mut self, legs: u32) -> Self {
        self.options.legs = legs;
        self
    }

    /// Sets whether the initial team order is randomized before generation.
    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.options.shuffle = shuffle;
        self
    }

    /// Sets the first week of the timeline.
    pub fn start_week(mut self, week: u32) -> Self {
        self.options.start_week = Some(week);
        self
    }

    /// Sets the last week of the timeline.
    pub fn end_week(mut self, week: u32) -> Self {
        self.options.end_week = Some(week);
        self
    }

    /// Sets the first date of the timeline.
    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.options.start_date = Some(date);
        self
    }

    /// Sets the last date of the timeline.
    pub fn end_date(mut self, date: NaiveDate) -> Self {
        self.options.end_date = Some(date);
        self
    }

    /// Consumes the `Builder`, returning the collected [`ScheduleOptions`].
    #[inline]
    pub fn build(self) -> ScheduleOptions {
        self.options
    }
}
