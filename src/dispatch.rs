//! # Temporal dispatch
//!
//! Generated gamedays carry no calendar information on their own. This module places them onto a
//! [`Timeline`]: either an inclusive range of week numbers or a range of calendar dates whose
//! slots are the Sundays inside it. A timeline with more slots than gamedays is compressed by
//! even sampling; a timeline with fewer slots is widened symmetrically around its bounds until
//! every gameday has a slot.
use chrono::{Datelike, Duration, NaiveDate};
use thiserror::Error;

use crate::{Gameday, Slot};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TimelineError {
    #[error("cannot combine week bounds with date bounds")]
    MixedBounds,
    #[error("missing {0} bound")]
    MissingBound(&'static str),
    #[error("week numbers start at 1")]
    WeekOutOfRange,
    #[error("range ends on or before it starts")]
    Inverted,
}

/// An inclusive range of week numbers. Every week in the range is one slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WeekRange {
    pub start: u32,
    pub end: u32,
}

impl WeekRange {
    /// Creates a new `WeekRange` from the given bounds.
    ///
    /// # Errors
    ///
    /// Returns a [`TimelineError`] if either bound is zero or if `end` is not after `start`.
    pub fn new(start: u32, end: u32) -> Result<Self, TimelineError> {
        if start == 0 || end == 0 {
            return Err(TimelineError::WeekOutOfRange);
        }

        if start >= end {
            return Err(TimelineError::Inverted);
        }

        Ok(Self { start, end })
    }

    /// Returns the number of slots in the range, both bounds included.
    #[inline]
    pub fn count(&self) -> usize {
        (self.end - self.start + 1) as usize
    }

    /// Widens the range by `extra` slots, half before the start (clamped to week 1, with the
    /// shortfall spilling forward) and the rest after the end.
    fn expand(&mut self, extra: usize) {
        let mut before = (extra / 2) as u32;
        let mut after = extra as u32 - before;

        let headroom = self.start.saturating_sub(1);
        if before > headroom {
            after += before - headroom;
            before = headroom;
        }

        self.start -= before;
        self.end += after;
    }
}

/// A range of calendar dates. The slots are the weekly Sundays inside the range.
///
/// A freshly constructed range treats `end` as exclusive when deriving its Sundays. Dispatching
/// normalizes both bounds to the first and last slot actually produced, so on an assigned
/// schedule `start` and `end` are themselves Sundays carrying games.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new `DateRange` from the given bounds.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::Inverted`] if `end` is not after `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TimelineError> {
        if start >= end {
            return Err(TimelineError::Inverted);
        }

        Ok(Self { start, end })
    }

    /// Returns the default season window for `year`: March 15 up to September 30.
    pub fn season(year: i32) -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(year, 3, 15).unwrap(),
            end: NaiveDate::from_ymd_opt(year, 9, 30).unwrap(),
        }
    }

    /// Returns every Sunday on or after `start` and before `end`.
    fn sundays(&self) -> Vec<NaiveDate> {
        let mut day = first_sunday_on_or_after(self.start);
        let mut days = Vec::new();

        while day < self.end {
            days.push(day);
            day += Duration::weeks(1);
        }

        days
    }

    /// Widens the range by `extra` slots around the already derived `days`, returning the full
    /// widened slot sequence.
    ///
    /// Half of `extra` goes before the first slot, capped so the start never leaves its calendar
    /// year; whatever does not fit spills past the last slot.
    fn expand(&mut self, extra: usize, days: &[NaiveDate]) -> Vec<NaiveDate> {
        let first = days[0];
        let target = days.len() + extra;

        let mut before = extra / 2;

        let year_start = NaiveDate::from_ymd_opt(first.year(), 1, 1).unwrap();
        let headroom = ((first - year_start).num_days() / 7) as usize;
        if before > headroom {
            before = headroom;
        }

        let start = first - Duration::weeks(before as i64);
        let days: Vec<NaiveDate> = (0..target)
            .map(|index| start + Duration::weeks(index as i64))
            .collect();

        self.start = days[0];
        self.end = *days.last().unwrap();

        days
    }
}

/// The bounded timeline a schedule is dispatched onto.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Timeline {
    Weeks(WeekRange),
    Dates(DateRange),
}

impl Timeline {
    /// Returns the contained [`WeekRange`], or `None` for a date timeline.
    #[inline]
    pub fn week_range(&self) -> Option<&WeekRange> {
        match self {
            Self::Weeks(range) => Some(range),
            Self::Dates(_) => None,
        }
    }

    /// Returns the contained [`DateRange`], or `None` for a week timeline.
    #[inline]
    pub fn date_range(&self) -> Option<&DateRange> {
        match self {
            Self::Weeks(_) => None,
            Self::Dates(range) => Some(range),
        }
    }
}

/// Assigns one slot from `timeline` to every gameday, in generation order.
///
/// With as many slots as gamedays the assignment is positional. A surplus of slots is reduced by
/// nearest-rank sampling that always keeps the first and last slot. A deficit widens the
/// timeline in place (see [`WeekRange`] and [`DateRange`] for the clamping rules) until the slot
/// count matches.
///
/// Returns whether the timeline had to be widened. Only the `slot` field of the gamedays is
/// touched.
pub fn assign(gamedays: &mut [Gameday], timeline: &mut Timeline) -> bool {
    log::debug!(
        "Dispatching {} gamedays onto {:?}",
        gamedays.len(),
        timeline
    );

    let target = gamedays.len();
    if target == 0 {
        return false;
    }

    let mut spanned = false;

    let slots: Vec<Slot> = match timeline {
        Timeline::Weeks(range) => {
            let mut weeks: Vec<u32> = (range.start..=range.end).collect();

            if weeks.len() > target {
                weeks = sample(&weeks, target);
            } else if weeks.len() < target {
                range.expand(target - weeks.len());
                weeks = (range.start..=range.end).collect();
                spanned = true;
            }

            weeks.into_iter().map(Slot::Week).collect()
        }
        Timeline::Dates(range) => {
            let mut days = range.sundays();

            // A range too narrow to contain a Sunday still needs an anchor to widen around.
            if days.is_empty() {
                days.push(first_sunday_on_or_after(range.start));
                spanned = true;
            }

            range.start = days[0];
            range.end = *days.last().unwrap();

            if days.len() > target {
                days = sample(&days, target);
            } else if days.len() < target {
                days = range.expand(target - days.len(), &days);
                spanned = true;
            }

            days.into_iter().map(Slot::Date).collect()
        }
    };

    debug_assert_eq!(slots.len(), target);

    for (gameday, slot) in gamedays.iter_mut().zip(slots) {
        gameday.slot = Some(slot);
    }

    spanned
}

/// Selects `target` slots from `slots` by nearest-rank interpolation. The first and the last
/// slot are always part of the selection.
fn sample<T>(slots: &[T], target: usize) -> Vec<T>
where
    T: Copy,
{
    debug_assert!(target >= 1 && target <= slots.len());

    // The interpolation needs at least two picks; a single gameday lands on the middle slot.
    if target == 1 {
        return vec![slots[(slots.len() - 1) / 2]];
    }

    let span = (slots.len() - 1) as f64;
    let gaps = (target - 1) as f64;

    (0..target)
        .map(|index| {
            let rank = (1.0 + index as f64 * span / gaps).round() - 1.0;
            slots[rank as usize]
        })
        .collect()
}

fn first_sunday_on_or_after(date: NaiveDate) -> NaiveDate {
    match date.weekday().num_days_from_sunday() {
        0 => date,
        n => date + Duration::days((7 - n) as i64),
    }
}
