//! # league-scheduler
//!
//! This crate contains the items required to build round-robin league schedules. A schedule is
//! produced in two steps: the circle-method generator in [`round_robin`] turns a roster into an
//! ordered list of gamedays, and the dispatcher in [`dispatch`] places every gameday onto a
//! bounded timeline of week numbers or calendar dates.
//!
//! Important types:
//! - [`Schedule`]: The owning type combining a validated roster, the configured options and the
//! generated gamedays. This is the main entry point.
//! - [`Teams`]: A wrapper around `Vec<T>` where `T` is a team in a league.
//! - [`TeamSpot`]: A *spot* in the rotation, which either refers to a team or is the bye
//! placeholder padding an odd roster.
//! - [`Game`]: A single pairing of two spots. The field order carries the venue: `home` hosts
//! `away`.
//! - [`Gameday`]: One round's full set of games, optionally bound to a calendar [`Slot`].
//! - [`ScheduleOptions`]: Legs, shuffle and timeline bounds.
//!
//! ## Feature Flags
//!
//! `serde`: Adds `Serialize` and `Deserialize` impls to the value types.
//!
pub mod dispatch;
pub mod options;
pub mod round_robin;

mod schedule;

pub use dispatch::{DateRange, Timeline, TimelineError, WeekRange};
pub use options::ScheduleOptions;
pub use round_robin::RoundRobin;
pub use schedule::Schedule;

use chrono::NaiveDate;
use thiserror::Error;

use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::result;
use std::vec::IntoIter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A wrapper around a `Vec<T>` where `T` should be considered a team competing in a league.
///
/// `Teams` only ever contains the real teams in their input order; the bye padding for odd
/// rosters lives in [`TeamSpot`] values instead.
#[derive(Clone, Debug, Default)]
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Teams<T> {
    teams: Vec<T>,
}

impl<T> Teams<T> {
    /// Creates a new empty `Teams` list.
    #[inline]
    pub fn new() -> Self {
        Self { teams: Vec::new() }
    }

    /// Creates a new empty `Teams` list with the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            teams: Vec::with_capacity(capacity),
        }
    }
}

impl<T> FromIterator<T> for Teams<T> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let teams = iter.into_iter().collect();

        Self { teams }
    }
}

impl<T> IntoIterator for Teams<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.teams.into_iter()
    }
}

impl<T> Deref for Teams<T> {
    type Target = Vec<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.teams
    }
}

impl<T> DerefMut for Teams<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.teams
    }
}

impl<T, U> PartialEq<U> for Teams<T>
where
    T: PartialEq,
    U: AsRef<[T]>,
{
    #[inline]
    fn eq(&self, other: &U) -> bool {
        self.teams == other.as_ref()
    }
}

impl<T> From<Vec<T>> for Teams<T> {
    #[inline]
    fn from(teams: Vec<T>) -> Self {
        Self { teams }
    }
}

/// A spot in the round-robin rotation.
///
/// A spot either refers to the team at an index in [`Teams`], or it is the bye placeholder that
/// pads an odd roster to an even length. The team paired against the bye has no game that round,
/// which is distinct from the game being missing: the pairing still occupies a slot in its
/// [`Gameday`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TeamSpot {
    Team(usize),
    Bye,
}

impl TeamSpot {
    /// Returns `true` if the `TeamSpot` is [`Team`].
    ///
    /// [`Team`]: Self::Team
    #[inline]
    pub fn is_team(&self) -> bool {
        matches!(self, Self::Team(_))
    }

    /// Returns `true` if the `TeamSpot` is [`Bye`].
    ///
    /// [`Bye`]: Self::Bye
    #[inline]
    pub fn is_bye(&self) -> bool {
        matches!(self, Self::Bye)
    }

    /// Returns the roster index of the spot, or `None` for the bye.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Team(index) => Some(*index),
            Self::Bye => None,
        }
    }

    /// Returns the team `T` associated with this spot, or `None` if the spot is the bye or
    /// out-of-bounds for `teams`.
    #[inline]
    pub fn team<'a, T>(&self, teams: &'a Teams<T>) -> Option<&'a T> {
        match self {
            Self::Team(index) => teams.get(*index),
            Self::Bye => None,
        }
    }
}

/// A game between two spots. `home` hosts `away`; the reversed pairing in a later leg is the
/// return fixture with reversed venue.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Game {
    pub home: TeamSpot,
    pub away: TeamSpot,
}

impl Game {
    #[inline]
    pub fn new(home: TeamSpot, away: TeamSpot) -> Self {
        Self { home, away }
    }

    /// Returns `true` if one side of the game is the bye spot, meaning the other side has no
    /// game that round.
    #[inline]
    pub fn is_bye(&self) -> bool {
        self.home.is_bye() || self.away.is_bye()
    }
}

/// A calendar slot a [`Gameday`] is assigned to: either an integer week number or a concrete
/// date.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Slot {
    Week(u32),
    Date(NaiveDate),
}

/// One round's full set of games.
///
/// `round` is 1-based and resets with every leg, `leg` is 1-based, and `number` is the global
/// matchday number which is strictly increasing across the whole schedule. `slot` is `None`
/// until the gameday has been dispatched onto a timeline.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Gameday {
    pub round: usize,
    pub leg: usize,
    pub number: usize,
    pub games: Vec<Game>,
    pub slot: Option<Slot>,
}

impl Gameday {
    /// Creates a new `Gameday` with no slot assigned.
    #[inline]
    pub fn new(round: usize, leg: usize, number: usize, games: Vec<Game>) -> Self {
        Self {
            round,
            leg,
            number,
            games,
            slot: None,
        }
    }
}

/// A wrapper around a `Vec<Gameday>`.
///
/// This is a wrapper around a `Vec<Gameday>` and has the same layout as a `Vec<Gameday>`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Gamedays {
    gamedays: Vec<Gameday>,
}

impl Gamedays {
    #[inline]
    pub fn new() -> Self {
        Self {
            gamedays: Vec::new(),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            gamedays: Vec::with_capacity(capacity),
        }
    }
}

impl Deref for Gamedays {
    type Target = Vec<Gameday>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.gamedays
    }
}

impl DerefMut for Gamedays {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.gamedays
    }
}

impl<U> PartialEq<U> for Gamedays
where
    U: AsRef<[Gameday]>,
{
    #[inline]
    fn eq(&self, other: &U) -> bool {
        self.gamedays == other.as_ref()
    }
}

impl From<Vec<Gameday>> for Gamedays {
    #[inline]
    fn from(gamedays: Vec<Gameday>) -> Self {
        Self { gamedays }
    }
}

impl Index<usize> for Gamedays {
    type Output = Gameday;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.gamedays[index]
    }
}

impl IndexMut<usize> for Gamedays {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.gamedays[index]
    }
}

/// An `Result<T>` using [`enum@Error`] as an error type.
pub type Result<T> = result::Result<T, Error>;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("duplicate team at index {index}")]
    DuplicateTeam { index: usize },
    #[error("not enough teams: at least 2 required, found {found}")]
    InsufficientTeams { found: usize },
    #[error("invalid timeline: {0}")]
    InvalidTimeline(#[from] TimelineError),
}
