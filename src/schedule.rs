use chrono::{Datelike, Utc};
use rand::Rng;

use crate::dispatch::{self, Timeline};
use crate::options::ScheduleOptions;
use crate::round_robin::RoundRobin;
use crate::{Error, Gamedays, Result, TeamSpot, Teams};

/// A full league schedule: the validated roster, the configured options and the generated
/// gamedays.
///
/// A `Schedule` is created empty and populated by a single call to [`generate`]. It is meant to
/// be single-use; calling [`generate`] again replaces the gamedays but continues from the
/// current rotation state and the already dispatched timeline.
///
/// [`generate`]: Self::generate
#[derive(Clone, Debug)]
pub struct Schedule<T> {
    teams: Teams<T>,
    options: ScheduleOptions,
    timeline: Timeline,
    rotation: Vec<TeamSpot>,
    gamedays: Gamedays,
    spanned: bool,
}

impl<T> Schedule<T> {
    /// Creates a new `Schedule` from the given `teams` and `options`.
    ///
    /// An odd roster is padded with the bye spot so that every round pairs all spots; the team
    /// paired against the bye has no game that round. Without explicit timeline bounds the
    /// schedule runs on the default season window of the current year.
    ///
    /// # Errors
    ///
    /// Returns an [`enum@Error`] if a team repeats, if fewer than 2 teams are given or if the
    /// timeline bounds are invalid.
    pub fn new<I>(teams: I, options: ScheduleOptions) -> Result<Self>
    where
        I: Iterator<Item = T>,
        T: PartialEq,
    {
        let teams: Teams<T> = teams.collect();

        log::debug!("Creating new Schedule with {} teams", teams.len());

        for index in 1..teams.len() {
            if teams[..index].contains(&teams[index]) {
                return Err(Error::DuplicateTeam { index });
            }
        }

        if teams.len() < 2 {
            return Err(Error::InsufficientTeams { found: teams.len() });
        }

        let timeline = options.timeline(Utc::now().year())?;

        let mut rotation: Vec<TeamSpot> = (0..teams.len()).map(TeamSpot::Team).collect();
        if rotation.len() % 2 != 0 {
            rotation.push(TeamSpot::Bye);
        }

        Ok(Self {
            teams,
            options,
            timeline,
            rotation,
            gamedays: Gamedays::new(),
            spanned: false,
        })
    }

    /// Generates the gamedays and dispatches them onto the timeline.
    ///
    /// Shuffling, when enabled, uses [`rand::thread_rng`]. Use [`generate_with_rng`] to control
    /// the random source.
    ///
    /// [`generate_with_rng`]: Self::generate_with_rng
    pub fn generate(&mut self) {
        self.generate_with_rng(&mut rand::thread_rng());
    }

    /// Generates the gamedays and dispatches them onto the timeline, shuffling through `rng`.
    pub fn generate_with_rng<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let order = self.rotation.clone();

        let round_robin = if self.options.shuffle {
            RoundRobin::shuffled(order, self.options.legs, rng)
        } else {
            RoundRobin::new(order, self.options.legs)
        };

        let (mut gamedays, rotation) = round_robin.into_parts();
        self.spanned = dispatch::assign(&mut gamedays, &mut self.timeline);

        self.gamedays = gamedays;
        self.rotation = rotation;
    }

    /// Returns a reference to the [`Teams`] of the schedule.
    #[inline]
    pub fn teams(&self) -> &Teams<T> {
        &self.teams
    }

    /// Returns a reference to the [`ScheduleOptions`] the schedule was created with.
    #[inline]
    pub fn options(&self) -> &ScheduleOptions {
        &self.options
    }

    /// Returns a reference to the generated [`Gamedays`]. Empty until [`generate`] has run.
    ///
    /// [`generate`]: Self::generate
    #[inline]
    pub fn gamedays(&self) -> &Gamedays {
        &self.gamedays
    }

    /// Returns a reference to the [`Timeline`], reflecting any normalization or widening
    /// dispatch has applied to the requested bounds.
    #[inline]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Returns `true` if the requested timeline could not contain the schedule and had to be
    /// widened.
    #[inline]
    pub fn spanned(&self) -> bool {
        self.spanned
    }

    /// Returns the current rotation state: the padded working order as it stands after the last
    /// generated round. Useful for chaining further legs externally.
    #[inline]
    pub fn rotation(&self) -> &[TeamSpot] {
        &self.rotation
    }

    /// Returns how often the full round-robin repeats.
    #[inline]
    pub fn legs(&self) -> u32 {
        self.options.legs
    }

    /// Returns the number of rounds a single leg consists of.
    #[inline]
    pub fn rounds_per_leg(&self) -> usize {
        self.rotation.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::dispatch::TimelineError;
    use crate::{teams, Error, ScheduleOptions, Slot, TeamSpot};

    use super::Schedule;

    const TEAMS: [&str; 4] = ["Dragons", "Tigers", "Lions", "Panthers"];

    fn options() -> ScheduleOptions {
        ScheduleOptions::builder().shuffle(false).build()
    }

    #[test]
    fn test_schedule_new() {
        let schedule = Schedule::new(teams!["Dragons", "Tigers"], ScheduleOptions::default());
        let schedule = schedule.unwrap();

        assert_eq!(*schedule.teams(), ["Dragons", "Tigers"]);
        assert_eq!(schedule.legs(), 2);
        assert_eq!(*schedule.gamedays(), []);
        assert!(!schedule.spanned());
    }

    #[test]
    fn test_schedule_new_odd() {
        let schedule = Schedule::new(
            teams!["Dragons", "Tigers", "Lions", "Hawks", "Panthers"],
            options(),
        )
        .unwrap();

        // The bye pads the roster to an even length.
        assert_eq!(schedule.rotation().len(), 6);
        assert_eq!(schedule.rotation()[5], TeamSpot::Bye);
        assert_eq!(schedule.rounds_per_leg(), 5);
    }

    #[test]
    fn test_schedule_new_duplicate() {
        let result = Schedule::new(
            teams!["Dragons", "Tigers", "Lions", "Panthers", "Hawks", "Dragons"],
            options(),
        );

        assert_eq!(result.unwrap_err(), Error::DuplicateTeam { index: 5 });
    }

    #[test]
    fn test_schedule_new_insufficient() {
        let result = Schedule::<&str>::new(teams![], options());
        assert_eq!(result.unwrap_err(), Error::InsufficientTeams { found: 0 });

        let result = Schedule::new(teams!["Dragons"], options());
        assert_eq!(result.unwrap_err(), Error::InsufficientTeams { found: 1 });
    }

    #[test]
    fn test_schedule_new_invalid_timeline() {
        let options = ScheduleOptions::builder()
            .start_week(10)
            .end_week(40)
            .start_date(chrono::NaiveDate::from_ymd_opt(2019, 3, 15).unwrap())
            .build();

        let result = Schedule::new(teams!["Dragons", "Tigers"], options);
        assert_eq!(
            result.unwrap_err(),
            Error::InvalidTimeline(TimelineError::MixedBounds)
        );
    }

    #[test]
    fn test_schedule_generate() {
        let options = ScheduleOptions::builder()
            .shuffle(false)
            .start_week(10)
            .end_week(40)
            .build();

        let mut schedule = Schedule::new(TEAMS.into_iter(), options).unwrap();
        schedule.generate();

        assert_eq!(schedule.gamedays().len(), 6);
        assert!(!schedule.spanned());

        let mut dragons = 0;
        for gd in schedule.gamedays().iter() {
            assert_eq!(gd.games.len(), 2);
            assert!(matches!(gd.slot, Some(Slot::Week(_))));

            // No spot plays twice in the same gameday.
            let mut seen = HashSet::new();
            for game in &gd.games {
                assert!(seen.insert(game.home));
                assert!(seen.insert(game.away));
            }

            if seen.contains(&TeamSpot::Team(0)) {
                dragons += 1;
            }
        }

        // Dragons play on every one of the 6 gamedays.
        assert_eq!(dragons, 6);
    }

    #[test]
    fn test_schedule_generate_spanned() {
        // 12 gamedays into 11 weeks: the range is widened by one slot.
        let options = ScheduleOptions::builder()
            .shuffle(false)
            .legs(4)
            .start_week(10)
            .end_week(20)
            .build();

        let mut schedule = Schedule::new(TEAMS.into_iter(), options).unwrap();
        schedule.generate();

        assert!(schedule.spanned());

        let range = schedule.timeline().week_range().unwrap();
        assert_eq!(range.count(), schedule.gamedays().len());
    }

    #[test]
    fn test_schedule_generate_bye() {
        let options = ScheduleOptions::builder()
            .shuffle(false)
            .legs(1)
            .start_week(1)
            .end_week(10)
            .build();

        let mut schedule = Schedule::new(
            teams!["Dragons", "Tigers", "Lions", "Hawks", "Panthers"],
            options,
        )
        .unwrap();
        schedule.generate();

        assert_eq!(schedule.gamedays().len(), 5);

        for gd in schedule.gamedays().iter() {
            assert_eq!(gd.games.len(), 3);
            assert_eq!(gd.games.iter().filter(|game| game.is_bye()).count(), 1);
        }
    }

    #[test]
    fn test_schedule_generate_seeded() {
        let options = ScheduleOptions::builder().start_week(10).end_week(40).build();

        let mut first = Schedule::new(TEAMS.into_iter(), options.clone()).unwrap();
        first.generate_with_rng(&mut StdRng::seed_from_u64(42));

        let mut second = Schedule::new(TEAMS.into_iter(), options).unwrap();
        second.generate_with_rng(&mut StdRng::seed_from_u64(42));

        assert_eq!(*first.gamedays(), *second.gamedays());
        assert_eq!(first.rotation(), second.rotation());
    }
}
