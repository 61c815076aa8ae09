//! # Round-robin generation
//!
//! The classic circle method: spot 0 is pinned, every other spot rotates around it once per
//! round, and every round pairs the outermost remaining spots inward. Repeating the rotation for
//! `spots - 1` rounds meets every pairing exactly once; further legs continue from the same
//! rotation state with the home/away orientation flipped on every other leg.
use crate::{Game, Gameday, Gamedays, TeamSpot};

use rand::seq::SliceRandom;
use rand::Rng;

/// A generated round-robin fixture list.
///
/// `RoundRobin` is built from an already padded working order: an even number of [`TeamSpot`]s,
/// containing at most one [`TeamSpot::Bye`]. [`Schedule`] produces such an order from a
/// validated roster, but any order satisfying the constraint works.
///
/// [`Schedule`]: crate::Schedule
#[derive(Clone, Debug)]
pub struct RoundRobin {
    gamedays: Gamedays,
    order: Vec<TeamSpot>,
}

impl RoundRobin {
    /// Generates the fixture list for `order` over the given number of `legs`.
    ///
    /// `order` is used as-is; see [`shuffled`] for randomizing it first. Exactly
    /// `legs * (order.len() - 1)` gamedays are produced, each holding `order.len() / 2` games.
    ///
    /// [`shuffled`]: Self::shuffled
    pub fn new(order: Vec<TeamSpot>, legs: u32) -> Self {
        debug_assert!(order.len() % 2 == 0);

        log::debug!(
            "Generating round robin over {} legs with {} spots",
            legs,
            order.len()
        );

        let rounds_per_leg = match order.len() {
            0 => 0,
            n => n - 1,
        };

        let mut gamedays = Gamedays::with_capacity(legs as usize * rounds_per_leg);
        let mut current = order;

        for leg in 0..legs as usize {
            for round in 1..=rounds_per_leg {
                let games = pair_round(&current, leg);
                let number = leg * rounds_per_leg + round;

                gamedays.push(Gameday::new(round, leg + 1, number, games));
                current = rotate(&current);
            }
        }

        Self {
            gamedays,
            order: current,
        }
    }

    /// Shuffles `order` once using `rng`, then generates the fixture list from the shuffled
    /// order.
    ///
    /// This is the only source of randomness in the crate; pass a seeded [`Rng`] for
    /// reproducible schedules.
    pub fn shuffled<R>(mut order: Vec<TeamSpot>, legs: u32, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        order.shuffle(rng);
        Self::new(order, legs)
    }

    /// Returns a reference to the generated [`Gamedays`].
    #[inline]
    pub fn gamedays(&self) -> &Gamedays {
        &self.gamedays
    }

    /// Returns the working order as it stands after the final recorded round, i.e. the rotation
    /// state the next round would be paired from.
    #[inline]
    pub fn order(&self) -> &[TeamSpot] {
        &self.order
    }

    /// Consumes the `RoundRobin`, returning the gamedays and the final working order.
    #[inline]
    pub fn into_parts(self) -> (Gamedays, Vec<TeamSpot>) {
        (self.gamedays, self.order)
    }
}

/// Pairs one round of games from the current working order.
///
/// The spot at position `i` meets the spot at position `len - i - 1`. On even legs (0-based) the
/// front spot hosts; on odd legs the venue is reversed, which gives every pairing one home game
/// per two consecutive legs.
fn pair_round(order: &[TeamSpot], leg: usize) -> Vec<Game> {
    let half = order.len() / 2;
    let mut games = Vec::with_capacity(half);

    for index in 0..half {
        let first = order[index];
        let last = order[order.len() - index - 1];

        let game = if leg % 2 == 0 {
            Game::new(first, last)
        } else {
            Game::new(last, first)
        };

        games.push(game);
    }

    games
}

/// Returns the next working order: position 0 stays fixed, the last spot moves to position 1 and
/// everything in between shifts down by one.
fn rotate(order: &[TeamSpot]) -> Vec<TeamSpot> {
    match order {
        [] | [_] => order.to_vec(),
        [pivot, middle @ .., last] => {
            let mut next = Vec::with_capacity(order.len());
            next.push(*pivot);
            next.push(*last);
            next.extend_from_slice(middle);
            next
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::{Game, TeamSpot};

    use super::{rotate, RoundRobin};

    fn order(len: usize) -> Vec<TeamSpot> {
        (0..len).map(TeamSpot::Team).collect()
    }

    fn game(home: usize, away: usize) -> Game {
        Game::new(TeamSpot::Team(home), TeamSpot::Team(away))
    }

    #[test]
    fn test_rotate() {
        let first = order(4);

        let second = rotate(&first);
        assert_eq!(
            second,
            [
                TeamSpot::Team(0),
                TeamSpot::Team(3),
                TeamSpot::Team(1),
                TeamSpot::Team(2),
            ]
        );

        let third = rotate(&second);
        assert_eq!(
            third,
            [
                TeamSpot::Team(0),
                TeamSpot::Team(2),
                TeamSpot::Team(3),
                TeamSpot::Team(1),
            ]
        );

        // A full cycle of len - 1 rotations restores the order.
        assert_eq!(rotate(&third), first);
    }

    #[test]
    fn test_rotate_degenerate() {
        assert_eq!(rotate(&[]), []);
        assert_eq!(rotate(&[TeamSpot::Team(0)]), [TeamSpot::Team(0)]);
        assert_eq!(rotate(&order(2)), order(2));
    }

    #[test]
    fn test_round_robin() {
        let rr = RoundRobin::new(Vec::new(), 2);
        assert_eq!(*rr.gamedays(), []);

        let rr = RoundRobin::new(order(4), 0);
        assert_eq!(*rr.gamedays(), []);
        assert_eq!(rr.order(), order(4));

        let rr = RoundRobin::new(order(4), 1);
        let games: Vec<_> = rr.gamedays().iter().map(|gd| gd.games.clone()).collect();
        assert_eq!(
            games,
            [
                vec![game(0, 3), game(1, 2)],
                vec![game(0, 2), game(3, 1)],
                vec![game(0, 1), game(2, 3)],
            ]
        );

        // One full leg returns the working order to its starting point.
        assert_eq!(rr.order(), order(4));
    }

    #[test]
    fn test_round_robin_two_legs() {
        let rr = RoundRobin::new(order(4), 2);

        assert_eq!(rr.gamedays().len(), 6);

        let games: Vec<_> = rr.gamedays().iter().map(|gd| gd.games.clone()).collect();
        assert_eq!(
            games,
            [
                vec![game(0, 3), game(1, 2)],
                vec![game(0, 2), game(3, 1)],
                vec![game(0, 1), game(2, 3)],
                vec![game(3, 0), game(2, 1)],
                vec![game(2, 0), game(1, 3)],
                vec![game(1, 0), game(3, 2)],
            ]
        );

        // Every pairing occurs exactly once per orientation across the two legs.
        let mut seen = HashSet::new();
        for gd in rr.gamedays().iter() {
            for g in &gd.games {
                assert!(seen.insert((g.home, g.away)));
            }
        }
        for g in seen.iter().copied().collect::<Vec<_>>() {
            assert!(seen.contains(&(g.1, g.0)));
        }
    }

    #[test]
    fn test_round_robin_indexes() {
        let rr = RoundRobin::new(order(4), 3);

        let mut expected_number = 1;
        for (index, gd) in rr.gamedays().iter().enumerate() {
            assert_eq!(gd.round, index % 3 + 1);
            assert_eq!(gd.leg, index / 3 + 1);
            assert_eq!(gd.number, expected_number);
            expected_number += 1;
        }
    }

    #[test]
    fn test_round_robin_bye() {
        let mut spots = order(3);
        spots.push(TeamSpot::Bye);

        let rr = RoundRobin::new(spots, 1);

        assert_eq!(rr.gamedays().len(), 3);
        for gd in rr.gamedays().iter() {
            // The bye occupies exactly one game per round.
            let byes = gd.games.iter().filter(|g| g.is_bye()).count();
            assert_eq!(byes, 1);
        }
    }

    #[test]
    fn test_round_robin_coverage() {
        for spots in [2usize, 4, 6, 10] {
            for legs in [1u32, 2, 3] {
                let rr = RoundRobin::new(order(spots), legs);

                assert_eq!(rr.gamedays().len(), legs as usize * (spots - 1));

                for gd in rr.gamedays().iter() {
                    assert_eq!(gd.games.len(), spots / 2);

                    let mut seen = HashSet::new();
                    for g in &gd.games {
                        assert!(seen.insert(g.home));
                        assert!(seen.insert(g.away));
                    }
                    assert_eq!(seen.len(), spots);
                }
            }
        }
    }

    #[test]
    fn test_round_robin_shuffled() {
        let mut rng = StdRng::seed_from_u64(17);
        let rr = RoundRobin::shuffled(order(6), 2, &mut rng);

        assert_eq!(rr.gamedays().len(), 10);

        // Shuffling permutes the working order but never changes its contents.
        let mut final_order = rr.order().to_vec();
        final_order.sort_unstable_by_key(|spot| spot.index());
        assert_eq!(final_order, order(6));

        // The same seed reproduces the same schedule.
        let mut rng = StdRng::seed_from_u64(17);
        let again = RoundRobin::shuffled(order(6), 2, &mut rng);
        assert_eq!(*rr.gamedays(), *again.gamedays());
    }
}
