//! Bracket bookkeeping: trimming, pairing and round advancement.

use crate::models::{Team, TeamId};

/// Trim a shuffled entry list to a 32- or 16-team bracket.
///
/// 32 or more entrants keep the first 32, 17..=31 keep the first 16, and
/// anything smaller is left alone.
pub fn trim_entrants<T>(entrants: &mut Vec<T>) {
    if entrants.len() >= 32 {
        entrants.truncate(32);
    } else if entrants.len() > 16 {
        entrants.truncate(16);
    }
}

/// Adjacent pairing (0 vs 1, 2 vs 3, ...). A trailing odd entrant is
/// returned separately; it does not advance.
pub fn pair_adjacent<T>(teams: &[T]) -> (Vec<(&T, &T)>, Option<&T>) {
    let mut chunks = teams.chunks_exact(2);
    let pairs = chunks.by_ref().map(|pair| (&pair[0], &pair[1])).collect();
    let leftover = chunks.remainder().first();
    (pairs, leftover)
}

/// Teams alive in the current round. Lives only for one tournament run.
#[derive(Debug, Clone)]
pub struct BracketState {
    teams: Vec<Team>,
    round: u32,
}

impl BracketState {
    pub fn new(teams: Vec<Team>) -> Self {
        Self { teams, round: 1 }
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn contains(&self, id: TeamId) -> bool {
        self.teams.iter().any(|t| t.id == id)
    }

    /// Replace the field with the round's winners and move to the next round.
    pub fn advance(&mut self, winners: Vec<Team>) {
        self.teams = winners;
        self.round += 1;
    }

    /// The champion once a single team remains.
    pub fn champion(&self) -> Option<&Team> {
        match self.teams.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

/// Number of rounds a bracket of `n` teams needs (ceil(log2 n)).
pub fn rounds_for(n: usize) -> u32 {
    if n <= 1 {
        0
    } else {
        usize::BITS - (n - 1).leading_zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_tiers() {
        let mut v: Vec<u32> = (0..49).collect();
        trim_entrants(&mut v);
        assert_eq!(v.len(), 32);

        let mut v: Vec<u32> = (0..32).collect();
        trim_entrants(&mut v);
        assert_eq!(v.len(), 32);

        let mut v: Vec<u32> = (0..20).collect();
        trim_entrants(&mut v);
        assert_eq!(v.len(), 16);
        assert_eq!(v, (0..16).collect::<Vec<_>>());

        let mut v: Vec<u32> = (0..10).collect();
        trim_entrants(&mut v);
        assert_eq!(v.len(), 10);
    }

    #[test]
    fn test_pairing_drops_odd_trailer() {
        let teams = [1, 2, 3, 4, 5];
        let (pairs, leftover) = pair_adjacent(&teams);
        assert_eq!(pairs, vec![(&1, &2), (&3, &4)]);
        assert_eq!(leftover, Some(&5));

        let (pairs, leftover) = pair_adjacent(&teams[..4]);
        assert_eq!(pairs.len(), 2);
        assert_eq!(leftover, None);
    }

    #[test]
    fn test_rounds_for() {
        assert_eq!(rounds_for(1), 0);
        assert_eq!(rounds_for(2), 1);
        assert_eq!(rounds_for(16), 4);
        assert_eq!(rounds_for(17), 5);
        assert_eq!(rounds_for(32), 5);
    }
}
