//! Reward distribution at tournament close.

use crate::logic::leaderboard::competition_ranks;
use crate::models::{MembershipId, TournamentId};
use crate::store::Store;

/// Reward for every participant tied at rank 1.
pub const FIRST_PLACE_REWARD: u64 = 10000;

/// Reward for rank 2. A tie at rank 1 consumes rank 2, so nobody gets this
/// when two or more participants share first place.
pub const SECOND_PLACE_REWARD: u64 = 5000;

/// Stamp rewards on every membership of the tournament's qualifying groups.
///
/// Groups that never filled (`competition_started == false`) pay nothing.
/// Within a qualifying group only the top two competition ranks pay; lower
/// ranks are stamped with 0. `reward_claimed` is reset on every stamped
/// membership, so this must run at most once per tournament (the lifecycle
/// controller guards it with the active flag).
pub fn distribute_rewards(store: &mut Store, tournament_id: TournamentId) {
    for group_id in store.group_ids_by_tournament(tournament_id) {
        let started = store
            .find_group(group_id)
            .map(|g| g.competition_started)
            .unwrap_or(false);
        if !started {
            continue;
        }

        let mut ranked: Vec<(MembershipId, u64)> = store
            .memberships_by_group(group_id)
            .into_iter()
            .map(|m| (m.id, m.score))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let scores: Vec<u64> = ranked.iter().map(|(_, score)| *score).collect();
        let ranks = competition_ranks(&scores);

        for ((membership_id, _), rank) in ranked.iter().zip(ranks) {
            let reward = match rank {
                1 => FIRST_PLACE_REWARD,
                2 => SECOND_PLACE_REWARD,
                _ => 0,
            };
            if let Some(membership) = store.find_membership_mut(*membership_id) {
                membership.reward = reward;
                membership.reward_claimed = false;
            }
        }
        log::info!(
            "Distributed rewards for group {} of tournament {}",
            group_id,
            tournament_id
        );
    }
}
