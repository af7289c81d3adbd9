//! Entry and claim gate: who may enter a tournament, who may claim a reward.

use chrono::{DateTime, Utc};

use crate::logic::leaderboard::group_leaderboard;
use crate::logic::lifecycle::current_active_tournament;
use crate::logic::matchmaking::find_or_create_group;
use crate::models::{GroupLeaderboardEntry, MembershipId, TournamentError, User, UserId};
use crate::store::Store;

/// Coins deducted on successful entry.
pub const ENTRY_FEE: u64 = 1000;

/// Minimum level to enter a tournament.
pub const MIN_LEVEL: u32 = 20;

/// Minimum coin balance to enter a tournament.
pub const MIN_COINS: u64 = 1000;

/// Whether the user holds any distributed-but-unclaimed reward.
fn has_unclaimed_reward(store: &Store, user_id: UserId) -> bool {
    store
        .memberships_by_user(user_id)
        .iter()
        .any(|m| m.reward > 0 && !m.reward_claimed)
}

/// Enter the current active tournament.
///
/// Checks run in order: the user exists, meets the level and coin floor,
/// carries no unclaimed reward, and is not already in the active tournament.
/// On success the entry fee is deducted, the user is placed by matchmaking,
/// and the group's current leaderboard is returned.
pub fn enter_tournament(
    store: &mut Store,
    user_id: UserId,
    now: DateTime<Utc>,
) -> Result<Vec<GroupLeaderboardEntry>, TournamentError> {
    let (level, coins) = store
        .find_user(user_id)
        .map(|u| (u.level, u.coins))
        .ok_or(TournamentError::UserNotFound(user_id))?;

    if level < MIN_LEVEL || coins < MIN_COINS {
        return Err(TournamentError::NotEligible);
    }
    if has_unclaimed_reward(store, user_id) {
        return Err(TournamentError::HasUnclaimedReward);
    }

    let tournament_id = current_active_tournament(store, now)?;
    if store.user_in_tournament(tournament_id, user_id) {
        return Err(TournamentError::AlreadyEntered);
    }

    if let Some(user) = store.find_user_mut(user_id) {
        user.coins -= ENTRY_FEE;
    }

    let group_id = find_or_create_group(store, tournament_id, user_id)?;
    group_leaderboard(store, group_id)
}

/// Claim every unclaimed reward the user holds, crediting all of them to the
/// coin balance in one call. Fails with `NothingToClaim` when none qualify.
pub fn claim_reward(store: &mut Store, user_id: UserId) -> Result<User, TournamentError> {
    if store.find_user(user_id).is_none() {
        return Err(TournamentError::UserNotFound(user_id));
    }

    let pending: Vec<(MembershipId, u64)> = store
        .memberships_by_user(user_id)
        .iter()
        .filter(|m| m.reward > 0 && !m.reward_claimed)
        .map(|m| (m.id, m.reward))
        .collect();
    if pending.is_empty() {
        return Err(TournamentError::NothingToClaim);
    }

    let total: u64 = pending.iter().map(|(_, reward)| reward).sum();
    for (membership_id, _) in &pending {
        if let Some(membership) = store.find_membership_mut(*membership_id) {
            membership.reward_claimed = true;
        }
    }

    let user = store
        .find_user_mut(user_id)
        .ok_or(TournamentError::UserNotFound(user_id))?;
    user.coins += total;
    log::info!("User {} claimed {} coins of rewards", user_id, total);
    Ok(user.clone())
}

/// The user's own leaderboard entry in the active tournament they are
/// participating in.
pub fn get_group_rank(
    store: &Store,
    user_id: UserId,
) -> Result<GroupLeaderboardEntry, TournamentError> {
    if store.find_user(user_id).is_none() {
        return Err(TournamentError::UserNotFound(user_id));
    }

    let group_id = store
        .memberships_by_user(user_id)
        .iter()
        .find_map(|m| {
            let group = store.find_group(m.group_id)?;
            let tournament = store.find_tournament(group.tournament_id)?;
            tournament.active.then_some(group.id)
        })
        .ok_or(TournamentError::NoActiveTournament)?;

    group_leaderboard(store, group_id)?
        .into_iter()
        .find(|entry| entry.user_id == user_id)
        .ok_or(TournamentError::NotInGroup)
}
