//! User creation and the level-up hook.

use crate::models::{Country, GroupId, MembershipId, TournamentError, User, UserId};
use crate::store::Store;

/// Coins granted on each level-up.
pub const LEVEL_UP_COINS: u64 = 25;

/// Create a user at level 1 with the starting balance and a random country.
/// An empty or missing username gets a generated one.
pub fn create_user(store: &mut Store, username: Option<String>) -> User {
    let username = username
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| format!("player{}", store.peek_next_user_id()));
    let country = Country::random(&mut rand::thread_rng());

    let mut user = User::new(username, country);
    user.id = store.insert_user(user.clone());
    log::info!("Created user {} ({})", user.id, user.country);
    user
}

/// Level the user up: +1 level, a coin grant, and +1 group score when the
/// user is competing in a started group of an active tournament.
pub fn update_user_level(store: &mut Store, user_id: UserId) -> Result<User, TournamentError> {
    {
        let user = store
            .find_user_mut(user_id)
            .ok_or(TournamentError::UserNotFound(user_id))?;
        user.level += 1;
        user.coins += LEVEL_UP_COINS;
    }

    let placements: Vec<(MembershipId, GroupId)> = store
        .memberships_by_user(user_id)
        .iter()
        .map(|m| (m.id, m.group_id))
        .collect();
    for (membership_id, group_id) in placements {
        let scoring = store.find_group(group_id).is_some_and(|group| {
            group.competition_started
                && store
                    .find_tournament(group.tournament_id)
                    .is_some_and(|t| t.active)
        });
        if scoring {
            if let Some(membership) = store.find_membership_mut(membership_id) {
                membership.score += 1;
                log::info!(
                    "User {} leveled up, score bumped in group {}",
                    user_id,
                    group_id
                );
            }
        }
    }

    store
        .find_user(user_id)
        .cloned()
        .ok_or(TournamentError::UserNotFound(user_id))
}
