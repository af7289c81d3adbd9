//! Group placement: first-fit with capacity and country exclusion.

use crate::models::{Group, GroupId, Membership, TournamentError, TournamentId, UserId, GROUP_CAPACITY};
use crate::store::Store;

/// Place a user into a group of the tournament, creating one when needed.
///
/// Groups are scanned in creation order; the first group that is not full and
/// has no member from the user's country takes the user. Joining as the 5th
/// member starts the group's competition. Greedy first-fit: a full group or a
/// same-country conflict is never revisited for this user.
///
/// The caller must have verified the user is not already in the tournament.
pub fn find_or_create_group(
    store: &mut Store,
    tournament_id: TournamentId,
    user_id: UserId,
) -> Result<GroupId, TournamentError> {
    let country = store
        .find_user(user_id)
        .ok_or(TournamentError::UserNotFound(user_id))?
        .country;

    for group_id in store.group_ids_by_tournament(tournament_id) {
        let member_count = store.count_group_members(group_id);
        if member_count >= GROUP_CAPACITY {
            continue;
        }
        if store.group_has_country(group_id, country) {
            continue;
        }

        store.insert_membership(Membership::new(user_id, group_id));
        if member_count + 1 == GROUP_CAPACITY {
            if let Some(group) = store.find_group_mut(group_id) {
                group.competition_started = true;
            }
            log::info!("Group {} is full, competition started", group_id);
        }
        log::info!(
            "User {} added to group {} which now has {} participants",
            user_id,
            group_id,
            member_count + 1
        );
        return Ok(group_id);
    }

    // No group fits: open a new one. Capacity is 5, so a single member never
    // starts the competition here.
    let group_id = store.insert_group(Group::new(tournament_id));
    store.insert_membership(Membership::new(user_id, group_id));
    log::info!(
        "User {} added to new group {} for tournament {}",
        user_id,
        group_id,
        tournament_id
    );
    Ok(group_id)
}
