//! Integration tests for reward distribution at tournament close.

use tournament_backend::{
    create_tournament, distribute_rewards, find_or_create_group, Country, GroupId, Store,
    TournamentId, User, UserId, FIRST_PLACE_REWARD, SECOND_PLACE_REWARD,
};

use chrono::{DateTime, TimeZone, Utc};

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 14, 12, 0, 0).unwrap()
}

fn set_score(store: &mut Store, group_id: GroupId, user_id: UserId, score: u64) {
    let mid = store
        .memberships_by_group(group_id)
        .iter()
        .find(|m| m.user_id == user_id)
        .map(|m| m.id)
        .unwrap();
    store.find_membership_mut(mid).unwrap().score = score;
}

/// One group with the given scores. With fewer than 5 scores the group never
/// fills and its competition does not start.
fn group_with_scores(scores: &[u64]) -> (Store, TournamentId, GroupId, Vec<UserId>) {
    let mut store = Store::new();
    let tid = create_tournament(&mut store, noon());
    let mut gid = 0;
    let mut users = Vec::new();
    for (i, &score) in scores.iter().enumerate() {
        let uid = store.insert_user(User::new(format!("u{i}"), Country::ALL[i]));
        gid = find_or_create_group(&mut store, tid, uid).unwrap();
        set_score(&mut store, gid, uid, score);
        users.push(uid);
    }
    (store, tid, gid, users)
}

fn rewards_in_join_order(store: &Store, gid: GroupId, users: &[UserId]) -> Vec<u64> {
    users
        .iter()
        .map(|&uid| {
            store
                .memberships_by_group(gid)
                .iter()
                .find(|m| m.user_id == uid)
                .map(|m| m.reward)
                .unwrap()
        })
        .collect()
}

#[test]
fn unstarted_group_pays_nothing() {
    let (mut store, tid, gid, users) = group_with_scores(&[10, 8]);
    assert!(!store.find_group(gid).unwrap().competition_started);

    distribute_rewards(&mut store, tid);

    assert_eq!(rewards_in_join_order(&store, gid, &users), vec![0, 0]);
}

#[test]
fn top_two_ranks_pay_with_tied_second_place() {
    let (mut store, tid, gid, users) = group_with_scores(&[10, 8, 8, 2, 0]);

    distribute_rewards(&mut store, tid);

    // Ranks 1,2,2,4,5: both rank-2 participants get the second-place reward.
    assert_eq!(
        rewards_in_join_order(&store, gid, &users),
        vec![FIRST_PLACE_REWARD, SECOND_PLACE_REWARD, SECOND_PLACE_REWARD, 0, 0]
    );
}

#[test]
fn two_way_tie_for_first_consumes_the_second_tier() {
    let (mut store, tid, gid, users) = group_with_scores(&[30, 30, 10, 10, 5]);

    distribute_rewards(&mut store, tid);

    // Ranks 1,1,3,3,5: no rank 2 exists, so nobody gets the 5000 tier.
    assert_eq!(
        rewards_in_join_order(&store, gid, &users),
        vec![FIRST_PLACE_REWARD, FIRST_PLACE_REWARD, 0, 0, 0]
    );
    for m in store.memberships_by_group(gid) {
        assert!(!m.reward_claimed);
    }
}

#[test]
fn three_way_tie_for_first_also_suppresses_the_second_tier() {
    let (mut store, tid, gid, users) = group_with_scores(&[20, 20, 20, 7, 1]);

    distribute_rewards(&mut store, tid);

    assert_eq!(
        rewards_in_join_order(&store, gid, &users),
        vec![FIRST_PLACE_REWARD, FIRST_PLACE_REWARD, FIRST_PLACE_REWARD, 0, 0]
    );
}

#[test]
fn distribution_is_idempotent_from_the_same_scores() {
    let (mut store, tid, gid, users) = group_with_scores(&[9, 6, 3, 2, 1]);

    distribute_rewards(&mut store, tid);
    let first = rewards_in_join_order(&store, gid, &users);
    distribute_rewards(&mut store, tid);
    let second = rewards_in_join_order(&store, gid, &users);

    assert_eq!(first, second);
    assert_eq!(
        first,
        vec![FIRST_PLACE_REWARD, SECOND_PLACE_REWARD, 0, 0, 0]
    );
}
