//! Integration tests for the tournament lifecycle and the level-up hook.

use tournament_backend::{
    claim_reward, create_tournament, current_active_tournament, end_tournaments,
    enter_tournament, update_user_level, Country, Store, TournamentError, User, UserId,
    FIRST_PLACE_REWARD, LEVEL_UP_COINS, MIN_LEVEL,
};

use chrono::{DateTime, TimeZone, Utc};

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 14, 12, 0, 0).unwrap()
}

fn after_close() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 14, 21, 0, 0).unwrap()
}

fn eligible_user(store: &mut Store, name: &str, country: Country) -> UserId {
    let mut user = User::new(name, country);
    user.level = MIN_LEVEL;
    store.insert_user(user)
}

fn fill_group(store: &mut Store) -> Vec<UserId> {
    Country::ALL
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let uid = eligible_user(store, &format!("u{i}"), c);
            enter_tournament(store, uid, noon()).unwrap();
            uid
        })
        .collect()
}

#[test]
fn created_tournament_is_active_and_ends_at_the_close_hour() {
    let mut store = Store::new();
    let tid = create_tournament(&mut store, noon());

    let t = store.find_tournament(tid).unwrap();
    assert!(t.active);
    assert_eq!(t.start_time, noon());
    assert_eq!(
        t.end_time,
        Utc.with_ymd_and_hms(2024, 5, 14, 20, 0, 0).unwrap()
    );
}

#[test]
fn discovery_returns_the_singular_active_tournament() {
    let mut store = Store::new();
    let tid = create_tournament(&mut store, noon());
    assert_eq!(current_active_tournament(&mut store, noon()), Ok(tid));
}

#[test]
fn discovery_creates_lazily_inside_the_window_and_fails_outside() {
    let mut store = Store::new();
    let tid = current_active_tournament(&mut store, noon()).unwrap();
    assert!(store.find_tournament(tid).unwrap().active);

    let mut cold_store = Store::new();
    assert_eq!(
        current_active_tournament(&mut cold_store, after_close()),
        Err(TournamentError::NoActiveTournament)
    );
}

#[test]
fn two_active_tournaments_break_the_singularity_invariant() {
    let mut store = Store::new();
    create_tournament(&mut store, noon());
    create_tournament(&mut store, noon());
    assert_eq!(
        current_active_tournament(&mut store, noon()),
        Err(TournamentError::MultipleActiveTournaments)
    );
}

#[test]
fn closing_twice_does_not_re_arm_claimed_rewards() {
    let mut store = Store::new();
    create_tournament(&mut store, noon());
    let users = fill_group(&mut store);
    end_tournaments(&mut store);
    claim_reward(&mut store, users[0]).unwrap();

    // The closed tournament is never revisited, so the claim stands.
    end_tournaments(&mut store);
    assert_eq!(
        claim_reward(&mut store, users[0]),
        Err(TournamentError::NothingToClaim)
    );
    assert!(store.active_tournament_ids().is_empty());
}

#[test]
fn level_up_scores_only_in_started_groups_of_active_tournaments() {
    let mut store = Store::new();
    create_tournament(&mut store, noon());

    // Alone in the group: competition not started, no score.
    let uid = eligible_user(&mut store, "solo", Country::Turkey);
    enter_tournament(&mut store, uid, noon()).unwrap();
    let coins_before = store.find_user(uid).unwrap().coins;
    let updated = update_user_level(&mut store, uid).unwrap();
    assert_eq!(updated.level, MIN_LEVEL + 1);
    assert_eq!(updated.coins, coins_before + LEVEL_UP_COINS);
    assert_eq!(store.memberships_by_user(uid)[0].score, 0);

    // Four more entrants start the competition; now level-ups score.
    for (i, &c) in Country::ALL.iter().skip(1).enumerate() {
        let other = eligible_user(&mut store, &format!("o{i}"), c);
        enter_tournament(&mut store, other, noon()).unwrap();
    }
    update_user_level(&mut store, uid).unwrap();
    assert_eq!(store.memberships_by_user(uid)[0].score, 1);

    // After close, the group stops scoring.
    end_tournaments(&mut store);
    update_user_level(&mut store, uid).unwrap();
    assert_eq!(store.memberships_by_user(uid)[0].score, 1);
}

#[test]
fn closing_pays_tied_winners_and_claims_credit_the_balance() {
    let mut store = Store::new();
    create_tournament(&mut store, noon());
    let users = fill_group(&mut store);

    // Scores [30, 30, 10, 10, 5] built through the level-up hook.
    for (uid, target) in users.iter().zip([30u64, 30, 10, 10, 5]) {
        for _ in 0..target {
            update_user_level(&mut store, *uid).unwrap();
        }
    }
    end_tournaments(&mut store);

    let rewards: Vec<u64> = users
        .iter()
        .map(|&uid| store.memberships_by_user(uid)[0].reward)
        .collect();
    assert_eq!(rewards, vec![FIRST_PLACE_REWARD, FIRST_PLACE_REWARD, 0, 0, 0]);

    for &winner in &users[..2] {
        let before = store.find_user(winner).unwrap().coins;
        let updated = claim_reward(&mut store, winner).unwrap();
        assert_eq!(updated.coins, before + FIRST_PLACE_REWARD);
    }
    for &loser in &users[2..] {
        assert_eq!(
            claim_reward(&mut store, loser),
            Err(TournamentError::NothingToClaim)
        );
    }
}
