//! Ranking: group leaderboards and per-country totals.

use std::collections::HashMap;

use crate::models::{
    Country, CountryScore, GroupId, GroupLeaderboardEntry, TournamentError, TournamentId,
};
use crate::store::Store;

/// Competition ranks for scores already sorted descending: tied scores share
/// a rank, and the next distinct score gets its 1-based position ("1,1,3").
/// Explicit fold carrying the previous score and rank.
pub(crate) fn competition_ranks(scores: &[u64]) -> Vec<u32> {
    let mut ranks = Vec::with_capacity(scores.len());
    let mut prev_score = 0u64;
    let mut prev_rank = 0u32;
    for (i, &score) in scores.iter().enumerate() {
        let rank = if i > 0 && score == prev_score {
            prev_rank
        } else {
            i as u32 + 1
        };
        ranks.push(rank);
        prev_score = score;
        prev_rank = rank;
    }
    ranks
}

/// Current standings of a group: participants sorted by score descending,
/// with tie-aware competition ranks.
pub fn group_leaderboard(
    store: &Store,
    group_id: GroupId,
) -> Result<Vec<GroupLeaderboardEntry>, TournamentError> {
    if store.find_group(group_id).is_none() {
        return Err(TournamentError::GroupNotFound(group_id));
    }

    let mut entries: Vec<GroupLeaderboardEntry> = store
        .memberships_by_group(group_id)
        .into_iter()
        .filter_map(|m| {
            store.find_user(m.user_id).map(|u| GroupLeaderboardEntry {
                user_id: u.id,
                username: u.username.clone(),
                country: u.country,
                score: m.score,
                rank: 0,
            })
        })
        .collect();

    // Stable sort: tied participants keep join order.
    entries.sort_by(|a, b| b.score.cmp(&a.score));

    let scores: Vec<u64> = entries.iter().map(|e| e.score).collect();
    for (entry, rank) in entries.iter_mut().zip(competition_ranks(&scores)) {
        entry.rank = rank;
    }

    Ok(entries)
}

/// Total score per country across all groups of a tournament, descending.
pub fn country_leaderboard(
    store: &Store,
    tournament_id: TournamentId,
) -> Result<Vec<CountryScore>, TournamentError> {
    if store.find_tournament(tournament_id).is_none() {
        return Err(TournamentError::TournamentNotFound(tournament_id));
    }

    let mut totals: HashMap<Country, u64> = HashMap::new();
    for group_id in store.group_ids_by_tournament(tournament_id) {
        for membership in store.memberships_by_group(group_id) {
            if let Some(user) = store.find_user(membership.user_id) {
                *totals.entry(user.country).or_insert(0) += membership.score;
            }
        }
    }

    // Collect in declaration order so equal totals come out deterministically.
    let mut scores: Vec<CountryScore> = Country::ALL
        .iter()
        .filter_map(|&country| {
            totals.get(&country).map(|&total_score| CountryScore {
                country,
                total_score,
            })
        })
        .collect();
    scores.sort_by(|a, b| b.total_score.cmp(&a.total_score));

    Ok(scores)
}
