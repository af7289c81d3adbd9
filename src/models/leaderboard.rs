//! Leaderboard response types (for API / display).

use serde::{Deserialize, Serialize};

use crate::models::user::{Country, UserId};

/// One row of a group leaderboard: a participant with its competition rank.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupLeaderboardEntry {
    pub user_id: UserId,
    pub username: String,
    pub country: Country,
    pub score: u64,
    /// 1-based competition rank; tied scores share a rank ("1,1,3").
    pub rank: u32,
}

/// A country's total score across all groups of one tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CountryScore {
    pub country: Country,
    pub total_score: u64,
}
