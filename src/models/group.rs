//! Group and Membership data structures.

use serde::{Deserialize, Serialize};

use crate::models::tournament::TournamentId;
use crate::models::user::UserId;

/// Unique identifier for a group (assigned sequentially by the store).
/// Ascending ids follow creation order; matchmaking fills older groups first.
pub type GroupId = u64;

/// Unique identifier for a membership (assigned sequentially by the store).
pub type MembershipId = u64;

/// Number of members at which a group is full and its competition starts.
pub const GROUP_CAPACITY: usize = 5;

/// A fixed-capacity cohort of entrants competing within one tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub tournament_id: TournamentId,
    /// Set exactly when the 5th member joins; never reset.
    pub competition_started: bool,
}

impl Group {
    /// Create an empty group for a tournament. The id is assigned on insert.
    pub fn new(tournament_id: TournamentId) -> Self {
        Self {
            id: 0,
            tournament_id,
            competition_started: false,
        }
    }
}

/// One user's participation in one group: score and reward state.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    pub id: MembershipId,
    pub user_id: UserId,
    pub group_id: GroupId,
    /// Starts at 0; bumped by the level-up hook while the competition runs.
    pub score: u64,
    /// 0 until distribution stamps it at tournament close.
    pub reward: u64,
    pub reward_claimed: bool,
}

impl Membership {
    /// Bind a user to a group with zeroed score and reward state.
    /// The id is assigned by the store on insert.
    pub fn new(user_id: UserId, group_id: GroupId) -> Self {
        Self {
            id: 0,
            user_id,
            group_id,
            score: 0,
            reward: 0,
            reward_claimed: false,
        }
    }
}
