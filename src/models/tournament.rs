//! Tournament and TournamentError.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::group::GroupId;
use crate::models::user::UserId;

/// Unique identifier for a tournament (assigned sequentially by the store).
pub type TournamentId = u64;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// User id does not exist.
    UserNotFound(UserId),
    /// Group id does not exist.
    GroupNotFound(GroupId),
    /// Tournament id does not exist.
    TournamentNotFound(TournamentId),
    /// User is below the level or coin floor for entry.
    NotEligible,
    /// User already holds a membership in the current active tournament.
    AlreadyEntered,
    /// User has a distributed reward that was never claimed.
    HasUnclaimedReward,
    /// No tournament is active and the entry window is closed.
    NoActiveTournament,
    /// User has no membership in any active tournament.
    NotInGroup,
    /// User has no unclaimed rewards.
    NothingToClaim,
    /// More than one tournament is active: the singularity invariant is broken.
    MultipleActiveTournaments,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::UserNotFound(_) => write!(f, "User not found"),
            TournamentError::GroupNotFound(_) => write!(f, "Group not found"),
            TournamentError::TournamentNotFound(_) => write!(f, "Tournament not found"),
            TournamentError::NotEligible => {
                write!(f, "User does not meet the requirements to enter the tournament")
            }
            TournamentError::AlreadyEntered => {
                write!(f, "User already entered the current tournament")
            }
            TournamentError::HasUnclaimedReward => {
                write!(f, "User has unclaimed rewards and cannot enter a new tournament")
            }
            TournamentError::NoActiveTournament => write!(f, "No active tournament found"),
            TournamentError::NotInGroup => {
                write!(f, "User is not part of any tournament group")
            }
            TournamentError::NothingToClaim => {
                write!(f, "No rewards to claim or reward already claimed")
            }
            TournamentError::MultipleActiveTournaments => {
                write!(f, "More than one active tournament exists")
            }
        }
    }
}

impl std::error::Error for TournamentError {}

/// One daily competitive window.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub active: bool,
}

impl Tournament {
    /// Create a tournament running from `start_time` until `end_time`, active.
    /// The id is assigned by the store on insert.
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            start_time,
            end_time,
            active: true,
        }
    }
}
