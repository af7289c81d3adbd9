//! Data structures for the tournament backend: users, tournaments, groups, memberships.

mod group;
mod leaderboard;
mod tournament;
mod user;

pub use group::{Group, GroupId, Membership, MembershipId, GROUP_CAPACITY};
pub use leaderboard::{CountryScore, GroupLeaderboardEntry};
pub use tournament::{Tournament, TournamentError, TournamentId};
pub use user::{Country, User, UserId, STARTING_COINS, STARTING_LEVEL};
