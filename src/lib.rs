//! Daily tournament backend: library with models, store, and business logic.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    claim_reward, country_leaderboard, create_tournament, create_user,
    current_active_tournament, distribute_rewards, end_tournaments, enter_tournament,
    find_or_create_group, get_group_rank, group_leaderboard, update_user_level, CLOSE_HOUR,
    ENTRY_FEE, FIRST_PLACE_REWARD, LEVEL_UP_COINS, MIN_COINS, MIN_LEVEL, SECOND_PLACE_REWARD,
};
pub use models::{
    Country, CountryScore, Group, GroupId, GroupLeaderboardEntry, Membership, MembershipId,
    Tournament, TournamentError, TournamentId, User, UserId, GROUP_CAPACITY, STARTING_COINS,
    STARTING_LEVEL,
};
pub use store::Store;
