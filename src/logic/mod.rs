//! Tournament business logic: matchmaking, ranking, rewards, lifecycle, entry gate.

mod entry;
mod leaderboard;
mod lifecycle;
mod matchmaking;
mod rewards;
mod users;

pub use entry::{claim_reward, enter_tournament, get_group_rank, ENTRY_FEE, MIN_COINS, MIN_LEVEL};
pub use leaderboard::{country_leaderboard, group_leaderboard};
pub use lifecycle::{create_tournament, current_active_tournament, end_tournaments, CLOSE_HOUR};
pub use matchmaking::find_or_create_group;
pub use rewards::{distribute_rewards, FIRST_PLACE_REWARD, SECOND_PLACE_REWARD};
pub use users::{create_user, update_user_level, LEVEL_UP_COINS};
