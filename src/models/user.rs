//! User and Country data structures.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Unique identifier for a user (assigned sequentially by the store).
pub type UserId = u64;

/// Level every new user starts at.
pub const STARTING_LEVEL: u32 = 1;

/// Coin balance every new user starts with.
pub const STARTING_COINS: u64 = 5000;

/// Country a user plays from. Assigned at creation, immutable afterwards.
/// The set is closed: same-country exclusion in matchmaking depends on it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Country {
    Turkey,
    UnitedStates,
    UnitedKingdom,
    France,
    Germany,
}

impl Country {
    /// All countries, in declaration order.
    pub const ALL: [Country; 5] = [
        Country::Turkey,
        Country::UnitedStates,
        Country::UnitedKingdom,
        Country::France,
        Country::Germany,
    ];

    /// Pick a country uniformly at random (used at user creation).
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Country::Turkey => "Turkey",
            Country::UnitedStates => "United States",
            Country::UnitedKingdom => "United Kingdom",
            Country::France => "France",
            Country::Germany => "Germany",
        };
        write!(f, "{}", name)
    }
}

/// A registered player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub level: u32,
    pub coins: u64,
    pub country: Country,
}

impl User {
    /// Create a new user at the starting level and coin balance.
    /// The id is assigned by the store on insert.
    pub fn new(username: impl Into<String>, country: Country) -> Self {
        Self {
            id: 0,
            username: username.into(),
            level: STARTING_LEVEL,
            coins: STARTING_COINS,
            country,
        }
    }
}
