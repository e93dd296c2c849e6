pub mod api;
pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod reporter;
pub mod state;
pub mod types;

/// Latest battle / leaderboard status for a user.
pub const LATEST_BATTLE_URL: &str = "https://server.powerpals.xyz/api/royale/latestBattleLeaderboard";

/// Buy a royale ticket with Hearts.
pub const BUY_TICKET_URL: &str = "https://server.powerpals.xyz/api/royale/buyTicketHearts";

/// Claim the reward of a finished battle.
pub const CLAIM_REWARD_URL: &str = "https://server.powerpals.xyz/api/royale/claimReward";

/// Tap endpoint, used to read back the current Hearts balance.
pub const TAP_URL: &str = "https://server.powerpals.xyz/api/tap";
