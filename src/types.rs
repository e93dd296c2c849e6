use std::fmt;

use serde::{Deserialize, Serialize};

/// Battle identifier as issued by the server.
///
/// The API has only ever returned integers, but the value is treated as opaque:
/// it is compared for equality and echoed back in claim requests untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BattleId {
    Num(i64),
    Text(String),
}

impl fmt::Display for BattleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleId::Num(n) => write!(f, "{n}"),
            BattleId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for BattleId {
    fn from(n: i64) -> Self {
        BattleId::Num(n)
    }
}

/// Response of the latest-battle leaderboard endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BattleStatus {
    /// `true` once the result of the user's latest battle is available.
    #[serde(default)]
    pub status: Option<bool>,
    #[serde(default)]
    pub user_data: Option<UserData>,
}

/// Per-user entry of the latest battle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default)]
    pub battle_id: Option<BattleId>,
    #[serde(default)]
    pub is_claimed: Option<bool>,
    #[serde(default)]
    pub rank: Option<i64>,
    /// Reward in Hearts.
    #[serde(default)]
    pub reward: Option<f64>,
}

impl BattleStatus {
    /// Battle id reported for the user, if any.
    pub fn battle_id(&self) -> Option<&BattleId> {
        self.user_data.as_ref().and_then(|u| u.battle_id.as_ref())
    }
}

/// Response of the buy-ticket and claim-reward endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of the tap endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TapResponse {
    #[serde(default)]
    pub balance: Option<f64>,
}

/// Request body shared by every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct UserRequest {
    pub user_id: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClaimRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battle_id: Option<&'a BattleId>,
    pub user_id: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TapRequest {
    pub user_id: u64,
    pub tap_count: u32,
}

/// The single action a cycle takes, derived from a [`BattleStatus`].
#[derive(Debug, Clone, PartialEq)]
pub enum CycleDecision {
    /// A finished battle has an unclaimed reward.
    ClaimReady {
        battle_id: Option<BattleId>,
        rank: Option<i64>,
        reward: Option<f64>,
    },
    /// A ticket is active and its battle has not resolved yet.
    MatchInProgress { battle_id: Option<BattleId> },
    /// No active ticket, or the last reward was already claimed.
    NeedsTicket { last_battle_id: Option<BattleId> },
}

/// Counters accumulated over one process run, printed on shutdown.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub started_at: String,
    pub uptime_secs: i64,
    pub cycles: u64,
    pub fetch_failures: u64,
    pub rewards_claimed: u64,
    pub total_reward: f64,
    pub tickets_bought: u64,
    pub failed_actions: u64,
    pub last_balance: Option<f64>,
}
