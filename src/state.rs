use chrono::{DateTime, Utc};

use crate::types::SessionSummary;

/// What a single cycle ended up doing.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// The status request failed; nothing else was attempted.
    FetchFailed { reason: String },
    /// Reward claimed. `balance` is the refreshed balance, if the refresh worked.
    Claimed {
        reward: Option<f64>,
        balance: Option<f64>,
    },
    ClaimFailed { reason: String },
    /// A battle is being played; nothing to do.
    MatchInProgress,
    /// Ticket bought. The cycle then waited for the next battle to start, unless
    /// shutdown cut that wait short.
    TicketBought { balance: Option<f64> },
    TicketFailed { reason: String },
}

/// Counters for one process run. Purely informational: nothing here feeds back
/// into the cycle decisions.
#[derive(Debug, Clone)]
pub struct SessionStats {
    pub started_at: DateTime<Utc>,
    pub cycles: u64,
    pub fetch_failures: u64,
    pub rewards_claimed: u64,
    pub total_reward: f64,
    pub tickets_bought: u64,
    pub failed_actions: u64,
    /// Last balance seen in a tap response.
    pub last_balance: Option<f64>,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            cycles: 0,
            fetch_failures: 0,
            rewards_claimed: 0,
            total_reward: 0.0,
            tickets_bought: 0,
            failed_actions: 0,
            last_balance: None,
        }
    }

    /// Fold a finished cycle into the counters.
    pub fn record(&mut self, outcome: &CycleOutcome) {
        self.cycles += 1;
        match outcome {
            CycleOutcome::FetchFailed { .. } => self.fetch_failures += 1,
            CycleOutcome::Claimed { reward, balance } => {
                self.rewards_claimed += 1;
                self.total_reward += reward.unwrap_or(0.0);
                self.observe_balance(*balance);
            }
            CycleOutcome::ClaimFailed { .. } | CycleOutcome::TicketFailed { .. } => {
                self.failed_actions += 1;
            }
            CycleOutcome::MatchInProgress => {}
            CycleOutcome::TicketBought { balance } => {
                self.tickets_bought += 1;
                self.observe_balance(*balance);
            }
        }
    }

    fn observe_balance(&mut self, balance: Option<f64>) {
        if balance.is_some() {
            self.last_balance = balance;
        }
    }

    pub fn summary(&self, now: DateTime<Utc>) -> SessionSummary {
        SessionSummary {
            started_at: self.started_at.to_rfc3339(),
            uptime_secs: (now - self.started_at).num_seconds(),
            cycles: self.cycles,
            fetch_failures: self.fetch_failures,
            rewards_claimed: self.rewards_claimed,
            total_reward: self.total_reward,
            tickets_bought: self.tickets_bought,
            failed_actions: self.failed_actions,
            last_balance: self.last_balance,
        }
    }
}
