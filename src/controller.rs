use std::future::{Future, Pending};
use std::pin::Pin;
use std::time::Duration;

use tracing::debug;

use crate::api::RoyaleApi;
use crate::config::ControllerConfig;
use crate::engine::{decide, is_new_battle, observed_battle_id};
use crate::reporter::{Category, report};
use crate::state::{CycleOutcome, SessionStats};
use crate::types::{BattleId, CycleDecision};

/// Shutdown future plus a latch, so a fired signal is never polled again.
struct Shutdown<F> {
    signal: Pin<Box<F>>,
    fired: bool,
}

impl Shutdown<Pending<()>> {
    fn never() -> Self {
        Self::new(std::future::pending())
    }
}

impl<F: Future<Output = ()>> Shutdown<F> {
    fn new(signal: F) -> Self {
        Self {
            signal: Box::pin(signal),
            fired: false,
        }
    }

    /// Sleep for `period`. Returns `true` if shutdown was requested.
    async fn sleep(&mut self, period: Duration) -> bool {
        if self.fired {
            return true;
        }
        tokio::select! {
            _ = self.signal.as_mut() => self.fired = true,
            _ = tokio::time::sleep(period) => {}
        }
        self.fired
    }
}

/// Drives the claim / wait / buy cycle against a [`RoyaleApi`].
///
/// One cycle runs at a time. Every cycle, successful or not, is followed by
/// `api_interval` of sleep. API failures are logged and never stop the loop.
pub struct Controller<A> {
    api: A,
    config: ControllerConfig,
    stats: SessionStats,
}

impl<A: RoyaleApi> Controller<A> {
    pub fn new(api: A, config: ControllerConfig) -> Self {
        Self {
            api,
            config,
            stats: SessionStats::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Run cycles forever.
    pub async fn run(&mut self) {
        self.run_until(std::future::pending()).await
    }

    /// Run cycles until `shutdown` completes.
    ///
    /// The signal is only observed while sleeping, so a request or claim in
    /// flight always finishes first.
    pub async fn run_until<F: Future<Output = ()>>(&mut self, shutdown: F) {
        let mut shutdown = Shutdown::new(shutdown);
        loop {
            self.cycle(&mut shutdown).await;
            if shutdown.sleep(self.config.api_interval).await {
                debug!("Shutdown requested, leaving cycle loop");
                return;
            }
        }
    }

    /// Run exactly one cycle, including any wait for a new battle.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        self.cycle(&mut Shutdown::never()).await
    }

    async fn cycle<F: Future<Output = ()>>(&mut self, shutdown: &mut Shutdown<F>) -> CycleOutcome {
        report(Category::Info, "Starting new automation cycle...");
        let outcome = self.execute(shutdown).await;
        debug!(?outcome, "Cycle finished");
        self.stats.record(&outcome);
        outcome
    }

    async fn execute<F: Future<Output = ()>>(&mut self, shutdown: &mut Shutdown<F>) -> CycleOutcome {
        let status = match self.api.latest_status().await {
            Ok(s) => s,
            Err(e) => {
                report(
                    Category::Error,
                    format!("Failed to get battle status: {e}. Retrying."),
                );
                return CycleOutcome::FetchFailed {
                    reason: e.to_string(),
                };
            }
        };

        match decide(&status) {
            CycleDecision::ClaimReady {
                battle_id,
                rank,
                reward,
            } => self.claim(battle_id, rank, reward).await,
            CycleDecision::MatchInProgress { battle_id } => {
                report(
                    Category::Info,
                    format!(
                        "Battle {} is in progress. Waiting for it to finish...",
                        display_id(battle_id.as_ref())
                    ),
                );
                CycleOutcome::MatchInProgress
            }
            CycleDecision::NeedsTicket { last_battle_id } => {
                report(
                    Category::Info,
                    "No reward to claim or already claimed. Buying a new ticket...",
                );
                self.buy_and_wait(last_battle_id, shutdown).await
            }
        }
    }

    async fn claim(
        &mut self,
        battle_id: Option<BattleId>,
        rank: Option<i64>,
        reward: Option<f64>,
    ) -> CycleOutcome {
        let id = display_id(battle_id.as_ref());
        report(
            Category::Rank,
            format!(
                "Battle {id}: finished at rank #{} and earned {} Hearts!",
                display_opt(rank),
                display_opt(reward)
            ),
        );
        report(Category::Info, "Battle result available. Claiming reward...");

        match self.api.claim_reward(battle_id.as_ref()).await {
            Ok(()) => {
                report(
                    Category::Success,
                    format!("Reward claimed for battle {id}."),
                );
                let balance = self.refresh_balance().await;
                CycleOutcome::Claimed { reward, balance }
            }
            Err(e) => {
                report(Category::Error, format!("Failed to claim reward: {e}"));
                CycleOutcome::ClaimFailed {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn buy_and_wait<F: Future<Output = ()>>(
        &mut self,
        last_battle_id: Option<BattleId>,
        shutdown: &mut Shutdown<F>,
    ) -> CycleOutcome {
        report(Category::Info, "Trying to buy a new ticket...");
        if let Err(e) = self.api.buy_ticket().await {
            report(Category::Error, format!("Failed to buy ticket: {e}"));
            return CycleOutcome::TicketFailed {
                reason: e.to_string(),
            };
        }
        report(Category::Success, "Ticket bought.");
        let balance = self.refresh_balance().await;
        if self.wait_for_new_battle(last_battle_id, shutdown).await.is_none() {
            debug!("Shutdown requested while waiting for a new battle");
        }
        CycleOutcome::TicketBought { balance }
    }

    /// Poll until the reported battle id differs from `before`.
    ///
    /// No timeout: if the server never reports a different id this waits until
    /// shutdown, or forever without one. Returns the new id, or `None` when
    /// interrupted.
    async fn wait_for_new_battle<F: Future<Output = ()>>(
        &self,
        before: Option<BattleId>,
        shutdown: &mut Shutdown<F>,
    ) -> Option<Option<BattleId>> {
        report(Category::Info, "Waiting for a new battle to start...");
        let mut current = before.clone();
        loop {
            let delay = match self.api.latest_status().await {
                Ok(status) => {
                    current = observed_battle_id(&status, current);
                    if is_new_battle(before.as_ref(), current.as_ref()) {
                        report(
                            Category::Success,
                            format!(
                                "New battle (ID: {}) has started!",
                                display_id(current.as_ref())
                            ),
                        );
                        return Some(current);
                    }
                    self.config.battle_check_interval
                }
                Err(e) => {
                    report(
                        Category::Error,
                        format!("Failed to get battle status ({e}), retrying..."),
                    );
                    self.config.api_interval
                }
            };
            if shutdown.sleep(delay).await {
                return None;
            }
        }
    }

    /// Tap once to read back the balance. Failures are logged, not returned.
    async fn refresh_balance(&self) -> Option<f64> {
        report(Category::Info, "Refreshing balance...");
        match self.api.tap_balance().await {
            Ok(balance) => {
                report(
                    Category::Balance,
                    format!("Current balance: {balance} Hearts"),
                );
                Some(balance)
            }
            Err(e) => {
                report(Category::Error, format!("Failed to refresh balance: {e}"));
                None
            }
        }
    }
}

fn display_id(id: Option<&BattleId>) -> String {
    id.map_or_else(|| "unknown".to_string(), |id| id.to_string())
}

fn display_opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "?".to_string(), |v| v.to_string())
}
