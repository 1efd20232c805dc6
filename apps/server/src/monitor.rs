//! Balance monitor loop.
//!
//! Owns the watch-list, the fetcher, the diff state and the notifier.
//! Each pass fetches every wallet in order, feeds the result to the tracker
//! and sends one message per detected change.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use watcher_alerts::{format_balance_message, Delivery, Notifier};
use watcher_core::WatchedAddress;
use watcher_engine::{BalanceTracker, Observation};
use watcher_feeds::BalanceFetcher;

/// Log a running summary every this many cycles.
const STATS_EVERY_CYCLES: u64 = 300;

/// Settings for the monitor loop.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Sleep between full passes.
    pub poll_interval: Duration,
    /// Token symbol used in messages.
    pub symbol: String,
}

/// Which pass is running; only changes the wording of skip warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Initial,
    Regular,
}

/// Per-pass outcome counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub skipped: usize,
    pub baselines: usize,
    pub unchanged: usize,
    pub changed: usize,
    pub sent: usize,
    pub dropped: usize,
}

/// Running totals since startup.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MonitorStats {
    pub cycles: u64,
    pub failed_fetches: u64,
    pub changes: u64,
    pub notifications_sent: u64,
    pub notifications_dropped: u64,
}

impl MonitorStats {
    fn record(&mut self, report: &CycleReport) {
        self.cycles += 1;
        self.failed_fetches += report.skipped as u64;
        self.changes += report.changed as u64;
        self.notifications_sent += report.sent as u64;
        self.notifications_dropped += report.dropped as u64;
    }
}

pub struct Monitor {
    wallets: Vec<WatchedAddress>,
    fetcher: Arc<dyn BalanceFetcher>,
    tracker: BalanceTracker,
    notifier: Notifier,
    config: MonitorConfig,
    stats: MonitorStats,
}

impl Monitor {
    pub fn new(
        wallets: Vec<WatchedAddress>,
        fetcher: Arc<dyn BalanceFetcher>,
        notifier: Notifier,
        config: MonitorConfig,
    ) -> Self {
        let tracker = BalanceTracker::with_addresses(wallets.iter().map(|w| w.address.clone()));
        Self {
            wallets,
            fetcher,
            tracker,
            notifier,
            config,
            stats: MonitorStats::default(),
        }
    }

    pub fn tracker(&self) -> &BalanceTracker {
        &self.tracker
    }

    pub fn stats(&self) -> MonitorStats {
        self.stats
    }

    /// Establish baselines for every wallet before the regular loop starts.
    pub async fn prime(&mut self) -> CycleReport {
        let report = self.pass(Pass::Initial).await;
        let names: Vec<&str> = self.wallets.iter().map(|w| w.display_name.as_str()).collect();
        info!("✅ Started monitoring wallets: {:?}", names);
        report
    }

    /// One full pass over the watch-list.
    pub async fn run_cycle(&mut self) -> CycleReport {
        let report = self.pass(Pass::Regular).await;
        self.stats.record(&report);
        report
    }

    /// Prime, then poll forever.
    pub async fn run(mut self) {
        self.prime().await;
        tokio::time::sleep(self.config.poll_interval).await;

        loop {
            let report = self.run_cycle().await;
            debug!(
                skipped = report.skipped,
                baselines = report.baselines,
                unchanged = report.unchanged,
                changed = report.changed,
                sent = report.sent,
                dropped = report.dropped,
                "Cycle complete"
            );

            let stats = self.stats();
            if stats.cycles % STATS_EVERY_CYCLES == 0 {
                info!(
                    "📊 Stats | Cycles: {} | Known: {}/{} | Failed fetches: {} | Changes: {} | Sent: {} | Dropped: {}",
                    stats.cycles,
                    self.tracker.known_count(),
                    self.tracker.len(),
                    stats.failed_fetches,
                    stats.changes,
                    stats.notifications_sent,
                    stats.notifications_dropped
                );
            }

            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    async fn pass(&mut self, pass: Pass) -> CycleReport {
        let mut report = CycleReport::default();

        for wallet in &self.wallets {
            let name = wallet.display_name.as_str();
            let result = self.fetcher.fetch_balance(&wallet.address).await;

            match self.tracker.observe(&wallet.address, result) {
                Observation::Skipped => {
                    report.skipped += 1;
                    match pass {
                        Pass::Initial => warn!(
                            "⚠️ Could not fetch initial balance for wallet `{}`, will retry later",
                            name
                        ),
                        Pass::Regular => {
                            warn!("⚠️ RPC error for wallet `{}`, skipping this cycle", name)
                        }
                    }
                }
                Observation::Baseline(balance) => {
                    report.baselines += 1;
                    info!(
                        "ℹ️ Initial balance for wallet `{}`: {} {}",
                        name, balance, self.config.symbol
                    );
                }
                Observation::Unchanged(_) => {
                    report.unchanged += 1;
                }
                Observation::Changed(change) => {
                    report.changed += 1;
                    info!(
                        "💸 Wallet `{}` balance changed: {} -> {} ({} {})",
                        name, change.old, change.new, change.delta, self.config.symbol
                    );

                    let message =
                        format_balance_message(wallet, &change, &self.config.symbol, Utc::now());
                    match self.notifier.notify(&message).await {
                        Delivery::Sent => report.sent += 1,
                        Delivery::Dropped => report.dropped += 1,
                    }
                }
            }
        }

        report
    }
}
