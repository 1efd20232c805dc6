//! Balance Watcher - Headless Server
//!
//! Polls a Sui fullnode for the SUI balance of every watched wallet and
//! posts a Telegram message whenever a balance changes.

mod config;
mod monitor;
mod watchlist;

use config::AppConfig;
use monitor::{Monitor, MonitorConfig};
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use watcher_alerts::{ChatId, Notifier, NotifierConfig, TelegramBot};
use watcher_feeds::{SuiRpcClient, SUI_SYMBOL};

fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // RUST_LOG wins when set; otherwise the plain level applies to everything.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(LevelFilter::from_level(level).into()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    init_logging(&config::log_level_from_env());

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    info!("🚀 Balance Watcher starting...");
    info!("  RPC: {}", config.rpc_url);
    info!("  Watch-list: {}", config.watchlist_path.display());
    info!("  Poll interval: {:?}", config.poll_interval);
    info!("  RPC timeout: {:?}", config.rpc_timeout);

    let wallets = watchlist::load_watchlist(&config.watchlist_path);

    let bot = Arc::new(TelegramBot::new(&config.bot_token));
    match bot.verify().await {
        Ok(username) => info!(
            "🤖 Bot @{} is ready, watching {} wallets",
            username,
            wallets.len()
        ),
        Err(e) => {
            error!("❌ Failed to connect to Telegram: {}", e);
            std::process::exit(1);
        }
    }

    let fetcher = match SuiRpcClient::new(config.rpc_url.clone(), config.rpc_timeout) {
        Ok(client) => client,
        Err(e) => {
            error!("❌ Failed to create RPC client: {}", e);
            std::process::exit(1);
        }
    };

    let notifier = Notifier::new(
        bot,
        NotifierConfig::new(ChatId(config.chat_id)).with_timeout(config.notify_timeout),
    );

    let monitor = Monitor::new(
        wallets,
        Arc::new(fetcher),
        notifier,
        MonitorConfig {
            poll_interval: config.poll_interval,
            symbol: SUI_SYMBOL.to_string(),
        },
    );

    tokio::select! {
        _ = monitor.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down...");
        }
    }
}
