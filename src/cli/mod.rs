//! CLI module for stockdesk
//!
//! Command-line interface for the stock trading dashboard. Uses clap
//! argument parsing with one Args/Command pair per subcommand.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use crate::config::AppConfig;
use crate::data_paths::{DataPaths, DEFAULT_DATA_DIR};
use crate::logging::{self, LogMode, LoggingConfig};

use commands::cancel::{CancelArgs, CancelCommand};
use commands::order::{OrderArgs, OrderCommand};
use commands::portfolio::{PortfolioArgs, PortfolioCommand};
use commands::set_price::{SetPriceArgs, SetPriceCommand};
use commands::stocks::{StocksArgs, StocksCommand};
use commands::trades::{TradesArgs, TradesCommand};
use commands::version::{VersionArgs, VersionCommand};
use commands::watch::{WatchArgs, WatchCommand};

#[derive(Parser)]
#[command(name = "stockdesk")]
#[command(version)]
#[command(about = "Terminal dashboard for the stock trading demo backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend API base URL (default: http://localhost:8080/api)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// User id for portfolio and trade views (default: demo-user)
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Data directory path (default: ./data)
    #[arg(long, global = true, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List market data, optionally filtered by symbol or company name
    Stocks(StocksArgs),

    /// Show holdings and the portfolio summary
    Portfolio(PortfolioArgs),

    /// Show trade history with an optional type or status filter
    Trades(TradesArgs),

    /// Buy shares at the current market price
    Buy(OrderArgs),

    /// Sell shares at the current market price
    Sell(OrderArgs),

    /// Cancel a pending trade
    Cancel(CancelArgs),

    /// Override a stock's quoted price (admin)
    SetPrice(SetPriceArgs),

    /// Live dashboard that polls the selected views
    Watch(WatchArgs),

    /// Show version information
    Version(VersionArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let data_paths = DataPaths::new(&self.data_dir);
        data_paths.ensure_directories()?;

        if self.verbose > 0 && std::env::var("RUST_LOG").is_err() {
            std::env::set_var("RUST_LOG", "debug");
        }

        // The watch dashboard repaints the terminal, so its logs go to file only
        let log_mode = match self.command {
            Commands::Watch(_) => LogMode::FileOnly,
            _ => LogMode::ConsoleAndFile,
        };
        logging::init_logging(LoggingConfig::new(log_mode, data_paths.clone()))?;

        let config = AppConfig::load(&data_paths)?.resolve(self.api_url, self.user)?;

        match self.command {
            Commands::Stocks(args) => StocksCommand::new(args).execute(&config).await,
            Commands::Portfolio(args) => PortfolioCommand::new(args).execute(&config).await,
            Commands::Trades(args) => TradesCommand::new(args).execute(&config).await,
            Commands::Buy(args) => OrderCommand::buy(args).execute(&config).await,
            Commands::Sell(args) => OrderCommand::sell(args).execute(&config).await,
            Commands::Cancel(args) => CancelCommand::new(args).execute(&config).await,
            Commands::SetPrice(args) => SetPriceCommand::new(args).execute(&config).await,
            Commands::Watch(args) => WatchCommand::new(args).execute(&config).await,
            Commands::Version(args) => VersionCommand::new(args).execute(&config).await,
        }
    }
}
