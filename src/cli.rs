use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::CalculatorDefaults;
use crate::models::{CurrentStockSnapshot, OrderRequest};

/// Reorder helper: turns stock counts and usage forecasts into order quantities.
#[derive(Parser, Debug)]
#[command(name = "reorder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the TOML config file. Missing is fine.
    #[arg(short, long, default_value = "reorder.toml")]
    pub config: PathBuf,

    /// Directory holding users, sessions and the session cookie.
    #[arg(long, default_value = ".reorder")]
    pub state_dir: PathBuf,

    /// Log level, overridden by RUST_LOG.
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pick the inputs interactively and show the recommendation.
    Interactive,

    /// Compute one recommendation from flags.
    Calc(CalcArgs),

    /// Create an account (or sign in if the name exists).
    Signup(CredentialArgs),

    /// Sign in to an existing account.
    Login(CredentialArgs),

    /// Sign out and forget the session.
    Logout,

    /// Show who is signed in.
    Whoami,
}

impl Default for Command {
    fn default() -> Self {
        Command::Interactive
    }
}

#[derive(Args, Debug, Default)]
pub struct CredentialArgs {
    #[arg(short, long)]
    pub username: Option<String>,

    /// Accepted but never verified.
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Flags for a one-shot calculation. Anything left out comes from the config.
#[derive(Args, Debug, Default)]
pub struct CalcArgs {
    /// Daily usage in pounds.
    #[arg(long, allow_negative_numbers = true)]
    pub daily_usage: Option<f64>,

    /// Days until the next delivery.
    #[arg(long, allow_negative_numbers = true)]
    pub days: Option<f64>,

    /// Safety factor applied to one day of usage.
    #[arg(long, allow_negative_numbers = true)]
    pub backup_multiplier: Option<f64>,

    /// Loose stock in pounds.
    #[arg(long, allow_negative_numbers = true)]
    pub weight: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub trays: Option<f64>,

    /// Weight per tray in pounds.
    #[arg(long, allow_negative_numbers = true)]
    pub tray_weight: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub boxes: Option<f64>,

    /// Weight per box in pounds.
    #[arg(long, allow_negative_numbers = true)]
    pub box_weight: Option<f64>,

    /// Loose pieces, converted by --pieces-per-box.
    #[arg(long, allow_negative_numbers = true)]
    pub pieces: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub pieces_per_box: Option<f64>,

    /// Ignore configured stock defaults; count only what is passed.
    #[arg(long)]
    pub no_default_stock: bool,

    /// Print the breakdown as JSON.
    #[arg(long)]
    pub json: bool,
}

impl CalcArgs {
    /// Build a request, filling unset flags from the defaults.
    pub fn to_request(&self, defaults: &CalculatorDefaults) -> OrderRequest {
        let stock_default = |v: f64| {
            if self.no_default_stock { None } else { Some(v) }
        };

        OrderRequest::new(
            self.daily_usage.unwrap_or(defaults.daily_usage),
            self.days.unwrap_or(defaults.days_until_next_delivery),
            self.backup_multiplier.unwrap_or(defaults.backup_multiplier),
            CurrentStockSnapshot {
                weight_in_pounds: self.weight.or(stock_default(defaults.weight_in_pounds)),
                trays: self.trays.or(stock_default(defaults.trays)),
                tray_weight: self.tray_weight.or(stock_default(defaults.tray_weight)),
                boxes: self.boxes,
                box_weight: self.box_weight,
                pieces: self.pieces,
                pieces_per_box: self.pieces_per_box,
            },
        )
    }
}
