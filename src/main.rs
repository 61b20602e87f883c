use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use stock_reorder_rs::auth::flows::HOME_PATH;
use stock_reorder_rs::auth::{
    discard_orphaned_session, login_action, login_loader, logout_action, require_user,
    signup_action, CookieSettings, FileSessionStore, FlowOutcome, JsonUserDirectory,
};
use stock_reorder_rs::cli::{CalcArgs, Cli, Command, CredentialArgs};
use stock_reorder_rs::config::ReorderConfig;
use stock_reorder_rs::error::{ReorderError, Result};
use stock_reorder_rs::interface::{
    collect_order_request, display_flow_outcome, display_recommendation, prompt_credentials,
    prompt_yes_no,
};
use stock_reorder_rs::logging::init_logging;
use stock_reorder_rs::planner::OrderRecommendationEngine;

const USERS_FILE: &str = "users.json";
const SESSIONS_FILE: &str = "sessions.json";
const COOKIE_FILE: &str = "cookie";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = ReorderConfig::load(&cli.config)?;

    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    init_logging(level);
    tracing::debug!(path = %cli.config.display(), found = cli.config.exists(), "config");

    let ctx = Context::new(&cli.state_dir, &config);
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Interactive => cmd_interactive(&ctx, &config),
        Command::Calc(args) => cmd_calc(&config, &args),
        Command::Signup(args) => cmd_sign_in(&ctx, &args, true),
        Command::Login(args) => cmd_sign_in(&ctx, &args, false),
        Command::Logout => cmd_logout(&ctx),
        Command::Whoami => cmd_whoami(&ctx),
    }
}

/// File-backed collaborators plus the cookie a browser would hold.
struct Context {
    sessions: FileSessionStore,
    users: JsonUserDirectory,
    cookie_path: PathBuf,
}

impl Context {
    fn new(state_dir: &Path, config: &ReorderConfig) -> Self {
        let cookie = CookieSettings::from(config.session.clone());
        Self {
            sessions: FileSessionStore::new(state_dir.join(SESSIONS_FILE), cookie),
            users: JsonUserDirectory::new(state_dir.join(USERS_FILE)),
            cookie_path: state_dir.join(COOKIE_FILE),
        }
    }

    /// The `Cookie` header value from the last response, if any.
    fn cookie(&self) -> Result<Option<String>> {
        if !self.cookie_path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.cookie_path)?;
        let content = content.trim();
        Ok((!content.is_empty()).then(|| content.to_string()))
    }

    /// Keep the name=value part of a `Set-Cookie` value, as a browser would.
    fn store_cookie(&self, set_cookie: Option<&str>) -> Result<()> {
        let Some(set_cookie) = set_cookie else {
            return Ok(());
        };
        let pair = set_cookie.split(';').next().unwrap_or_default().trim();

        if let Some(parent) = self.cookie_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.cookie_path, pair)?;
        Ok(())
    }

    fn clear_cookie(&self) -> Result<()> {
        if self.cookie_path.exists() {
            fs::remove_file(&self.cookie_path)?;
        }
        Ok(())
    }
}

/// Pick inputs interactively and show recommendations until the user stops.
fn cmd_interactive(ctx: &Context, config: &ReorderConfig) -> Result<()> {
    let cookie = ctx.cookie()?;
    let Some(user) = require_user(&ctx.sessions, &ctx.users, cookie.as_deref())? else {
        return Err(ReorderError::NotSignedIn);
    };

    println!("Signed in as {}", user.name);
    println!();

    let engine = OrderRecommendationEngine::new();

    loop {
        let request = collect_order_request(config)?;
        let breakdown = engine.explain(&request);
        tracing::debug!(?request, ?breakdown, "computed recommendation");

        display_recommendation(&request, &breakdown);

        if !prompt_yes_no("Calculate another order?", false)? {
            break;
        }
    }

    Ok(())
}

/// Compute a single recommendation from command-line flags.
fn cmd_calc(config: &ReorderConfig, args: &CalcArgs) -> Result<()> {
    let request = args.to_request(&config.defaults);
    let breakdown = OrderRecommendationEngine::new().explain(&request);
    tracing::debug!(?request, ?breakdown, "computed recommendation");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
    } else {
        display_recommendation(&request, &breakdown);
    }

    Ok(())
}

/// Sign up or log in, then keep the resulting cookie.
fn cmd_sign_in(ctx: &Context, args: &CredentialArgs, signup: bool) -> Result<()> {
    if discard_orphaned_session(&ctx.sessions, &ctx.users, ctx.cookie()?.as_deref())?.is_some() {
        ctx.clear_cookie()?;
    }
    let cookie = ctx.cookie()?;

    let page = login_loader(&ctx.sessions, cookie.as_deref())?;
    if let FlowOutcome::Redirect { .. } = page {
        if let Some(user) = require_user(&ctx.sessions, &ctx.users, cookie.as_deref())? {
            println!("Already signed in as {}.", user.name);
        }
        return Ok(());
    }
    ctx.store_cookie(page.set_cookie())?;
    let cookie = ctx.cookie()?;

    let credentials = prompt_credentials(args.username.clone(), args.password.clone())?;

    let outcome = if signup {
        signup_action(&ctx.sessions, &ctx.users, cookie.as_deref(), &credentials)?
    } else {
        login_action(&ctx.sessions, &ctx.users, cookie.as_deref(), &credentials)?
    };
    ctx.store_cookie(outcome.set_cookie())?;
    display_flow_outcome(&outcome);

    // A failed attempt lands back on the login page with a flashed error.
    if outcome.location() != Some(HOME_PATH) {
        let cookie = ctx.cookie()?;
        let page = login_loader(&ctx.sessions, cookie.as_deref())?;
        ctx.store_cookie(page.set_cookie())?;
        display_flow_outcome(&page);
    }

    Ok(())
}

fn cmd_logout(ctx: &Context) -> Result<()> {
    let cookie = ctx.cookie()?;
    logout_action(&ctx.sessions, cookie.as_deref())?;
    ctx.clear_cookie()?;
    println!("Signed out.");
    Ok(())
}

fn cmd_whoami(ctx: &Context) -> Result<()> {
    let cookie = ctx.cookie()?;
    match require_user(&ctx.sessions, &ctx.users, cookie.as_deref())? {
        Some(user) => println!("{}", user.name),
        None => println!("Not signed in"),
    }
    Ok(())
}
