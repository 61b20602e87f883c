use dialoguer::{Confirm, Input, Password, Select};

use crate::auth::Credentials;
use crate::config::ReorderConfig;
use crate::error::{ReorderError, Result};
use crate::models::{CurrentStockSnapshot, OrderRequest};

const CUSTOM_VALUE: &str = "Custom value...";

/// Parse a number typed by the user.
pub fn parse_number(input: &str) -> Result<f64> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| ReorderError::InvalidInput(format!("'{}' is not a number", input.trim())))?;

    if !value.is_finite() {
        return Err(ReorderError::InvalidInput(format!(
            "'{}' is not a finite number",
            input.trim()
        )));
    }
    Ok(value)
}

/// Prompt for a free-form number.
pub fn prompt_number(prompt: &str, default: f64) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    parse_number(&input)
}

/// Let the user pick one of the presets or type their own value.
pub fn prompt_with_presets(prompt: &str, presets: &[f64], default: f64) -> Result<f64> {
    let mut options: Vec<String> = presets.iter().map(|v| v.to_string()).collect();
    options.push(CUSTOM_VALUE.to_string());

    let default_idx = presets
        .iter()
        .position(|v| *v == default)
        .unwrap_or(presets.len());

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&options)
        .default(default_idx)
        .interact()?;

    match presets.get(selection) {
        Some(value) => Ok(*value),
        None => prompt_number(prompt, default),
    }
}

/// Prompt for an optional stock count; an empty answer leaves it unset.
fn prompt_optional(prompt: &str) -> Result<Option<f64>> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;

    if input.trim().is_empty() {
        return Ok(None);
    }
    parse_number(&input).map(Some)
}

/// Collect everything needed for one order recommendation.
pub fn collect_order_request(config: &ReorderConfig) -> Result<OrderRequest> {
    let defaults = &config.defaults;
    let presets = &config.presets;

    let daily_usage =
        prompt_with_presets("Daily Usage (lbs)", &presets.daily_usage, defaults.daily_usage)?;
    let days = prompt_with_presets(
        "Days Until Delivery",
        &presets.days_until_next_delivery,
        defaults.days_until_next_delivery,
    )?;
    let backup_multiplier = prompt_with_presets(
        "Backup Multiplier",
        &presets.backup_multiplier,
        defaults.backup_multiplier,
    )?;
    let weight = prompt_with_presets(
        "Stock in Pounds",
        &presets.weight_in_pounds,
        defaults.weight_in_pounds,
    )?;
    let trays = prompt_with_presets("Trays in Stock", &presets.trays, defaults.trays)?;
    let tray_weight = prompt_with_presets(
        "Weight per Tray (lbs)",
        &presets.tray_weight,
        defaults.tray_weight,
    )?;

    let mut stock = CurrentStockSnapshot {
        weight_in_pounds: Some(weight),
        trays: Some(trays),
        tray_weight: Some(tray_weight),
        ..Default::default()
    };

    if prompt_yes_no("Also count boxes or loose pieces?", false)? {
        stock.boxes = prompt_optional("Boxes in Stock (blank to skip)")?;
        if stock.boxes.is_some() {
            stock.box_weight = prompt_optional("Weight per Box (lbs)")?;
        }
        stock.pieces = prompt_optional("Loose Pieces (blank to skip)")?;
        if stock.pieces.is_some() {
            stock.pieces_per_box = prompt_optional("Pieces per Box (blank for 1)")?;
        }
    }

    Ok(OrderRequest::new(daily_usage, days, backup_multiplier, stock))
}

/// Ask for a username and password, skipping whichever was already given.
pub fn prompt_credentials(username: Option<String>, password: Option<String>) -> Result<Credentials> {
    let username = match username {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Username")
            .allow_empty(true)
            .interact_text()?,
    };

    let password = match password {
        Some(p) => p,
        None => Password::new()
            .with_prompt("Password")
            .allow_empty_password(true)
            .interact()?,
    };

    Ok(Credentials {
        username: Some(username),
        password: Some(password),
    })
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
