use crate::auth::flows::HOME_PATH;
use crate::auth::FlowOutcome;
use crate::models::{OrderBreakdown, OrderRequest};

/// Render a recommendation and the arithmetic behind it.
pub fn format_recommendation(request: &OrderRequest, breakdown: &OrderBreakdown) -> String {
    let mut lines = Vec::new();

    lines.push("=== Order Calculator ===".to_string());
    lines.push(String::new());
    lines.push(format!("Daily usage:        {} lbs", request.daily_usage));
    lines.push(format!("Days until delivery: {}", request.days_until_next_delivery));
    lines.push(format!("Backup multiplier:  {}", request.backup_multiplier));
    lines.push(String::new());

    let components = request.current_stock.components();
    if components.is_empty() {
        lines.push("Current stock: (none)".to_string());
    } else {
        lines.push("Current stock:".to_string());
        for component in &components {
            lines.push(format!("  {:<14} {:>10.2} lbs", component.label(), component.pounds()));
        }
    }

    lines.push(format!("  {:<14} {:>10.2} lbs", "Total", breakdown.total_stock));
    lines.push(String::new());
    lines.push(format!("Forecast demand: {:.2} lbs", breakdown.forecast_demand));
    lines.push(format!("Backup stock:    {:.2} lbs", breakdown.backup_stock));
    lines.push(String::new());
    lines.push(format!(
        "Exact Calculation: {:.2} lbs",
        breakdown.recommendation.exact_order
    ));
    lines.push(format!(
        "Rounded Off to: {} lbs",
        breakdown.recommendation.rounded_order
    ));

    lines.join("\n")
}

/// Display a recommendation on stdout.
pub fn display_recommendation(request: &OrderRequest, breakdown: &OrderBreakdown) {
    println!();
    println!("{}", format_recommendation(request, breakdown));
    println!();
}

/// Report what an auth flow decided.
pub fn display_flow_outcome(outcome: &FlowOutcome) {
    match outcome {
        FlowOutcome::Redirect { location, .. } if location == HOME_PATH => {
            println!("Signed in.")
        }
        FlowOutcome::Redirect { .. } => println!("Not signed in."),
        FlowOutcome::Render { error: Some(error), .. } => println!("{}", error),
        FlowOutcome::Render { error: None, .. } => {}
    }
}
