// cli/plans.rs — `gymctl plans list/add/update/remove` commands.

use anyhow::Result;

use super::{confirm, preview, Console};
use crate::api::plans::{price_per_day, PlanRequest, UpdatePlanRequest};

/// `gymctl plans list`
pub async fn cmd_list(console: &Console) -> Result<()> {
    console.require_auth()?;
    let plans = console.client.list_plans().await?;
    if plans.is_empty() {
        println!("No plans found.");
        return Ok(());
    }
    println!(
        "{:<26} {:<18} {:>6} {:>10} {:>9}",
        "Id", "Plan", "Days", "Price", "Per day"
    );
    println!("{}", "-".repeat(74));
    for p in &plans {
        println!(
            "{:<26} {:<18} {:>6} {:>10.2} {:>9.2}",
            p.id,
            preview(&p.plan_name, 16),
            p.duration_days,
            p.base_price,
            p.price_per_day,
        );
    }
    println!("\n{} plans", plans.len());
    Ok(())
}

/// `gymctl plans add --name ... --days ... --price ...`
///
/// The per-day rate is derived from price and duration before sending.
pub async fn cmd_add(
    console: &Console,
    name: String,
    duration_days: u32,
    base_price: f64,
) -> Result<()> {
    console.require_auth()?;
    let req = PlanRequest::new(name, duration_days, base_price);
    let p = console.client.create_plan(&req).await?;
    println!(
        "✓ Plan created: {} ({} days at {:.2}, {:.2}/day)",
        p.plan_name, p.duration_days, p.base_price, p.price_per_day
    );
    Ok(())
}

/// `gymctl plans update <id> [--name ...] [--days ...] [--price ...]`
///
/// Changing days or price refetches the plan so the per-day rate stays
/// consistent with whichever of the two was left alone.
pub async fn cmd_update(
    console: &Console,
    id: String,
    name: Option<String>,
    days: Option<u32>,
    price: Option<f64>,
) -> Result<()> {
    console.require_auth()?;
    let req = if days.is_some() || price.is_some() {
        let current = console.client.get_plan(&id).await?;
        let duration = days.unwrap_or(current.duration_days);
        let base = price.unwrap_or(current.base_price);
        UpdatePlanRequest {
            plan_name: name,
            duration_days: Some(duration),
            base_price: Some(base),
            price_per_day: Some(price_per_day(base, duration)),
        }
    } else {
        UpdatePlanRequest {
            plan_name: name,
            ..Default::default()
        }
    };
    let p = console.client.update_plan(&id, &req).await?;
    println!(
        "✓ Plan updated: {} ({} days at {:.2}, {:.2}/day)",
        p.plan_name, p.duration_days, p.base_price, p.price_per_day
    );
    Ok(())
}

/// `gymctl plans remove <id> [--yes]`
pub async fn cmd_remove(console: &Console, id: String, yes: bool) -> Result<()> {
    console.require_auth()?;
    if !confirm(&format!("Delete plan {id}?"), yes)? {
        println!("Aborted.");
        return Ok(());
    }
    console.client.delete_plan(&id).await?;
    println!("✓ Plan {id} deleted.");
    Ok(())
}
