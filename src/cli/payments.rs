// cli/payments.rs — `gymctl payments list/show/stats` commands.

use anyhow::Result;

use super::{fmt_datetime, fmt_opt, preview, print_pagination, Console};

/// `gymctl payments list [--status paid|pending] [--mode cash|card|upi]`
pub async fn cmd_list(
    console: &Console,
    page: Option<u32>,
    limit: Option<u32>,
    status: Option<String>,
    mode: Option<String>,
) -> Result<()> {
    console.require_auth()?;
    let result = console
        .client
        .list_payments(
            console.page(page, limit),
            status.as_deref(),
            mode.as_deref(),
        )
        .await?;

    if result.data.is_empty() {
        println!("No payments found.");
        return Ok(());
    }
    println!(
        "{:<26} {:<20} {:>10} {:<8} {:<9} {}",
        "Id", "User", "Amount", "Mode", "Status", "Date"
    );
    println!("{}", "-".repeat(88));
    for p in &result.data {
        println!(
            "{:<26} {:<20} {:>10.2} {:<8} {:<9} {}",
            p.id,
            preview(fmt_opt(p.user_name.as_deref()), 18),
            p.amount,
            p.payment_mode,
            p.status,
            fmt_datetime(&p.payment_date),
        );
    }
    print_pagination(&result.pagination);
    Ok(())
}

/// `gymctl payments show <id>`
pub async fn cmd_show(console: &Console, id: String) -> Result<()> {
    console.require_auth()?;
    let p = console.client.get_payment(&id).await?;
    println!("Id:          {}", p.id);
    println!("User:        {} ({})", fmt_opt(p.user_name.as_deref()), p.user_id);
    println!("Amount:      {:.2}", p.amount);
    println!("Mode:        {}", p.payment_mode);
    println!("Status:      {}", p.status);
    println!("Transaction: {}", fmt_opt(p.transaction_id.as_deref()));
    println!("Description: {}", fmt_opt(p.description.as_deref()));
    println!("Date:        {}", fmt_datetime(&p.payment_date));
    Ok(())
}

/// `gymctl payments stats`
pub async fn cmd_stats(console: &Console) -> Result<()> {
    console.require_auth()?;
    let stats = console.client.payment_stats().await?;
    println!("Payments:       {}", stats.total_payments);
    println!("Total amount:   {:.2}", stats.total_amount);
    println!("Pending amount: {:.2}", stats.pending_amount);

    if !stats.payments_by_status.is_empty() {
        println!("\nBy status:");
        let mut rows: Vec<_> = stats.payments_by_status.iter().collect();
        rows.sort_by(|a, b| a.0.cmp(b.0));
        for (status, amount) in rows {
            println!("  {:<12} {:>12.2}", status, amount);
        }
    }
    if !stats.payments_by_mode.is_empty() {
        println!("\nBy mode:");
        let mut rows: Vec<_> = stats.payments_by_mode.iter().collect();
        rows.sort_by(|a, b| a.0.cmp(b.0));
        for (mode, amount) in rows {
            println!("  {:<12} {:>12.2}", mode, amount);
        }
    }
    Ok(())
}
