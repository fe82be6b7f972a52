// cli/members.rs — `gymctl members list/search/show/add/update/remove` commands.

use anyhow::{bail, Result};

use super::{confirm, fmt_date, fmt_opt, preview, print_pagination, Console};
use crate::api::members::{CreateMemberRequest, Member, UpdateMemberRequest};
use crate::api::Page;
use crate::phone;

fn print_member_table(page: &Page<Member>) {
    if page.data.is_empty() {
        println!("No members found.");
        return;
    }
    println!(
        "{:<10} {:<24} {:<12} {:<14} {:<9} {:>9}  {}",
        "Code", "Name", "Phone", "Plan", "Status", "Days left", "Ends"
    );
    println!("{}", "-".repeat(92));
    for m in &page.data {
        println!(
            "{:<10} {:<24} {:<12} {:<14} {:<9} {:>9}  {}",
            m.member_code,
            preview(&m.profile.full_name, 22),
            m.user.phone_number,
            preview(&m.plan.plan_name, 12),
            m.status,
            m.days_left,
            fmt_date(&m.end_date),
        );
    }
    print_pagination(&page.pagination);
}

/// `gymctl members list [--page N] [--limit N]`
pub async fn cmd_list(console: &Console, page: Option<u32>, limit: Option<u32>) -> Result<()> {
    console.require_auth()?;
    let result = console.client.list_members(console.page(page, limit)).await?;
    print_member_table(&result);
    Ok(())
}

/// `gymctl members search <query>` — matches name, phone, or member code.
pub async fn cmd_search(
    console: &Console,
    query: String,
    page: Option<u32>,
    limit: Option<u32>,
) -> Result<()> {
    console.require_auth()?;
    let result = console
        .client
        .search_members(&query, console.page(page, limit))
        .await?;
    print_member_table(&result);
    Ok(())
}

/// `gymctl members show <id>`
pub async fn cmd_show(console: &Console, id: String) -> Result<()> {
    console.require_auth()?;
    let m = console.client.get_member(&id).await?;
    println!("Code:      {}", m.member_code);
    println!("Name:      {}", m.profile.full_name);
    println!("Phone:     {}", m.user.phone_number);
    println!("Email:     {}", fmt_opt(m.profile.email.as_deref()));
    println!("Gender:    {}", fmt_opt(m.profile.gender.as_deref()));
    println!(
        "Plan:      {} ({} days)",
        m.plan.plan_name, m.plan.duration_days
    );
    println!("Period:    {} to {}", fmt_date(&m.start_date), fmt_date(&m.end_date));
    println!("Days left: {}", m.days_left);
    println!("Status:    {}", m.status);
    println!(
        "Price:     {:.2} ({:.2} off {:.2})",
        m.final_price, m.discount_amount, m.base_price
    );
    println!(
        "Payment:   {} via {} ({}, pending {:.2})",
        m.payment.amount_paid, m.payment.payment_mode, m.payment.payment_status, m.payment.pending_amount
    );
    if let Some(by) = &m.created_by {
        println!("Added by:  {}", by.phone_number);
    }
    Ok(())
}

/// `gymctl members add --name ... --phone ... --days ... --mode ...`
///
/// The backend creates user + profile + membership + opening payment in one
/// request, so everything is collected up front.
pub async fn cmd_add(console: &Console, mut req: CreateMemberRequest) -> Result<()> {
    console.require_auth()?;
    if let Err(e) = console.config.phone_rules().validate(&req.mobile_number) {
        bail!("{e}");
    }
    req.mobile_number = phone::normalize(&req.mobile_number);

    let m = console.client.create_member(&req).await?;
    println!(
        "✓ Member {} created: {} ({}), {} days, ends {}",
        m.member_code,
        m.profile.full_name,
        m.user.phone_number,
        m.duration_days,
        fmt_date(&m.end_date),
    );
    if m.is_existing_user == Some(true) {
        println!("  Existing user account was reused.");
    }
    Ok(())
}

/// `gymctl members update <id> [--name ...] [--days ...] [--discount ...] [--status ...]`
pub async fn cmd_update(console: &Console, id: String, req: UpdateMemberRequest) -> Result<()> {
    console.require_auth()?;
    let m = console.client.update_member(&id, &req).await?;
    println!(
        "✓ Member {} updated: {}, status {}, {} days left",
        m.member_code, m.profile.full_name, m.status, m.days_left
    );
    Ok(())
}

/// `gymctl members remove <id> [--yes]`
pub async fn cmd_remove(console: &Console, id: String, yes: bool) -> Result<()> {
    console.require_auth()?;
    if !confirm(&format!("Delete member {id}?"), yes)? {
        println!("Aborted.");
        return Ok(());
    }
    let ack = console.client.delete_member(&id).await?;
    println!("✓ {} ({})", ack.message, ack.deleted_member_id);
    Ok(())
}
