// cli/staff.rs — `gymctl staff list/search/show/add/remove` commands.

use anyhow::{bail, Result};

use super::{confirm, fmt_date, fmt_opt, preview, print_pagination, Console};
use crate::api::staff::{CreateStaffRequest, Staff};
use crate::api::Page;
use crate::phone;

fn print_staff_table(page: &Page<Staff>) {
    if page.data.is_empty() {
        println!("No staff found.");
        return;
    }
    println!(
        "{:<24} {:<12} {:<14} {:<18} {:<8} {}",
        "Name", "Phone", "Role", "Designation", "Status", "Joined"
    );
    println!("{}", "-".repeat(88));
    for s in &page.data {
        println!(
            "{:<24} {:<12} {:<14} {:<18} {:<8} {}",
            preview(&s.full_name, 22),
            s.phone_number,
            preview(&s.role, 12),
            preview(&s.designation, 16),
            s.status,
            fmt_date(&s.date_of_joining),
        );
    }
    print_pagination(&page.pagination);
}

/// `gymctl staff list [--page N] [--limit N]`
pub async fn cmd_list(console: &Console, page: Option<u32>, limit: Option<u32>) -> Result<()> {
    console.require_auth()?;
    let result = console.client.list_staff(console.page(page, limit)).await?;
    print_staff_table(&result);
    Ok(())
}

/// `gymctl staff search <query>`
pub async fn cmd_search(
    console: &Console,
    query: String,
    page: Option<u32>,
    limit: Option<u32>,
) -> Result<()> {
    console.require_auth()?;
    let result = console
        .client
        .search_staff(&query, console.page(page, limit))
        .await?;
    print_staff_table(&result);
    Ok(())
}

/// `gymctl staff show <id>`
pub async fn cmd_show(console: &Console, id: String) -> Result<()> {
    console.require_auth()?;
    let s = console.client.get_staff(&id).await?;
    println!("Name:        {}", s.full_name);
    println!("Phone:       {}", s.phone_number);
    println!("Email:       {}", fmt_opt(s.email.as_deref()));
    println!("Role:        {}", s.role);
    println!("Designation: {}", s.designation);
    println!("Joined:      {}", fmt_date(&s.date_of_joining));
    println!("Salary:      {:.2}", s.salary);
    println!("Address:     {}", fmt_opt(s.address.as_deref()));
    println!("Emergency:   {}", fmt_opt(s.emergency_contact.as_deref()));
    println!("Status:      {}", s.status);
    Ok(())
}

/// `gymctl staff add --name ... --phone ... --role ... --designation ... --joined ... --salary ...`
pub async fn cmd_add(console: &Console, mut req: CreateStaffRequest) -> Result<()> {
    console.require_auth()?;
    if let Err(e) = console.config.phone_rules().validate(&req.phone_number) {
        bail!("{e}");
    }
    req.phone_number = phone::normalize(&req.phone_number);

    let s = console.client.create_staff(&req).await?;
    println!(
        "✓ Staff added: {} ({}), {} since {}",
        s.full_name,
        s.phone_number,
        s.designation,
        fmt_date(&s.date_of_joining)
    );
    Ok(())
}

/// `gymctl staff remove <id> [--yes]`
pub async fn cmd_remove(console: &Console, id: String, yes: bool) -> Result<()> {
    console.require_auth()?;
    if !confirm(&format!("Delete staff {id}?"), yes)? {
        println!("Aborted.");
        return Ok(());
    }
    let ack = console.client.delete_staff(&id).await?;
    println!("✓ {} ({})", ack.message, ack.deleted_staff_id);
    Ok(())
}
