// cli/expenses.rs — `gymctl expenses list/search/stats/add/update/remove` commands.

use anyhow::Result;

use super::{confirm, fmt_date, fmt_opt, preview, print_pagination, Console};
use crate::api::expenses::{CreateExpenseRequest, Expense, UpdateExpenseRequest};
use crate::api::Page;

fn print_expense_table(page: &Page<Expense>) {
    if page.data.is_empty() {
        println!("No expenses found.");
        return;
    }
    println!(
        "{:<26} {:<22} {:<14} {:>10} {:<8} {}",
        "Id", "Title", "Category", "Amount", "Method", "Date"
    );
    println!("{}", "-".repeat(94));
    for e in &page.data {
        println!(
            "{:<26} {:<22} {:<14} {:>10.2} {:<8} {}",
            e.id,
            preview(&e.title, 20),
            preview(&e.category, 12),
            e.amount,
            e.payment_method,
            fmt_date(&e.expense_date),
        );
    }
    print_pagination(&page.pagination);
}

/// `gymctl expenses list [--category ...] [--from YYYY-MM-DD] [--to YYYY-MM-DD]`
pub async fn cmd_list(
    console: &Console,
    page: Option<u32>,
    limit: Option<u32>,
    category: Option<String>,
    from: Option<String>,
    to: Option<String>,
) -> Result<()> {
    console.require_auth()?;
    let result = console
        .client
        .list_expenses(
            console.page(page, limit),
            category.as_deref(),
            from.as_deref(),
            to.as_deref(),
        )
        .await?;
    print_expense_table(&result);
    Ok(())
}

/// `gymctl expenses search <query>`
pub async fn cmd_search(
    console: &Console,
    query: String,
    page: Option<u32>,
    limit: Option<u32>,
) -> Result<()> {
    console.require_auth()?;
    let result = console
        .client
        .search_expenses(&query, console.page(page, limit))
        .await?;
    print_expense_table(&result);
    Ok(())
}

/// `gymctl expenses stats [--from YYYY-MM-DD] [--to YYYY-MM-DD]`
pub async fn cmd_stats(console: &Console, from: Option<String>, to: Option<String>) -> Result<()> {
    console.require_auth()?;
    let stats = console
        .client
        .expense_stats(from.as_deref(), to.as_deref())
        .await?;
    println!("Total expense: {:.2}", stats.total_expense);
    // Whatever breakdowns this backend version reports come through as-is.
    for (key, value) in &stats.extra {
        println!("{key}: {value}");
    }
    Ok(())
}

/// `gymctl expenses add --title ... --amount ... --category ... --date ... --method ...`
pub async fn cmd_add(console: &Console, req: CreateExpenseRequest) -> Result<()> {
    console.require_auth()?;
    let e = console.client.create_expense(&req).await?;
    println!(
        "✓ Expense recorded: {} {:.2} ({}) on {}",
        e.title,
        e.amount,
        e.category,
        fmt_date(&e.expense_date)
    );
    Ok(())
}

/// `gymctl expenses update <id> [--title ...] [--amount ...] ...`
pub async fn cmd_update(console: &Console, id: String, req: UpdateExpenseRequest) -> Result<()> {
    console.require_auth()?;
    let e = console.client.update_expense(&id, &req).await?;
    println!(
        "✓ Expense updated: {} {:.2} ({}), vendor {}",
        e.title,
        e.amount,
        e.category,
        fmt_opt(e.vendor_name.as_deref())
    );
    Ok(())
}

/// `gymctl expenses remove <id> [--yes]`
pub async fn cmd_remove(console: &Console, id: String, yes: bool) -> Result<()> {
    console.require_auth()?;
    if !confirm(&format!("Delete expense {id}?"), yes)? {
        println!("Aborted.");
        return Ok(());
    }
    let ack = console.client.delete_expense(&id).await?;
    println!("✓ {} ({})", ack.message, ack.deleted_expense_id);
    Ok(())
}
