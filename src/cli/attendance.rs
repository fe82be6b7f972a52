// cli/attendance.rs — `gymctl attendance list/search/checkout/remove` commands.

use anyhow::Result;
use chrono::Utc;

use super::{confirm, fmt_datetime, preview, print_pagination, Console};
use crate::api::attendance::{Attendance, UpdateAttendanceRequest};
use crate::api::Page;

fn print_attendance_table(page: &Page<Attendance>) {
    if page.data.is_empty() {
        println!("No attendance records found.");
        return;
    }
    println!(
        "{:<26} {:<10} {:<22} {:<17} {:<17} {}",
        "Id", "Code", "Name", "Check-in", "Check-out", "Type"
    );
    println!("{}", "-".repeat(102));
    for a in &page.data {
        let check_out = a
            .check_out_time
            .as_ref()
            .map_or_else(|| "-".to_string(), fmt_datetime);
        println!(
            "{:<26} {:<10} {:<22} {:<17} {:<17} {}",
            a.id,
            a.member.member_code,
            preview(&a.profile.full_name, 20),
            fmt_datetime(&a.check_in_time),
            check_out,
            a.kind,
        );
    }
    print_pagination(&page.pagination);
}

/// `gymctl attendance list [--from YYYY-MM-DD] [--to YYYY-MM-DD]`
pub async fn cmd_list(
    console: &Console,
    page: Option<u32>,
    limit: Option<u32>,
    from: Option<String>,
    to: Option<String>,
) -> Result<()> {
    console.require_auth()?;
    let result = console
        .client
        .list_attendance(console.page(page, limit), from.as_deref(), to.as_deref())
        .await?;
    print_attendance_table(&result);
    Ok(())
}

/// `gymctl attendance search <query>` — matches member name, phone, or code.
pub async fn cmd_search(
    console: &Console,
    query: String,
    page: Option<u32>,
    limit: Option<u32>,
) -> Result<()> {
    console.require_auth()?;
    let result = console
        .client
        .search_attendance(&query, console.page(page, limit))
        .await?;
    print_attendance_table(&result);
    Ok(())
}

/// `gymctl attendance checkout <id> [--notes ...]`
///
/// Stamps the check-out time with now; a record that already has one is
/// left alone and reported.
pub async fn cmd_checkout(console: &Console, id: String, notes: Option<String>) -> Result<()> {
    console.require_auth()?;
    let current = console.client.get_attendance(&id).await?;
    if let Some(out) = &current.check_out_time {
        println!(
            "{} already checked out at {}.",
            current.member.member_code,
            fmt_datetime(out)
        );
        return Ok(());
    }

    let req = UpdateAttendanceRequest {
        check_out_time: Some(Utc::now()),
        notes,
    };
    let a = console.client.update_attendance(&id, &req).await?;
    let out = a
        .check_out_time
        .as_ref()
        .map_or_else(|| "-".to_string(), fmt_datetime);
    println!(
        "✓ {} ({}) checked out at {}",
        a.profile.full_name, a.member.member_code, out
    );
    Ok(())
}

/// `gymctl attendance remove <id> [--yes]`
pub async fn cmd_remove(console: &Console, id: String, yes: bool) -> Result<()> {
    console.require_auth()?;
    if !confirm(&format!("Delete attendance record {id}?"), yes)? {
        println!("Aborted.");
        return Ok(());
    }
    let ack = console.client.delete_attendance(&id).await?;
    println!("✓ {} ({})", ack.message, ack.deleted_attendance_id);
    Ok(())
}
