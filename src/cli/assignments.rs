// cli/assignments.rs — `gymctl assignments list/assign/complete/cancel/stats` commands.

use anyhow::Result;

use super::{fmt_date, preview, print_pagination, Console};
use crate::api::assignments::{
    AssignmentStatus, CreateAssignmentRequest, UpdateAssignmentRequest,
};

/// `gymctl assignments list [--status Active|Completed|Cancelled] [--trainer ID] [--member ID]`
pub async fn cmd_list(
    console: &Console,
    page: Option<u32>,
    limit: Option<u32>,
    status: Option<AssignmentStatus>,
    trainer: Option<String>,
    member: Option<String>,
) -> Result<()> {
    console.require_auth()?;
    let result = console
        .client
        .list_assignments(
            console.page(page, limit),
            status,
            trainer.as_deref(),
            member.as_deref(),
        )
        .await?;

    if result.data.is_empty() {
        println!("No assignments found.");
        return Ok(());
    }
    println!(
        "{:<26} {:<10} {:<20} {:<20} {:<10} {}",
        "Id", "Code", "Member", "Trainer", "Status", "Assigned"
    );
    println!("{}", "-".repeat(100));
    for a in &result.data {
        println!(
            "{:<26} {:<10} {:<20} {:<20} {:<10} {}",
            a.id,
            a.member_code,
            preview(&a.member_name, 18),
            preview(&a.trainer_name, 18),
            a.status.as_str(),
            fmt_date(&a.assigned_date),
        );
    }
    print_pagination(&result.pagination);
    Ok(())
}

/// `gymctl assignments assign --member <memberId> --trainer <userId> [--notes ...]`
pub async fn cmd_assign(
    console: &Console,
    member_id: String,
    trainer_id: String,
    notes: Option<String>,
) -> Result<()> {
    console.require_auth()?;
    let req = CreateAssignmentRequest {
        member_id,
        trainer_id,
        notes,
    };
    let ack = console.client.create_assignment(&req).await?;
    println!(
        "✓ Assignment {} created ({}, {})",
        ack.id,
        ack.status.as_str(),
        fmt_date(&ack.assigned_date)
    );
    Ok(())
}

async fn set_status(console: &Console, id: &str, status: AssignmentStatus) -> Result<()> {
    console.require_auth()?;
    let req = UpdateAssignmentRequest {
        status: Some(status),
        notes: None,
    };
    let ack = console.client.update_assignment(id, &req).await?;
    println!("✓ Assignment {} is now {}", ack.id, ack.status.as_str());
    Ok(())
}

/// `gymctl assignments complete <id>`
pub async fn cmd_complete(console: &Console, id: String) -> Result<()> {
    set_status(console, &id, AssignmentStatus::Completed).await
}

/// `gymctl assignments cancel <id>`
pub async fn cmd_cancel(console: &Console, id: String) -> Result<()> {
    set_status(console, &id, AssignmentStatus::Cancelled).await
}

/// `gymctl assignments stats`
pub async fn cmd_stats(console: &Console) -> Result<()> {
    console.require_auth()?;
    let stats = console.client.assignment_stats().await?;
    println!("Total:     {}", stats.total_assignments);
    println!("Active:    {}", stats.active_assignments);
    println!("Completed: {}", stats.completed_assignments);
    println!("Cancelled: {}", stats.cancelled_assignments);

    if let Some(loads) = &stats.assignments_by_trainer {
        if !loads.is_empty() {
            println!("\nBy trainer:");
            for load in loads {
                println!(
                    "  {:<24} {:>4}  ({})",
                    preview(&load.trainer_name, 22),
                    load.count,
                    load.trainer_id
                );
            }
        }
    }
    Ok(())
}

/// `gymctl assignments trainers` — pick list of users holding the trainer role.
pub async fn cmd_trainers(console: &Console) -> Result<()> {
    console.require_auth()?;
    let directory = console.client.trainer_directory().await?;
    if directory.data.is_empty() {
        println!("No trainers found.");
        return Ok(());
    }
    println!("{:<26} {:<12} {}", "Id", "Phone", "Name");
    println!("{}", "-".repeat(64));
    for user in &directory.data {
        let name = user.profile.as_ref().map_or("-", |p| p.full_name.as_str());
        println!("{:<26} {:<12} {}", user.id, user.phone_number, name);
    }
    Ok(())
}
