// cli/exercises.rs — `gymctl exercises list/show/add/remove/body-parts/muscles` commands.

use anyhow::Result;

use super::{confirm, fmt_opt, preview, print_pagination, Console};
use crate::api::exercises::{CreateExerciseRequest, Level};

/// `gymctl exercises list [--search ...] [--level beginner|intermediate|expert] [--category ...]`
pub async fn cmd_list(
    console: &Console,
    page: Option<u32>,
    limit: Option<u32>,
    search: Option<String>,
    level: Option<Level>,
    category: Option<String>,
) -> Result<()> {
    console.require_auth()?;
    let result = console
        .client
        .list_exercises(
            console.page(page, limit),
            search.as_deref(),
            level,
            category.as_deref(),
        )
        .await?;

    if result.data.is_empty() {
        println!("No exercises found.");
        return Ok(());
    }
    println!(
        "{:<28} {:<30} {:<13} {:<12} {}",
        "Id", "Name", "Level", "Category", "Primary muscles"
    );
    println!("{}", "-".repeat(104));
    for e in &result.data {
        println!(
            "{:<28} {:<30} {:<13} {:<12} {}",
            preview(&e.id, 26),
            preview(&e.name, 28),
            e.level.as_str(),
            preview(fmt_opt(e.category.as_deref()), 10),
            preview(&e.primary_muscles.join(", "), 30),
        );
    }
    print_pagination(&result.pagination);
    Ok(())
}

/// `gymctl exercises show <id>`
pub async fn cmd_show(console: &Console, id: String) -> Result<()> {
    console.require_auth()?;
    let e = console.client.get_exercise(&id).await?;
    println!("Id:        {}", e.id);
    println!("Name:      {}", e.name);
    println!("Level:     {}", e.level.as_str());
    println!("Category:  {}", fmt_opt(e.category.as_deref()));
    println!("Equipment: {}", fmt_opt(e.equipment.as_deref()));
    println!("Force:     {}", fmt_opt(e.force.as_deref()));
    println!("Mechanic:  {}", fmt_opt(e.mechanic.as_deref()));
    println!("Primary:   {}", e.primary_muscles.join(", "));
    if let Some(secondary) = &e.secondary_muscles {
        if !secondary.is_empty() {
            println!("Secondary: {}", secondary.join(", "));
        }
    }
    if let Some(steps) = &e.instructions {
        println!("Instructions:");
        for (i, step) in steps.iter().enumerate() {
            println!("  {}. {}", i + 1, step);
        }
    }
    Ok(())
}

/// `gymctl exercises add --id ... --name ... --level ... --muscle ...`
pub async fn cmd_add(console: &Console, req: CreateExerciseRequest) -> Result<()> {
    console.require_auth()?;
    let e = console.client.create_exercise(&req).await?;
    println!(
        "✓ Exercise created: {} ({}, {})",
        e.name,
        e.id,
        e.level.as_str()
    );
    Ok(())
}

/// `gymctl exercises remove <id> [--yes]`
pub async fn cmd_remove(console: &Console, id: String, yes: bool) -> Result<()> {
    console.require_auth()?;
    if !confirm(&format!("Delete exercise {id}?"), yes)? {
        println!("Aborted.");
        return Ok(());
    }
    let ack = console.client.delete_exercise(&id).await?;
    if ack.message.is_empty() {
        println!("✓ Exercise {id} deleted.");
    } else {
        println!("✓ {}", ack.message);
    }
    Ok(())
}

/// `gymctl exercises body-parts`
pub async fn cmd_body_parts(console: &Console) -> Result<()> {
    console.require_auth()?;
    let parts = console.client.body_parts().await?;
    if parts.is_empty() {
        println!("No body parts found.");
        return Ok(());
    }
    println!("{:<6} {}", "Id", "Name");
    println!("{}", "-".repeat(30));
    for part in &parts {
        println!("{:<6} {}", part.id, part.name);
    }
    Ok(())
}

/// `gymctl exercises muscles <body-part-id>`
pub async fn cmd_muscles(console: &Console, body_part_id: i64) -> Result<()> {
    console.require_auth()?;
    let result = console.client.muscles_by_body_part(body_part_id).await?;
    if result.muscles.is_empty() {
        println!("No muscles found for body part {body_part_id}.");
        return Ok(());
    }
    for muscle in &result.muscles {
        println!("{}", muscle.name);
    }
    println!("\n{} muscles", result.total_muscles);
    Ok(())
}
