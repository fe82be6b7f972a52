// cli/roles.rs — `gymctl roles list/create/delete` commands.

use anyhow::Result;

use super::{confirm, fmt_opt, preview, Console};
use crate::api::roles::RoleRequest;
use crate::permissions::format_display_name;

/// `gymctl roles list`
pub async fn cmd_list(console: &Console) -> Result<()> {
    console.require_auth()?;
    let roles = console.client.list_roles().await?;
    if roles.is_empty() {
        println!("No roles found.");
        return Ok(());
    }
    println!("{:<26} {:<20} {}", "Id", "Role", "Description");
    println!("{}", "-".repeat(80));
    for role in &roles {
        println!(
            "{:<26} {:<20} {}",
            role.id,
            preview(&format_display_name(&role.name), 18),
            preview(fmt_opt(role.description.as_deref()), 40),
        );
    }
    println!("\n{} roles", roles.len());
    Ok(())
}

/// `gymctl roles create --name ... [--description ...]`
pub async fn cmd_create(
    console: &Console,
    name: String,
    description: Option<String>,
) -> Result<()> {
    console.require_auth()?;
    let req = RoleRequest { name, description };
    let role = console.client.create_role(&req).await?;
    println!(
        "✓ Role created: {} ({})",
        format_display_name(&role.name),
        role.id
    );
    Ok(())
}

/// `gymctl roles delete <id> [--yes]`
pub async fn cmd_delete(console: &Console, id: String, yes: bool) -> Result<()> {
    console.require_auth()?;
    if !confirm(&format!("Delete role {id}?"), yes)? {
        println!("Aborted.");
        return Ok(());
    }
    console.client.delete_role(&id).await?;
    println!("✓ Role {id} deleted.");
    Ok(())
}
