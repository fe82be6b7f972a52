// cli/users.rs — `gymctl users list/show/add/update/remove` commands.

use anyhow::{bail, Result};

use super::{confirm, fmt_datetime, fmt_opt, preview, print_pagination, Console};
use crate::api::users::{CreateUserRequest, UpdateUserRequest, User};
use crate::permissions::format_display_name;
use crate::phone;

fn role_name(user: &User) -> String {
    user.role
        .as_ref()
        .map_or_else(|| "-".to_string(), |r| format_display_name(&r.name))
}

/// `gymctl users list [--search ...]`
pub async fn cmd_list(
    console: &Console,
    page: Option<u32>,
    limit: Option<u32>,
    search: Option<String>,
) -> Result<()> {
    console.require_auth()?;
    let result = console
        .client
        .list_users(console.page(page, limit), search.as_deref())
        .await?;

    if result.data.is_empty() {
        println!("No users found.");
        return Ok(());
    }
    println!(
        "{:<26} {:<12} {:<20} {:<14} {:<8} {}",
        "Id", "Phone", "Name", "Role", "Active", "Last login"
    );
    println!("{}", "-".repeat(100));
    for u in &result.data {
        let name = u.profile.as_ref().map_or("-", |p| p.full_name.as_str());
        let last_login = u
            .last_login_at
            .as_ref()
            .map_or_else(|| "-".to_string(), fmt_datetime);
        println!(
            "{:<26} {:<12} {:<20} {:<14} {:<8} {}",
            u.id,
            u.phone_number,
            preview(name, 18),
            preview(&role_name(u), 12),
            if u.is_active { "yes" } else { "no" },
            last_login,
        );
    }
    print_pagination(&result.pagination);
    Ok(())
}

/// `gymctl users show <id>`
pub async fn cmd_show(console: &Console, id: String) -> Result<()> {
    console.require_auth()?;
    let u = console.client.get_user(&id).await?;
    println!("Id:     {}", u.id);
    println!("Phone:  {}", u.phone_number);
    println!("Role:   {}", role_name(&u));
    println!("Active: {}", if u.is_active { "yes" } else { "no" });
    if let Some(profile) = &u.profile {
        println!("Name:   {}", profile.full_name);
        println!("Email:  {}", fmt_opt(profile.email.as_deref()));
    }
    let last_login = u
        .last_login_at
        .as_ref()
        .map_or_else(|| "-".to_string(), fmt_datetime);
    println!("Login:  {}", last_login);
    Ok(())
}

/// `gymctl users add --phone ... --role <roleId>`
pub async fn cmd_add(console: &Console, phone_number: String, role_id: String) -> Result<()> {
    console.require_auth()?;
    if let Err(e) = console.config.phone_rules().validate(&phone_number) {
        bail!("{e}");
    }
    let req = CreateUserRequest {
        phone_number: phone::normalize(&phone_number),
        role_id,
    };
    let u = console.client.create_user(&req).await?;
    println!("✓ User created: {} ({})", u.phone_number, role_name(&u));
    Ok(())
}

/// `gymctl users update <id> [--role <roleId>] [--active true|false]`
pub async fn cmd_update(
    console: &Console,
    id: String,
    role_id: Option<String>,
    active: Option<bool>,
) -> Result<()> {
    console.require_auth()?;
    if role_id.is_none() && active.is_none() {
        bail!("Nothing to update: pass --role and/or --active.");
    }
    let req = UpdateUserRequest {
        role_id,
        is_active: active,
    };
    let u = console.client.update_user(&id, &req).await?;
    println!(
        "✓ User {} updated: role {}, {}",
        u.phone_number,
        role_name(&u),
        if u.is_active { "active" } else { "inactive" }
    );
    Ok(())
}

/// `gymctl users remove <id> [--yes]`
pub async fn cmd_remove(console: &Console, id: String, yes: bool) -> Result<()> {
    console.require_auth()?;
    if !confirm(&format!("Delete user {id}?"), yes)? {
        println!("Aborted.");
        return Ok(());
    }
    let u = console.client.delete_user(&id).await?;
    println!("✓ User {} deleted.", u.phone_number);
    Ok(())
}
