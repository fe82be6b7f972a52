// cli/permissions.rs — `gymctl permissions show/grant/revoke/toggle-module/grant-all`.
//
// Every edit command is fetch → densify → edit in memory → flatten → save,
// the same round trip the admin console's matrix screen makes.

use anyhow::{anyhow, Result};

use super::Console;
use crate::permissions::{
    format_display_name, CanonicalAction, PermissionMatrix, PermissionsApi,
};

async fn load_matrix(console: &Console, role_id: &str) -> Result<PermissionMatrix> {
    let response = console.client.fetch_role_permissions(role_id).await?;
    Ok(PermissionMatrix::build(response, &CanonicalAction::ALL))
}

/// Accept a module by id or by code.
fn resolve_module_id(matrix: &PermissionMatrix, module: &str) -> Result<String> {
    matrix
        .modules()
        .iter()
        .find(|m| m.module_id == module || m.module_code.eq_ignore_ascii_case(module))
        .map(|m| m.module_id.clone())
        .ok_or_else(|| {
            anyhow!("No module '{module}' for this role. See `gymctl permissions show`.")
        })
}

async fn save(console: &Console, matrix: &PermissionMatrix) -> Result<()> {
    let codes = matrix.flatten_granted();
    console
        .client
        .save_role_permissions(&matrix.role_id, &codes)
        .await?;
    println!(
        "✓ Saved {} granted permissions for {}.",
        codes.len(),
        format_display_name(&matrix.role_name)
    );
    Ok(())
}

/// `gymctl permissions show <roleId> [--json]`
///
/// `--json` prints the flat granted codes, ready to diff or pipe.
pub async fn cmd_show(console: &Console, role_id: String, json: bool) -> Result<()> {
    console.require_auth()?;
    let matrix = load_matrix(console, &role_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&matrix.flatten_granted())?);
        return Ok(());
    }

    println!(
        "Role: {} ({})",
        format_display_name(&matrix.role_name),
        matrix.role_id
    );
    if matrix.modules().is_empty() {
        println!("No modules reported for this role.");
        return Ok(());
    }

    print!("\n{:<24} {:<4}", "Module", "");
    for action in CanonicalAction::ALL {
        print!("{:<8}", action.display_name());
    }
    println!();
    println!("{}", "-".repeat(28 + 8 * CanonicalAction::ALL.len()));

    for module in matrix.modules() {
        let marker = if module.fully_selected() {
            "[x]"
        } else if module.partially_selected() {
            "[~]"
        } else {
            "[ ]"
        };
        print!(
            "{:<24} {:<4}",
            format_display_name(&module.module_name),
            marker
        );
        for cell in &module.cells {
            print!("{:<8}", if cell.is_granted { "✓" } else { "·" });
        }
        println!();
    }

    let total = matrix.modules().len() * CanonicalAction::ALL.len();
    println!("\n{} of {} permissions granted", matrix.granted_count(), total);
    Ok(())
}

/// `gymctl permissions grant <roleId> <module> <action>`
pub async fn cmd_grant(
    console: &Console,
    role_id: String,
    module: String,
    action: CanonicalAction,
) -> Result<()> {
    console.require_auth()?;
    let mut matrix = load_matrix(console, &role_id).await?;
    let module_id = resolve_module_id(&matrix, &module)?;
    matrix.set_cell(&module_id, action, true);
    save(console, &matrix).await
}

/// `gymctl permissions revoke <roleId> <module> <action>`
pub async fn cmd_revoke(
    console: &Console,
    role_id: String,
    module: String,
    action: CanonicalAction,
) -> Result<()> {
    console.require_auth()?;
    let mut matrix = load_matrix(console, &role_id).await?;
    let module_id = resolve_module_id(&matrix, &module)?;
    matrix.set_cell(&module_id, action, false);
    save(console, &matrix).await
}

/// `gymctl permissions toggle-module <roleId> <module>`
///
/// Partially or unselected modules become fully granted; a fully granted
/// one clears.
pub async fn cmd_toggle_module(console: &Console, role_id: String, module: String) -> Result<()> {
    console.require_auth()?;
    let mut matrix = load_matrix(console, &role_id).await?;
    let module_id = resolve_module_id(&matrix, &module)?;
    matrix.toggle_module(&module_id);
    let state = if matrix.is_module_fully_selected(&module_id) {
        "granted"
    } else {
        "cleared"
    };
    println!("Module {module} {state}.");
    save(console, &matrix).await
}

/// `gymctl permissions grant-all <roleId> [--yes]`
pub async fn cmd_grant_all(console: &Console, role_id: String, yes: bool) -> Result<()> {
    console.require_auth()?;
    let mut matrix = load_matrix(console, &role_id).await?;
    if !super::confirm(
        &format!(
            "Grant every permission to {}?",
            format_display_name(&matrix.role_name)
        ),
        yes,
    )? {
        println!("Aborted.");
        return Ok(());
    }
    matrix.set_all(true);
    save(console, &matrix).await
}
