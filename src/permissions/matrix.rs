//! Permission matrix reconciler.
//!
//! The server reports a role's permissions sparsely: a module lists only the
//! actions that have a permission record. Editing wants the opposite — a
//! dense module × action grid where every slot exists and missing ones are
//! simply not granted. [`PermissionMatrix::build`] densifies the server
//! response, the toggle methods edit the grid in memory, and
//! [`PermissionMatrix::flatten_granted`] collapses it back into the flat
//! list of permission codes the save endpoint takes. No I/O happens here.

use std::collections::HashMap;

use crate::api::roles::{RolePermissionsResponse, WireModulePermissions, WirePermission};

// ─── Canonical actions ────────────────────────────────────────────────────────

/// The fixed set of operation kinds every module is permissioned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalAction {
    Create,
    Read,
    Update,
    Delete,
    Export,
}

impl CanonicalAction {
    /// All actions in canonical order — the column order of every module row.
    pub const ALL: [CanonicalAction; 5] = [
        CanonicalAction::Create,
        CanonicalAction::Read,
        CanonicalAction::Update,
        CanonicalAction::Delete,
        CanonicalAction::Export,
    ];

    /// Wire name, lowercase.
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalAction::Create => "create",
            CanonicalAction::Read => "read",
            CanonicalAction::Update => "update",
            CanonicalAction::Delete => "delete",
            CanonicalAction::Export => "export",
        }
    }

    /// Capitalized label for display and synthesized permission names.
    pub fn display_name(&self) -> &'static str {
        match self {
            CanonicalAction::Create => "Create",
            CanonicalAction::Read => "Read",
            CanonicalAction::Update => "Update",
            CanonicalAction::Delete => "Delete",
            CanonicalAction::Export => "Export",
        }
    }
}

impl std::fmt::Display for CanonicalAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CanonicalAction {
    type Err = String;

    /// Case-insensitive. `view` is accepted as an alias for `read` on input;
    /// the matrix itself is keyed on the five canonical names only.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "create" => Ok(CanonicalAction::Create),
            "read" | "view" => Ok(CanonicalAction::Read),
            "update" => Ok(CanonicalAction::Update),
            "delete" => Ok(CanonicalAction::Delete),
            "export" => Ok(CanonicalAction::Export),
            other => Err(format!(
                "unknown action '{other}' (expected create, read, update, delete, or export)"
            )),
        }
    }
}

// ─── Grid types ───────────────────────────────────────────────────────────────

/// One module × action slot.
#[derive(Debug, Clone, PartialEq)]
pub struct PermissionCell {
    pub action: CanonicalAction,
    /// Server id when the permission pre-exists, otherwise the deterministic
    /// placeholder `{moduleId}-{action}`.
    pub permission_id: String,
    pub name: String,
    /// `{moduleCode}.{action}` — the save payload is a list of these.
    pub code: String,
    pub description: Option<String>,
    pub is_granted: bool,
}

impl PermissionCell {
    fn from_wire(action: CanonicalAction, wire: WirePermission) -> Self {
        Self {
            action,
            permission_id: wire.permission_id,
            name: wire.name,
            code: wire.code,
            description: wire.description,
            is_granted: wire.is_granted,
        }
    }

    fn placeholder(action: CanonicalAction, module: &WireModulePermissions) -> Self {
        Self {
            action,
            permission_id: format!("{}-{}", module.module_id, action.as_str()),
            name: format!("{} {}", action.display_name(), module.module_name),
            code: format!("{}.{}", module.module_code, action.as_str()),
            description: Some(format!(
                "Ability to {} {}",
                action.as_str(),
                module.module_name.to_lowercase()
            )),
            is_granted: false,
        }
    }
}

/// One module and its dense row of cells, one per canonical action.
#[derive(Debug, Clone)]
pub struct ModuleRow {
    pub module_id: String,
    pub module_name: String,
    pub module_code: String,
    pub cells: Vec<PermissionCell>,
}

impl ModuleRow {
    pub fn fully_selected(&self) -> bool {
        self.cells.iter().all(|c| c.is_granted)
    }

    pub fn partially_selected(&self) -> bool {
        let granted = self.cells.iter().filter(|c| c.is_granted).count();
        granted > 0 && granted < self.cells.len()
    }
}

/// The dense, editable module × action grid for one role.
#[derive(Debug, Clone)]
pub struct PermissionMatrix {
    pub role_id: String,
    pub role_name: String,
    modules: Vec<ModuleRow>,
    /// (moduleId, action) → (module index, cell index).
    index: HashMap<(String, CanonicalAction), (usize, usize)>,
}

impl PermissionMatrix {
    /// Densify a server response against the given canonical actions.
    ///
    /// Every module keeps its position; within a module the cells come out
    /// in `actions` order. A server permission fills its slot when its
    /// action name matches case-insensitively; every other slot gets a
    /// not-granted placeholder. Module count is never changed, and a server
    /// action outside the canonical set (or an alias like `view`) is
    /// dropped rather than guessed into a slot.
    pub fn build(response: RolePermissionsResponse, actions: &[CanonicalAction]) -> Self {
        let mut index = HashMap::new();
        let modules: Vec<ModuleRow> = response
            .modules
            .into_iter()
            .enumerate()
            .map(|(module_idx, wire)| {
                let mut by_action: HashMap<String, WirePermission> = wire
                    .permissions
                    .iter()
                    .cloned()
                    .map(|p| (p.action.to_lowercase(), p))
                    .collect();

                let cells: Vec<PermissionCell> = actions
                    .iter()
                    .enumerate()
                    .map(|(cell_idx, &action)| {
                        index.insert((wire.module_id.clone(), action), (module_idx, cell_idx));
                        match by_action.remove(action.as_str()) {
                            Some(p) => PermissionCell::from_wire(action, p),
                            None => PermissionCell::placeholder(action, &wire),
                        }
                    })
                    .collect();

                ModuleRow {
                    module_id: wire.module_id,
                    module_name: wire.module_name,
                    module_code: wire.module_code,
                    cells,
                }
            })
            .collect();

        Self {
            role_id: response.role_id,
            role_name: response.role_name,
            modules,
            index,
        }
    }

    pub fn modules(&self) -> &[ModuleRow] {
        &self.modules
    }

    pub fn module(&self, module_id: &str) -> Option<&ModuleRow> {
        self.modules.iter().find(|m| m.module_id == module_id)
    }

    pub fn cell(&self, module_id: &str, action: CanonicalAction) -> Option<&PermissionCell> {
        let &(m, c) = self.index.get(&(module_id.to_string(), action))?;
        Some(&self.modules[m].cells[c])
    }

    /// Flip exactly one cell. Returns the new granted state, or `None` when
    /// the (module, action) pair is not in the grid.
    pub fn toggle_cell(&mut self, module_id: &str, action: CanonicalAction) -> Option<bool> {
        let &(m, c) = self.index.get(&(module_id.to_string(), action))?;
        let cell = &mut self.modules[m].cells[c];
        cell.is_granted = !cell.is_granted;
        Some(cell.is_granted)
    }

    /// Set exactly one cell. Returns `false` when the pair is unknown.
    pub fn set_cell(&mut self, module_id: &str, action: CanonicalAction, granted: bool) -> bool {
        match self.index.get(&(module_id.to_string(), action)) {
            Some(&(m, c)) => {
                self.modules[m].cells[c].is_granted = granted;
                true
            }
            None => false,
        }
    }

    /// Select-all / deselect-all for one module, majority-driven: only a
    /// fully granted module clears; anything less becomes fully granted.
    /// Returns `false` when the module is unknown.
    pub fn toggle_module(&mut self, module_id: &str) -> bool {
        let Some(module) = self.modules.iter_mut().find(|m| m.module_id == module_id) else {
            return false;
        };
        let all_granted = module.cells.iter().all(|c| c.is_granted);
        for cell in &mut module.cells {
            cell.is_granted = !all_granted;
        }
        true
    }

    /// Set every cell in the grid at once (`permissions grant-all`).
    pub fn set_all(&mut self, granted: bool) {
        for module in &mut self.modules {
            for cell in &mut module.cells {
                cell.is_granted = granted;
            }
        }
    }

    pub fn is_module_fully_selected(&self, module_id: &str) -> bool {
        self.module(module_id).is_some_and(ModuleRow::fully_selected)
    }

    pub fn is_module_partially_selected(&self, module_id: &str) -> bool {
        self.module(module_id)
            .is_some_and(ModuleRow::partially_selected)
    }

    /// Codes of every granted cell in module-then-action order — the
    /// `PUT /roles/{id}` payload.
    pub fn flatten_granted(&self) -> Vec<String> {
        self.modules
            .iter()
            .flat_map(|m| m.cells.iter())
            .filter(|c| c.is_granted)
            .map(|c| c.code.clone())
            .collect()
    }

    pub fn granted_count(&self) -> usize {
        self.modules
            .iter()
            .flat_map(|m| m.cells.iter())
            .filter(|c| c.is_granted)
            .count()
    }
}

/// Render a stored `snake_case` role or module name as Title Case words:
/// `super_admin` → `Super Admin`.
pub fn format_display_name(raw: &str) -> String {
    raw.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
