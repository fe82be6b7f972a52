//! Criterion benchmarks for the permission grid hot paths.
//!
//! Run with:
//!   cargo bench
//!
//! Covers:
//!   - Wire decode of the sparse role-permissions response (serde_json)
//!   - Densifying the sparse response into the module × action grid
//!   - Flattening and editing a built grid

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gymctl::api::roles::{RolePermissionsResponse, WireModulePermissions, WirePermission};
use gymctl::permissions::{CanonicalAction, PermissionMatrix};

const ACTIONS: [&str; 5] = ["create", "read", "update", "delete", "export"];

/// Sparse response with `module_count` modules, each carrying records for
/// the first `records_per_module` actions (alternating granted flags).
fn synth_response(module_count: usize, records_per_module: usize) -> RolePermissionsResponse {
    let modules = (0..module_count)
        .map(|m| {
            let code = format!("module{m}");
            let permissions = ACTIONS
                .iter()
                .take(records_per_module)
                .enumerate()
                .map(|(i, action)| WirePermission {
                    permission_id: format!("perm-{m}-{i}"),
                    name: format!("{action} {code}"),
                    action: (*action).to_string(),
                    code: format!("{code}.{action}"),
                    description: None,
                    is_granted: i % 2 == 0,
                })
                .collect();
            WireModulePermissions {
                module_id: format!("mod{m}"),
                module_name: format!("Module {m}"),
                module_code: code,
                module_icon: None,
                module_order: Some(m as i64),
                permissions,
            }
        })
        .collect();
    RolePermissionsResponse {
        role_id: "r1".to_string(),
        role_name: "front_desk".to_string(),
        modules,
    }
}

// ─── Wire decode ──────────────────────────────────────────────────────────────

fn bench_wire_decode(c: &mut Criterion) {
    let json = serde_json::to_string(&synth_response(12, 3)).unwrap();

    c.bench_function("decode_role_permissions_12_modules", |b| {
        b.iter(|| {
            let resp: RolePermissionsResponse =
                serde_json::from_str(black_box(&json)).unwrap();
            black_box(resp);
        });
    });
}

// ─── Grid densify ─────────────────────────────────────────────────────────────

fn bench_grid_build(c: &mut Criterion) {
    let small = synth_response(12, 3);
    let large = synth_response(50, 3);

    c.bench_function("grid_build_12_modules", |b| {
        b.iter_with_setup(
            || small.clone(),
            |resp| {
                black_box(PermissionMatrix::build(resp, &CanonicalAction::ALL));
            },
        );
    });

    c.bench_function("grid_build_50_modules", |b| {
        b.iter_with_setup(
            || large.clone(),
            |resp| {
                black_box(PermissionMatrix::build(resp, &CanonicalAction::ALL));
            },
        );
    });
}

// ─── Flatten and edit ─────────────────────────────────────────────────────────

fn bench_grid_edits(c: &mut Criterion) {
    let mut all_granted = PermissionMatrix::build(synth_response(12, 3), &CanonicalAction::ALL);
    all_granted.set_all(true);

    c.bench_function("flatten_granted_60_cells", |b| {
        b.iter(|| {
            black_box(all_granted.flatten_granted());
        });
    });

    c.bench_function("toggle_cell_and_module", |b| {
        b.iter_with_setup(
            || PermissionMatrix::build(synth_response(12, 3), &CanonicalAction::ALL),
            |mut matrix| {
                black_box(matrix.toggle_cell("mod5", CanonicalAction::Update));
                black_box(matrix.toggle_module("mod3"));
            },
        );
    });
}

// ─── Entry point ──────────────────────────────────────────────────────────────

criterion_group!(benches, bench_wire_decode, bench_grid_build, bench_grid_edits);
criterion_main!(benches);
