//! Integration tests for the HTTP API client against an in-process mock
//! backend. Each test binds its own axum router on an ephemeral port and
//! drives the real reqwest client at it, so URL shapes, query and auth
//! headers, and the serde wire models are all exercised for real.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tempfile::TempDir;

use gymctl::api::exercises::{Level, UpdateExerciseRequest};
use gymctl::api::members::CreateMemberRequest;
use gymctl::api::modules::ModuleRequest;
use gymctl::api::roles::RoleRequest;
use gymctl::api::staff::UpdateStaffRequest;
use gymctl::api::users::{CreateUserRequest, UpdateUserRequest};
use gymctl::api::{ApiClient, PageQuery};
use gymctl::auth::{LoginConfig, LoginFlow};
use gymctl::permissions::{CanonicalAction, PermissionMatrix, PermissionsApi};
use gymctl::session::SessionStore;
use gymctl::ConsoleConfig;

type Captured<T> = Arc<Mutex<Option<T>>>;

fn captured<T>() -> Captured<T> {
    Arc::new(Mutex::new(None))
}

/// Bind an ephemeral port, serve `app` on it, and hand back the base URL.
/// The listener is bound before the task spawns, so no startup race.
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Client + session store pointed at the mock backend, rooted in a temp dir.
fn client_at(base_url: &str, dir: &TempDir) -> (Arc<ApiClient>, Arc<SessionStore>, ConsoleConfig) {
    let config = ConsoleConfig::new(
        Some(base_url.to_string()),
        Some(dir.path().to_path_buf()),
        Some("error".to_string()),
        None,
    );
    let sessions = Arc::new(SessionStore::open(dir.path()));
    let client = Arc::new(ApiClient::new(&config, Arc::clone(&sessions)).unwrap());
    (client, sessions, config)
}

// ─── Login end to end ─────────────────────────────────────────────────────────

#[tokio::test]
async fn login_against_backend_persists_session_and_bearer() {
    let sent_phone: Captured<String> = captured();
    let auth_header: Captured<String> = captured();
    let sp = Arc::clone(&sent_phone);
    let ah = Arc::clone(&auth_header);

    let app = Router::new()
        .route(
            "/auth/send-otp",
            post(move |Json(body): Json<Value>| {
                let sp = Arc::clone(&sp);
                async move {
                    *sp.lock().unwrap() = body["phoneNumber"].as_str().map(String::from);
                    Json(json!({ "message": "OTP sent successfully" }))
                }
            }),
        )
        .route(
            "/auth/verify-otp",
            post(|Json(body): Json<Value>| async move {
                if body["otp"] == "135790" {
                    Json(json!({
                        "accessToken": "tok-live-1",
                        "user": {
                            "_id": "u1",
                            "phoneNumber": body["phoneNumber"],
                            "role": { "_id": "r1", "name": "super_admin" }
                        }
                    }))
                    .into_response()
                } else {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({ "message": "Invalid or expired OTP" })),
                    )
                        .into_response()
                }
            }),
        )
        .route(
            "/roles",
            get(move |headers: HeaderMap| {
                let ah = Arc::clone(&ah);
                async move {
                    *ah.lock().unwrap() = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(String::from);
                    Json(json!([
                        { "_id": "r1", "name": "super_admin", "description": "Everything" }
                    ]))
                }
            }),
        );

    let base = serve(app).await;
    let dir = TempDir::new().unwrap();
    let (client, sessions, _) = client_at(&base, &dir);

    // Drive the real login flow at the real client.
    let mut flow = LoginFlow::new(client.clone(), Arc::clone(&sessions), LoginConfig::instant());
    flow.set_phone_input("+91 98765 43210");
    assert!(
        flow.submit_phone().await,
        "send-otp should succeed: {:?}",
        flow.error()
    );
    assert_eq!(sent_phone.lock().unwrap().as_deref(), Some("9876543210"));

    let user = flow.otp_paste("135790").await.expect("verify should succeed");
    assert_eq!(user.role.name, "super_admin");
    assert!(dir.path().join("session.json").exists());

    // The persisted token rides along on the next authenticated call.
    let roles = client.list_roles().await.unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(
        auth_header.lock().unwrap().as_deref(),
        Some("Bearer tok-live-1")
    );
}

// ─── Error mapping ────────────────────────────────────────────────────────────

#[tokio::test]
async fn backend_error_message_is_extracted() {
    let app = Router::new().route(
        "/members",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Phone number already registered" })),
            )
        }),
    );

    let base = serve(app).await;
    let dir = TempDir::new().unwrap();
    let (client, _, _) = client_at(&base, &dir);

    let req = CreateMemberRequest {
        mobile_number: "9876543210".into(),
        full_name: "Asha Rao".into(),
        gender: None,
        date_of_birth: None,
        duration_days: 90,
        discount_amount: None,
        payment_mode: "cash".into(),
        reference_no: None,
    };
    let err = client.create_member(&req).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(
        err.user_message("Could not add member."),
        "Phone number already registered"
    );
}

// ─── Permission grid round trip ───────────────────────────────────────────────

#[tokio::test]
async fn permission_grid_fetch_edit_save_round_trip() {
    let saved_body: Captured<Value> = captured();
    let sb = Arc::clone(&saved_body);

    let app = Router::new()
        .route(
            "/permissions/role/{role_id}",
            get(|Path(role_id): Path<String>| async move {
                // Sparse: members has a granted create plus a legacy "view"
                // record; payments has no records at all.
                Json(json!({
                    "roleId": role_id,
                    "roleName": "front_desk",
                    "modules": [
                        {
                            "moduleId": "mod1",
                            "moduleName": "Members",
                            "moduleCode": "members",
                            "permissions": [
                                {
                                    "permissionId": "perm1",
                                    "name": "Create Members",
                                    "action": "create",
                                    "code": "members.create",
                                    "isGranted": true
                                },
                                {
                                    "permissionId": "perm2",
                                    "name": "View Members",
                                    "action": "view",
                                    "code": "members.view",
                                    "isGranted": true
                                }
                            ]
                        },
                        {
                            "moduleId": "mod2",
                            "moduleName": "Payments",
                            "moduleCode": "payments",
                            "permissions": []
                        }
                    ]
                }))
            }),
        )
        .route(
            "/roles/{role_id}",
            put(move |Path(role_id): Path<String>, Json(body): Json<Value>| {
                let sb = Arc::clone(&sb);
                async move {
                    *sb.lock().unwrap() = Some(body.clone());
                    Json(json!({
                        "_id": role_id,
                        "name": "front_desk",
                        "permissions": body["permissions"]
                    }))
                }
            }),
        );

    let base = serve(app).await;
    let dir = TempDir::new().unwrap();
    let (client, _, _) = client_at(&base, &dir);

    let resp = client.fetch_role_permissions("r1").await.unwrap();
    let mut matrix = PermissionMatrix::build(resp, &CanonicalAction::ALL);

    // Dense grid: both modules, all five actions each; only members.create
    // arrives granted. The legacy "view" record never occupies the read slot.
    assert_eq!(matrix.modules().len(), 2);
    assert_eq!(matrix.granted_count(), 1);
    let read_cell = matrix.cell("mod1", CanonicalAction::Read).unwrap();
    assert!(!read_cell.is_granted);

    matrix.set_all(true);
    let codes = matrix.flatten_granted();
    assert_eq!(codes.len(), 10);
    assert_eq!(codes[0], "members.create");
    assert!(codes.contains(&"payments.export".to_string()));

    let role = client.save_role_permissions("r1", &codes).await.unwrap();
    assert_eq!(role.permissions.as_deref(), Some(codes.as_slice()));

    let body = saved_body.lock().unwrap().take().unwrap();
    assert_eq!(body["permissions"], json!(codes));
}

// ─── Staff and user admin endpoints ───────────────────────────────────────────

#[tokio::test]
async fn staff_update_sends_only_set_fields() {
    let put_body: Captured<Value> = captured();
    let pb = Arc::clone(&put_body);

    let app = Router::new().route(
        "/staff/{id}",
        put(move |Path(id): Path<String>, Json(body): Json<Value>| {
            let pb = Arc::clone(&pb);
            async move {
                *pb.lock().unwrap() = Some(body);
                Json(json!({
                    "_id": id,
                    "fullName": "Vikram Singh",
                    "phoneNumber": "9812345678",
                    "role": "trainer",
                    "designation": "Head Trainer",
                    "dateOfJoining": "2025-06-01T00:00:00.000Z",
                    "salary": 40000.0,
                    "status": "active",
                    "isActive": true,
                    "createdAt": "2025-06-01T10:00:00.000Z"
                }))
            }
        }),
    );

    let base = serve(app).await;
    let dir = TempDir::new().unwrap();
    let (client, _, _) = client_at(&base, &dir);

    let req = UpdateStaffRequest {
        designation: Some("Head Trainer".into()),
        salary: Some(40000.0),
        ..Default::default()
    };
    let staff = client.update_staff("st1", &req).await.unwrap();
    assert_eq!(staff.designation, "Head Trainer");
    assert_eq!(staff.salary, 40000.0);

    // Unset Options must not appear on the wire at all.
    let body = put_body.lock().unwrap().take().unwrap();
    assert_eq!(
        body,
        json!({ "designation": "Head Trainer", "salary": 40000.0 })
    );
}

#[tokio::test]
async fn user_account_lifecycle() {
    let list_query: Captured<HashMap<String, String>> = captured();
    let create_body: Captured<Value> = captured();
    let update_body: Captured<Value> = captured();
    let (lq, cb, ub) = (
        Arc::clone(&list_query),
        Arc::clone(&create_body),
        Arc::clone(&update_body),
    );

    fn user_json(id: &str, active: bool) -> Value {
        json!({
            "_id": id,
            "phoneNumber": "9876500001",
            "isActive": active,
            "createdAt": "2025-07-01T08:00:00.000Z",
            "updatedAt": "2025-07-02T08:00:00.000Z",
            "role": { "_id": "r2", "name": "trainer" }
        })
    }

    let app = Router::new()
        .route(
            "/users",
            get(move |Query(q): Query<HashMap<String, String>>| {
                let lq = Arc::clone(&lq);
                async move {
                    *lq.lock().unwrap() = Some(q);
                    Json(json!({
                        "data": [user_json("u7", true)],
                        "pagination": { "page": 1, "limit": 10, "total": 1, "totalPages": 1 }
                    }))
                }
            })
            .post(move |Json(body): Json<Value>| {
                let cb = Arc::clone(&cb);
                async move {
                    *cb.lock().unwrap() = Some(body);
                    Json(user_json("u7", true))
                }
            }),
        )
        .route(
            "/users/{id}",
            get(|Path(id): Path<String>| async move { Json(user_json(&id, true)) })
                .put(move |Path(id): Path<String>, Json(body): Json<Value>| {
                    let ub = Arc::clone(&ub);
                    async move {
                        *ub.lock().unwrap() = Some(body);
                        Json(user_json(&id, false))
                    }
                })
                .delete(|Path(id): Path<String>| async move { Json(user_json(&id, false)) }),
        );

    let base = serve(app).await;
    let dir = TempDir::new().unwrap();
    let (client, _, config) = client_at(&base, &dir);

    let page = client
        .list_users(PageQuery::first(&config), Some("98765"))
        .await
        .unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.pagination.total, 1);
    let q = list_query.lock().unwrap().take().unwrap();
    assert_eq!(q.get("search").map(String::as_str), Some("98765"));
    assert_eq!(q.get("page").map(String::as_str), Some("1"));
    assert_eq!(q.get("limit").map(String::as_str), Some("10"));

    let created = client
        .create_user(&CreateUserRequest {
            phone_number: "9876500001".into(),
            role_id: "r2".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.role.as_ref().unwrap().name, "trainer");
    assert_eq!(
        create_body.lock().unwrap().take().unwrap(),
        json!({ "phoneNumber": "9876500001", "roleId": "r2" })
    );

    let fetched = client.get_user("u7").await.unwrap();
    assert!(fetched.is_active);

    let updated = client
        .update_user(
            "u7",
            &UpdateUserRequest {
                role_id: None,
                is_active: Some(false),
            },
        )
        .await
        .unwrap();
    assert!(!updated.is_active);
    assert_eq!(
        update_body.lock().unwrap().take().unwrap(),
        json!({ "isActive": false })
    );

    let removed = client.delete_user("u7").await.unwrap();
    assert_eq!(removed.id, "u7");
}

// ─── Assignment detail and directory endpoints ────────────────────────────────

#[tokio::test]
async fn assignment_details_and_member_directory_decode() {
    fn detail_json(id: &str) -> Value {
        json!({
            "_id": id,
            "memberId": { "_id": "m1", "memberCode": "GYM0001", "userId": "u5" },
            "trainerId": { "_id": "t1", "phoneNumber": "9812345678" },
            "assignedBy": { "_id": "u9", "phoneNumber": "9876500000" },
            "assignedDate": "2025-08-01T10:00:00.000Z",
            "status": "Active",
            "isActive": true,
            "createdAt": "2025-08-01T10:00:00.000Z",
            "updatedAt": "2025-08-01T10:00:00.000Z"
        })
    }

    let app = Router::new()
        .route(
            "/trainer-assignments/member/{member_id}",
            get(|| async { Json(json!([detail_json("as1")])) }),
        )
        .route(
            "/trainer-assignments/trainer/{trainer_id}",
            get(|| async { Json(json!([detail_json("as1"), detail_json("as2")])) }),
        )
        .route(
            "/trainer-assignments/{id}",
            delete(|| async { Json(json!({ "message": "Assignment removed" })) }),
        )
        .route(
            "/users/members",
            get(|| async {
                Json(json!({
                    "data": [{
                        "_id": "u5",
                        "phoneNumber": "9876543210",
                        "profile": { "fullName": "Asha Rao" },
                        "role": { "_id": "r3", "name": "member" }
                    }]
                }))
            }),
        );

    let base = serve(app).await;
    let dir = TempDir::new().unwrap();
    let (client, _, _) = client_at(&base, &dir);

    let by_member = client.assignments_by_member("m1").await.unwrap();
    assert_eq!(by_member.len(), 1);
    assert_eq!(by_member[0].member_id.member_code, "GYM0001");
    assert_eq!(by_member[0].trainer_id.phone_number, "9812345678");

    let by_trainer = client.assignments_by_trainer("t1").await.unwrap();
    assert_eq!(by_trainer.len(), 2);

    let ack = client.delete_assignment("as1").await.unwrap();
    assert_eq!(ack.message, "Assignment removed");

    let directory = client.member_directory().await.unwrap();
    assert_eq!(directory.data.len(), 1);
    assert_eq!(
        directory.data[0].profile.as_ref().unwrap().full_name,
        "Asha Rao"
    );
}

// ─── Expense detail ───────────────────────────────────────────────────────────

#[tokio::test]
async fn expense_detail_decodes_dates_and_optionals() {
    let app = Router::new().route(
        "/expenses/{id}",
        get(|Path(id): Path<String>| async move {
            Json(json!({
                "_id": id,
                "title": "Treadmill belt",
                "amount": 5400.0,
                "category": "maintenance",
                "expenseDate": "2025-08-20T00:00:00.000Z",
                "paymentMethod": "cash",
                "vendorName": "FitParts Co",
                "isActive": true,
                "createdAt": "2025-08-20T12:30:00.000Z"
            }))
        }),
    );

    let base = serve(app).await;
    let dir = TempDir::new().unwrap();
    let (client, _, _) = client_at(&base, &dir);

    let expense = client.get_expense("e1").await.unwrap();
    assert_eq!(expense.title, "Treadmill belt");
    assert_eq!(expense.vendor_name.as_deref(), Some("FitParts Co"));
    // Absent optionals decode as None rather than failing.
    assert!(expense.description.is_none());
    assert!(expense.receipt_url.is_none());
    assert_eq!(expense.expense_date.format("%Y-%m-%d").to_string(), "2025-08-20");
}

// ─── Payment history and exercise catalogue endpoints ─────────────────────────

#[tokio::test]
async fn payments_by_user_and_muscle_browse_decode() {
    let muscle_query: Captured<HashMap<String, String>> = captured();
    let exercise_put: Captured<Value> = captured();
    let (mq, ep) = (Arc::clone(&muscle_query), Arc::clone(&exercise_put));

    let app = Router::new()
        .route(
            "/payments/user/{user_id}",
            get(|| async {
                Json(json!([{
                    "_id": "p1",
                    "userId": "u5",
                    "userName": "Asha Rao",
                    "amount": 4500.0,
                    "paymentMode": "upi",
                    "status": "paid",
                    "paymentDate": "2025-08-01T10:00:00.000Z",
                    "createdAt": "2025-08-01T10:00:00.000Z"
                }]))
            }),
        )
        .route(
            "/exercises/muscles/{muscle}",
            get(
                move |Path(muscle): Path<String>, Query(q): Query<HashMap<String, String>>| {
                    let mq = Arc::clone(&mq);
                    async move {
                        *mq.lock().unwrap() = Some(q);
                        Json(json!({
                            "muscle": muscle,
                            "level": "beginner",
                            "pagination": {
                                "currentPage": 1,
                                "totalPages": 1,
                                "totalExercises": 1,
                                "limit": 10,
                                "hasNextPage": false,
                                "hasPreviousPage": false
                            },
                            "exercises": [{
                                "id": "Barbell_Curl",
                                "name": "Barbell Curl",
                                "level": "beginner",
                                "primaryMuscles": ["biceps"]
                            }]
                        }))
                    }
                },
            ),
        )
        .route(
            "/exercises/{id}",
            put(move |Path(id): Path<String>, Json(body): Json<Value>| {
                let ep = Arc::clone(&ep);
                async move {
                    *ep.lock().unwrap() = Some(body);
                    Json(json!({
                        "id": id,
                        "name": "Barbell Curl",
                        "level": "intermediate",
                        "primaryMuscles": ["biceps"]
                    }))
                }
            }),
        );

    let base = serve(app).await;
    let dir = TempDir::new().unwrap();
    let (client, _, _) = client_at(&base, &dir);

    let history = client.payments_by_user("u5").await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].amount, 4500.0);
    assert_eq!(history[0].user_name.as_deref(), Some("Asha Rao"));

    let browse = client
        .exercises_by_muscle("biceps", PageQuery::new(1, 10), Some(Level::Beginner))
        .await
        .unwrap();
    assert_eq!(browse.muscle, "biceps");
    assert_eq!(browse.exercises.len(), 1);
    assert!(!browse.pagination.has_next_page);
    let q = muscle_query.lock().unwrap().take().unwrap();
    assert_eq!(q.get("level").map(String::as_str), Some("beginner"));

    let updated = client
        .update_exercise(
            "Barbell_Curl",
            &UpdateExerciseRequest {
                level: Some(Level::Intermediate),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.level, Level::Intermediate);
    assert_eq!(
        exercise_put.lock().unwrap().take().unwrap(),
        json!({ "level": "intermediate" })
    );
}

// ─── Role and module admin endpoints ──────────────────────────────────────────

#[tokio::test]
async fn role_and_module_admin_endpoints() {
    let module_post: Captured<Value> = captured();
    let mp = Arc::clone(&module_post);

    fn module_json(id: &str, name: &str, code: &str) -> Value {
        json!({ "_id": id, "name": name, "code": code, "isActive": true })
    }

    let app = Router::new()
        .route(
            "/roles/{id}",
            get(|Path(id): Path<String>| async move {
                Json(json!({ "_id": id, "name": "front_desk", "description": "Front desk staff" }))
            })
            .put(|Path(id): Path<String>, Json(body): Json<Value>| async move {
                Json(json!({ "_id": id, "name": body["name"], "description": body["description"] }))
            }),
        )
        .route(
            "/modules",
            get(|| async {
                Json(json!([
                    module_json("mod1", "Members", "members"),
                    module_json("mod2", "Payments", "payments")
                ]))
            })
            .post(move |Json(body): Json<Value>| {
                let mp = Arc::clone(&mp);
                async move {
                    *mp.lock().unwrap() = Some(body);
                    Json(module_json("mod9", "Reports", "reports"))
                }
            }),
        )
        .route(
            "/modules/{id}",
            get(|Path(id): Path<String>| async move {
                Json(module_json(&id, "Members", "members"))
            })
            .put(|Path(id): Path<String>, Json(_): Json<Value>| async move {
                Json(module_json(&id, "Member Records", "members"))
            })
            .delete(|Path(id): Path<String>| async move {
                Json(module_json(&id, "Reports", "reports"))
            }),
        );

    let base = serve(app).await;
    let dir = TempDir::new().unwrap();
    let (client, _, _) = client_at(&base, &dir);

    let role = client.get_role("r1").await.unwrap();
    assert_eq!(role.name, "front_desk");

    let renamed = client
        .update_role(
            "r1",
            &RoleRequest {
                name: "reception".into(),
                description: Some("Reception desk".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "reception");

    let modules = client.list_modules().await.unwrap();
    assert_eq!(modules.len(), 2);
    assert_eq!(modules[0].code, "members");

    let one = client.get_module("mod1").await.unwrap();
    assert_eq!(one.name, "Members");

    let created = client
        .create_module(&ModuleRequest {
            name: "Reports".into(),
            code: "reports".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.id, "mod9");
    assert_eq!(
        module_post.lock().unwrap().take().unwrap(),
        json!({ "name": "Reports", "code": "reports" })
    );

    let updated = client
        .update_module(
            "mod1",
            &ModuleRequest {
                name: "Member Records".into(),
                code: "members".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Member Records");

    let removed = client.delete_module("mod9").await.unwrap();
    assert_eq!(removed.id, "mod9");
}
