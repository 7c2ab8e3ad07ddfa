//! End-to-end API scenarios against a real database.
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p sqlgym-server -- --ignored
//!
//! Each test truncates the sqlgym tables first, so point DATABASE_URL at a
//! throwaway database.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use sqlgym_server::db::schema::ensure_schema;
use sqlgym_server::http::MockIdentityProvider;
use sqlgym_server::models::ClaimedIdentity;
use sqlgym_server::{build_router, AppState};

async fn test_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = sqlgym_server::db::create_pool(&url)
        .await
        .expect("pool creation failed");
    ensure_schema(&pool).await.expect("schema bootstrap failed");
    sqlx::query(
        "TRUNCATE users, problems, submissions, community_posts, post_likes, post_comments RESTART IDENTITY CASCADE",
    )
    .execute(&pool)
    .await
    .expect("truncate failed");
    pool
}

fn identity(id: &str) -> MockIdentityProvider {
    MockIdentityProvider::new(ClaimedIdentity {
        id: id.to_owned(),
        username: format!("{id}-name"),
        email: format!("{id}@example.com"),
        first_name: None,
        last_name: None,
        profile_image_url: None,
    })
}

fn router_as(pool: &PgPool, provider: MockIdentityProvider) -> axum::Router {
    build_router(AppState {
        pool: pool.clone(),
        identity: provider,
    })
}

async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn post_json(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::post(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn seed_problem(pool: &PgPool, title: &str) -> i64 {
    let seed = sqlgym_core::ProblemSeed {
        title: title.to_owned(),
        description: "desc".to_owned(),
        difficulty: sqlgym_core::Difficulty::Easy,
        starter_code: String::new(),
        tags: vec![],
        companies: vec![],
        hints: vec![],
    };
    sqlgym_server::db::ProblemRepo::new(pool)
        .insert(&seed)
        .await
        .expect("seed insert failed")
        .id
}

#[tokio::test]
#[ignore = "requires database"]
async fn unsolved_problem_lists_zero_count() {
    let pool = test_pool().await;
    seed_problem(&pool, "Find Active Users").await;

    let app = router_as(&pool, identity("u1"));
    let (status, body) = get_json(&app, "/api/problems").await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["solved_count"], 0);
    assert_eq!(rows[0]["is_user_solved"], false);
}

#[tokio::test]
#[ignore = "requires database"]
async fn correct_submission_marks_solved() {
    let pool = test_pool().await;
    let problem_id = seed_problem(&pool, "Find Active Users").await;

    let app = router_as(&pool, identity("u1"));
    let (status, body) = post_json(
        &app,
        "/api/submissions",
        serde_json::json!({ "problem_id": problem_id, "user_code": "SELECT * FROM users" }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["is_correct"], true);
    assert_eq!(body["problem_id"], problem_id);

    let (_, listing) = get_json(&app, "/api/problems").await;
    let rows = listing.as_array().unwrap();
    assert_eq!(rows[0]["solved_count"], 1);
    assert_eq!(rows[0]["is_user_solved"], true);
}

#[tokio::test]
#[ignore = "requires database"]
async fn incorrect_submission_does_not_count() {
    let pool = test_pool().await;
    let problem_id = seed_problem(&pool, "Find Active Users").await;

    // u1 solves, u2 submits garbage
    let u1 = router_as(&pool, identity("u1"));
    post_json(
        &u1,
        "/api/submissions",
        serde_json::json!({ "problem_id": problem_id, "user_code": "SELECT * FROM users" }),
    )
    .await;

    let u2 = router_as(&pool, identity("u2"));
    let (status, body) = post_json(
        &u2,
        "/api/submissions",
        serde_json::json!({ "problem_id": problem_id, "user_code": "DROP TABLE users" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["is_correct"], false);

    let (_, listing) = get_json(&u2, "/api/problems").await;
    let rows = listing.as_array().unwrap();
    assert_eq!(rows[0]["solved_count"], 1, "u2 must not be counted");
    assert_eq!(rows[0]["is_user_solved"], false);
}

#[tokio::test]
#[ignore = "requires database"]
async fn solved_count_is_distinct_users_not_submissions() {
    let pool = test_pool().await;
    let problem_id = seed_problem(&pool, "Find Active Users").await;

    let app = router_as(&pool, identity("u1"));
    for _ in 0..2 {
        post_json(
            &app,
            "/api/submissions",
            serde_json::json!({ "problem_id": problem_id, "user_code": "SELECT 1 FROM t" }),
        )
        .await;
    }

    let (_, listing) = get_json(&app, "/api/problems").await;
    assert_eq!(listing.as_array().unwrap()[0]["solved_count"], 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn anonymous_viewer_never_sees_solved_flag() {
    let pool = test_pool().await;
    let problem_id = seed_problem(&pool, "Find Active Users").await;

    let u1 = router_as(&pool, identity("u1"));
    post_json(
        &u1,
        "/api/submissions",
        serde_json::json!({ "problem_id": problem_id, "user_code": "SELECT * FROM users" }),
    )
    .await;

    let anon = router_as(&pool, MockIdentityProvider::anonymous());
    let (status, listing) = get_json(&anon, "/api/problems").await;
    assert_eq!(status, StatusCode::OK);
    let rows = listing.as_array().unwrap();
    assert_eq!(rows[0]["solved_count"], 1);
    assert_eq!(rows[0]["is_user_solved"], false);
}

#[tokio::test]
#[ignore = "requires database"]
async fn unknown_problem_is_404() {
    let pool = test_pool().await;
    let app = router_as(&pool, identity("u1"));

    let (status, body) = get_json(&app, "/api/problems/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
#[ignore = "requires database"]
async fn submission_to_unknown_problem_fails_fast() {
    let pool = test_pool().await;
    let app = router_as(&pool, identity("u1"));

    let (status, _) = post_json(
        &app,
        "/api/submissions",
        serde_json::json!({ "problem_id": 999, "user_code": "SELECT * FROM t" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // No orphan row persisted
    let (_, submissions) = get_json(&app, "/api/user/submissions").await;
    assert!(submissions.as_array().unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn upsert_on_read_is_idempotent() {
    let pool = test_pool().await;
    let app = router_as(&pool, identity("u1"));

    let (status1, first) = get_json(&app, "/api/auth/user").await;
    let (status2, second) = get_json(&app, "/api/auth/user").await;

    assert_eq!(status1, StatusCode::OK);
    assert_eq!(status2, StatusCode::OK);
    assert_eq!(first["id"], second["id"]);
    assert_eq!(first["username"], second["username"]);
    assert_eq!(first["email"], second["email"]);
    assert_eq!(first["created_at"], second["created_at"]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn upsert_overwrites_profile_fields() {
    let pool = test_pool().await;

    let original = router_as(&pool, identity("u1"));
    let (_, before) = get_json(&original, "/api/auth/user").await;
    assert_eq!(before["username"], "u1-name");

    // Same id, changed claims: last writer wins on the mutable fields.
    let renamed = router_as(
        &pool,
        MockIdentityProvider::new(ClaimedIdentity {
            id: "u1".to_owned(),
            username: "u1-renamed".to_owned(),
            email: "renamed@example.com".to_owned(),
            first_name: Some("New".to_owned()),
            last_name: None,
            profile_image_url: None,
        }),
    );
    let (status, after) = get_json(&renamed, "/api/auth/user").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["id"], "u1");
    assert_eq!(after["username"], "u1-renamed");
    assert_eq!(after["email"], "renamed@example.com");
    assert_eq!(after["first_name"], "New");
    assert_eq!(after["created_at"], before["created_at"]);
    assert_ne!(after["updated_at"], before["updated_at"]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn reseeding_does_not_duplicate_problems() {
    let pool = test_pool().await;
    let first = seed_problem(&pool, "Find Active Users").await;
    let second = seed_problem(&pool, "Find Active Users").await;
    assert_eq!(first, second, "reseeding must keep the problem id");

    let app = router_as(&pool, identity("u1"));
    let (_, listing) = get_json(&app, "/api/problems").await;
    assert_eq!(listing.as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn submission_history_is_newest_first() {
    let pool = test_pool().await;
    let problem_id = seed_problem(&pool, "Find Active Users").await;

    let app = router_as(&pool, identity("u1"));
    post_json(
        &app,
        "/api/submissions",
        serde_json::json!({ "problem_id": problem_id, "user_code": "SELECT 1" }),
    )
    .await;
    post_json(
        &app,
        "/api/submissions",
        serde_json::json!({ "problem_id": problem_id, "user_code": "SELECT * FROM users" }),
    )
    .await;

    let (status, body) = get_json(&app, "/api/user/submissions").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["query"], "SELECT * FROM users");
    assert_eq!(rows[1]["query"], "SELECT 1");
}

#[tokio::test]
#[ignore = "requires database"]
async fn correct_submissions_bump_leaderboard() {
    let pool = test_pool().await;
    let p1 = seed_problem(&pool, "One").await;
    let p2 = seed_problem(&pool, "Two").await;

    let u1 = router_as(&pool, identity("u1"));
    for pid in [p1, p2] {
        post_json(
            &u1,
            "/api/submissions",
            serde_json::json!({ "problem_id": pid, "user_code": "SELECT x FROM t" }),
        )
        .await;
    }

    let u2 = router_as(&pool, identity("u2"));
    post_json(
        &u2,
        "/api/submissions",
        serde_json::json!({ "problem_id": p1, "user_code": "SELECT x FROM t" }),
    )
    .await;

    let (status, body) = get_json(&u1, "/api/leaderboard").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows[0]["id"], "u1");
    assert_eq!(rows[0]["problems_solved"], 2);
    assert_eq!(rows[1]["id"], "u2");
    assert!(rows[0].get("email").is_none(), "leaderboard hides email");
}

#[tokio::test]
#[ignore = "requires database"]
async fn difficulty_filter_narrows_listing() {
    let pool = test_pool().await;
    seed_problem(&pool, "Easy One").await;
    sqlgym_server::db::ProblemRepo::new(&pool)
        .insert(&sqlgym_core::ProblemSeed {
            title: "Hard One".to_owned(),
            description: "desc".to_owned(),
            difficulty: sqlgym_core::Difficulty::Hard,
            starter_code: String::new(),
            tags: vec![],
            companies: vec![],
            hints: vec![],
        })
        .await
        .unwrap();

    let app = router_as(&pool, identity("u1"));
    let (_, all) = get_json(&app, "/api/problems").await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, hard) = get_json(&app, "/api/problems?difficulty=Hard").await;
    let rows = hard.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["title"], "Hard One");

    let (status, _) = get_json(&app, "/api/problems?difficulty=Brutal").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn like_unlike_round_trip() {
    let pool = test_pool().await;

    let u1 = router_as(&pool, identity("u1"));
    let (status, post) = post_json(
        &u1,
        "/api/community/posts",
        serde_json::json!({ "content": "How do I use HAVING?" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let post_id = post["id"].as_i64().unwrap();

    let u2 = router_as(&pool, identity("u2"));
    let like_uri = format!("/api/community/posts/{post_id}/like");
    post_json(&u2, &like_uri, serde_json::json!({})).await;
    // Double-like is a no-op
    post_json(&u2, &like_uri, serde_json::json!({})).await;

    let (_, posts) = get_json(&u1, "/api/community/posts").await;
    assert_eq!(posts.as_array().unwrap()[0]["likes"], 1);

    let response = u2
        .clone()
        .oneshot(
            Request::delete(&like_uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (_, posts) = get_json(&u1, "/api/community/posts").await;
    assert_eq!(posts.as_array().unwrap()[0]["likes"], 0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn comments_bump_counter_and_join_author() {
    let pool = test_pool().await;

    let u1 = router_as(&pool, identity("u1"));
    let (_, post) = post_json(
        &u1,
        "/api/community/posts",
        serde_json::json!({ "content": "Window functions?" }),
    )
    .await;
    let post_id = post["id"].as_i64().unwrap();

    let u2 = router_as(&pool, identity("u2"));
    let comments_uri = format!("/api/community/posts/{post_id}/comments");
    let (status, _) = post_json(
        &u2,
        &comments_uri,
        serde_json::json!({ "content": "Start with ROW_NUMBER()" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, comments) = get_json(&u1, &comments_uri).await;
    let rows = comments.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["user"]["username"], "u2-name");

    let (_, posts) = get_json(&u1, "/api/community/posts").await;
    assert_eq!(posts.as_array().unwrap()[0]["comments"], 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn anonymous_caller_cannot_write() {
    let pool = test_pool().await;
    let problem_id = seed_problem(&pool, "Find Active Users").await;

    let anon = router_as(&pool, MockIdentityProvider::anonymous());

    let (status, _) = post_json(
        &anon,
        "/api/submissions",
        serde_json::json!({ "problem_id": problem_id, "user_code": "SELECT 1 FROM t" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = get_json(&anon, "/api/auth/user").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
