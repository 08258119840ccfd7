use serde_json::{Value, json};

use crate::common::{TestApp, routes};

fn role(id: &str, name_en: &str, created_at: &str) -> Value {
    json!({
        "id": id,
        "name_en": name_en,
        "name_hi": null,
        "description_en": null,
        "description_hi": null,
        "permissions": ["content_management"],
        "is_active": true,
        "created_at": created_at,
        "updated_at": created_at,
    })
}

#[tokio::test]
async fn unconfigured_service_serves_fallback_roles() {
    let app = TestApp::spawn_unconfigured().await;

    let res = app.get(routes::ROLES).await;

    assert_eq!(res.status, 200, "Body: {}", res.text);
    let roles = res.body.as_array().unwrap();
    assert_eq!(roles.len(), 2);
    assert_eq!(roles[0]["id"], "default-admin");
    assert_eq!(roles[0]["name_en"], "Administrator");
    assert_eq!(roles[1]["id"], "default-editor");
    assert_eq!(roles[1]["permissions"], json!(["content_management"]));
    assert!(app.data.requests().is_empty());
}

#[tokio::test]
async fn rejected_service_key_serves_fallback_roles() {
    let app = TestApp::spawn_with(|config| {
        config.data_service.service_role_key = Some("not-the-key".into());
    })
    .await;
    app.seed_roles(vec![role("r1", "Manager", "2026-01-01T00:00:00Z")]);

    let res = app.get(routes::ROLES).await;

    assert_eq!(res.status, 200, "Body: {}", res.text);
    assert_eq!(res.body[0]["id"], "default-admin");
    assert_eq!(app.data.requests().len(), 1);
}

#[tokio::test]
async fn unreachable_service_serves_fallback_roles() {
    let app = TestApp::spawn_unreachable().await;

    let res = app.get(routes::ROLES).await;

    assert_eq!(res.status, 200, "Body: {}", res.text);
    assert_eq!(res.body.as_array().unwrap().len(), 2);
    assert_eq!(res.body[1]["id"], "default-editor");
}

#[tokio::test]
async fn query_failure_is_reported() {
    let app = TestApp::spawn().await;
    app.data.fail_roles(
        400,
        json!({
            "code": "42703",
            "message": "column staff_roles.created_at does not exist",
            "details": null,
            "hint": null,
        }),
    );

    let res = app.get(routes::ROLES).await;

    assert_eq!(res.status, 500, "Body: {}", res.text);
    assert_eq!(res.body["code"], "QUERY_ERROR");
    assert_eq!(
        res.body["error"],
        "column staff_roles.created_at does not exist"
    );
}

#[tokio::test]
async fn live_roles_are_listed_oldest_first() {
    let app = TestApp::spawn().await;
    app.seed_roles(vec![
        role("r1", "Manager", "2026-01-01T00:00:00Z"),
        role("r2", "Priest", "2026-02-01T00:00:00Z"),
    ]);

    let res = app.get(routes::ROLES).await;

    assert_eq!(res.status, 200, "Body: {}", res.text);
    let ids: Vec<&str> = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["r1", "r2"]);

    let requests = app.data.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with("GET staff_roles?"));
    assert!(requests[0].contains("order=created_at.asc"), "{}", requests[0]);
}

#[tokio::test]
async fn empty_live_collection_is_not_replaced_by_fallback() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::ROLES).await;

    assert_eq!(res.status, 200, "Body: {}", res.text);
    assert_eq!(res.body, json!([]));
}

#[tokio::test]
async fn create_role() {
    let app = TestApp::spawn().await;

    let res = app
        .post(
            routes::ROLES,
            &json!({
                "name_en": "Temple Manager",
                "name_hi": "मंदिर प्रबंधक",
                "permissions": ["booking_management", "content_management"],
            }),
        )
        .await;

    assert_eq!(res.status, 201, "Body: {}", res.text);
    assert_eq!(res.body["id"], "role-1");
    assert_eq!(res.body["name_en"], "Temple Manager");
    assert_eq!(res.body["is_active"], true);
    assert_eq!(
        res.body["permissions"],
        json!(["booking_management", "content_management"])
    );

    let listed = app.get(routes::ROLES).await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);
    assert_eq!(listed.body[0]["name_hi"], "मंदिर प्रबंधक");
}

#[tokio::test]
async fn create_role_stores_trimmed_names() {
    let app = TestApp::spawn().await;

    let res = app
        .post(
            routes::ROLES,
            &json!({
                "name_en": "  Editor  ",
                "name_hi": "  ",
                "permissions": ["content_management"],
            }),
        )
        .await;

    assert_eq!(res.status, 201, "Body: {}", res.text);
    assert_eq!(res.body["name_en"], "Editor");
    assert_eq!(res.body["name_hi"], Value::Null);
    assert_eq!(app.data.roles.lock().unwrap()[0]["name_en"], "Editor");
}

#[tokio::test]
async fn create_role_rejects_blank_name_without_writing() {
    let app = TestApp::spawn().await;

    let res = app
        .post(routes::ROLES, &json!({ "name_en": "   ", "permissions": [] }))
        .await;

    assert_eq!(res.status, 400, "Body: {}", res.text);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
    assert!(app.data.requests().is_empty());
}

#[tokio::test]
async fn create_role_rejects_malformed_body() {
    let app = TestApp::spawn().await;

    let res = app
        .post(routes::ROLES, &json!({ "permissions": "admin" }))
        .await;

    assert_eq!(res.status, 400, "Body: {}", res.text);
    assert!(app.data.requests().is_empty());
}

#[tokio::test]
async fn create_role_without_configuration_fails() {
    let app = TestApp::spawn_unconfigured().await;

    let res = app
        .post(
            routes::ROLES,
            &json!({ "name_en": "Manager", "permissions": ["content_management"] }),
        )
        .await;

    assert_eq!(res.status, 500, "Body: {}", res.text);
    assert_eq!(res.body["code"], "CONFIGURATION_ERROR");
}

#[tokio::test]
async fn duplicate_role_name_is_a_write_failure() {
    let app = TestApp::spawn().await;
    app.seed_roles(vec![role("r1", "Manager", "2026-01-01T00:00:00Z")]);

    let res = app
        .post(
            routes::ROLES,
            &json!({ "name_en": "Manager", "permissions": ["content_management"] }),
        )
        .await;

    assert_eq!(res.status, 500, "Body: {}", res.text);
    assert_eq!(res.body["code"], "QUERY_ERROR");
    assert!(res.body["error"].as_str().unwrap().contains("duplicate key"));
}

#[tokio::test]
async fn update_role_keeps_absent_fields() {
    let app = TestApp::spawn().await;
    let mut seeded = role("r1", "Manager", "2026-01-01T00:00:00Z");
    seeded["description_en"] = json!("Runs the temple office");
    app.seed_roles(vec![seeded]);

    let res = app
        .patch(
            &routes::role("r1"),
            &json!({
                "name_en": "Senior Manager",
                "permissions": ["booking_management"],
            }),
        )
        .await;

    assert_eq!(res.status, 200, "Body: {}", res.text);
    assert_eq!(res.body["id"], "r1");
    assert_eq!(res.body["name_en"], "Senior Manager");
    assert_eq!(res.body["description_en"], "Runs the temple office");
    assert_eq!(res.body["permissions"], json!(["booking_management"]));

    let requests = app.data.requests();
    assert!(
        requests
            .iter()
            .any(|r| r.starts_with("PATCH staff_roles?") && r.contains("id=eq.r1")),
        "{requests:?}"
    );
}

#[tokio::test]
async fn update_role_can_clear_nullable_fields() {
    let app = TestApp::spawn().await;
    let mut seeded = role("r1", "Manager", "2026-01-01T00:00:00Z");
    seeded["name_hi"] = json!("प्रबंधक");
    app.seed_roles(vec![seeded]);

    let res = app
        .patch(&routes::role("r1"), &json!({ "name_hi": null }))
        .await;

    assert_eq!(res.status, 200, "Body: {}", res.text);
    assert_eq!(res.body["name_hi"], Value::Null);
    assert_eq!(res.body["name_en"], "Manager");
}

#[tokio::test]
async fn update_unknown_role_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app
        .patch(&routes::role("missing"), &json!({ "name_en": "Anything" }))
        .await;

    assert_eq!(res.status, 404, "Body: {}", res.text);
    assert_eq!(res.body["code"], "NOT_FOUND");
    assert!(
        app.data
            .requests()
            .iter()
            .all(|r| !r.starts_with("PATCH")),
    );
}

#[tokio::test]
async fn role_deleted_during_update_is_not_found() {
    let app = TestApp::spawn().await;
    app.seed_roles(vec![role("r1", "Manager", "2026-01-01T00:00:00Z")]);
    app.data.vanish_roles_on_update();

    let res = app
        .patch(&routes::role("r1"), &json!({ "name_en": "Senior Manager" }))
        .await;

    assert_eq!(res.status, 404, "Body: {}", res.text);
    assert_eq!(res.body["code"], "NOT_FOUND");
    assert_eq!(res.body["error"], "Role 'r1' not found");
}

#[tokio::test]
async fn roles_with_offset_less_timestamps_are_served_live() {
    let app = TestApp::spawn().await;
    app.seed_roles(vec![
        role("r1", "Manager", "2026-01-01T00:00:00.123456"),
        role("r2", "Priest", "2026-02-01 00:00:00+00"),
    ]);

    let res = app.get(routes::ROLES).await;

    assert_eq!(res.status, 200, "Body: {}", res.text);
    assert_eq!(res.body[0]["id"], "r1");
    assert_eq!(res.body[1]["id"], "r2");
    assert!(
        res.body[0]["created_at"]
            .as_str()
            .unwrap()
            .starts_with("2026-01-01T00:00:00.123456")
    );
}

#[tokio::test]
async fn update_role_rejects_blank_name() {
    let app = TestApp::spawn().await;
    app.seed_roles(vec![role("r1", "Manager", "2026-01-01T00:00:00Z")]);

    let res = app
        .patch(&routes::role("r1"), &json!({ "name_en": "" }))
        .await;

    assert_eq!(res.status, 400, "Body: {}", res.text);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn openapi_document_lists_admin_routes() {
    let app = TestApp::spawn_unconfigured().await;

    let res = app.get(routes::OPENAPI).await;

    assert_eq!(res.status, 200, "Body: {}", res.text);
    let paths = res.body["paths"].as_object().unwrap();
    for path in [
        "/api/admin/roles",
        "/api/admin/roles/{id}",
        "/api/admin/staff",
        "/api/admin/staff-list",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
}
