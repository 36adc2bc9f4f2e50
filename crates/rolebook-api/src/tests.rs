//! Router tests driving the full API against an in-memory SQLite store.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
  response::Response,
};
use rolebook_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api_router;

async fn app() -> Router {
  let store = SqliteStore::open_in_memory().await.unwrap();
  api_router(Arc::new(store))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> Response {
  let mut builder = Request::builder().method(method).uri(uri);
  if body.is_some() {
    builder = builder.header(header::CONTENT_TYPE, "application/json");
  }
  let req = builder
    .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
    .unwrap();
  app.clone().oneshot(req).await.unwrap()
}

async fn json_body(resp: Response) -> Value {
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

async fn create_admin(app: &Router) -> Value {
  let resp = send(
    app,
    "POST",
    "/roles",
    Some(r#"{"role_key":"admin","description":"Administrator"}"#),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  json_body(resp).await
}

async fn create_user_role(app: &Router, email: &str, role_id: i64) -> Response {
  let body = json!({ "email": email, "role_id": role_id }).to_string();
  send(app, "POST", "/user-roles", Some(&body)).await
}

// ── Roles ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_role_returns_server_fields() {
  let app = app().await;
  let role = create_admin(&app).await;

  assert_eq!(role["id"], 1);
  assert_eq!(role["role_key"], "admin");
  assert_eq!(role["description"], "Administrator");
  assert!(role["created_at"].is_string());
  assert!(role["updated_at"].is_string());
  assert!(role["deleted_at"].is_null());
}

#[tokio::test]
async fn create_then_get_role_round_trips() {
  let app = app().await;
  let created = create_admin(&app).await;

  let resp = send(&app, "GET", "/roles/1", None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(json_body(resp).await, created);
}

#[tokio::test]
async fn malformed_role_body_is_bad_request() {
  let app = app().await;

  let resp = send(&app, "POST", "/roles", Some("{not json")).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert!(json_body(resp).await["error"].is_string());

  let resp = send(&app, "POST", "/roles", Some(r#"{"role_key":"admin"}"#)).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn role_body_without_content_type_is_accepted() {
  let app = app().await;
  let req = Request::builder()
    .method("POST")
    .uri("/roles")
    .body(Body::from(r#"{"role_key":"admin","description":"Administrator"}"#))
    .unwrap();

  let resp = app.clone().oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(json_body(resp).await["role_key"], "admin");
}

#[tokio::test]
async fn user_role_body_with_text_content_type_is_accepted() {
  let app = app().await;
  create_admin(&app).await;
  let req = Request::builder()
    .method("POST")
    .uri("/user-roles")
    .header(header::CONTENT_TYPE, "text/plain")
    .body(Body::from(r#"{"email":"a@x.com","role_id":1}"#))
    .unwrap();

  let resp = app.clone().oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn duplicate_role_key_is_conflict() {
  let app = app().await;
  create_admin(&app).await;

  let resp = send(
    &app,
    "POST",
    "/roles",
    Some(r#"{"role_key":"admin","description":"Dup"}"#),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn get_missing_role_is_not_found() {
  let app = app().await;
  let resp = send(&app, "GET", "/roles/99", None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_integer_id_is_bad_request() {
  let app = app().await;
  for (method, uri) in [
    ("GET", "/roles/abc"),
    ("DELETE", "/roles/abc"),
    ("GET", "/user-roles/abc"),
    ("DELETE", "/user-roles/abc"),
  ] {
    let resp = send(&app, method, uri, None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{method} {uri}");
    assert_eq!(json_body(resp).await["error"], "invalid id");
  }
}

#[tokio::test]
async fn update_role_returns_stored_row() {
  let app = app().await;
  create_admin(&app).await;

  let resp = send(
    &app,
    "PUT",
    "/roles/1",
    Some(r#"{"id":1,"role_key":"root","description":"Superuser"}"#),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let role = json_body(resp).await;
  assert_eq!(role["id"], 1);
  assert_eq!(role["role_key"], "root");
  assert_eq!(role["description"], "Superuser");
}

#[tokio::test]
async fn update_missing_role_is_not_found() {
  let app = app().await;
  let resp = send(
    &app,
    "PUT",
    "/roles/4",
    Some(r#"{"role_key":"root","description":"Superuser"}"#),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleted_role_disappears_from_reads() {
  let app = app().await;
  create_admin(&app).await;

  let resp = send(&app, "DELETE", "/roles/1", None).await;
  assert_eq!(resp.status(), StatusCode::NO_CONTENT);

  let resp = send(&app, "GET", "/roles", None).await;
  assert_eq!(json_body(resp).await, json!([]));

  let resp = send(&app, "GET", "/roles/1", None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);

  let resp = send(&app, "DELETE", "/roles/1", None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ── User roles ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_user_role_returns_created() {
  let app = app().await;
  create_admin(&app).await;

  let resp = create_user_role(&app, "a@x.com", 1).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let ur = json_body(resp).await;
  assert_eq!(ur["id"], 1);
  assert_eq!(ur["email"], "a@x.com");
  assert_eq!(ur["role_id"], 1);
  assert_eq!(ur["role_key"], "admin");
}

#[tokio::test]
async fn user_role_with_missing_role_is_bad_request() {
  let app = app().await;

  let resp = create_user_role(&app, "a@x.com", 1).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let resp = send(&app, "GET", "/user-roles", None).await;
  assert_eq!(json_body(resp).await, json!([]));
}

#[tokio::test]
async fn user_role_with_deleted_role_is_bad_request() {
  let app = app().await;
  create_admin(&app).await;
  send(&app, "DELETE", "/roles/1", None).await;

  let resp = create_user_role(&app, "a@x.com", 1).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_user_roles_filters_by_email() {
  let app = app().await;
  create_admin(&app).await;
  create_user_role(&app, "a@x.com", 1).await;
  create_user_role(&app, "b@x.com", 1).await;

  let resp = send(&app, "GET", "/user-roles?email=b@x.com", None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let list = json_body(resp).await;
  let list = list.as_array().unwrap();
  assert_eq!(list.len(), 1);
  assert_eq!(list[0]["email"], "b@x.com");

  let resp = send(&app, "GET", "/user-roles?email=", None).await;
  assert_eq!(json_body(resp).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn update_user_role_to_missing_role_keeps_prior_row() {
  let app = app().await;
  create_admin(&app).await;
  let before = json_body(create_user_role(&app, "a@x.com", 1).await).await;

  let resp = send(
    &app,
    "PUT",
    "/user-roles/1",
    Some(r#"{"email":"b@x.com","role_id":42}"#),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let resp = send(&app, "GET", "/user-roles/1", None).await;
  assert_eq!(json_body(resp).await, before);
}

#[tokio::test]
async fn update_user_role_returns_stored_row() {
  let app = app().await;
  create_admin(&app).await;
  create_user_role(&app, "a@x.com", 1).await;

  let resp = send(
    &app,
    "PUT",
    "/user-roles/1",
    Some(r#"{"email":"b@x.com","role_id":1}"#),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::OK);
  let ur = json_body(resp).await;
  assert_eq!(ur["email"], "b@x.com");
  assert_eq!(ur["role_key"], "admin");
}

#[tokio::test]
async fn update_deleted_user_role_is_not_found() {
  let app = app().await;
  create_admin(&app).await;
  create_user_role(&app, "a@x.com", 1).await;
  send(&app, "DELETE", "/user-roles/1", None).await;

  let resp = send(
    &app,
    "PUT",
    "/user-roles/1",
    Some(r#"{"email":"b@x.com","role_id":1}"#),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);

  let resp = send(&app, "GET", "/user-roles/1", None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn repeated_email_param_is_json_bad_request() {
  let app = app().await;

  let resp = send(&app, "GET", "/user-roles?email=a@x.com&email=b@x.com", None).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body = json_body(resp).await;
  assert!(
    body["error"].as_str().unwrap().starts_with("invalid query string"),
    "body: {body}"
  );
}

#[tokio::test]
async fn deleting_user_role_twice_reports_not_found() {
  let app = app().await;
  create_admin(&app).await;
  create_user_role(&app, "a@x.com", 1).await;

  let resp = send(&app, "DELETE", "/user-roles/1", None).await;
  assert_eq!(resp.status(), StatusCode::NO_CONTENT);

  let resp = send(&app, "DELETE", "/user-roles/1", None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);

  let resp = send(&app, "DELETE", "/user-roles/500", None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_role_keeps_assignments() {
  let app = app().await;
  create_admin(&app).await;
  create_user_role(&app, "a@x.com", 1).await;

  send(&app, "DELETE", "/roles/1", None).await;

  let resp = send(&app, "GET", "/user-roles/1", None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(json_body(resp).await["role_key"], "admin");

  let resp = send(&app, "GET", "/roles/1", None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ── Middleware ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn every_response_is_json() {
  let app = app().await;
  create_admin(&app).await;

  for (method, uri, body) in [
    ("GET", "/roles", None),
    ("GET", "/roles/7", None),
    ("POST", "/roles", Some("nope")),
    ("DELETE", "/roles/1", None),
  ] {
    let resp = send(&app, method, uri, body).await;
    let ct = resp.headers().get(header::CONTENT_TYPE).unwrap();
    assert_eq!(ct, "application/json", "{method} {uri}");
  }
}

#[tokio::test]
async fn unknown_path_is_json_not_found() {
  let app = app().await;
  let resp = send(&app, "GET", "/permissions", None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "application/json");
  assert_eq!(json_body(resp).await["error"], "no such route");
}

#[tokio::test]
async fn unsupported_method_is_json_method_not_allowed() {
  let app = app().await;
  let resp = send(&app, "PATCH", "/roles/1", Some("{}")).await;
  assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
  assert_eq!(json_body(resp).await["error"], "method not allowed");
}
