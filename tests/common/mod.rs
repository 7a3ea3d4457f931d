//! In-process stub of the platform's CLI API for integration tests. Seed
//! `PlatformState`, spawn the server, and point a `PlatformClient` at
//! `guard.base_url`.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path as AxumPath, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use syncline::progress::ProgressObserver;
use syncline::remote::{PlatformClient, ServerWarning};
use syncline::sync::md5_etag;

pub type SharedState = Arc<Mutex<PlatformState>>;

pub struct PlatformGuard {
    pub base_url: String,
    pub state: SharedState,
    _runtime: tokio::runtime::Runtime,
}

/// How the stub answers token polls.
pub enum DeviceFlow {
    /// Return `pending` this many times, then `approved`.
    ApproveAfter(u32),
    PendingForever,
    Expired,
    Invalid,
}

pub struct PlatformState {
    pub device: DeviceFlow,
    pub device_expires_in: u64,
    pub device_interval: u64,
    pub token: String,
    pub revoked: bool,
    pub user_name: String,
    pub user_email: String,
    pub projects: HashMap<String, ProjectRecord>,
    pub next_project_seq: u64,
    /// Paths the server refuses by policy; reported in `errors[]` with
    /// kind `excluded`.
    pub excluded_paths: Vec<String>,
}

impl Default for PlatformState {
    fn default() -> Self {
        Self {
            device: DeviceFlow::ApproveAfter(0),
            device_expires_in: 60,
            device_interval: 0,
            token: "test-token".to_string(),
            revoked: false,
            user_name: "Test User".to_string(),
            user_email: "test@example.com".to_string(),
            projects: HashMap::new(),
            next_project_seq: 1,
            excluded_paths: Vec::new(),
        }
    }
}

#[derive(Default)]
pub struct ProjectRecord {
    pub name: String,
    pub version: u64,
    pub files: HashMap<String, Vec<u8>>,
}

pub fn spawn_platform(state: PlatformState) -> PlatformGuard {
    let state = Arc::new(Mutex::new(state));
    let app = router(state.clone());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("build tokio runtime");
    let listener = runtime
        .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    runtime.spawn(async move {
        axum::serve(listener, app).await.expect("serve stub platform");
    });

    PlatformGuard {
        base_url: format!("http://{addr}"),
        state,
        _runtime: runtime,
    }
}

pub fn authed_client(guard: &PlatformGuard) -> PlatformClient {
    let token = guard.state.lock().unwrap().token.clone();
    PlatformClient::new(&guard.base_url, Some(token)).expect("build client")
}

pub fn seed_project(guard: &PlatformGuard, id: &str, version: u64, files: &[(&str, &[u8])]) {
    let mut st = guard.state.lock().unwrap();
    st.projects.insert(
        id.to_string(),
        ProjectRecord {
            name: id.to_string(),
            version,
            files: files
                .iter()
                .map(|(path, bytes)| (path.to_string(), bytes.to_vec()))
                .collect(),
        },
    );
}

#[derive(Default)]
pub struct CollectingProgress {
    pub messages: Vec<String>,
    pub warnings: Vec<ServerWarning>,
}

impl ProgressObserver for CollectingProgress {
    fn progress(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }

    fn warning(&mut self, warning: &ServerWarning) {
        self.warnings.push(warning.clone());
    }
}

fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/cli/auth/device", post(create_device))
        .route("/api/cli/auth/token", post(poll_token).delete(revoke_token))
        .route("/api/cli/projects", get(list_projects))
        .route("/api/cli/projects/create-push", post(create_push))
        .route("/api/cli/projects/:id/sync/manifest", get(get_manifest))
        .route("/api/cli/projects/:id/sync/file", get(download_file))
        .route("/api/cli/projects/:id/sync/push", post(push_project))
        .with_state(state)
}

fn authorized(headers: &HeaderMap, st: &PlatformState) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", st.token))
        .unwrap_or(false)
}

fn manifest_files(record: &ProjectRecord) -> Value {
    let files: serde_json::Map<String, Value> = record
        .files
        .iter()
        .map(|(path, bytes)| {
            (
                path.clone(),
                json!({
                    "etag": format!("\"{}\"", md5_etag(bytes)),
                    "size": bytes.len(),
                    "lastModified": "2026-01-01T00:00:00Z",
                }),
            )
        })
        .collect();
    Value::Object(files)
}

async fn create_device(State(state): State<SharedState>) -> Response {
    let st = state.lock().unwrap();
    Json(json!({
        "deviceCode": "dc-1",
        "userCode": "ABCD-1234",
        "verificationUrl": "http://example.invalid/activate",
        "expiresIn": st.device_expires_in,
        "interval": st.device_interval,
    }))
    .into_response()
}

async fn poll_token(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    if body.get("deviceCode").and_then(|v| v.as_str()) != Some("dc-1") {
        return StatusCode::NOT_FOUND.into_response();
    }
    let mut guard = state.lock().unwrap();
    let st = &mut *guard;
    let payload = match st.device {
        DeviceFlow::Invalid => return StatusCode::NOT_FOUND.into_response(),
        DeviceFlow::Expired => {
            return (
                StatusCode::GONE,
                Json(json!({"error": "device code expired"})),
            )
                .into_response();
        }
        DeviceFlow::PendingForever => json!({"status": "pending"}),
        DeviceFlow::ApproveAfter(0) => json!({
            "status": "approved",
            "token": st.token,
            "user": {"name": st.user_name, "email": st.user_email},
        }),
        DeviceFlow::ApproveAfter(ref mut polls_left) => {
            *polls_left -= 1;
            json!({"status": "pending"})
        }
    };
    Json(payload).into_response()
}

async fn revoke_token(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let mut st = state.lock().unwrap();
    if !authorized(&headers, &st) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    st.revoked = true;
    StatusCode::OK.into_response()
}

async fn list_projects(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let st = state.lock().unwrap();
    if !authorized(&headers, &st) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let projects: Vec<Value> = st
        .projects
        .iter()
        .map(|(id, p)| {
            json!({
                "id": id,
                "name": p.name,
                "slug": p.name,
                "orgId": "org-1",
                "orgName": "Test Org",
                "orgSlug": "test-org",
                "role": "admin",
                "syncVersion": p.version,
            })
        })
        .collect();
    Json(projects).into_response()
}

async fn get_manifest(
    State(state): State<SharedState>,
    AxumPath(id): AxumPath<String>,
    headers: HeaderMap,
) -> Response {
    let st = state.lock().unwrap();
    if !authorized(&headers, &st) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let Some(p) = st.projects.get(&id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "project not found"})),
        )
            .into_response();
    };
    Json(json!({
        "projectId": id,
        "version": p.version,
        "prefix": "",
        "files": manifest_files(p),
    }))
    .into_response()
}

#[derive(serde::Deserialize)]
struct FileQuery {
    path: String,
}

async fn download_file(
    State(state): State<SharedState>,
    AxumPath(id): AxumPath<String>,
    Query(query): Query<FileQuery>,
    headers: HeaderMap,
) -> Response {
    let st = state.lock().unwrap();
    if !authorized(&headers, &st) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let Some(p) = st.projects.get(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    match p.files.get(&query.path) {
        Some(bytes) => bytes.clone().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn push_project(
    State(state): State<SharedState>,
    AxumPath(id): AxumPath<String>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let mut base_version: Option<u64> = None;
    let mut deleted: Vec<String> = Vec::new();
    let mut files: Vec<(String, Vec<u8>)> = Vec::new();
    while let Some(field) = multipart.next_field().await.expect("read multipart field") {
        let name = field.name().unwrap_or("").to_string();
        let data = field.bytes().await.expect("read multipart bytes");
        match name.as_str() {
            "baseVersion" => base_version = String::from_utf8_lossy(&data).parse().ok(),
            "deleted" => deleted = serde_json::from_slice(&data).expect("parse deleted list"),
            _ => files.push((name, data.to_vec())),
        }
    }

    let mut st = state.lock().unwrap();
    if !authorized(&headers, &st) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let excluded = st.excluded_paths.clone();
    let Some(p) = st.projects.get_mut(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let base_version = base_version.unwrap_or(0);
    if base_version != p.version {
        return (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "version conflict",
                "currentVersion": p.version,
                "baseVersion": base_version,
            })),
        )
            .into_response();
    }

    let mut uploaded = Vec::new();
    let mut errors = Vec::new();
    for (path, bytes) in files {
        if excluded.contains(&path) {
            errors.push(json!({
                "path": path,
                "message": "path excluded by project policy",
                "kind": "excluded",
            }));
            continue;
        }
        p.files.insert(path.clone(), bytes);
        uploaded.push(path);
    }

    let mut removed = Vec::new();
    for path in deleted {
        if p.files.remove(&path).is_some() {
            removed.push(path);
        }
    }

    p.version += 1;
    Json(json!({
        "version": p.version,
        "uploaded": uploaded,
        "deleted": removed,
        "errors": errors,
        "files": manifest_files(p),
    }))
    .into_response()
}

async fn create_push(
    State(state): State<SharedState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let mut name: Option<String> = None;
    let mut files: Vec<(String, Vec<u8>)> = Vec::new();
    while let Some(field) = multipart.next_field().await.expect("read multipart field") {
        let field_name = field.name().unwrap_or("").to_string();
        let data = field.bytes().await.expect("read multipart bytes");
        match field_name.as_str() {
            "orgId" | "figmaProjectId" => {}
            "name" => name = Some(String::from_utf8_lossy(&data).to_string()),
            _ => files.push((field_name, data.to_vec())),
        }
    }

    let mut st = state.lock().unwrap();
    if !authorized(&headers, &st) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let seq = st.next_project_seq;
    st.next_project_seq += 1;
    let id = format!("proj-{seq}");
    let excluded = st.excluded_paths.clone();

    let mut record = ProjectRecord {
        name: name.unwrap_or_else(|| "untitled".to_string()),
        version: 1,
        files: HashMap::new(),
    };
    let mut uploaded = Vec::new();
    let mut errors = Vec::new();
    for (path, bytes) in files {
        if excluded.contains(&path) {
            errors.push(json!({
                "path": path,
                "message": "path excluded by project policy",
                "kind": "excluded",
            }));
            continue;
        }
        record.files.insert(path.clone(), bytes);
        uploaded.push(path);
    }

    let body = json!({
        "projectId": id,
        "syncVersion": record.version,
        "uploaded": uploaded,
        "errors": errors,
        "files": manifest_files(&record),
    });
    st.projects.insert(id, record);
    Json(body).into_response()
}
