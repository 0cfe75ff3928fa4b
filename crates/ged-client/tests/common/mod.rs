//! Shared helpers for integration tests: an in-process fake of the GED API
//! and a wired client.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::body::Body;
use axum::routing::{get, patch, post};
use axum::{Form, Json, extract::Request};
use serde_json::{Value, json};

use ged_client::ApiClient;
use ged_client::services::Services;
use ged_core::events::EventBus;
use ged_core::traits::storage::KeyValueStore;
use ged_session::storage::MemoryStorage;
use ged_session::{SessionResolver, SessionStore, keys};

/// A node the fake knows about.
#[derive(Debug, Clone)]
pub struct FakeNode {
    pub id: i64,
    pub name: String,
    pub folder: bool,
    pub parent_id: Option<i64>,
}

/// One request as the fake saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub body: String,
}

impl Recorded {
    /// The body parsed as JSON.
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }

    /// The body parsed as a form. Values are not percent-decoded.
    pub fn form(&self) -> HashMap<String, String> {
        self.body
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| (k.to_string(), v.replace('+', " ")))
            .collect()
    }
}

/// Mutable state of the fake API.
#[derive(Debug, Default)]
pub struct FakeState {
    /// Live nodes by id.
    pub live: BTreeMap<i64, FakeNode>,
    /// Top-level trash entries by id.
    pub trash: BTreeMap<i64, FakeNode>,
    /// Descendants trashed together with a folder entry.
    pub subtrees: BTreeMap<i64, Vec<FakeNode>>,
    /// Every request received, in order.
    pub requests: Vec<Recorded>,
    /// Delay applied to trash listings.
    pub list_delay: Option<Duration>,
    /// Delay applied to restores.
    pub restore_delay: Option<Duration>,
    /// Companies returned for any email.
    pub companies: Vec<Value>,
    /// User–business links by id.
    pub links: BTreeMap<i64, Value>,
    /// Collaborators by id.
    pub collaborators: BTreeMap<i64, Value>,
    /// Last id handed out for created records.
    pub last_id: i64,
}

impl FakeState {
    /// Put `node` in the trash, with `children` trashed under it.
    pub fn trash_node(&mut self, node: FakeNode, children: Vec<FakeNode>) {
        self.subtrees.insert(node.id, children);
        self.trash.insert(node.id, node);
    }

    fn trash_row(&self, node: &FakeNode) -> Value {
        let children = self.subtrees.get(&node.id).map_or(0, Vec::len);
        json!({
            "id": node.id,
            "name": node.name,
            "type": if node.folder { "folder" } else { "file" },
            "parent_id": node.parent_id,
            "business_id": 3,
            "type_user": "pj",
            "size": if node.folder { Value::Null } else { json!("12 KB") },
            "extension": if node.folder { Value::Null } else { json!("pdf") },
            "status": null,
            "url": null,
            "created_at": "2024-11-02T08:00:00",
            "deleted_at": "2025-01-10T17:45:12.000123",
            "deleted_by_id": 12,
            "deleted_by_type": "pj",
            "children_count": children,
        })
    }

    /// Put `node` in the live tree.
    pub fn add_live(&mut self, node: FakeNode) {
        self.live.insert(node.id, node);
    }

    fn next_id(&mut self) -> i64 {
        self.last_id = self.last_id.max(100) + 1;
        self.last_id
    }

    fn live_descendants(&self, id: i64) -> Vec<FakeNode> {
        let mut found = Vec::new();
        let mut pending = vec![id];
        while let Some(parent) = pending.pop() {
            for node in self.live.values().filter(|n| n.parent_id == Some(parent)) {
                pending.push(node.id);
                found.push(node.clone());
            }
        }
        found
    }

    /// Whether any trash entry or trashed descendant has `id`.
    pub fn in_trash(&self, id: i64) -> bool {
        self.trash.contains_key(&id) || self.subtrees.values().flatten().any(|n| n.id == id)
    }

    /// Requests whose path starts with `prefix`.
    pub fn requests_to(&self, prefix: &str) -> Vec<Recorded> {
        self.requests
            .iter()
            .filter(|r| r.path.starts_with(prefix))
            .cloned()
            .collect()
    }
}

type Shared = Arc<Mutex<FakeState>>;

fn node_row(node: &FakeNode) -> Value {
    json!({
        "id": node.id,
        "name": node.name,
        "type": if node.folder { "folder" } else { "file" },
        "parent_id": node.parent_id,
        "business_id": 3,
        "status": "Válido",
        "created_at": "2024-11-02T08:00:00",
    })
}

fn not_found(detail: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": detail }))).into_response()
}

fn not_in_trash() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"detail": "Item não encontrado na lixeira"})),
    )
        .into_response()
}

async fn record(
    State(state): State<Shared>,
    request: Request,
    next: axum::middleware::Next,
) -> Response {
    let (parts, body) = request.into_parts();
    let query = parts
        .uri
        .query()
        .map(|q| {
            q.split('&')
                .filter_map(|pair| pair.split_once('='))
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        })
        .unwrap_or_default();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    let recorded = Recorded {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query,
        authorization: parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        body: String::from_utf8_lossy(&bytes).into_owned(),
    };
    state.lock().unwrap().requests.push(recorded);
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

async fn list_trash(State(state): State<Shared>) -> Response {
    let delay = state.lock().unwrap().list_delay;
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    let state = state.lock().unwrap();
    let rows: Vec<Value> = state.trash.values().map(|n| state.trash_row(n)).collect();
    Json(rows).into_response()
}

async fn restore(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let delay = state.lock().unwrap().restore_delay;
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    let mut state = state.lock().unwrap();
    let Some(mut node) = state.trash.remove(&id) else {
        return not_in_trash();
    };
    if let Some(parent) = query.get("restore_to_parent").and_then(|p| p.parse().ok()) {
        node.parent_id = Some(parent);
    }
    for child in state.subtrees.remove(&id).unwrap_or_default() {
        state.live.insert(child.id, child);
    }
    let body = json!({
        "message": "Item restaurado com sucesso",
        "node": {
            "id": node.id,
            "name": node.name,
            "type": if node.folder { "folder" } else { "file" },
            "parent_id": node.parent_id,
        }
    });
    state.live.insert(node.id, node);
    Json(body).into_response()
}

async fn purge(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut state = state.lock().unwrap();
    if state.trash.remove(&id).is_none() {
        return not_in_trash();
    }
    state.subtrees.remove(&id);
    Json(json!({"message": "Item deletado permanentemente"})).into_response()
}

async fn empty(State(state): State<Shared>) -> Response {
    let mut state = state.lock().unwrap();
    let count = state.trash.len() + state.subtrees.values().map(Vec::len).sum::<usize>();
    state.trash.clear();
    state.subtrees.clear();
    Json(json!({"message": format!("{count} itens deletados permanentemente")})).into_response()
}

async fn list_nodes(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let parent: Option<i64> = query.get("parent_id").and_then(|p| p.parse().ok());
    let term = query.get("search_term").map(|t| t.to_lowercase());
    let state = state.lock().unwrap();
    let rows: Vec<Value> = state
        .live
        .values()
        .filter(|n| n.parent_id == parent)
        .filter(|n| term.as_ref().is_none_or(|t| n.name.to_lowercase().contains(t)))
        .map(node_row)
        .collect();
    Json(rows).into_response()
}

async fn create_node(
    State(state): State<Shared>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let mut state = state.lock().unwrap();
    let node = FakeNode {
        id: state.next_id(),
        name: form.get("name").cloned().unwrap_or_default(),
        folder: form.get("type").map(String::as_str) == Some("folder"),
        parent_id: form.get("parent_id").and_then(|p| p.parse().ok()),
    };
    let row = node_row(&node);
    state.add_live(node);
    Json(row).into_response()
}

async fn get_node(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    match state.lock().unwrap().live.get(&id) {
        Some(node) => Json(node_row(node)).into_response(),
        None => not_found("Node não encontrado"),
    }
}

async fn update_node(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let mut state = state.lock().unwrap();
    let Some(node) = state.live.get_mut(&id) else {
        return not_found("Node não encontrado");
    };
    if let Some(name) = form.get("name") {
        node.name = name.clone();
    }
    Json(node_row(node)).into_response()
}

async fn move_node(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut state = state.lock().unwrap();
    let Some(node) = state.live.get_mut(&id) else {
        return not_found("Node não encontrado");
    };
    node.parent_id = query.get("new_parent_id").and_then(|p| p.parse().ok());
    Json(json!({"message": "Item movido com sucesso", "node": node_row(node)})).into_response()
}

async fn delete_node(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut state = state.lock().unwrap();
    let Some(node) = state.live.remove(&id) else {
        return not_found("Node não encontrado");
    };
    let children = state.live_descendants(id);
    for child in &children {
        state.live.remove(&child.id);
    }
    state.trash_node(node, children);
    Json(json!({"message": "Item movido para a lixeira"})).into_response()
}

async fn add_link(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    let id = state.next_id();
    let link = json!({
        "id": id,
        "user_id": 40,
        "type_user": "freelancer",
        "email": body["email"],
        "nome": "João",
        "business_id": body["business_id"],
        "business_type": body["business_type"],
        "permissions": body.get("permissions").cloned().unwrap_or(Value::Null),
        "status": body["status"],
    });
    state.links.insert(id, link.clone());
    Json(link).into_response()
}

async fn list_links(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let business: Option<i64> = query.get("business_id").and_then(|b| b.parse().ok());
    let state = state.lock().unwrap();
    let links: Vec<Value> = state
        .links
        .values()
        .filter(|l| l["business_id"].as_i64() == business)
        .cloned()
        .collect();
    Json(links).into_response()
}

async fn update_link(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    let Some(link) = state.links.get_mut(&id) else {
        return not_found("Vínculo não encontrado");
    };
    for field in ["status", "permissions"] {
        if let Some(value) = body.get(field) {
            link[field] = value.clone();
        }
    }
    Json(link.clone()).into_response()
}

async fn remove_link(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    match state.lock().unwrap().links.remove(&id) {
        Some(_) => Json(json!({"message": "Vínculo removido com sucesso"})).into_response(),
        None => not_found("Vínculo não encontrado"),
    }
}

async fn create_collaborator(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    let id = state.next_id();
    let collaborator = json!({
        "id": id,
        "email": body["email"],
        "name": body["name"],
        "company_id": body["company_id"],
        "company_type": body["company_type"],
        "permissions": body["permissions"],
        "is_active": true,
    });
    state.collaborators.insert(id, collaborator.clone());
    Json(collaborator).into_response()
}

async fn get_collaborator(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    match state.lock().unwrap().collaborators.get(&id) {
        Some(c) => Json(c.clone()).into_response(),
        None => not_found("Colaborador não encontrado"),
    }
}

async fn update_collaborator(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    let Some(collaborator) = state.collaborators.get_mut(&id) else {
        return not_found("Colaborador não encontrado");
    };
    for field in ["name", "permissions"] {
        if let Some(value) = body.get(field) {
            collaborator[field] = value.clone();
        }
    }
    Json(collaborator.clone()).into_response()
}

async fn deactivate_collaborator(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut state = state.lock().unwrap();
    let Some(collaborator) = state.collaborators.get_mut(&id) else {
        return not_found("Colaborador não encontrado");
    };
    collaborator["is_active"] = json!(false);
    Json(json!({"message": "Colaborador desativado com sucesso"})).into_response()
}

async fn check_collaborator_permission(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let state = state.lock().unwrap();
    let Some(collaborator) = state.collaborators.get(&id) else {
        return not_found("Colaborador não encontrado");
    };
    let permission = query.get("permission").cloned().unwrap_or_default();
    let granted = collaborator["permissions"][permission.as_str()] == json!(true);
    Json(json!({
        "collaborator_id": id,
        "permission": permission,
        "has_permission": granted,
    }))
    .into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] != "secret" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Email ou senha inválidos"})),
        )
            .into_response();
    }
    let email = body["email"].as_str().unwrap_or_default().to_string();
    if email.starts_with("collab") {
        Json(json!({
            "message": "Login realizado com sucesso",
            "status": "completo",
            "user": {"id": 12, "name": "Bia", "email": email},
            "permissions": {"manage_files": true, "view_metrics": false},
            "tipo": "Colaborador",
            "company_id": 3,
            "company_type": "pj",
            "is_collaborator": true,
        }))
        .into_response()
    } else {
        Json(json!({
            "message": "Login realizado com sucesso",
            "status": "completo",
            "user": {"id": 20, "nome": "Caio", "email": email},
            "permissions": [["GEDMASTER", "GEDADM"]],
            "tipo": "Freelancer",
            "token": "jwt-owner",
        }))
        .into_response()
    }
}

async fn companies_by_email(
    State(state): State<Shared>,
    Path(email): Path<String>,
) -> Response {
    let state = state.lock().unwrap();
    Json(json!({
        "user": {"user_id": 20, "type_user": "freelancer", "email": email},
        "companies": state.companies,
        "total_companies": state.companies.len(),
    }))
    .into_response()
}

async fn company_metrics(Path(id): Path<i64>, headers: HeaderMap) -> Response {
    if !headers.contains_key("authorization") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Token ausente"})),
        )
            .into_response();
    }
    Json(json!({
        "armazenamento": {"total_bytes": 5_242_880, "total_mb": 5.0, "total_gb": 0.0049},
        "totais": {"arquivos": id * 10, "pastas": 4, "total": id * 10 + 4},
        "status": [{"status_id": 1, "status_name": "Vigente", "status_color": "#0f0", "total": 7}],
    }))
    .into_response()
}

async fn collaborators_forbidden() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({"detail": "Sem permissão para listar colaboradores"})),
    )
        .into_response()
}

/// A running fake API.
pub struct FakeApi {
    pub base_url: String,
    pub state: Shared,
}

impl FakeApi {
    /// Start the fake on an ephemeral local port.
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(FakeState::default()));
        let app = Router::new()
            .route("/api/v1/nodes/trash", get(list_trash))
            .route("/api/v1/nodes/trash/empty", post(empty))
            .route("/api/v1/nodes/trash/{id}/restore", post(restore))
            .route("/api/v1/nodes/trash/{id}/permanent", axum::routing::delete(purge))
            .route("/api/v1/nodes/", get(list_nodes).post(create_node))
            .route(
                "/api/v1/nodes/{id}",
                get(get_node).put(update_node).delete(delete_node),
            )
            .route("/api/v1/nodes/{id}/move", patch(move_node))
            .route(
                "/api/v1/user-business-links/",
                get(list_links).post(add_link),
            )
            .route(
                "/api/v1/user-business-links/{id}",
                axum::routing::put(update_link).delete(remove_link),
            )
            .route("/api/v1/collaborators/", post(create_collaborator))
            .route(
                "/api/v1/collaborators/{id}",
                get(get_collaborator)
                    .put(update_collaborator)
                    .delete(deactivate_collaborator),
            )
            .route(
                "/api/v1/collaborators/{id}/check-permission",
                post(check_collaborator_permission),
            )
            .route("/api/v1/auth/login", post(login))
            .route(
                "/api/v1/user-business-links/companies/by-email/{email}",
                get(companies_by_email),
            )
            .route(
                "/api/v1/metrics/storage/empresa/{id}",
                get(company_metrics),
            )
            .route(
                "/api/v1/collaborators/company/{id}",
                get(collaborators_forbidden),
            )
            .layer(axum::middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }
}

/// Build a fake node.
pub fn node(id: i64, name: &str, folder: bool, parent_id: Option<i64>) -> FakeNode {
    FakeNode {
        id,
        name: name.to_string(),
        folder,
        parent_id,
    }
}

/// A client wired to a fresh fake API and an in-memory session.
pub struct TestApp {
    pub fake: FakeApi,
    pub backend: Arc<MemoryStorage>,
    pub resolver: SessionResolver,
    pub api: ApiClient,
    pub services: Services,
}

impl TestApp {
    pub async fn new() -> Self {
        let fake = FakeApi::start().await;
        let backend = Arc::new(MemoryStorage::new());
        let store = Arc::new(SessionStore::new(backend.clone()));
        let resolver = SessionResolver::new(store.clone(), EventBus::new(8));
        let api = ApiClient::with_base_url(&fake.base_url, Duration::from_secs(5), store).unwrap();
        let services = Services::new(api.clone(), resolver.clone());
        Self {
            fake,
            backend,
            resolver,
            api,
            services,
        }
    }

    /// Persist a payload as if a previous login had written it.
    pub async fn seed_payload(&self, payload: Value) {
        self.backend
            .set(keys::LOGIN_PAYLOAD, &payload.to_string())
            .await
            .unwrap();
        self.resolver.store().invalidate().await;
    }

    /// Sign in as a company collaborator holding `permissions`.
    pub async fn as_collaborator(&self, permissions: Value) {
        self.seed_payload(json!({
            "user": {"id": 12, "name": "Bia", "email": "bia@empresa.com"},
            "tipo": "Colaborador",
            "is_collaborator": true,
            "company_id": 3,
            "company_type": "pj",
            "permissions": permissions,
        }))
        .await;
        self.resolver.store().set_token("collaborator-12").await.unwrap();
    }

    /// Sign in as the owner of a legal-entity account.
    pub async fn as_owner(&self) {
        self.seed_payload(json!({
            "user": {"id": 3, "nome": "Empresa X", "email": "x@empresa.com"},
            "tipo": "PJ",
            "permissions": [["GEDMASTER"]],
        }))
        .await;
        self.resolver.store().set_token("jwt-owner").await.unwrap();
    }
}
