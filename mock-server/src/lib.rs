//! In-memory mock of the panel's application API.
//!
//! Serves users, nodes (with configuration and allocations) and locations
//! under `/api/application`, wrapped in the panel's `{object, attributes}`
//! and `{object, data}` envelopes. Every request must carry
//! `Authorization: Bearer <token>` for the token the app was built with.
//!
//! The records here are defined independently of the client crate so the
//! integration tests catch schema drift.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub external_id: Option<String>,
    pub uuid: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub language: String,
    pub root_admin: bool,
    #[serde(rename = "2fa")]
    pub two_factor: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct UserInput {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub external_id: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Location {
    pub id: u32,
    pub short: String,
    pub long: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct LocationInput {
    pub short: String,
    #[serde(default)]
    pub long: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    pub id: u32,
    pub uuid: Uuid,
    pub public: bool,
    pub name: String,
    pub description: Option<String>,
    pub location_id: u32,
    pub fqdn: String,
    pub scheme: String,
    pub behind_proxy: bool,
    pub maintenance_mode: bool,
    pub memory: i64,
    pub memory_overallocate: i64,
    pub disk: i64,
    pub disk_overallocate: i64,
    pub upload_size: u32,
    pub daemon_listen: u16,
    pub daemon_sftp: u16,
    pub daemon_base: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct NodeInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub public: bool,
    pub behind_proxy: bool,
    pub maintenance_mode: bool,
    pub location_id: u32,
    pub fqdn: String,
    pub scheme: String,
    pub memory: i64,
    pub memory_overallocate: i64,
    pub disk: i64,
    pub disk_overallocate: i64,
    pub upload_size: u32,
    pub daemon_listen: u16,
    pub daemon_sftp: u16,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Allocation {
    pub id: u32,
    pub ip: String,
    pub alias: Option<String>,
    pub port: u16,
    pub notes: Option<String>,
    pub assigned: bool,
    #[serde(skip)]
    pub node_id: u32,
}

#[derive(Deserialize)]
pub struct AllocationInput {
    pub ip: String,
    #[serde(default)]
    pub alias: Option<String>,
    pub ports: Vec<String>,
}

/// Everything the mock panel stores. Ids are handed out from one counter,
/// so iteration order of each map is creation order.
#[derive(Debug, Default)]
pub struct Panel {
    next_id: u32,
    pub users: BTreeMap<u32, User>,
    pub locations: BTreeMap<u32, Location>,
    pub nodes: BTreeMap<u32, Node>,
    pub allocations: BTreeMap<u32, Allocation>,
}

impl Panel {
    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone)]
pub struct AppState {
    token: Arc<str>,
    panel: Arc<RwLock<Panel>>,
}

pub fn app(token: &str) -> Router {
    let state = AppState {
        token: Arc::from(token),
        panel: Arc::new(RwLock::new(Panel::default())),
    };
    let api = Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/external/{external_id}", get(get_user_by_external_id))
        .route("/users/{id}", get(get_user).patch(update_user).delete(delete_user))
        .route("/locations", get(list_locations).post(create_location))
        .route(
            "/locations/{id}",
            get(get_location).patch(update_location).delete(delete_location),
        )
        .route("/nodes", get(list_nodes).post(create_node))
        .route("/nodes/{id}", get(get_node).patch(update_node).delete(delete_node))
        .route("/nodes/{id}/configuration", get(get_node_configuration))
        .route(
            "/nodes/{id}/allocations",
            get(list_allocations).post(create_allocations),
        )
        .route(
            "/nodes/{id}/allocations/{allocation_id}",
            axum::routing::delete(delete_allocation),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_token))
        .with_state(state);
    Router::new().nest("/api/application", api)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token)).await
}

// --- envelopes and errors ---

fn item<T: Serialize>(object: &str, value: &T) -> Json<Value> {
    Json(json!({ "object": object, "attributes": value }))
}

fn list<'a, T: Serialize + 'a>(object: &str, values: impl Iterator<Item = &'a T>) -> Json<Value> {
    let data: Vec<Value> = values
        .map(|v| json!({ "object": object, "attributes": v }))
        .collect();
    Json(json!({ "object": "list", "data": data }))
}

/// An error rendered the way the panel renders them.
#[derive(Debug)]
pub struct PanelError {
    status: StatusCode,
    code: &'static str,
    detail: String,
}

impl PanelError {
    fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            code: "NotFoundHttpException",
            detail: "The requested resource could not be found on the server.".to_string(),
        }
    }

    fn validation(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            code: "ValidationException",
            detail: detail.into(),
        }
    }

    fn conflict(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            code: "DisplayException",
            detail: detail.into(),
        }
    }
}

impl IntoResponse for PanelError {
    fn into_response(self) -> Response {
        let body = json!({ "errors": [{
            "code": self.code,
            "status": self.status.as_u16().to_string(),
            "detail": self.detail,
        }]});
        (self.status, Json(body)).into_response()
    }
}

async fn require_token(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let expected = format!("Bearer {}", state.token);
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected && !state.token.is_empty());
    if !authorized {
        tracing::warn!(path = %request.uri().path(), "Rejected request without valid token");
        return PanelError {
            status: StatusCode::UNAUTHORIZED,
            code: "AuthenticationException",
            detail: "Unauthenticated.".to_string(),
        }
        .into_response();
    }
    next.run(request).await
}

fn require(field: &str, value: &str) -> Result<(), PanelError> {
    if value.trim().is_empty() {
        return Err(PanelError::validation(format!("The {field} field is required.")));
    }
    Ok(())
}

// --- users ---

async fn list_users(State(state): State<AppState>) -> Json<Value> {
    let panel = state.panel.read().await;
    list("user", panel.users.values())
}

async fn get_user(State(state): State<AppState>, Path(id): Path<u32>) -> Result<Json<Value>, PanelError> {
    let panel = state.panel.read().await;
    let user = panel.users.get(&id).ok_or_else(PanelError::not_found)?;
    Ok(item("user", user))
}

async fn get_user_by_external_id(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
) -> Result<Json<Value>, PanelError> {
    let panel = state.panel.read().await;
    let user = panel
        .users
        .values()
        .find(|u| u.external_id.as_deref() == Some(external_id.as_str()))
        .ok_or_else(PanelError::not_found)?;
    Ok(item("user", user))
}

fn check_user_input(panel: &Panel, input: &UserInput, skip_id: Option<u32>) -> Result<(), PanelError> {
    require("email", &input.email)?;
    require("username", &input.username)?;
    let taken = panel
        .users
        .values()
        .filter(|u| Some(u.id) != skip_id)
        .any(|u| u.email == input.email || u.username == input.username);
    if taken {
        return Err(PanelError::validation("The email or username has already been taken."));
    }
    Ok(())
}

async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<UserInput>,
) -> Result<(StatusCode, Json<Value>), PanelError> {
    let mut panel = state.panel.write().await;
    check_user_input(&panel, &input, None)?;
    let now = Utc::now();
    let user = User {
        id: panel.next_id(),
        external_id: input.external_id,
        uuid: Uuid::new_v4(),
        username: input.username,
        email: input.email,
        first_name: input.first_name,
        last_name: input.last_name,
        language: "en".to_string(),
        root_admin: false,
        two_factor: false,
        created_at: now,
        updated_at: now,
    };
    let body = item("user", &user);
    panel.users.insert(user.id, user);
    Ok((StatusCode::CREATED, body))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(input): Json<UserInput>,
) -> Result<Json<Value>, PanelError> {
    let mut panel = state.panel.write().await;
    check_user_input(&panel, &input, Some(id))?;
    let user = panel.users.get_mut(&id).ok_or_else(PanelError::not_found)?;
    user.email = input.email;
    user.username = input.username;
    user.first_name = input.first_name;
    user.last_name = input.last_name;
    if input.external_id.is_some() {
        user.external_id = input.external_id;
    }
    user.updated_at = Utc::now();
    Ok(item("user", user))
}

async fn delete_user(State(state): State<AppState>, Path(id): Path<u32>) -> Result<StatusCode, PanelError> {
    let mut panel = state.panel.write().await;
    panel
        .users
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(PanelError::not_found)
}

// --- locations ---

async fn list_locations(State(state): State<AppState>) -> Json<Value> {
    let panel = state.panel.read().await;
    list("location", panel.locations.values())
}

async fn get_location(State(state): State<AppState>, Path(id): Path<u32>) -> Result<Json<Value>, PanelError> {
    let panel = state.panel.read().await;
    let location = panel.locations.get(&id).ok_or_else(PanelError::not_found)?;
    Ok(item("location", location))
}

async fn create_location(
    State(state): State<AppState>,
    Json(input): Json<LocationInput>,
) -> Result<(StatusCode, Json<Value>), PanelError> {
    require("short", &input.short)?;
    let mut panel = state.panel.write().await;
    let now = Utc::now();
    let location = Location {
        id: panel.next_id(),
        short: input.short,
        long: input.long,
        created_at: now,
        updated_at: now,
    };
    let body = item("location", &location);
    panel.locations.insert(location.id, location);
    Ok((StatusCode::CREATED, body))
}

async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(input): Json<LocationInput>,
) -> Result<Json<Value>, PanelError> {
    require("short", &input.short)?;
    let mut panel = state.panel.write().await;
    let location = panel.locations.get_mut(&id).ok_or_else(PanelError::not_found)?;
    location.short = input.short;
    location.long = input.long;
    location.updated_at = Utc::now();
    Ok(item("location", location))
}

async fn delete_location(State(state): State<AppState>, Path(id): Path<u32>) -> Result<StatusCode, PanelError> {
    let mut panel = state.panel.write().await;
    if !panel.locations.contains_key(&id) {
        return Err(PanelError::not_found());
    }
    if panel.nodes.values().any(|n| n.location_id == id) {
        return Err(PanelError::conflict("Cannot delete a location that has active nodes attached to it."));
    }
    panel.locations.remove(&id);
    Ok(StatusCode::NO_CONTENT)
}

// --- nodes ---

async fn list_nodes(State(state): State<AppState>) -> Json<Value> {
    let panel = state.panel.read().await;
    list("node", panel.nodes.values())
}

async fn get_node(State(state): State<AppState>, Path(id): Path<u32>) -> Result<Json<Value>, PanelError> {
    let panel = state.panel.read().await;
    let node = panel.nodes.get(&id).ok_or_else(PanelError::not_found)?;
    Ok(item("node", node))
}

fn check_node_input(panel: &Panel, input: &NodeInput) -> Result<(), PanelError> {
    require("name", &input.name)?;
    require("fqdn", &input.fqdn)?;
    if !matches!(input.scheme.as_str(), "http" | "https") {
        return Err(PanelError::validation("The selected scheme is invalid."));
    }
    if !panel.locations.contains_key(&input.location_id) {
        return Err(PanelError::validation("The selected location id is invalid."));
    }
    Ok(())
}

fn apply_node_input(node: &mut Node, input: NodeInput) {
    node.name = input.name;
    node.description = input.description;
    node.public = input.public;
    node.behind_proxy = input.behind_proxy;
    node.maintenance_mode = input.maintenance_mode;
    node.location_id = input.location_id;
    node.fqdn = input.fqdn;
    node.scheme = input.scheme;
    node.memory = input.memory;
    node.memory_overallocate = input.memory_overallocate;
    node.disk = input.disk;
    node.disk_overallocate = input.disk_overallocate;
    node.upload_size = input.upload_size;
    node.daemon_listen = input.daemon_listen;
    node.daemon_sftp = input.daemon_sftp;
}

async fn create_node(
    State(state): State<AppState>,
    Json(input): Json<NodeInput>,
) -> Result<(StatusCode, Json<Value>), PanelError> {
    let mut panel = state.panel.write().await;
    check_node_input(&panel, &input)?;
    let now = Utc::now();
    let mut node = Node {
        id: panel.next_id(),
        uuid: Uuid::new_v4(),
        public: false,
        name: String::new(),
        description: None,
        location_id: 0,
        fqdn: String::new(),
        scheme: String::new(),
        behind_proxy: false,
        maintenance_mode: false,
        memory: 0,
        memory_overallocate: 0,
        disk: 0,
        disk_overallocate: 0,
        upload_size: 0,
        daemon_listen: 0,
        daemon_sftp: 0,
        daemon_base: "/var/lib/pterodactyl/volumes".to_string(),
        created_at: now,
        updated_at: now,
    };
    apply_node_input(&mut node, input);
    let body = item("node", &node);
    panel.nodes.insert(node.id, node);
    Ok((StatusCode::CREATED, body))
}

async fn update_node(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(input): Json<NodeInput>,
) -> Result<Json<Value>, PanelError> {
    let mut panel = state.panel.write().await;
    check_node_input(&panel, &input)?;
    let node = panel.nodes.get_mut(&id).ok_or_else(PanelError::not_found)?;
    apply_node_input(node, input);
    node.updated_at = Utc::now();
    Ok(item("node", node))
}

async fn delete_node(State(state): State<AppState>, Path(id): Path<u32>) -> Result<StatusCode, PanelError> {
    let mut panel = state.panel.write().await;
    panel.nodes.remove(&id).ok_or_else(PanelError::not_found)?;
    panel.allocations.retain(|_, a| a.node_id != id);
    Ok(StatusCode::NO_CONTENT)
}

async fn get_node_configuration(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Value>, PanelError> {
    let panel = state.panel.read().await;
    let node = panel.nodes.get(&id).ok_or_else(PanelError::not_found)?;
    Ok(Json(json!({
        "debug": false,
        "uuid": node.uuid,
        "token_id": format!("token-{}", node.id),
        "token": node.uuid.simple().to_string(),
        "api": {
            "host": "0.0.0.0",
            "port": node.daemon_listen,
            "ssl": {
                "enabled": node.scheme == "https",
                "cert": format!("/etc/letsencrypt/live/{}/fullchain.pem", node.fqdn),
                "key": format!("/etc/letsencrypt/live/{}/privkey.pem", node.fqdn),
            },
            "upload_limit": node.upload_size,
        },
        "system": {
            "data": node.daemon_base,
            "sftp": { "bind_port": node.daemon_sftp },
        },
        "allowed_mounts": [],
        "remote": "http://panel.localhost",
    })))
}

// --- allocations ---

async fn list_allocations(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Value>, PanelError> {
    let panel = state.panel.read().await;
    if !panel.nodes.contains_key(&id) {
        return Err(PanelError::not_found());
    }
    Ok(list("allocation", panel.allocations.values().filter(|a| a.node_id == id)))
}

/// Expand `"25565"` or `"25565-25570"` into individual ports.
fn parse_ports(spec: &str) -> Result<Vec<u16>, PanelError> {
    let invalid = || PanelError::validation(format!("The port {spec:?} is invalid."));
    let parse = |s: &str| s.trim().parse::<u16>().map_err(|_| invalid());
    match spec.split_once('-') {
        Some((start, end)) => {
            let (start, end) = (parse(start)?, parse(end)?);
            if start > end {
                return Err(invalid());
            }
            Ok((start..=end).collect())
        }
        None => Ok(vec![parse(spec)?]),
    }
}

async fn create_allocations(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(input): Json<AllocationInput>,
) -> Result<StatusCode, PanelError> {
    require("ip", &input.ip)?;
    let mut ports = Vec::new();
    for spec in &input.ports {
        ports.extend(parse_ports(spec)?);
    }
    if ports.is_empty() {
        return Err(PanelError::validation("The ports field is required."));
    }

    let mut panel = state.panel.write().await;
    if !panel.nodes.contains_key(&id) {
        return Err(PanelError::not_found());
    }
    for port in ports {
        let exists = panel
            .allocations
            .values()
            .any(|a| a.node_id == id && a.ip == input.ip && a.port == port);
        if exists {
            continue;
        }
        let allocation = Allocation {
            id: panel.next_id(),
            ip: input.ip.clone(),
            alias: input.alias.clone(),
            port,
            notes: None,
            assigned: false,
            node_id: id,
        };
        panel.allocations.insert(allocation.id, allocation);
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_allocation(
    State(state): State<AppState>,
    Path((id, allocation_id)): Path<(u32, u32)>,
) -> Result<StatusCode, PanelError> {
    let mut panel = state.panel.write().await;
    let on_node = panel
        .allocations
        .get(&allocation_id)
        .is_some_and(|a| a.node_id == id);
    if !on_node {
        return Err(PanelError::not_found());
    }
    panel.allocations.remove(&allocation_id);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_serializes_two_factor_flag_as_2fa() {
        let user = User {
            id: 1,
            external_id: None,
            uuid: Uuid::nil(),
            username: "admin".to_string(),
            email: "admin@example.com".to_string(),
            first_name: "Ad".to_string(),
            last_name: "Min".to_string(),
            language: "en".to_string(),
            root_admin: true,
            two_factor: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["2fa"], true);
        assert!(json.get("two_factor").is_none());
    }

    #[test]
    fn allocation_hides_node_id() {
        let allocation = Allocation {
            id: 3,
            ip: "10.0.0.1".to_string(),
            alias: None,
            port: 25565,
            notes: None,
            assigned: false,
            node_id: 9,
        };
        let json = serde_json::to_value(&allocation).unwrap();
        assert!(json.get("node_id").is_none());
    }

    #[test]
    fn parse_ports_handles_single_and_range() {
        assert_eq!(parse_ports("25565").unwrap(), vec![25565]);
        assert_eq!(parse_ports("25565-25567").unwrap(), vec![25565, 25566, 25567]);
        assert!(parse_ports("25567-25565").is_err());
        assert!(parse_ports("http").is_err());
    }

    #[test]
    fn user_input_external_id_is_optional() {
        let input: UserInput = serde_json::from_str(
            r#"{"email":"a@example.com","username":"a","first_name":"A","last_name":"Z"}"#,
        )
        .unwrap();
        assert!(input.external_id.is_none());
    }

    #[test]
    fn panel_ids_increase_across_resources() {
        let mut panel = Panel::default();
        assert_eq!(panel.next_id(), 1);
        assert_eq!(panel.next_id(), 2);
    }
}
