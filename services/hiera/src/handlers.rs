//! Inventory REST API Handlers
//!
//! `/node/` and `/role/` each support list, create, get by name and update by
//! name. Updates only apply to names the registry already knows.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hiera::{
    ErrorCode, ErrorResponse, HieraError, Node, NodeList, NodeRegistry, Role, RoleList,
    RoleRegistry,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error};

/// Shared application state. Each registry sits behind one mutex that is held
/// for the whole of every operation on it.
pub struct AppState {
    pub nodes: Mutex<NodeRegistry>,
    pub roles: Mutex<RoleRegistry>,
}

impl AppState {
    pub fn new(nodes: NodeRegistry, roles: RoleRegistry) -> Self {
        Self {
            nodes: Mutex::new(nodes),
            roles: Mutex::new(roles),
        }
    }
}

/// Request body for creating or updating a node
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NodeRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
}

/// Request body for creating or updating a role
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoleRequest {
    #[serde(default)]
    pub name: String,
}

// ==================== Error Handling ====================

#[derive(Debug)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::BadRequest,
            message: msg.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::NotFound,
            message: msg.into(),
        }
    }

    /// The message is logged, never sent to the client.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InternalError,
            message: msg.into(),
        }
    }
}

impl From<HieraError> for ApiError {
    fn from(e: HieraError) -> Self {
        if e.is_client_error() {
            ApiError::bad_request(e.to_string())
        } else {
            ApiError::internal(e.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self.code {
            ErrorCode::BadRequest => (StatusCode::BAD_REQUEST, self.message),
            ErrorCode::NotFound => (StatusCode::NOT_FOUND, self.message),
            ErrorCode::InternalError => {
                error!("Internal error: {}", self.message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (
            status,
            Json(ErrorResponse {
                error,
                code: self.code,
            }),
        )
            .into_response()
    }
}

/// Parse a JSON body, reporting malformed input as a bad request.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::bad_request(e.to_string()))
}

// ==================== Health Check ====================

pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ==================== Node Handlers ====================

pub async fn list_nodes(State(state): State<Arc<AppState>>) -> Json<NodeList> {
    let nodes = state.nodes.lock().await;
    Json(NodeList {
        nodes: nodes.all().to_vec(),
    })
}

pub async fn create_node(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let request: NodeRequest = parse_body(&body)?;
    let node = Node::new(request.name, request.role)?;

    state.nodes.lock().await.save(&node)?;
    debug!(name = node.name(), role = node.role(), "Saved node");
    Ok(StatusCode::OK)
}

pub async fn get_node(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Node>, ApiError> {
    let nodes = state.nodes.lock().await;
    let node = nodes.find(&name);
    debug!(name = %name, found = node.is_some(), "Node lookup");
    node.cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("node not found"))
}

pub async fn update_node(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let request: NodeRequest = parse_body(&body)?;
    if request.name != name {
        return Err(ApiError::bad_request("inconsistent node names"));
    }
    let node = Node::new(request.name, request.role)?;

    let mut nodes = state.nodes.lock().await;
    if nodes.find(&name).is_none() {
        return Err(ApiError::not_found("node not found"));
    }
    nodes.save(&node)?;
    debug!(name = node.name(), role = node.role(), "Updated node");
    Ok(StatusCode::OK)
}

// ==================== Role Handlers ====================

pub async fn list_roles(State(state): State<Arc<AppState>>) -> Json<RoleList> {
    let roles = state.roles.lock().await;
    Json(RoleList {
        roles: roles.all().to_vec(),
    })
}

pub async fn create_role(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let request: RoleRequest = parse_body(&body)?;
    let role = Role::new(request.name)?;

    state.roles.lock().await.save(&role)?;
    debug!(name = role.name(), "Saved role");
    Ok(StatusCode::OK)
}

pub async fn get_role(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Role>, ApiError> {
    let roles = state.roles.lock().await;
    roles
        .find(&name)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("role not found"))
}

pub async fn update_role(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let request: RoleRequest = parse_body(&body)?;
    if request.name != name {
        return Err(ApiError::bad_request("inconsistent role names"));
    }
    let role = Role::new(request.name)?;

    let mut roles = state.roles.lock().await;
    if roles.find(&name).is_none() {
        return Err(ApiError::not_found("role not found"));
    }
    roles.save(&role)?;
    Ok(StatusCode::OK)
}
