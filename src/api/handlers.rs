//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::state::{AppState, TimerSnapshot};
use super::responses::{
    ApiResponse, ConfigureRequest, HealthResponse, StatusResponse, UsernameRequest,
};

fn respond(action: &str, result: Result<TimerSnapshot, String>) -> Result<Json<ApiResponse>, StatusCode> {
    match result {
        Ok(snapshot) => Ok(Json(ApiResponse::new(action, snapshot))),
        Err(e) => {
            error!("Failed to apply {}: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /start - Begin a countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    info!("Start endpoint called");
    respond("start", state.start())
}

/// Handle POST /reset - Stop and refill the countdown
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    info!("Reset endpoint called");
    respond("reset", state.reset())
}

/// Handle POST /configure - Change the countdown duration
pub async fn configure_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ConfigureRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let input = request.input();
    info!("Configure endpoint called with {:?}", input);
    respond("configure", state.configure_with(input.to_config()))
}

/// Handle PUT /username - Change and persist the username
pub async fn username_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UsernameRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    info!("Username endpoint called");
    respond("username", state.set_username(&request.username))
}

/// Handle GET /status - Return the current countdown and server metadata
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
