//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    error::{IntervalError, StateError},
    interval::{Interval, IntervalSpec},
    state::{AppState, TimerView},
    timer::TimerSnapshot,
};
use super::responses::{
    ApiResponse, CreateTimerRequest, ErrorResponse, ExtendRequest, HealthResponse,
    StatusResponse, TimerListResponse,
};

type Rejection = (StatusCode, Json<ErrorResponse>);
type HandlerResult<T> = Result<Json<T>, Rejection>;

/// Map a registry error to a status code and log it
fn reject(action: &str, err: StateError) -> Rejection {
    let status = match &err {
        StateError::NotFound(_) => StatusCode::NOT_FOUND,
        StateError::Timer(IntervalError::NotPaused | IntervalError::InvalidState(_)) => {
            StatusCode::CONFLICT
        }
        StateError::Timer(_) => StatusCode::BAD_REQUEST,
        StateError::IdsExhausted => StatusCode::SERVICE_UNAVAILABLE,
        StateError::Lock(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        error!("Failed to {}: {}", action, err);
    } else {
        warn!("Rejected {}: {}", action, err);
    }

    (status, Json(ErrorResponse::new(err.to_string())))
}

fn parse_interval(action: &str, spec: IntervalSpec) -> Result<Interval, Rejection> {
    Interval::try_from(spec).map_err(|e| reject(action, e.into()))
}

fn respond(message: &str, result: Result<TimerView, StateError>, action: &str) -> HandlerResult<ApiResponse> {
    match result {
        Ok(timer) => {
            info!("{} timer {}", message, timer.id);
            Ok(Json(ApiResponse::for_timer(message.to_string(), timer)))
        }
        Err(e) => Err(reject(action, e)),
    }
}

/// Handle POST /timers - Create a timer
pub async fn create_timer_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateTimerRequest>,
) -> HandlerResult<ApiResponse> {
    let name = request.name.or_else(|| request.interval.name().map(str::to_string));
    let interval = parse_interval("create timer", request.interval)?;
    respond(
        "Created",
        state.create_timer(interval, name.as_deref()),
        "create timer",
    )
}

/// Handle POST /timers/restore - Register a timer from a snapshot
pub async fn restore_timer_handler(
    State(state): State<Arc<AppState>>,
    Json(snapshot): Json<serde_json::Value>,
) -> HandlerResult<ApiResponse> {
    respond("Restored", state.restore_timer(snapshot), "restore timer")
}

/// Handle GET /timers - List all timers
pub async fn list_timers_handler(State(state): State<Arc<AppState>>) -> HandlerResult<TimerListResponse> {
    let timers = state.list_timers().map_err(|e| reject("list timers", e))?;
    Ok(Json(TimerListResponse {
        count: timers.len(),
        timers,
    }))
}

/// Handle GET /timers/:id
pub async fn get_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> HandlerResult<TimerView> {
    state.get_timer(id).map(Json).map_err(|e| reject("get timer", e))
}

/// Handle DELETE /timers/:id
pub async fn remove_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> HandlerResult<ApiResponse> {
    respond("Removed", state.remove_timer(id), "remove timer")
}

/// Handle POST /timers/:id/pause
pub async fn pause_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> HandlerResult<ApiResponse> {
    respond("Paused", state.pause_timer(id), "pause timer")
}

/// Handle POST /timers/:id/resume
pub async fn resume_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> HandlerResult<ApiResponse> {
    respond("Resumed", state.resume_timer(id), "resume timer")
}

/// Handle POST /timers/:id/reset
pub async fn reset_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> HandlerResult<ApiResponse> {
    respond("Reset", state.reset_timer(id), "reset timer")
}

/// Handle POST /timers/:id/expire
pub async fn expire_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> HandlerResult<ApiResponse> {
    respond("Expired", state.expire_timer(id), "expire timer")
}

/// Handle POST /timers/:id/extend
pub async fn extend_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(request): Json<ExtendRequest>,
) -> HandlerResult<ApiResponse> {
    let amount = parse_interval("extend timer", request.interval)?;
    respond("Extended", state.extend_timer(id, amount), "extend timer")
}

/// Handle GET /timers/:id/snapshot
pub async fn snapshot_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> HandlerResult<TimerSnapshot> {
    state
        .snapshot_timer(id)
        .map(Json)
        .map_err(|e| reject("snapshot timer", e))
}

/// Handle GET /status - Return registry overview
pub async fn status_handler(State(state): State<Arc<AppState>>) -> HandlerResult<StatusResponse> {
    let timers = state.list_timers().map_err(|e| reject("read status", e))?;
    let paused = timers.iter().filter(|t| t.paused).count();
    let expired = timers.iter().filter(|t| t.expired).count();
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer_count: timers.len(),
        running: timers.len() - paused - expired,
        paused,
        expired,
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
