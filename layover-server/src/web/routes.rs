//! HTTP route handlers.

use askama::Template;
use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{JourneyValidationResult, ValidationResult};
use crate::planner::PlanError;
use crate::sessions::{SessionError, SessionId};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/plan", post(plan_form))
        .route("/sessions/:id", get(session_page))
        .route("/sessions/:id/chat", post(chat_form))
        .route("/api/locations/validate", post(validate_location))
        .route("/api/journeys/validate", post(validate_journey))
        .route("/api/plans", post(create_plan))
        .route("/api/sessions/:id", get(get_session))
        .route("/api/sessions/:id/chat", post(chat))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the trip form.
async fn index_page() -> Result<Response, AppError> {
    render(
        StatusCode::OK,
        &IndexTemplate {
            form: PlanForm::default(),
            error: None,
        },
    )
}

/// Plan from the HTML form, then show the new session.
async fn plan_form(
    State(state): State<AppState>,
    Form(form): Form<PlanForm>,
) -> Result<Response, AppError> {
    let trip = match form.to_trip() {
        Ok(trip) => trip,
        Err(message) => return form_error(form, message),
    };

    match state.planner.plan(trip).await {
        Ok(outcome) => {
            Ok(Redirect::to(&format!("/sessions/{}", outcome.session.id)).into_response())
        }
        Err(PlanError::InvalidTrip(message)) => form_error(form, message),
        Err(e) => Err(e.into()),
    }
}

/// Re-show the form with what the user typed.
fn form_error(form: PlanForm, message: String) -> Result<Response, AppError> {
    render(
        StatusCode::UNPROCESSABLE_ENTITY,
        &IndexTemplate {
            form,
            error: Some(message),
        },
    )
}

/// A session's plan and chat.
async fn session_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    match lookup_session(&state, &id).await {
        Ok(session) => render(
            StatusCode::OK,
            &PlanTemplate {
                session: SessionView::from_session(&session),
                error: None,
            },
        ),
        Err(AppError::NotFound { message }) => render(
            StatusCode::NOT_FOUND,
            &ErrorTemplate {
                title: "Plan not found".to_string(),
                message: "This plan has expired or never existed.".to_string(),
                details: Some(message),
            },
        ),
        Err(e) => Err(e),
    }
}

/// Chat from the HTML form, then show the updated session.
async fn chat_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(request): Form<ChatRequest>,
) -> Result<Response, AppError> {
    let session_id = parse_session_id(&id)?;

    match state.planner.chat(session_id, &request.message).await {
        Ok(_) => Ok(Redirect::to(&format!("/sessions/{session_id}")).into_response()),
        Err(PlanError::EmptyMessage) => {
            let session = state.planner.session(session_id).await?;
            render(
                StatusCode::UNPROCESSABLE_ENTITY,
                &PlanTemplate {
                    session: SessionView::from_session(&session),
                    error: Some(PlanError::EmptyMessage.to_string()),
                },
            )
        }
        Err(e) => Err(e.into()),
    }
}

/// Resolve one place name.
async fn validate_location(
    State(state): State<AppState>,
    Json(request): Json<LocationRequest>,
) -> Json<ValidationResult> {
    Json(
        state
            .planner
            .validator()
            .resolve_location(&request.location)
            .await,
    )
}

/// Validate one journey leg.
async fn validate_journey(
    State(state): State<AppState>,
    Json(request): Json<JourneyRequest>,
) -> Result<Json<JourneyValidationResult>, AppError> {
    let query = request
        .into_query()
        .map_err(|message| AppError::BadRequest { message })?;

    Ok(Json(state.planner.validator().validate_journey(&query).await))
}

/// Plan a layover.
async fn create_plan(
    State(state): State<AppState>,
    Json(request): Json<PlanRequest>,
) -> Result<Json<PlanResponse>, AppError> {
    let trip = request
        .into_trip()
        .map_err(|message| AppError::BadRequest { message })?;

    let outcome = state.planner.plan(trip).await?;

    Ok(Json(PlanResponse {
        session_id: outcome.session.id,
        distance_km: outcome.distance_km,
        layover_minutes: outcome.layover_minutes(),
        plan: outcome.session.plan,
    }))
}

/// Fetch a session.
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let session = lookup_session(&state, &id).await?;
    Ok(Json(session).into_response())
}

/// Refine a session's plan.
async fn chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let session_id = parse_session_id(&id)?;
    let outcome = state.planner.chat(session_id, &request.message).await?;

    Ok(Json(ChatResponse {
        reply: outcome.reply,
        plan: outcome.session.plan,
    }))
}

async fn lookup_session(
    state: &AppState,
    id: &str,
) -> Result<crate::sessions::Session, AppError> {
    let session_id = parse_session_id(id)?;
    Ok(state.planner.session(session_id).await?)
}

/// Unparseable ids are reported like unknown ones.
fn parse_session_id(id: &str) -> Result<SessionId, AppError> {
    id.parse().map_err(|e: SessionError| AppError::NotFound {
        message: e.to_string(),
    })
}

fn render(status: StatusCode, template: &impl Template) -> Result<Response, AppError> {
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok((status, Html(html)).into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    /// The request was well-formed but the trip does not make sense
    Unprocessable { message: String },
    /// An upstream service failed
    BadGateway { message: String },
    Internal { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::InvalidTrip(message) => AppError::Unprocessable { message },
            PlanError::EmptyMessage => AppError::BadRequest {
                message: e.to_string(),
            },
            PlanError::Session(e) => AppError::from(e),
            PlanError::Recommend(_) => AppError::BadGateway {
                message: e.to_string(),
            },
        }
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::NotFound {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!("[{status}] {message}");
        } else {
            warn!("[{status}] {message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
