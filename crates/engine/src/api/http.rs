//! HTTP routes.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use rpssl_shared::{
    ChoiceResponse, ErrorResponse, PlayRequest, PlayResponse, ResetQuery, ResultResponse,
};
use serde::Serialize;
use validator::{Validate, ValidationErrors};

use crate::app::App;
use crate::infrastructure::ports::Cancelled;
use crate::use_cases::game::{ApplicationErrorKind, GameError, PlayOutcome};

pub const UNABLE_TO_SAVE: &str = "Unable to save play result on scoreboard";
const INTERNAL_ERROR: &str = "Internal Server error";
const CANCELLED_ERROR: &str = "Internal Server error - Operation cancelled";

/// Non-standard "client closed request" status.
const CLIENT_CLOSED_REQUEST: u16 = 499;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/api/health", get(health))
        .route("/choices", get(list_choices))
        .route("/random", get(random_choice))
        .route("/play", axum::routing::post(play).delete(reset_results))
        .route("/results", get(latest_results))
}

async fn health() -> &'static str {
    "OK"
}

async fn list_choices(State(app): State<Arc<App>>) -> Json<Vec<ChoiceResponse>> {
    let choices = app.use_cases.choices.catalog.list_choices();
    Json(choices.into_iter().map(ChoiceResponse::from).collect())
}

async fn random_choice(State(app): State<Arc<App>>) -> Result<Json<ChoiceResponse>, ApiError> {
    let cancel = app.request_token();
    let _guard = cancel.clone().drop_guard();

    let choice = app.use_cases.choices.catalog.random_choice(&cancel).await?;
    Ok(Json(choice.into()))
}

async fn play(
    State(app): State<Arc<App>>,
    payload: Result<Json<PlayRequest>, JsonRejection>,
) -> Result<Json<PlayResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;
    let player = request
        .choice()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let cancel = app.request_token();
    let _guard = cancel.clone().drop_guard();

    let result = app
        .use_cases
        .game
        .play
        .execute(&request.username, player, &cancel)
        .await?;

    match result.value {
        Some(outcome) if result.succeeded => Ok(Json(play_response(outcome))),
        Some(_) => Err(ApiError::Unprocessable(UNABLE_TO_SAVE.to_string())),
        None => Err(ApiError::Internal("Play finished without a result".to_string())),
    }
}

async fn reset_results(
    State(app): State<Arc<App>>,
    Query(query): Query<ResetQuery>,
) -> Result<StatusCode, ApiError> {
    let cancel = app.request_token();
    let _guard = cancel.clone().drop_guard();

    let result = app
        .use_cases
        .game
        .reset
        .execute(query.username.as_deref(), &cancel)
        .await?;

    if result.succeeded {
        return Ok(StatusCode::OK);
    }

    let message = |fallback: &str| {
        result
            .error
            .as_ref()
            .and_then(|e| e.message.clone())
            .unwrap_or_else(|| fallback.to_string())
    };
    match result.error_kind() {
        Some(ApplicationErrorKind::NotFound) => {
            Err(ApiError::BadRequest(message("Username not found")))
        }
        Some(ApplicationErrorKind::UnprocessableEntity) => Err(ApiError::Unprocessable(message(
            "Unable to delete all results",
        ))),
        None => Err(ApiError::Internal(
            "Reset failed without an error".to_string(),
        )),
    }
}

async fn latest_results(
    State(app): State<Arc<App>>,
) -> Result<Json<Vec<ResultResponse>>, ApiError> {
    let cancel = app.request_token();
    let _guard = cancel.clone().drop_guard();

    let records = app.use_cases.game.latest.execute(&cancel).await?;
    Ok(Json(records.into_iter().map(ResultResponse::from).collect()))
}

fn play_response(outcome: PlayOutcome) -> PlayResponse {
    PlayResponse {
        results: outcome.outcome,
        player: outcome.player.id(),
        computer: outcome.opponent.id(),
    }
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationErrors),
    BadRequest(String),
    Unprocessable(String),
    Cancelled,
    Internal(String),
}

/// Field-level validation failures, keyed by the JSON field name.
#[derive(Debug, Serialize)]
struct ValidationProblem {
    title: &'static str,
    status: u16,
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationProblem {
    fn from_errors(errors: &ValidationErrors) -> Self {
        let errors = errors
            .field_errors()
            .into_iter()
            .map(|(field, failures)| {
                let messages = failures
                    .iter()
                    .map(|failure| {
                        failure
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| failure.code.to_string())
                    })
                    .collect();
                (camel_case(&field.to_string()), messages)
            })
            .collect();

        Self {
            title: "One or more validation errors occurred.",
            status: StatusCode::BAD_REQUEST.as_u16(),
            errors,
        }
    }
}

/// `validator` keys errors by Rust field name, while request bodies are
/// `rename_all = "camelCase"`.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationProblem::from_errors(&errors)),
            )
                .into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, Json(msg)).into_response(),
            ApiError::Unprocessable(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(msg)).into_response()
            }
            ApiError::Cancelled => {
                tracing::warn!("Request cancelled before completion");
                let status = StatusCode::from_u16(CLIENT_CLOSED_REQUEST)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, Json(ErrorResponse::new(CANCELLED_ERROR))).into_response()
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Unhandled error while processing request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(INTERNAL_ERROR)),
                )
                    .into_response()
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(e: ValidationErrors) -> Self {
        ApiError::Validation(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<GameError> for ApiError {
    fn from(e: GameError) -> Self {
        match e {
            GameError::Cancelled => ApiError::Cancelled,
            GameError::Storage(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<Cancelled> for ApiError {
    fn from(_: Cancelled) -> Self {
        ApiError::Cancelled
    }
}
