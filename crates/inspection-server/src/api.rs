use axum::{
    Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Json},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

use application::{
    NotEligibleReason, PreparedReinspection, available_for_inspection,
    available_for_reinspection, prepare_reinspection,
};
use domain::{
    AnswerSheet, ChecklistItem, DomainError, ItemStatus, SerialNumber, Session, plant_time,
};

use crate::state::AppState;

use tower_http::cors::{Any, CorsLayer};

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/catalog", get(get_catalog))
        .route("/api/inspections/available", get(get_available_inspections))
        .route("/api/inspections", post(submit_inspection))
        .route(
            "/api/reinspections/available",
            get(get_available_reinspections),
        )
        .route(
            "/api/reinspections/{serial}/draft",
            get(get_reinspection_draft),
        )
        .route("/api/reinspections", post(submit_reinspection))
        .layer(cors)
        .with_state(state)
}

#[derive(serde::Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(serde::Deserialize)]
struct AnswerPayload {
    item: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(serde::Deserialize)]
struct SubmitRequest {
    serial: String,
    answers: Vec<AnswerPayload>,
}

fn error_response(err: DomainError) -> (StatusCode, Json<Value>) {
    let status = match &err {
        DomainError::NotAuthenticated | DomainError::InvalidCredentials => {
            StatusCode::UNAUTHORIZED
        }
        DomainError::AlreadyLoggedIn
        | DomainError::SubmissionInProgress
        | DomainError::SubmissionPending => StatusCode::CONFLICT,
        DomainError::IncompleteChecklist { .. } | DomainError::InvalidSerialNumber(_) => {
            StatusCode::BAD_REQUEST
        }
        DomainError::Store(_) => StatusCode::BAD_GATEWAY,
    };

    let body = match &err {
        DomainError::IncompleteChecklist {
            missing_status,
            missing_model,
        } => json!({
            "error": err.to_string(),
            "missing_status": missing_status.iter().map(|i| i.key()).collect::<Vec<_>>(),
            "missing_model": missing_model.iter().map(|i| i.key()).collect::<Vec<_>>(),
        }),
        _ => json!({ "error": err.to_string() }),
    };

    (status, Json(body))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<Arc<Session>, DomainError> {
    let token = bearer_token(headers).ok_or(DomainError::NotAuthenticated)?;
    state.session(token)
}

/// Build an answer sheet from the request payload. Unknown item keys and
/// status strings are client errors, reported before anything is written.
fn sheet_from_payload(
    answers: &[AnswerPayload],
) -> Result<AnswerSheet, (StatusCode, Json<Value>)> {
    let mut sheet = AnswerSheet::new();
    for answer in answers {
        let Some(item) = ChecklistItem::from_key(&answer.item) else {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("unknown checklist item {:?}", answer.item) })),
            ));
        };
        if let Some(status) = &answer.status {
            let Some(parsed) = ItemStatus::parse(status) else {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": format!("unknown status {:?} for item {}", status, item.key()),
                    })),
                ));
            };
            sheet.set_status(item, parsed);
        }
        if let Some(model) = &answer.model {
            sheet.set_model(item, model.clone());
        }
    }
    Ok(sheet)
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    match state.open_session(&req.username, &req.password) {
        Ok(token) => {
            info!(user = %req.username, "session opened");
            (
                StatusCode::OK,
                Json(json!({ "token": token, "user": req.username })),
            )
        }
        Err(e) => error_response(e),
    }
}

async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> impl IntoResponse {
    let Some(token) = bearer_token(&headers) else {
        return error_response(DomainError::NotAuthenticated);
    };
    match state.close_session(token) {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "logged out" }))),
        Err(e) => error_response(e),
    }
}

/// The fixed 10-item catalog, so a client can render the form without
/// hardcoding question texts or option lists.
async fn get_catalog() -> impl IntoResponse {
    let items: Vec<_> = ChecklistItem::ALL
        .iter()
        .map(|item| {
            json!({
                "key": item.key(),
                "question": item.question(),
                "model_options": item.model_options(),
            })
        })
        .collect();
    Json(items)
}

async fn get_available_inspections(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Err(e) = authorize(&state, &headers) {
        return error_response(e);
    }

    let entries = match state.loader.load_production_entries().await {
        Ok(entries) => entries,
        Err(e) => return error_response(e),
    };
    let checklists = match state.loader.load_checklists().await {
        Ok(rows) => rows,
        Err(e) => return error_response(e),
    };

    let today = plant_time::today();
    let serials: Vec<String> = available_for_inspection(&entries, &checklists, today)
        .into_iter()
        .map(|s| s.to_string())
        .collect();

    (
        StatusCode::OK,
        Json(json!({ "date": today.to_string(), "serials": serials })),
    )
}

async fn submit_inspection(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<SubmitRequest>,
) -> impl IntoResponse {
    let session = match authorize(&state, &headers) {
        Ok(session) => session,
        Err(e) => return error_response(e),
    };
    let serial = match SerialNumber::new(req.serial) {
        Ok(serial) => serial,
        Err(e) => return error_response(e),
    };
    let sheet = match sheet_from_payload(&req.answers) {
        Ok(sheet) => sheet,
        Err(resp) => return resp,
    };

    match state.inspections.submit(&session, serial.clone(), &sheet).await {
        Ok(()) => (
            StatusCode::CREATED,
            Json(json!({ "status": "recorded", "serial": serial.as_str() })),
        ),
        Err(e) => error_response(e),
    }
}

async fn get_available_reinspections(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Err(e) = authorize(&state, &headers) {
        return error_response(e);
    }

    let checklists = match state.loader.load_checklists().await {
        Ok(rows) => rows,
        Err(e) => return error_response(e),
    };

    let serials: Vec<String> = available_for_reinspection(&checklists)
        .into_iter()
        .map(|s| s.to_string())
        .collect();

    (StatusCode::OK, Json(json!({ "serials": serials })))
}

async fn get_reinspection_draft(
    Path(serial): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Err(e) = authorize(&state, &headers) {
        return error_response(e);
    }

    let serial = match SerialNumber::new(serial) {
        Ok(serial) => serial,
        Err(e) => return error_response(e),
    };
    let checklists = match state.loader.load_checklists().await {
        Ok(rows) => rows,
        Err(e) => return error_response(e),
    };

    match prepare_reinspection(&checklists, &serial, plant_time::today()) {
        PreparedReinspection::Ready(draft) => {
            let answers: Vec<_> = ChecklistItem::ALL
                .iter()
                .map(|&item| {
                    let answer = draft.sheet.answer(item);
                    json!({
                        "item": item.key(),
                        "status": answer.status.map(|s| s.as_str()),
                        "model": answer.model,
                    })
                })
                .collect();

            (
                StatusCode::OK,
                Json(json!({
                    "serial": draft.serial.as_str(),
                    "baseline_recorded_at": draft.baseline_recorded_at,
                    "baseline_inspector": draft.baseline_inspector,
                    "answers": answers,
                })),
            )
        }
        PreparedReinspection::NotEligible(reason) => {
            let (code, message) = match reason {
                NotEligibleReason::NoPriorInspection => (
                    "no_prior_inspection",
                    "serial has no first inspection on record",
                ),
                NotEligibleReason::NoInspectionToday => (
                    "no_inspection_today",
                    "most recent first inspection is not from today",
                ),
            };
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": message, "reason": code })),
            )
        }
    }
}

async fn submit_reinspection(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<SubmitRequest>,
) -> impl IntoResponse {
    let session = match authorize(&state, &headers) {
        Ok(session) => session,
        Err(e) => return error_response(e),
    };
    let serial = match SerialNumber::new(req.serial) {
        Ok(serial) => serial,
        Err(e) => return error_response(e),
    };
    let sheet = match sheet_from_payload(&req.answers) {
        Ok(sheet) => sheet,
        Err(resp) => return resp,
    };

    match state
        .reinspections
        .submit(&session, serial.clone(), &sheet)
        .await
    {
        Ok(()) => (
            StatusCode::CREATED,
            Json(json!({ "status": "recorded", "serial": serial.as_str() })),
        ),
        Err(e) => error_response(e),
    }
}
