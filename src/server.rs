// 🖥️ Development Backend - the hosted `?action=` API on top of a LeagueStore
//
// Every mutation goes through `LeagueStore::commit`, so a request that fails
// (bad input or a failed save) leaves the served data unchanged.

use crate::api::MutationResponse;
use crate::error::LeagueError;
use crate::store::{EventInput, LeagueStore};
use axum::{
    extract::{FromRequest, Multipart, Query, Request, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, warn};

pub const SAVE_FAILURE: &str = "No se pudo guardar los cambios";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<LeagueStore>>,
}

impl AppState {
    pub fn new(store: LeagueStore) -> Self {
        AppState {
            store: Arc::new(Mutex::new(store)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ActionQuery {
    action: Option<String>,
    code: Option<String>,
}

/// Body of `?action=update_social`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SocialPayload {
    account_name: Option<String>,
    #[serde(default)]
    posts: Vec<String>,
}

/// Router serving `/` and `/index.php`
pub fn router(store: LeagueStore) -> Router {
    Router::new()
        .route("/", get(handle_get).post(handle_post))
        .route("/index.php", get(handle_get).post(handle_post))
        .with_state(AppState::new(store))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

fn reply(status: StatusCode, body: MutationResponse) -> Response {
    (status, Json(body)).into_response()
}

fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    reply(status, MutationResponse::failure(message))
}

/// Store validation errors are the client's fault; anything else means the
/// change could not be written
fn mutation_failure(err: LeagueError) -> Response {
    match err {
        LeagueError::Store(message) => failure(StatusCode::BAD_REQUEST, message),
        other => {
            error!(error = %other, "failed to save store");
            failure(StatusCode::INTERNAL_SERVER_ERROR, SAVE_FAILURE)
        }
    }
}

// ============================================================================
// READS
// ============================================================================

/// GET /?action=... - Read endpoints
async fn handle_get(State(state): State<AppState>, Query(query): Query<ActionQuery>) -> Response {
    let store = state.store.lock().await;

    match query.action.as_deref() {
        Some("status") => Json(json!({ "success": true, "message": "API LINAMVE en línea" })).into_response(),
        Some("get_ranking") => Json(store.ranking()).into_response(),
        Some("get_ranking_by_category") => match query.code.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => Json(store.ranking_by_category(code)).into_response(),
            _ => failure(StatusCode::BAD_REQUEST, "Falta el parámetro code"),
        },
        Some("get_calendar") => Json(store.events()).into_response(),
        Some("get_social") => Json(store.social()).into_response(),
        other => {
            warn!(action = ?other, "unknown GET action");
            failure(StatusCode::NOT_FOUND, "Acción desconocida")
        }
    }
}

// ============================================================================
// MUTATIONS
// ============================================================================

/// POST / - multipart forms, or a JSON body for `?action=update_social`.
/// A form's own `action` field wins over the query string.
async fn handle_post(
    State(state): State<AppState>,
    Query(query): Query<ActionQuery>,
    request: Request,
) -> Response {
    if query.action.as_deref() == Some("update_social") {
        return match Json::<SocialPayload>::from_request(request, &()).await {
            Ok(Json(payload)) => update_social(&state, payload).await,
            Err(rejection) => failure(StatusCode::BAD_REQUEST, rejection.body_text()),
        };
    }

    let multipart = match Multipart::from_request(request, &()).await {
        Ok(multipart) => multipart,
        Err(rejection) => return failure(StatusCode::BAD_REQUEST, rejection.body_text()),
    };
    let (fields, csv) = match read_multipart(multipart).await {
        Ok(parts) => parts,
        Err(e) => return failure(StatusCode::BAD_REQUEST, e.body_text()),
    };

    let action = fields.get("action").cloned().or(query.action);
    match action.as_deref() {
        Some("create_event") => create_event(&state, &fields).await,
        Some("upload_results") => upload_results(&state, &fields, csv).await,
        other => {
            warn!(action = ?other, "unknown POST action");
            failure(StatusCode::NOT_FOUND, "Acción desconocida")
        }
    }
}

/// Text fields by name, plus the bytes of `csv_file` when present
async fn read_multipart(
    mut multipart: Multipart,
) -> Result<(HashMap<String, String>, Option<Vec<u8>>), axum::extract::multipart::MultipartError> {
    let mut fields = HashMap::new();
    let mut csv = None;
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "csv_file" {
            csv = Some(field.bytes().await?.to_vec());
        } else {
            fields.insert(name, field.text().await?);
        }
    }
    Ok((fields, csv))
}

async fn create_event(state: &AppState, fields: &HashMap<String, String>) -> Response {
    let input = EventInput::from_fields(fields);
    let mut store = state.store.lock().await;
    match store.commit(|s| s.create_event(input)) {
        Ok(id) => reply(StatusCode::OK, MutationResponse::ok(format!("Evento creado con ID {}", id))),
        Err(e) => mutation_failure(e),
    }
}

async fn upload_results(
    state: &AppState,
    fields: &HashMap<String, String>,
    csv: Option<Vec<u8>>,
) -> Response {
    let Some(tournament_id) = fields
        .get("tournament_id")
        .and_then(|raw| raw.trim().parse::<u64>().ok())
    else {
        return failure(StatusCode::BAD_REQUEST, "ID de torneo inválido");
    };
    let Some(csv) = csv else {
        return failure(StatusCode::BAD_REQUEST, "Falta el archivo csv_file");
    };

    let mut store = state.store.lock().await;
    match store.commit(|s| s.ingest_results_csv(tournament_id, csv.as_slice())) {
        Ok(processed) => {
            let mut body = MutationResponse::ok(format!("Resultados procesados: {}", processed));
            body.processed = Some(processed);
            reply(StatusCode::OK, body)
        }
        Err(e) => mutation_failure(e),
    }
}

async fn update_social(state: &AppState, payload: SocialPayload) -> Response {
    let mut store = state.store.lock().await;
    let result = store.commit(|s| Ok(s.update_social(payload.account_name.as_deref(), payload.posts)));
    match result {
        Ok(saved) => reply(StatusCode::OK, MutationResponse::ok(format!("{} posts guardados", saved))),
        Err(e) => mutation_failure(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_are_bad_requests() {
        let response = mutation_failure(LeagueError::Store("El torneo 9 no existe".to_string()));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_save_errors_are_server_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let response = mutation_failure(LeagueError::Io(io));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
