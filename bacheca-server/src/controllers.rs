use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    Json,
};
use bacheca_core::{ListOptions, Message, MessageDraft, MessageList};

use crate::{error::ApiError, AppState};

/// Handler per GET /ping
pub async fn ping() -> &'static str {
    "pong!"
}

/// Handler per POST /v1/messages (nessuna autenticazione)
pub async fn create(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<MessageDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let Json(draft) = payload?;
    let msg = state.service.create(draft).await?;
    Ok((StatusCode::CREATED, Json(msg)))
}

/// Handler per GET /v1/messages?per_page=&page=
pub async fn list(
    Extension(state): Extension<Arc<AppState>>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<Json<MessageList>, ApiError> {
    // una query string malformata vale come assente: si usano i default
    let params = query.map(|Query(params)| params).unwrap_or_default();
    let opts = ListOptions::from_query(&params);
    let list = state.service.list(&opts).await?;
    Ok(Json(list))
}

/// Handler per GET /v1/messages/{id}
pub async fn get(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    let msg = load_message(&state, &id).await?;
    Ok(Json(msg))
}

/// Handler per PUT /v1/messages/{id}
///
/// Il messaggio viene caricato prima di leggere il body, quindi un id
/// inesistente risponde 404 anche con un body non valido. L'id arriva
/// sempre dal path.
pub async fn update(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<MessageDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let current = load_message(&state, &id).await?;
    let Json(draft) = payload?;
    let msg = state.service.update(&current.id, draft).await?;
    Ok((StatusCode::CREATED, Json(msg)))
}

async fn load_message(state: &AppState, id: &str) -> Result<Message, ApiError> {
    Ok(state.service.get(id).await?)
}
