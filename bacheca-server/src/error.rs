use std::any::Any;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bacheca_core::BoardError;
use tracing::error;

/// Errore restituito dagli handler: il body è sempre `{ code, message }`.
#[derive(Debug)]
pub struct ApiError(pub BoardError);

impl From<BoardError> for ApiError {
    fn from(err: BoardError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(BoardError::InvalidJson(rejection.body_text()))
    }
}

/// Mappa il codice d'errore sullo status HTTP.
pub fn status_for(code: &str) -> StatusCode {
    match code {
        "not_found" => StatusCode::NOT_FOUND,
        "unauthorized" => StatusCode::UNAUTHORIZED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = self.0.body();
        let status = status_for(&body.code);
        if status.is_server_error() {
            error!(code = %body.code, "request failed: {}", self.0);
        }
        (status, Json(body)).into_response()
    }
}

/// Riscrive le risposte prodotte dai layer tower (timeout, limite sul body)
/// nel formato `{ code, message }` usato dagli handler.
pub async fn layer_failures(response: Response) -> Response {
    let message = match response.status() {
        StatusCode::REQUEST_TIMEOUT => "request timed out",
        StatusCode::PAYLOAD_TOO_LARGE => "request body is too large",
        _ => return response,
    };
    ApiError(BoardError::storage(message)).into_response()
}

/// Risposta per un handler andato in panic: il payload finisce solo nei log.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    error!("handler panicked: {detail}");
    ApiError(BoardError::storage("internal server error")).into_response()
}
