use std::sync::Arc;

use axum::{
    extract::{Extension, Request},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use bacheca_core::BoardError;
use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::debug;

use crate::{error::ApiError, AppState};

pub const REALM: &str = "Bacheca Message Board";
const CHALLENGE: &str = "Basic realm=\"Bacheca Message Board\"";

/// Estrae utente e password da `Authorization: Basic <base64(user:pass)>`.
pub fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, password) = decoded.split_once(':')?;
    Some((user.to_string(), password.to_string()))
}

/// Middleware per le rotte protette: lascia passare solo credenziali presenti nella mappa.
pub async fn require_basic_auth(
    Extension(state): Extension<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    match basic_credentials(req.headers()) {
        Some((user, password)) if state.credentials.verify(&user, &password) => next.run(req).await,
        Some((user, _)) => {
            debug!(%user, "basic auth rejected");
            unauthorized()
        }
        None => {
            debug!("basic auth missing or malformed");
            unauthorized()
        }
    }
}

fn unauthorized() -> Response {
    let mut resp = ApiError(BoardError::Unauthorized).into_response();
    resp.headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static(CHALLENGE));
    resp
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(auth: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(auth).unwrap());
        headers
    }

    #[test]
    fn challenge_names_the_realm() {
        assert_eq!(CHALLENGE, format!("Basic realm=\"{REALM}\""));
    }

    #[test]
    fn decodes_basic_credentials() {
        let encoded = STANDARD.encode("admin:se:cret");
        let creds = basic_credentials(&headers_with(&format!("Basic {encoded}")));
        assert_eq!(creds, Some(("admin".to_string(), "se:cret".to_string())));
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let encoded = STANDARD.encode("a:b");
        assert!(basic_credentials(&headers_with(&format!("basic {encoded}"))).is_some());
    }

    #[test]
    fn rejects_other_schemes_and_garbage() {
        assert!(basic_credentials(&HeaderMap::new()).is_none());
        assert!(basic_credentials(&headers_with("Bearer token")).is_none());
        assert!(basic_credentials(&headers_with("Basic !!!not-base64")).is_none());
        let no_colon = STANDARD.encode("justuser");
        assert!(basic_credentials(&headers_with(&format!("Basic {no_colon}"))).is_none());
    }

    #[test]
    fn unauthorized_response_carries_the_challenge() {
        let resp = unauthorized();
        assert_eq!(resp.status(), axum::http::StatusCode::UNAUTHORIZED);
        assert_eq!(resp.headers()[header::WWW_AUTHENTICATE], CHALLENGE);
    }
}
