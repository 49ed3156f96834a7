use std::sync::Arc;

use axum::Json;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::infrastructure::auth::JwtVerifier;
use crate::presentation::handlers::ErrorResponse;

pub const ADMIN_COOKIE: &str = "admin_token";

/// Rejects the request with 401 unless it carries a valid admin token, either as
/// a bearer token or in the `admin_token` cookie.
pub async fn require_admin(
    State(verifier): State<Arc<JwtVerifier>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(token) = token_from_headers(request.headers()) else {
        tracing::warn!("Admin request without credentials");
        return unauthorized();
    };

    match verifier.verify(&token) {
        Ok(claims) => {
            tracing::debug!(admin = %claims.sub, "Admin request authenticated");
            next.run(request).await
        }
        Err(e) => {
            tracing::warn!(error = %e, "Admin token rejected");
            unauthorized()
        }
    }
}

pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == ADMIN_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse::new("Unauthorized")),
    )
        .into_response()
}
