use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose, Engine as _};
use std::sync::Arc;

const CHALLENGE_BODY: &str = "Could not verify your access level for that URL.\n\
You have to login with proper credentials";

/// HTTP Basic authentication against the single configured credential
/// pair. Applied to every route; handlers behind it treat
/// "authenticated" as a precondition and never re-check.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let authorized = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_basic)
        .map(|(user, pass)| user == state.config.username && pass == state.config.password)
        .unwrap_or(false);

    if authorized {
        next.run(req).await
    } else {
        challenge()
    }
}

/// Decode `Basic <base64(user:pass)>` into the credential pair.
fn parse_basic(header_value: &str) -> Option<(String, String)> {
    let encoded = header_value.strip_prefix("Basic ")?;
    let decoded = general_purpose::STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}

fn challenge() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Basic realm=\"Login Required\"")],
        CHALLENGE_BODY,
    )
        .into_response()
}
