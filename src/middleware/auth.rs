use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::database::UserRecord;
use crate::error::ApiError;
use crate::state::AppState;

/// Identity resolved from the bearer token of the current request
#[derive(Clone, Debug)]
pub struct CurrentUser(pub UserRecord);

/// Bearer authentication middleware: resolves the token to a stored user and
/// injects it as [`CurrentUser`]. Runs on every protected request; nothing is cached.
pub async fn require_identity(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers)?;

    let user = state.tokens.resolve(token, state.users.as_ref()).await?;
    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}

/// Extract the token from `Authorization: Bearer <token>`
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Could not validate credentials"))?;

    let (scheme, token) = auth_str
        .split_once(' ')
        .ok_or_else(|| ApiError::unauthorized("Could not validate credentials"))?;

    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(ApiError::unauthorized("Could not validate credentials"));
    }

    Ok(token)
}
