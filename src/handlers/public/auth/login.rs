use axum::{
    extract::{rejection::FormRejection, State},
    Form,
};
use serde::Deserialize;

use crate::auth::{AccessToken, AuthError};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// OAuth2 password-flow form. `username` carries the user's e-mail.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// POST /auth/token - exchange e-mail and password for a bearer token
///
/// Unknown e-mail and wrong password are indistinguishable to the caller:
/// both answer 400 "Incorrect email or password". A missing or undecodable
/// field is a 400 in the usual error envelope.
pub async fn token_post(
    State(state): State<AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> ApiResult<AccessToken> {
    let Form(form) = form?;

    let token = state
        .tokens
        .authenticate(&form.username, &form.password, state.users.as_ref())
        .await
        .map_err(|err| match err {
            AuthError::InvalidCredentials => ApiError::bad_request("Incorrect email or password"),
            other => other.into(),
        })?;

    Ok(ApiResponse::success(token))
}
