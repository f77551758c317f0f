use axum::extract::{Extension, State};

use crate::auth::AccessToken;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::state::AppState;

/// POST /auth/refresh_token - issue a fresh token for the caller
///
/// The presented token has already been resolved by the middleware, so an
/// expired token cannot be refreshed.
pub async fn refresh_token_post(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<AccessToken> {
    let token = state.tokens.refresh(&user)?;
    Ok(ApiResponse::success(token))
}
