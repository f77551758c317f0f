pub mod auth;
pub mod response;

pub use auth::{extract_bearer_token, require_identity, CurrentUser};
pub use response::{ApiResponse, ApiResult};
