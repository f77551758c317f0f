// Protected handlers: every route here sits behind `require_identity`.
pub mod auth;
