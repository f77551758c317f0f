pub mod login; // POST /auth/token

pub use login::token_post;
