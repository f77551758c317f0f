pub mod session;

pub use session::refresh_token_post;
