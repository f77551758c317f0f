pub mod claims;
pub mod error;
pub mod gate;
pub mod password;
pub mod token;

pub use claims::{ClaimSet, Claims};
pub use error::AuthError;
pub use gate::{ensure_can_modify, ensure_owner, Owned};
pub use password::CredentialHasher;
pub use token::{AccessToken, TokenAuthority};
