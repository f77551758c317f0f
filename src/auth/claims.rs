use serde::{Deserialize, Serialize};

/// Claims supplied by the caller when issuing a token. Expiry is always stamped by the issuer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimSet {
    pub sub: Option<String>,
}

impl ClaimSet {
    pub fn for_subject(subject: impl Into<String>) -> Self {
        Self {
            sub: Some(subject.into()),
        }
    }

    /// A claim set with no subject. Tokens built from it never resolve to an identity.
    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// Signed token payload. Timestamps are seconds since the Unix epoch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default)]
    pub iat: i64,
    pub exp: i64,
}
