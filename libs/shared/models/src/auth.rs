use serde::{Deserialize, Serialize};

/// Value of the `ist` claim for tokens that authenticate a whole project
/// (as opposed to a single session participant).
pub const PROJECT_TOKEN_ISSUER_TYPE: &str = "project";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtHeader {
    pub alg: String,
    pub typ: String,
}

impl JwtHeader {
    pub fn hs256() -> Self {
        Self {
            alg: "HS256".to_string(),
            typ: "JWT".to_string(),
        }
    }
}

/// Claims carried by the `X-OPENTOK-AUTH` token on every REST call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectClaims {
    pub ist: String,
    /// API key of the project
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    /// Unique per token
    pub jti: String,
}
