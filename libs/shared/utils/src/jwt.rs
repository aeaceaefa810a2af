use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::debug;
use uuid::Uuid;

use shared_config::ClientConfig;
use shared_models::auth::{JwtHeader, ProjectClaims, PROJECT_TOKEN_ISSUER_TYPE};
use shared_models::error::TokenError;

type HmacSha256 = Hmac<Sha256>;

/// Mint the project token sent as `X-OPENTOK-AUTH`.
///
/// Claims are built from the current UTC time on every call, so each request
/// gets its own `iat`/`exp` window and `jti`.
pub fn sign_project_token(config: &ClientConfig) -> Result<String, TokenError> {
    let claims = project_claims(config, Utc::now())?;
    sign_claims(&claims, &config.partner_secret)
}

/// Claim set for a project token issued at `now`.
pub fn project_claims(config: &ClientConfig, now: DateTime<Utc>) -> Result<ProjectClaims, TokenError> {
    if config.api_key.is_empty() {
        return Err(TokenError::MissingApiKey);
    }

    let lifetime = config.token_lifetime.num_seconds();
    if lifetime <= 0 {
        return Err(TokenError::InvalidLifetime { seconds: lifetime });
    }

    let iat = now.timestamp();
    Ok(ProjectClaims {
        ist: PROJECT_TOKEN_ISSUER_TYPE.to_string(),
        iss: config.api_key.clone(),
        iat,
        exp: iat + lifetime,
        jti: Uuid::new_v4().to_string(),
    })
}

/// Serialize and sign `claims` as a compact HS256 JWT.
pub fn sign_claims(claims: &ProjectClaims, secret: &str) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let header = serde_json::to_vec(&JwtHeader::hs256())
        .map_err(|e| TokenError::Encoding(e.to_string()))?;
    let payload = serde_json::to_vec(claims)
        .map_err(|e| TokenError::Encoding(e.to_string()))?;

    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header),
        URL_SAFE_NO_PAD.encode(payload)
    );

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| TokenError::Encoding("Failed to create HMAC".to_string()))?;
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    debug!("Signed project token {} for issuer {}", claims.jti, claims.iss);
    Ok(format!("{}.{}", signing_input, signature))
}

/// Check the signature and expiry of a project token and return its claims.
pub fn verify_project_token(token: &str, secret: &str) -> Result<ProjectClaims, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(TokenError::InvalidFormat);
    }

    let header_b64 = parts[0];
    let claims_b64 = parts[1];
    let signature_b64 = parts[2];

    let signature = URL_SAFE_NO_PAD.decode(signature_b64).map_err(|e| {
        debug!("Failed to decode signature: {}", e);
        TokenError::InvalidFormat
    })?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| TokenError::InvalidSignature)?;
    mac.update(format!("{}.{}", header_b64, claims_b64).as_bytes());

    if mac.verify_slice(&signature).is_err() {
        debug!("Token signature verification failed");
        return Err(TokenError::InvalidSignature);
    }

    let header_json = URL_SAFE_NO_PAD
        .decode(header_b64)
        .map_err(|_| TokenError::InvalidFormat)?;
    let header: JwtHeader = serde_json::from_slice(&header_json)
        .map_err(|e| TokenError::InvalidClaims(e.to_string()))?;
    if header.alg != "HS256" {
        return Err(TokenError::InvalidClaims(format!("unexpected alg {}", header.alg)));
    }

    let claims_json = URL_SAFE_NO_PAD
        .decode(claims_b64)
        .map_err(|_| TokenError::InvalidFormat)?;
    let claims: ProjectClaims = serde_json::from_slice(&claims_json).map_err(|e| {
        debug!("Failed to parse claims: {}", e);
        TokenError::InvalidClaims(e.to_string())
    })?;

    let now = Utc::now().timestamp();
    if claims.exp < now {
        debug!("Token expired at {} (now: {})", claims.exp, now);
        return Err(TokenError::Expired { exp: claims.exp, now });
    }

    Ok(claims)
}
