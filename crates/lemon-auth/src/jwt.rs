//! Session token codec.
//!
//! Tokens are signed with HMAC-SHA-512. Decoding accepts any member of the
//! HMAC family and rejects every other declared algorithm before the
//! signature is looked at, so a token cannot pick its own verification
//! scheme.
//!
//! Decoding checks signature and claim shape only. Time validity is the
//! session layer's job (see [`crate::session`]).

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Deserialize;

use lemon_config::SecurityConfig;
use lemon_models::Account;

use crate::claims::Claims;
use crate::error::TokenError;

const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

#[derive(Deserialize)]
struct DeclaredHeader {
    alg: String,
}

/// Signs `claims` with `secret` using HS512.
pub fn encode_token(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    encode(
        &Header::new(Algorithm::HS512),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(TokenError::Encoding)
}

/// Verifies `token` against `secret` and returns its claims.
///
/// # Errors
///
/// - [`TokenError::InvalidSignature`] when the signature does not verify or
///   the header declares anything other than HS256, HS384 or HS512
/// - [`TokenError::Malformed`] when the token is not a JWT or the claim set
///   is missing a field or carries one of the wrong type
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    check_declared_algorithm(token)?;

    let mut validation = Validation::new(Algorithm::HS512);
    validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
    validation.required_spec_claims.clear();
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })
}

// Reads `alg` straight from the header segment so that algorithms the codec
// has no variant for (such as `none`) are still reported as a signature
// failure rather than a parse failure.
fn check_declared_algorithm(token: &str) -> Result<(), TokenError> {
    let segment = token.split('.').next().ok_or(TokenError::Malformed)?;
    let raw = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::Malformed)?;
    let header: DeclaredHeader =
        serde_json::from_slice(&raw).map_err(|_| TokenError::Malformed)?;

    match header.alg.as_str() {
        "HS256" | "HS384" | "HS512" => Ok(()),
        _ => Err(TokenError::InvalidSignature),
    }
}

/// Issues a token for `account` starting now.
pub fn issue_token(account: &Account, config: &SecurityConfig) -> Result<String, TokenError> {
    issue_token_at(account, config, Utc::now().timestamp())
}

/// Issues a token for `account` with `nbf = now` and
/// `exp = now + config.token_expiry`.
pub fn issue_token_at(
    account: &Account,
    config: &SecurityConfig,
    now: i64,
) -> Result<String, TokenError> {
    let claims = Claims::for_account(account, now, config.token_expiry)?;
    encode_token(&claims, &config.secret)
}
