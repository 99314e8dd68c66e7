use chrono::Utc;
#[cfg(test)]
use jsonwebtoken::{decode, DecodingKey, Validation};
use jsonwebtoken::{encode, errors::Error, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

pub const TOKEN_EXPIRY: u64 = 60 * 60; // 1 hour in seconds

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
  #[serde(rename = "userId")]
  pub user_id: String,
  pub iat: u64,
  pub exp: u64,
}

/// Signs a bearer token for `user_id`. There is no refresh and no
/// revocation; the token is valid until `exp`.
pub fn issue_token(secret: &str, user_id: &str) -> Result<String, Error> {
  let now = Utc::now().timestamp() as u64;
  encode(
    &Header::new(Algorithm::HS256),
    &TokenClaims {
      user_id: user_id.to_string(),
      iat: now,
      exp: now + TOKEN_EXPIRY,
    },
    &EncodingKey::from_secret(secret.as_bytes()),
  )
}

/// Checks signature and expiry. Only tests read tokens back; clients treat
/// them as opaque.
#[cfg(test)]
pub fn decode_token(secret: &str, token: &str) -> Result<TokenClaims, Error> {
  decode::<TokenClaims>(
    token,
    &DecodingKey::from_secret(secret.as_bytes()),
    &Validation::new(Algorithm::HS256),
  )
  .map(|data| data.claims)
}
