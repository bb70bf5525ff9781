use chrono::{Duration, Utc};
use jsonwebtoken::{
  decode, encode, errors::Error, Algorithm, DecodingKey, EncodingKey, Header,
  Validation,
};
use serde::{Deserialize, Serialize};

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "token";

/// Lifetime of a session, shared by the token expiry and the cookie max-age.
pub const SESSION_TTL_SECONDS: i64 = 24 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionTokenClaims {
  #[serde(rename = "userId")]
  pub user_id: String,
  pub iat: usize,
  pub exp: usize,
}

impl SessionTokenClaims {
  pub fn new(user_id: &str) -> Self {
    let now = Utc::now();
    let expires_at = now + Duration::seconds(SESSION_TTL_SECONDS);
    Self {
      user_id: user_id.to_string(),
      iat: now.timestamp() as usize,
      exp: expires_at.timestamp() as usize,
    }
  }

  pub fn sign(&self, jwt_secret: &str) -> Result<String, Error> {
    encode(
      &Header::new(Algorithm::HS256),
      self,
      &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
  }

  pub fn verify(token: &str, jwt_secret: &str) -> Result<Self, Error> {
    decode::<SessionTokenClaims>(
      token,
      &DecodingKey::from_secret(jwt_secret.as_bytes()),
      &Validation::new(Algorithm::HS256),
    )
    .map(|token| token.claims)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_sign_and_verify() {
    let claims = SessionTokenClaims::new("user-1");
    assert_eq!(claims.exp - claims.iat, SESSION_TTL_SECONDS as usize);

    let token = claims.sign("secret").unwrap();
    let verified = SessionTokenClaims::verify(&token, "secret").unwrap();
    assert_eq!(verified, claims);
  }

  #[test]
  fn test_verify_rejects_other_secret() {
    let token = SessionTokenClaims::new("user-1").sign("secret").unwrap();
    assert!(SessionTokenClaims::verify(&token, "another").is_err());
  }

  #[test]
  fn test_verify_rejects_expired_token() {
    let claims = SessionTokenClaims {
      user_id: "user-1".to_string(),
      iat: 0,
      exp: 1,
    };
    let token = claims.sign("secret").unwrap();
    assert!(SessionTokenClaims::verify(&token, "secret").is_err());
  }

  #[test]
  fn test_claims_embed_user_id_as_camel_case() {
    let json = serde_json::to_value(SessionTokenClaims::new("abc")).unwrap();
    assert_eq!(json["userId"], "abc");
  }
}
