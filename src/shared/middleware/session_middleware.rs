use crate::{
  shared::{config::Config, http_error::HttpError},
  users::model::session_token_claims::{SessionTokenClaims, SESSION_COOKIE},
};
use actix_web::web::Data;
use actix_web::{
  dev::Payload, http::StatusCode, FromRequest, HttpRequest, HttpResponse,
  ResponseError,
};
use futures::future::{ready, Ready};
use thiserror::Error;

/// Identifier of the user owning the session cookie of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
  pub user_id: String,
}

#[derive(Debug, Error)]
#[error("User not authenticated")]
pub struct Unauthenticated;

impl ResponseError for Unauthenticated {
  fn status_code(&self) -> StatusCode {
    StatusCode::UNAUTHORIZED
  }

  fn error_response(&self) -> HttpResponse {
    HttpResponse::Unauthorized()
      .content_type("application/json")
      .json(HttpError::from(self.to_string()))
  }
}

impl FromRequest for AuthenticatedUser {
  type Error = Unauthenticated;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let Some(config) = req.app_data::<Data<Config>>() else {
      log::error!("Session config is not registered as app data");
      return ready(Err(Unauthenticated));
    };
    ready(
      req
        .cookie(SESSION_COOKIE)
        .filter(|cookie| !cookie.value().is_empty())
        .and_then(|cookie| find_auth_user(config, cookie.value()).ok())
        .map(|claims| AuthenticatedUser {
          user_id: claims.user_id,
        })
        .ok_or(Unauthenticated),
    )
  }
}

fn find_auth_user(
  config: &Config,
  token: &str,
) -> Result<SessionTokenClaims, jsonwebtoken::errors::Error> {
  SessionTokenClaims::verify(token, &config.jwt_secret)
}
