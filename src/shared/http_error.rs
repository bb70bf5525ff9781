use actix_web::{
  error::{InternalError, JsonPayloadError},
  HttpRequest, HttpResponse,
};
use serde::{Deserialize, Serialize};

/// Failure body shared by every endpoint: `{ message, success: false }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpError {
  pub message: String,
  pub success: bool,
}

impl From<&str> for HttpError {
  fn from(message: &str) -> Self {
    Self {
      message: String::from(message),
      success: false,
    }
  }
}

impl From<String> for HttpError {
  fn from(message: String) -> Self {
    Self {
      message,
      success: false,
    }
  }
}

pub fn bad_request(message: impl Into<HttpError>) -> HttpResponse {
  HttpResponse::BadRequest()
    .content_type("application/json")
    .json(message.into())
}

pub fn server_error(message: &str) -> HttpResponse {
  HttpResponse::InternalServerError()
    .content_type("application/json")
    .json(HttpError::from(message))
}

/// Keeps malformed JSON bodies inside the `{ message, success }` envelope.
pub fn json_error_handler(
  error: JsonPayloadError,
  _request: &HttpRequest,
) -> actix_web::Error {
  log::warn!("Rejected request body: {}", error);
  InternalError::from_response(error, bad_request("Invalid request body"))
    .into()
}
