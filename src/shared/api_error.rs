use std::fmt::Display;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;
use validator::ValidationErrors;

use super::http_error::HttpError;

#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  Validation(String),
  #[error("User already exists")]
  UserAlreadyExists,
  #[error("Invalid credentials")]
  InvalidCredentials,
  #[error("User not found")]
  UserNotFound,
  /// The message is what the client sees; the cause has already been logged.
  #[error("{0}")]
  Internal(&'static str),
}

impl ApiError {
  /// Logs `error` and hides it behind a generic `message`.
  pub fn internal(message: &'static str, error: impl Display) -> Self {
    log::error!("{}: {}", message, error);
    Self::Internal(message)
  }
}

impl From<ValidationErrors> for ApiError {
  fn from(errors: ValidationErrors) -> Self {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));
    let message = fields
      .into_iter()
      .flat_map(|(field, errors)| {
        errors.iter().map(move |error| match &error.message {
          Some(message) => message.to_string(),
          None => format!("{} is invalid", field),
        })
      })
      .collect::<Vec<_>>()
      .join(", ");
    Self::Validation(message)
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      Self::Validation(_)
      | Self::UserAlreadyExists
      | Self::InvalidCredentials => StatusCode::BAD_REQUEST,
      Self::UserNotFound => StatusCode::NOT_FOUND,
      Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    HttpResponse::build(self.status_code())
      .content_type("application/json")
      .json(HttpError::from(self.to_string()))
  }
}
