use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of every non-2xx response.
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpError {
  pub error: String,
}

impl From<&str> for HttpError {
  fn from(error: &str) -> Self {
    Self {
      error: error.to_string(),
    }
  }
}

impl From<String> for HttpError {
  fn from(error: String) -> Self {
    Self { error }
  }
}
