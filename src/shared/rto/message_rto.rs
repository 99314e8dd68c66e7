use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageRto {
  pub message: String,
}

impl From<&str> for MessageRto {
  fn from(message: &str) -> Self {
    Self {
      message: message.to_string(),
    }
  }
}
