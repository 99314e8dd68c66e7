use serde::Deserialize;
use utoipa::ToSchema;
use validator_derive::Validate;

#[derive(ToSchema, Debug, Clone, Deserialize, Validate)]
pub struct LoginDto {
  #[validate(length(min = 1, message = "Email is required"))]
  #[serde(default)]
  pub email: String,
  #[validate(length(min = 1, message = "Password is required"))]
  #[serde(default)]
  pub password: String,
}
