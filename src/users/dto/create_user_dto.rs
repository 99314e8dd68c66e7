use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator_derive::Validate;

use crate::shared::deserialize::{empty_as_none, optional_date};
use crate::users::model::user::Status;

#[derive(ToSchema, Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateUserDto {
  #[validate(length(min = 1, message = "Name is required"))]
  #[serde(default)]
  pub name: String,
  #[serde(default, deserialize_with = "optional_date")]
  pub dob: Option<NaiveDate>,
  #[validate(length(min = 1, message = "Email is required"))]
  #[serde(default)]
  pub email: String,
  #[validate(length(min = 1, message = "Password is required"))]
  #[serde(default)]
  pub password: String,
  #[serde(default, deserialize_with = "empty_as_none")]
  pub role: Option<String>,
  #[serde(default, deserialize_with = "empty_as_none")]
  pub status: Option<Status>,
}
