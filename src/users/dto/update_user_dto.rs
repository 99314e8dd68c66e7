use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::shared::deserialize::{empty_as_none, optional_date};
use crate::users::model::user::Status;

/// Partial update. `None` means "keep the stored value"; empty strings in the
/// body decode to `None`, so a field can never be cleared.
#[derive(ToSchema, Debug, Clone, Default, Deserialize)]
pub struct UpdateUserDto {
  #[serde(default, deserialize_with = "empty_as_none")]
  pub name: Option<String>,
  #[serde(default, deserialize_with = "optional_date")]
  pub dob: Option<NaiveDate>,
  #[serde(default, deserialize_with = "empty_as_none")]
  pub email: Option<String>,
  #[serde(default, deserialize_with = "empty_as_none")]
  pub password: Option<String>,
  #[serde(default, deserialize_with = "empty_as_none")]
  pub role: Option<String>,
  #[serde(default, deserialize_with = "empty_as_none")]
  pub status: Option<Status>,
}
