use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_ROLE: &str = "user";

#[derive(
  ToSchema, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
pub enum Status {
  #[default]
  Active,
  Suspended,
  Inactive,
}

/// A stored user document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  #[serde(rename = "_id")]
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub dob: Option<NaiveDate>,
  pub email: String,
  pub password_hash: String,
  #[serde(default)]
  pub role: String,
  #[serde(default)]
  pub status: Status,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}
