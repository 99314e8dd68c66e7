use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::users::model::user::{Status, User};

/// Public view of a user: every stored field except the password hash.
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRto {
  #[serde(rename = "_id")]
  pub id: String,
  pub name: String,
  pub dob: Option<NaiveDate>,
  pub email: String,
  pub role: String,
  pub status: Status,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<User> for UserRto {
  fn from(user: User) -> Self {
    Self {
      id: user.id,
      name: user.name,
      dob: user.dob,
      email: user.email,
      role: user.role,
      status: user.status,
      created_at: user.created_at,
      updated_at: user.updated_at,
    }
  }
}
