use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::users::rto::user_rto::UserRto;

/// Returned by register and login.
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthRto {
  pub token: String,
  pub user: UserRto,
}
