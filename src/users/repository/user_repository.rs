use thiserror::Error;

use crate::users::model::user::User;

#[derive(Debug, Error)]
pub enum UserRepositoryError {
  #[error("User not found")]
  NotFound,

  #[error("Email already in use: {0}")]
  DuplicateEmail(String),

  #[error("Store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[cfg(any(test, not(feature = "mongodb")))]
  #[error("Store lock poisoned")]
  Poisoned,
}

#[cfg(feature = "mongodb")]
impl From<mongodb::error::Error> for UserRepositoryError {
  fn from(error: mongodb::error::Error) -> Self {
    Self::Store(Box::new(error))
  }
}

#[derive(Debug, Clone, Copy)]
pub enum FindOneProperty<'a> {
  Id(&'a str),
  Email(&'a str),
}

impl FindOneProperty<'_> {
  #[cfg(any(test, not(feature = "mongodb")))]
  pub fn matches(&self, user: &User) -> bool {
    match self {
      FindOneProperty::Id(id) => user.id == *id,
      FindOneProperty::Email(email) => user.email == *email,
    }
  }

  #[cfg(feature = "mongodb")]
  pub fn to_mongo_key_value(&self) -> mongodb::bson::Document {
    use mongodb::bson::doc;

    match self {
      FindOneProperty::Id(id) => doc! { "_id": *id },
      FindOneProperty::Email(email) => doc! { "email": *email },
    }
  }
}

/// Persistence of user records. Email uniqueness is enforced by every
/// implementation at write time.
#[allow(async_fn_in_trait)]
pub trait UserRepository {
  async fn find_one(
    &self,
    property: FindOneProperty<'_>,
  ) -> Result<User, UserRepositoryError>;
  async fn find_all(&self) -> Result<Vec<User>, UserRepositoryError>;
  async fn create(&self, user: User) -> Result<(), UserRepositoryError>;
  /// Replaces the stored record with the same id.
  async fn update(&self, user: &User) -> Result<(), UserRepositoryError>;
  async fn delete(&self, id: &str) -> Result<(), UserRepositoryError>;
  /// Round-trips to the store; used by the health check.
  async fn ping(&self) -> Result<(), UserRepositoryError>;
  fn store_name(&self) -> &str;
}
