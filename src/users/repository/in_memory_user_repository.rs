use std::sync::{Arc, RwLock};

use super::user_repository::{
  FindOneProperty, UserRepository, UserRepositoryError,
};
use crate::users::model::user::User;

/// Process-local store, used by tests and by builds without MongoDB.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
  pub users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

impl UserRepository for InMemoryUserRepository {
  async fn find_one(
    &self,
    property: FindOneProperty<'_>,
  ) -> Result<User, UserRepositoryError> {
    let users = self.users.read().map_err(|_| UserRepositoryError::Poisoned)?;
    users
      .iter()
      .find(|user| property.matches(user))
      .cloned()
      .ok_or(UserRepositoryError::NotFound)
  }

  async fn find_all(&self) -> Result<Vec<User>, UserRepositoryError> {
    let users = self.users.read().map_err(|_| UserRepositoryError::Poisoned)?;
    Ok(users.clone())
  }

  async fn create(&self, user: User) -> Result<(), UserRepositoryError> {
    let mut users =
      self.users.write().map_err(|_| UserRepositoryError::Poisoned)?;
    if users.iter().any(|existing| existing.email == user.email) {
      return Err(UserRepositoryError::DuplicateEmail(user.email));
    }
    users.push(user);
    Ok(())
  }

  async fn update(&self, user: &User) -> Result<(), UserRepositoryError> {
    let mut users =
      self.users.write().map_err(|_| UserRepositoryError::Poisoned)?;
    if users
      .iter()
      .any(|existing| existing.email == user.email && existing.id != user.id)
    {
      return Err(UserRepositoryError::DuplicateEmail(user.email.clone()));
    }
    let stored = users
      .iter_mut()
      .find(|existing| existing.id == user.id)
      .ok_or(UserRepositoryError::NotFound)?;
    *stored = user.clone();
    Ok(())
  }

  async fn delete(&self, id: &str) -> Result<(), UserRepositoryError> {
    let mut users =
      self.users.write().map_err(|_| UserRepositoryError::Poisoned)?;
    let position = users
      .iter()
      .position(|user| user.id == id)
      .ok_or(UserRepositoryError::NotFound)?;
    users.remove(position);
    Ok(())
  }

  async fn ping(&self) -> Result<(), UserRepositoryError> {
    self
      .users
      .read()
      .map(|_| ())
      .map_err(|_| UserRepositoryError::Poisoned)
  }

  fn store_name(&self) -> &str {
    "memory"
  }
}
