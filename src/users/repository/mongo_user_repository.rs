use mongodb::{
  bson::doc,
  error::{ErrorKind, WriteFailure},
  options::IndexOptions,
  Collection, IndexModel,
};

use super::user_repository::{
  FindOneProperty, UserRepository, UserRepositoryError,
};
use crate::{shared::database::MongoDatabase, users::model::user::User};

const USERS_COLLECTION: &str = "users";
const DUPLICATE_KEY: i32 = 11000;

pub struct MongoUserRepository {
  database: MongoDatabase,
  collection: Collection<User>,
}

impl MongoUserRepository {
  /// Opens the users collection and makes sure the unique email index exists.
  pub async fn init(
    database: MongoDatabase,
  ) -> Result<Self, UserRepositoryError> {
    let collection = database.database().collection::<User>(USERS_COLLECTION);
    collection
      .create_index(
        IndexModel::builder()
          .keys(doc! { "email": 1 })
          .options(IndexOptions::builder().unique(true).build())
          .build(),
      )
      .await?;
    log::info!(
      "Using collection {}.{}",
      database.database_name,
      USERS_COLLECTION
    );
    Ok(Self {
      database,
      collection,
    })
  }
}

fn map_write_error(
  error: mongodb::error::Error,
  email: &str,
) -> UserRepositoryError {
  let duplicate_key = matches!(
    error.kind.as_ref(),
    ErrorKind::Write(WriteFailure::WriteError(write_error))
      if write_error.code == DUPLICATE_KEY
  );
  if duplicate_key {
    return UserRepositoryError::DuplicateEmail(email.to_string());
  }
  UserRepositoryError::from(error)
}

impl UserRepository for MongoUserRepository {
  async fn find_one(
    &self,
    property: FindOneProperty<'_>,
  ) -> Result<User, UserRepositoryError> {
    self
      .collection
      .find_one(property.to_mongo_key_value())
      .await?
      .ok_or(UserRepositoryError::NotFound)
  }

  async fn find_all(&self) -> Result<Vec<User>, UserRepositoryError> {
    let mut cursor = self.collection.find(doc! {}).await?;
    let mut users = Vec::new();
    while cursor.advance().await? {
      users.push(cursor.deserialize_current()?);
    }
    Ok(users)
  }

  async fn create(&self, user: User) -> Result<(), UserRepositoryError> {
    self
      .collection
      .insert_one(&user)
      .await
      .map_err(|error| map_write_error(error, &user.email))?;
    Ok(())
  }

  async fn update(&self, user: &User) -> Result<(), UserRepositoryError> {
    let result = self
      .collection
      .replace_one(doc! { "_id": user.id.as_str() }, user)
      .await
      .map_err(|error| map_write_error(error, &user.email))?;
    if result.matched_count == 0 {
      return Err(UserRepositoryError::NotFound);
    }
    Ok(())
  }

  async fn delete(&self, id: &str) -> Result<(), UserRepositoryError> {
    let result = self.collection.delete_one(doc! { "_id": id }).await?;
    if result.deleted_count == 0 {
      return Err(UserRepositoryError::NotFound);
    }
    Ok(())
  }

  async fn ping(&self) -> Result<(), UserRepositoryError> {
    self.database.ping().await?;
    Ok(())
  }

  fn store_name(&self) -> &str {
    &self.database.database_name
  }
}
