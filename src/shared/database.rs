use mongodb::{bson::doc, Client};

use super::config::Config;

/// Handle to the configured MongoDB database. Cloning is cheap; the driver
/// pools connections internally.
#[derive(Clone)]
pub struct MongoDatabase {
  pub mongo_client: Client,
  pub database_name: String,
}

impl MongoDatabase {
  pub async fn connect(config: &Config) -> Result<Self, mongodb::error::Error> {
    let mongo_client = Client::with_uri_str(&config.mongo_uri).await?;
    Ok(Self {
      mongo_client,
      database_name: config.mongo_database.clone(),
    })
  }

  pub fn database(&self) -> mongodb::Database {
    self.mongo_client.database(&self.database_name)
  }

  pub async fn ping(&self) -> Result<(), mongodb::error::Error> {
    self.database().run_command(doc! { "ping": 1 }).await?;
    Ok(())
  }
}
