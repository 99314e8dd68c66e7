use std::{env, num::ParseIntError, thread};

use thiserror::Error;

const DEV_JWT_SECRET: &str = "DEV_JWT_SECRET";
const BCRYPT_COSTS: std::ops::RangeInclusive<u32> = 4..=31;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("{name} must be a number: {source}")]
  InvalidNumber {
    name: &'static str,
    #[source]
    source: ParseIntError,
  },
  #[error("BCRYPT_COST must be between 4 and 31, got {0}")]
  BcryptCost(u32),
}

#[derive(Clone, Debug)]
pub struct Config {
  pub host: String,
  pub port: u16,
  pub mongo_uri: String,
  pub mongo_database: String,
  pub jwt_secret: String,
  pub bcrypt_cost: u32,
  pub hash_workers: u32,
}

impl Config {
  /// Reads the configuration from the process environment, after loading a
  /// `.env` file when one is present.
  pub fn from_env() -> Result<Self, ConfigError> {
    dotenvy::dotenv().ok();

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = parse_var("PORT", 5000)?;
    let mongo_uri = env::var("MONGO_URI")
      .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let mongo_database =
      env::var("MONGO_DATABASE").unwrap_or_else(|_| "user_admin".to_string());
    let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
      log::warn!("JWT_SECRET is not set, falling back to the development secret");
      DEV_JWT_SECRET.to_string()
    });
    let bcrypt_cost = check_bcrypt_cost(parse_var("BCRYPT_COST", 10)?)?;
    let default_workers = thread::available_parallelism()
      .map(|workers| workers.get() as u32)
      .unwrap_or(4);
    let hash_workers = parse_var("HASH_WORKERS", default_workers)?;

    Ok(Self {
      host,
      port,
      mongo_uri,
      mongo_database,
      jwt_secret,
      bcrypt_cost,
      hash_workers,
    })
  }

  pub fn bind_address(&self) -> (String, u16) {
    (self.host.clone(), self.port)
  }
}

fn check_bcrypt_cost(cost: u32) -> Result<u32, ConfigError> {
  if BCRYPT_COSTS.contains(&cost) {
    Ok(cost)
  } else {
    Err(ConfigError::BcryptCost(cost))
  }
}

fn parse_var<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
  T: std::str::FromStr<Err = ParseIntError>,
{
  match env::var(name) {
    Ok(value) => value
      .trim()
      .parse()
      .map_err(|source| ConfigError::InvalidNumber { name, source }),
    Err(_) => Ok(default),
  }
}
