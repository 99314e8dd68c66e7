use std::{
  fs, io,
  path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::client::{AuthResponse, UserView};

#[derive(Debug, Error)]
pub enum SessionError {
  #[error("Session file {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("Session file {path} is corrupt: {source}")]
  Json {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}

/// The client-local "logged in" marker. Removing it does not revoke the
/// token on the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
  pub token: String,
  pub user: UserView,
}

impl From<AuthResponse> for Session {
  fn from(response: AuthResponse) -> Self {
    Self {
      token: response.token,
      user: response.user,
    }
  }
}

pub struct SessionStore {
  path: PathBuf,
}

impl SessionStore {
  pub fn new(path: impl AsRef<Path>) -> Self {
    Self {
      path: path.as_ref().to_path_buf(),
    }
  }

  pub fn save(&self, session: &Session) -> Result<(), SessionError> {
    let json =
      serde_json::to_string_pretty(session).map_err(|source| {
        SessionError::Json {
          path: self.path.clone(),
          source,
        }
      })?;
    fs::write(&self.path, json).map_err(|source| SessionError::Io {
      path: self.path.clone(),
      source,
    })
  }

  pub fn load(&self) -> Result<Option<Session>, SessionError> {
    let json = match fs::read_to_string(&self.path) {
      Ok(json) => json,
      Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
      Err(source) => {
        return Err(SessionError::Io {
          path: self.path.clone(),
          source,
        })
      }
    };
    serde_json::from_str(&json)
      .map(Some)
      .map_err(|source| SessionError::Json {
        path: self.path.clone(),
        source,
      })
  }

  /// Returns whether a session was present.
  pub fn clear(&self) -> Result<bool, SessionError> {
    match fs::remove_file(&self.path) {
      Ok(()) => Ok(true),
      Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(false),
      Err(source) => Err(SessionError::Io {
        path: self.path.clone(),
        source,
      }),
    }
  }
}
