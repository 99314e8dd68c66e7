//! Lenient field decoders for request bodies. Form clients send `""` for
//! fields the user left blank; those decode to `None`. Whitespace is a value.

use chrono::{DateTime, NaiveDate};
use serde::{
  de::{value::StrDeserializer, Error, IntoDeserializer},
  Deserialize, Deserializer,
};

/// Decodes an optional field, treating `null` and `""` as absent.
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  match Option::<String>::deserialize(deserializer)? {
    Some(value) if !value.is_empty() => {
      let value_deserializer: StrDeserializer<'_, D::Error> =
        value.as_str().into_deserializer();
      T::deserialize(value_deserializer).map(Some)
    }
    _ => Ok(None),
  }
}

/// Decodes an optional calendar date. Accepts `YYYY-MM-DD` or a full RFC 3339
/// timestamp, of which only the date is kept.
pub fn optional_date<'de, D>(
  deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = match Option::<String>::deserialize(deserializer)? {
    Some(value) if !value.trim().is_empty() => value,
    _ => return Ok(None),
  };
  let value = value.trim();

  if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
    return Ok(Some(date));
  }
  DateTime::parse_from_rfc3339(value)
    .map(|timestamp| Some(timestamp.date_naive()))
    .map_err(|_| D::Error::custom(format!("invalid date `{}`", value)))
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde::Deserialize;

  use crate::users::model::user::Status;

  #[derive(Deserialize)]
  struct Body {
    #[serde(default, deserialize_with = "empty_as_none")]
    status: Option<Status>,
    #[serde(default, deserialize_with = "empty_as_none")]
    role: Option<String>,
    #[serde(default, deserialize_with = "optional_date")]
    dob: Option<NaiveDate>,
  }

  #[test]
  fn test_empty_strings_are_absent() {
    let body: Body =
      serde_json::from_str(r#"{"status": "", "role": "", "dob": ""}"#)
        .unwrap();
    assert!(body.status.is_none());
    assert!(body.role.is_none());
    assert!(body.dob.is_none());

    let body: Body = serde_json::from_str("{}").unwrap();
    assert!(body.status.is_none());
    assert!(body.dob.is_none());
  }

  #[test]
  fn test_whitespace_is_a_value() {
    let body: Body = serde_json::from_str(r#"{"role": "  "}"#).unwrap();
    assert_eq!(body.role.as_deref(), Some("  "));
  }

  #[test]
  fn test_values_are_decoded() {
    let body: Body = serde_json::from_str(
      r#"{"status": "Suspended", "role": "admin", "dob": "2000-01-01"}"#,
    )
    .unwrap();
    assert_eq!(body.status, Some(Status::Suspended));
    assert_eq!(body.role.as_deref(), Some("admin"));
    assert_eq!(body.dob, NaiveDate::from_ymd_opt(2000, 1, 1));
  }

  #[test]
  fn test_timestamp_keeps_date() {
    let body: Body =
      serde_json::from_str(r#"{"dob": "1999-12-31T00:00:00.000Z"}"#).unwrap();
    assert_eq!(body.dob, NaiveDate::from_ymd_opt(1999, 12, 31));
  }

  #[test]
  fn test_unknown_status_is_rejected() {
    let result = serde_json::from_str::<Body>(r#"{"status": "Banned"}"#);
    assert!(result.is_err());
  }
}
