//! Timestamps as stored in the catalog.

use std::{borrow::Borrow, fmt::Display};
use time::format_description::well_known::Rfc3339;

/// A UTC timestamp with subsecond precision.
///
/// SQLite has no native datetime type, so the value is stored as text through
/// `time::PrimitiveDateTime`. Over the wire it is always RFC3339, which is how
/// `createdAt` and `updatedAt` appear in responses.
///
/// # Examples
///
/// ```
/// # use catalog_sqlite::types::DateTime;
/// # use time::OffsetDateTime;
/// let now = DateTime::from(OffsetDateTime::now_utc());
/// println!("{}", now); // RFC3339
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
    sqlx::Type,
)]
#[serde(from = "Rfc3339Dto", into = "Rfc3339Dto")]
#[sqlx(transparent)]
pub struct DateTime(time::PrimitiveDateTime);

impl Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = time::OffsetDateTime::from(*self);
        let formatted = value.format(&Rfc3339).map_err(|_| std::fmt::Error)?;
        f.write_str(&formatted)
    }
}

impl<T: Borrow<time::OffsetDateTime>> From<T> for DateTime {
    fn from(value: T) -> Self {
        let utc = value.borrow().to_offset(time::UtcOffset::UTC);
        Self(time::PrimitiveDateTime::new(utc.date(), utc.time()))
    }
}

impl From<DateTime> for time::OffsetDateTime {
    fn from(value: DateTime) -> Self {
        value.0.assume_utc()
    }
}

// Routes (de)serialization through the RFC3339 helpers of the `time` crate.
#[derive(serde::Serialize, serde::Deserialize)]
struct Rfc3339Dto(#[serde(with = "time::serde::rfc3339")] time::OffsetDateTime);

impl From<Rfc3339Dto> for DateTime {
    fn from(value: Rfc3339Dto) -> Self {
        value.0.into()
    }
}

impl From<DateTime> for Rfc3339Dto {
    fn from(value: DateTime) -> Self {
        Self(value.into())
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for DateTime {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> std::borrow::Cow<'static, str> {
        "DateTime".into()
    }

    fn json_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "string",
            "format": "date-time",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn serializes_as_rfc3339_utc() {
        let value = DateTime::from(datetime!(2024-03-01 12:30:00 +02:00));
        assert_eq!(
            serde_json::to_value(value).unwrap(),
            serde_json::json!("2024-03-01T10:30:00Z")
        );
        assert_eq!(value.to_string(), "2024-03-01T10:30:00Z");
    }
}
