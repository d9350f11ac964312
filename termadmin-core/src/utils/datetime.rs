//! Datetime serialization/deserialization helpers.
//!
//! The remote service exchanges dates as epoch milliseconds:
//! - Serialization: `DateTime<Utc>` -> epoch milliseconds
//! - Deserialization: epoch milliseconds or RFC3339 string -> `DateTime<Utc>`

/// `Option<DateTime<Utc>>` serializer/deserializer helpers.
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes `Option<DateTime<Utc>>` as epoch milliseconds or `null`.
    #[allow(clippy::ref_option)]
    pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match dt {
            Some(dt) => serializer.serialize_some(&dt.timestamp_millis()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes `Option<DateTime<Utc>>` from epoch milliseconds, RFC3339, or `null`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum OptionalTimestamp {
            Millis(i64),
            String(String),
        }

        match Option::<OptionalTimestamp>::deserialize(deserializer)? {
            Some(OptionalTimestamp::Millis(ms)) => DateTime::from_timestamp_millis(ms)
                .map(Some)
                .ok_or_else(|| Error::custom("Invalid epoch milliseconds")),
            Some(OptionalTimestamp::String(s)) => DateTime::parse_from_rfc3339(&s)
                .map(|dt| Some(dt.with_timezone(&Utc)))
                .map_err(|e| Error::custom(format!("Invalid RFC3339 timestamp: {e}"))),
            None => Ok(None),
        }
    }
}
