//! Identifier newtypes and the wire date format shared by all entities.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

numeric_id!(
    /// Backend identifier of a user account.
    UserId
);
numeric_id!(
    /// Backend identifier of a pet.
    PetId
);
numeric_id!(
    /// Backend identifier of a feeding, daily activity or medical history entry.
    RecordId
);

impl RecordId {
    /// Placeholder id for an optimistically appended record whose server id is
    /// not known yet. Replaced by the next list refresh.
    pub const PROVISIONAL: RecordId = RecordId(0);

    pub fn is_provisional(&self) -> bool {
        *self == Self::PROVISIONAL
    }
}

/// Wire format for calendar dates: `yyyy-MM-dd`.
///
/// Deserialization also accepts full timestamps (`2020-01-31T00:00:00.000Z`)
/// and keeps only the date part, since the backend echoes stored dates that way.
pub mod date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    /// Parses `yyyy-MM-dd`, ignoring any trailing time component.
    pub fn parse(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
        let date_part = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(date_part, FORMAT)
    }

    /// Optional variant for fields the backend may omit or send as null.
    pub mod option {
        use chrono::NaiveDate;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match date {
                Some(date) => super::serialize(date, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            match raw {
                Some(raw) if !raw.trim().is_empty() => super::parse(&raw)
                    .map(Some)
                    .map_err(serde::de::Error::custom),
                _ => Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[derive(Serialize, Deserialize)]
    struct Dated {
        #[serde(with = "date_format")]
        date: NaiveDate,
    }

    #[test]
    fn dates_serialize_as_plain_calendar_dates() {
        let dated = Dated {
            date: NaiveDate::from_ymd_opt(2023, 4, 9).unwrap(),
        };
        assert_eq!(
            serde_json::to_string(&dated).unwrap(),
            r#"{"date":"2023-04-09"}"#
        );
    }

    #[test]
    fn timestamps_are_truncated_to_the_date() {
        let dated: Dated = serde_json::from_str(r#"{"date":"2021-12-01T00:00:00.000Z"}"#).unwrap();
        assert_eq!(dated.date, NaiveDate::from_ymd_opt(2021, 12, 1).unwrap());
    }

    #[test]
    fn ids_are_transparent_numbers() {
        let id: PetId = serde_json::from_str("42").unwrap();
        assert_eq!(id, PetId(42));
        assert_eq!(id.to_string(), "42");
        assert!(RecordId(0).is_provisional());
    }
}
