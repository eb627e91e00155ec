use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::api::Payload;

/// Lead time of a reminder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
    TwoWeeksBefore,
    OneDayBefore,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    #[serde(rename = "type")]
    pub kind: ReminderKind,
}

/// One person's assigned work date as returned by `GET /shifts`.
/// Every field is optional on the wire; spreadsheet cells may also come
/// through as numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub berth: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub weekday: Option<String>,
    #[serde(default, deserialize_with = "deserialize_reminders")]
    pub reminders: Vec<Reminder>,
}

impl Shift {
    pub fn has_reminder(&self, kind: ReminderKind) -> bool {
        self.reminders.iter().any(|r| r.kind == kind)
    }

    pub fn last_name(&self) -> &str {
        self.last_name.as_deref().unwrap_or("")
    }

    /// Year of the shift date, when the date starts with one
    pub fn year(&self) -> Option<i32> {
        self.date.as_deref()?.get(0..4)?.parse().ok()
    }

    /// Decode the shift list out of a `/shifts` payload.
    ///
    /// Non-array payloads yield nothing; array elements that do not decode
    /// are dropped.
    pub fn list_from_payload(payload: &Payload) -> Vec<Shift> {
        let items = match payload.as_json() {
            Some(Value::Array(items)) => items,
            _ => {
                warn!("Shift payload is not a JSON array, ignoring it");
                return Vec::new();
            }
        };

        items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match Shift::deserialize(item) {
                Ok(shift) => Some(shift),
                Err(e) => {
                    warn!(index, error = %e, "Dropping undecodable shift");
                    None
                }
            })
            .collect()
    }
}

// Helper to deserialize string, number or bool as Option<String>.
// Nested values count as absent so only a bad `date` can drop a shift.
fn deserialize_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de;

    struct StringOrNumberVisitor;

    impl<'de> de::Visitor<'de> for StringOrNumberVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string or number")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E> {
            if v.is_empty() {
                Ok(None)
            } else {
                Ok(Some(v.to_string()))
            }
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            while seq.next_element::<de::IgnoredAny>()?.is_some() {}
            Ok(None)
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: de::MapAccess<'de>,
        {
            while map.next_entry::<de::IgnoredAny, de::IgnoredAny>()?.is_some() {}
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(StringOrNumberVisitor)
}

// Reminders that are not an array, or entries that do not decode, count as absent
fn deserialize_reminders<'de, D>(deserializer: D) -> Result<Vec<Reminder>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}
