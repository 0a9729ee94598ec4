use serde::{Deserialize, Deserializer, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(EventId);
id_newtype!(NoticeId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    Official,
    UserReport,
    /// Any source label this build does not know yet.
    #[serde(other)]
    Unknown,
}

/// Reads `null` as the type's default instead of failing the whole item.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One outage notice or user report as served by the events API.
///
/// A single official notice fans out into one item per affected place, so
/// `notice_id` repeats while `id` stays unique within one response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventItem {
    pub id: EventId,
    pub notice_id: NoticeId,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date_local: String,
    #[serde(default)]
    pub start_local: Option<String>,
    #[serde(default)]
    pub end_local: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration_minutes: f64,
    #[serde(default)]
    pub places: Option<Vec<String>>,
    #[serde(default)]
    pub window_text: Option<String>,
    #[serde(default)]
    pub source: Option<EventSource>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reported_at: Option<String>,
    #[serde(default)]
    pub cluster_id: Option<String>,
}

impl EventItem {
    /// Bare item with only the required fields set. Handy for fixtures.
    pub fn new(id: impl Into<String>, date_local: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            notice_id: NoticeId(id.clone()),
            id: EventId(id),
            region: None,
            county: None,
            area: None,
            date_local: date_local.into(),
            start_local: None,
            end_local: None,
            duration_minutes: 0.0,
            places: None,
            window_text: None,
            source: None,
            description: None,
            reported_at: None,
            cluster_id: None,
        }
    }
}
