use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(BlogId);

/// A blog record as exchanged with the backend.
///
/// Field names on the wire follow the backend's Spanish schema; timestamps
/// are server-assigned and never sent back. See [`lenient_timestamp`] for the
/// accepted timestamp encodings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogEntity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BlogId>,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "contenido")]
    pub content: String,
    #[serde(rename = "etiquetas")]
    pub tags: String,
    #[serde(
        rename = "fechaCreacion",
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<NaiveDateTime>,
    #[serde(
        rename = "fechaModificacion",
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub modified_at: Option<NaiveDateTime>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireTimestamp {
    Text(String),
    Parts(Vec<u32>),
    Other(IgnoredAny),
}

/// Reads a timestamp sent as a local date-time string, an RFC 3339 string
/// with an offset (kept as its wall-clock time), or a
/// `[year, month, day, hour, minute, second?, nanos?]` array. Unreadable
/// values become `None` instead of failing the whole record.
pub fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let wire = Option::<WireTimestamp>::deserialize(deserializer)?;
    Ok(wire.and_then(|wire| match wire {
        WireTimestamp::Text(text) => parse_timestamp_text(&text),
        WireTimestamp::Parts(parts) => timestamp_from_parts(&parts),
        WireTimestamp::Other(_) => None,
    }))
}

fn parse_timestamp_text(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    text.parse::<NaiveDateTime>()
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|stamp| stamp.naive_local())
        })
        .or_else(|| {
            text.parse::<NaiveDate>()
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn timestamp_from_parts(parts: &[u32]) -> Option<NaiveDateTime> {
    let field = |index: usize| parts.get(index).copied().unwrap_or(0);
    if parts.len() < 3 {
        return None;
    }
    let year = i32::try_from(field(0)).ok()?;
    NaiveDate::from_ymd_opt(year, field(1), field(2))?.and_hms_nano_opt(
        field(3),
        field(4),
        field(5),
        field(6),
    )
}

impl BlogEntity {
    pub fn to_draft(&self) -> BlogDraft {
        BlogDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// User-editable fields of a blog; the body of create and update requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogDraft {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "contenido")]
    pub content: String,
    #[serde(rename = "etiquetas")]
    pub tags: String,
}

impl BlogDraft {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        tags: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags: tags.into(),
        }
    }

    pub fn into_entity(self, id: Option<BlogId>) -> BlogEntity {
        BlogEntity {
            id,
            title: self.title,
            content: self.content,
            tags: self.tags,
            created_at: None,
            modified_at: None,
        }
    }
}
