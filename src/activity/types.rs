use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A record as handed over by the upstream table, before any cleanup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl RawRecord {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

/// Fixed-shape activity record; the artifact is a JSON array of these.
///
/// Field order here is the key order in the artifact. The aliases let older
/// snapshots (`deepLink`, scalar `category`) load as they are: fields missing
/// from such a snapshot come back empty and are not backfilled with the
/// `[defaults]` sentinels, which only the normalizer applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalActivity {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default, alias = "deepLink")]
    pub link: String,
    #[serde(default, alias = "category", deserialize_with = "one_or_many")]
    pub categories: Vec<String>,
    #[serde(default)]
    pub source_app: String,
    #[serde(default)]
    pub target_app: String,
    #[serde(default)]
    pub special_note: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub steps_text: Option<String>,
}

impl CanonicalActivity {
    pub fn has_category(&self, tag: &str) -> bool {
        self.categories.iter().any(|c| c == tag)
    }
}

// Older snapshots stored a bare string or null under `category`.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
        None => Vec::new(),
    })
}
