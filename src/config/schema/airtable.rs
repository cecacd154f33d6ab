use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirtableConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Personal access token, sent as a bearer token. Usually supplied via `AIRTABLE_PAT`.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub base_id: Option<String>,
    #[serde(default = "default_table")]
    pub table: String,
    /// Server-side `filterByFormula` expression, e.g. `{Status} = 'active'`.
    #[serde(default)]
    pub filter_formula: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "https://api.airtable.com/v0".into()
}

fn default_table() -> String {
    "Wisecompanion".into()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for AirtableConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            token: None,
            base_id: None,
            table: default_table(),
            filter_formula: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Client-side pre-filter applied to raw records before normalization.
///
/// Only records whose `field` holds exactly `equals` (after trimming) survive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordFilterConfig {
    pub field: String,
    pub equals: String,
}
