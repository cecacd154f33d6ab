use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Canonical tags of the default vocabulary.
pub mod tags {
    pub const CHECK_IN: &str = "CheckIn";
    pub const BANK: &str = "Bank";
    pub const VIDEO: &str = "Video";
    pub const SHOPPING: &str = "Shopping";
    pub const DAILY_TASK: &str = "DailyTask";
    pub const PAYMENT: &str = "Payment";
    pub const DEPOSIT: &str = "Deposit";
    pub const LIFE: &str = "Life";
    pub const FOOD: &str = "Food";
}

/// Maps source-language category labels onto canonical tags.
///
/// Labels missing from the table pass through trimmed, so a newly added
/// upstream label still shows up instead of vanishing.
#[derive(Debug, Clone, Default)]
pub struct CategoryTranslator {
    table: HashMap<String, String>,
}

impl CategoryTranslator {
    pub fn new(table: &BTreeMap<String, String>) -> Self {
        Self {
            table: table
                .iter()
                .map(|(label, tag)| (label.trim().to_string(), tag.trim().to_string()))
                .collect(),
        }
    }

    pub fn translate_label(&self, label: &str) -> String {
        let trimmed = label.trim();
        self.table
            .get(trimmed)
            .cloned()
            .unwrap_or_else(|| trimmed.to_string())
    }

    /// Translate a raw category value: absent, a single label, or a list.
    ///
    /// First occurrence order is kept and duplicates are dropped.
    pub fn translate(&self, raw: Option<&Value>) -> Vec<String> {
        let labels: Vec<&str> = match raw {
            Some(Value::String(s)) => vec![s.as_str()],
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        };

        let mut out: Vec<String> = Vec::with_capacity(labels.len());
        for tag in labels.into_iter().map(|l| self.translate_label(l)) {
            if !tag.is_empty() && !out.contains(&tag) {
                out.push(tag);
            }
        }
        out
    }
}

/// Tag comparison used by queries. Lenient mode trims and ignores case.
pub fn tag_matches(candidate: &str, wanted: &str, lenient: bool) -> bool {
    if candidate == wanted {
        return true;
    }
    lenient && candidate.trim().to_lowercase() == wanted.trim().to_lowercase()
}
