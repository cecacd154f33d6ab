use super::category::CategoryTranslator;
use super::countdown::parse_end_date;
use super::types::{CanonicalActivity, RawRecord};
use crate::config::{Config, DefaultsConfig, RecordFilterConfig};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

/// Caller-supplied filter over raw records, applied before mapping.
pub type RecordPredicate = Arc<dyn Fn(&RawRecord) -> bool + Send + Sync>;

const NAME_KEYS: &[&str] = &["Name", "name", "名称", "活动名称"];
const DESCRIPTION_KEYS: &[&str] = &["Description", "description", "描述"];
const ICON_KEYS: &[&str] = &["Icon", "icon"];
const LINK_KEYS: &[&str] = &["DeepLink", "deepLink", "Link", "link", "URL", "url"];
const CATEGORY_KEYS: &[&str] = &[
    "Category",
    "category",
    "Categories",
    "categories",
    "分类",
    "活动分类",
];
const SOURCE_APP_KEYS: &[&str] = &["SourceApp", "sourceApp", "来源"];
const TARGET_APP_KEYS: &[&str] = &["TargetApp", "targetApp"];
const SPECIAL_NOTE_KEYS: &[&str] = &["SpecialNote", "specialNote"];
const END_DATE_KEYS: &[&str] = &["EndDate", "endDate", "截止日期"];
const STEPS_KEYS: &[&str] = &["StepsText", "stepsText", "Steps", "steps"];

/// Turns raw upstream records into canonical activities.
///
/// Every fallback is resolved here so the artifact never needs guessing
/// downstream.
#[derive(Debug, Clone)]
pub struct RecordNormalizer {
    translator: CategoryTranslator,
    defaults: DefaultsConfig,
}

impl RecordNormalizer {
    pub fn new(translator: CategoryTranslator, defaults: DefaultsConfig) -> Self {
        Self {
            translator,
            defaults,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            CategoryTranslator::new(&config.categories.translations),
            config.defaults.clone(),
        )
    }

    pub fn normalize(&self, raw: &RawRecord) -> CanonicalActivity {
        let d = &self.defaults;
        let text = |keys: &[&str]| first_text(raw, keys);

        let source_app = text(SOURCE_APP_KEYS).unwrap_or_else(|| d.source_app.clone());
        let target_app = text(TARGET_APP_KEYS)
            .or_else(|| text(SOURCE_APP_KEYS))
            .unwrap_or_else(|| d.target_app.clone());

        CanonicalActivity {
            id: raw.id.trim().to_string(),
            name: text(NAME_KEYS).unwrap_or_else(|| d.name.clone()),
            description: text(DESCRIPTION_KEYS).unwrap_or_else(|| d.description.clone()),
            icon: text(ICON_KEYS).unwrap_or_else(|| d.icon.clone()),
            link: text(LINK_KEYS).unwrap_or_else(|| d.link.clone()),
            categories: self.categories(raw),
            source_app,
            target_app,
            special_note: text(SPECIAL_NOTE_KEYS),
            end_date: text(END_DATE_KEYS)
                .and_then(|s| parse_end_date(&s))
                .map(|date| date.format("%Y-%m-%d").to_string()),
            steps_text: text(STEPS_KEYS),
        }
    }

    // A blank or empty variant must not hide a filled one further down.
    fn categories(&self, raw: &RawRecord) -> Vec<String> {
        CATEGORY_KEYS
            .iter()
            .filter_map(|key| raw.fields.get(*key))
            .map(|value| self.translator.translate(Some(value)))
            .find(|tags| !tags.is_empty())
            .unwrap_or_default()
    }

    /// Normalize a batch, keeping upstream order.
    ///
    /// Records rejected by `predicate` are skipped. Ids are compared trimmed;
    /// a repeated id keeps only its first record and an empty one is dropped.
    pub fn normalize_all(
        &self,
        records: &[RawRecord],
        predicate: Option<&RecordPredicate>,
    ) -> Vec<CanonicalActivity> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());
        let mut out = Vec::with_capacity(records.len());

        for raw in records {
            if predicate.is_some_and(|keep| !keep(raw)) {
                continue;
            }
            let id = raw.id.trim();
            if id.is_empty() {
                tracing::warn!("skipping record without id");
                continue;
            }
            if !seen.insert(id) {
                tracing::warn!(id, "skipping duplicate record id");
                continue;
            }
            out.push(self.normalize(raw));
        }
        out
    }
}

/// Build a predicate keeping records whose `field` equals `equals` after trimming.
pub fn field_equals(filter: &RecordFilterConfig) -> RecordPredicate {
    let field = filter.field.clone();
    let wanted = filter.equals.trim().to_string();
    Arc::new(move |raw: &RawRecord| {
        raw.fields
            .get(&field)
            .and_then(value_text)
            .is_some_and(|v| v == wanted)
    })
}

fn first_text(raw: &RawRecord, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| raw.fields.get(*key))
        .find_map(value_text)
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalizer() -> RecordNormalizer {
        RecordNormalizer::from_config(&Config::default())
    }

    fn raw(id: &str, fields: Value) -> RawRecord {
        RawRecord::new(id, fields.as_object().cloned().unwrap_or_default())
    }

    #[test]
    fn empty_record_gets_every_default() {
        let activity = normalizer().normalize(&raw("rec0", json!({})));
        let d = DefaultsConfig::default();
        assert_eq!(activity.id, "rec0");
        assert_eq!(activity.name, d.name);
        assert_eq!(activity.description, d.description);
        assert_eq!(activity.icon, d.icon);
        assert_eq!(activity.link, "#");
        assert!(activity.categories.is_empty());
        assert_eq!(activity.source_app, d.source_app);
        assert_eq!(activity.target_app, d.target_app);
        assert!(activity.special_note.is_none());
        assert!(activity.end_date.is_none());
        assert!(activity.steps_text.is_none());
    }

    #[test]
    fn blank_name_falls_back_to_sentinel() {
        let activity = normalizer().normalize(&raw("rec1", json!({ "Name": "   " })));
        assert_eq!(activity.name, DefaultsConfig::default().name);
        assert!(!activity.name.is_empty());
    }

    #[test]
    fn lowercase_and_chinese_keys_are_read() {
        let activity = normalizer().normalize(&raw(
            "rec2",
            json!({
                "name": "看视频领金币",
                "分类": "视频",
                "deepLink": "snssdk1128://",
                "截止日期": "2025/03/01"
            }),
        ));
        assert_eq!(activity.name, "看视频领金币");
        assert_eq!(activity.categories, vec!["Video".to_string()]);
        assert_eq!(activity.link, "snssdk1128://");
        assert_eq!(activity.end_date.as_deref(), Some("2025-03-01"));
    }

    #[test]
    fn blank_category_variant_does_not_hide_a_filled_one() {
        let scalar = normalizer().normalize(&raw(
            "rec2a",
            json!({ "Category": "  ", "分类": "银行" }),
        ));
        assert_eq!(scalar.categories, vec!["Bank".to_string()]);

        let list = normalizer().normalize(&raw(
            "rec2b",
            json!({ "Category": [], "categories": null, "活动分类": ["银行", "签到"] }),
        ));
        assert_eq!(
            list.categories,
            vec!["Bank".to_string(), "CheckIn".to_string()]
        );
    }

    #[test]
    fn source_app_is_trimmed_and_feeds_target_app() {
        let activity = normalizer().normalize(&raw(
            "rec3",
            json!({ "SourceApp": " 建设银行 ", "Category": ["银行", "存款"] }),
        ));
        assert_eq!(activity.source_app, "建设银行");
        assert_eq!(activity.target_app, "建设银行");
        assert_eq!(
            activity.categories,
            vec!["Bank".to_string(), "Deposit".to_string()]
        );
    }

    #[test]
    fn explicit_target_app_wins() {
        let activity = normalizer().normalize(&raw(
            "rec4",
            json!({ "SourceApp": "淘宝", "TargetApp": "支付宝" }),
        ));
        assert_eq!(activity.target_app, "支付宝");
    }

    #[test]
    fn unparseable_end_date_is_dropped() {
        let activity = normalizer().normalize(&raw("rec5", json!({ "EndDate": "长期" })));
        assert!(activity.end_date.is_none());
    }

    #[test]
    fn optional_text_fields_carry_through() {
        let activity = normalizer().normalize(&raw(
            "rec6",
            json!({ "SpecialNote": "限新用户", "Steps": "1. 打开 App", "Icon": 7 }),
        ));
        assert_eq!(activity.special_note.as_deref(), Some("限新用户"));
        assert_eq!(activity.steps_text.as_deref(), Some("1. 打开 App"));
        assert_eq!(activity.icon, "7");
    }

    #[test]
    fn predicate_and_duplicate_ids_filter_batch() {
        let records = vec![
            raw("a", json!({ "Status": "active", "Name": "one" })),
            raw("b", json!({ "Status": "paused", "Name": "two" })),
            raw("a", json!({ "Status": "active", "Name": "dup" })),
            raw("c", json!({ "Status": " active ", "Name": "three" })),
        ];
        let predicate = field_equals(&RecordFilterConfig {
            field: "Status".into(),
            equals: "active".into(),
        });
        let out = normalizer().normalize_all(&records, Some(&predicate));
        let names: Vec<&str> = out.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["one", "three"]);
    }

    #[test]
    fn padded_ids_count_as_duplicates() {
        let records = vec![
            raw("rec1", json!({ "Name": "first" })),
            raw("rec1 ", json!({ "Name": "padded" })),
            raw(" rec2", json!({ "Name": "second" })),
            raw("   ", json!({ "Name": "blank" })),
        ];
        let out = normalizer().normalize_all(&records, None);
        let ids: Vec<&str> = out.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["rec1", "rec2"]);
        assert_eq!(out[0].name, "first");
    }

    #[test]
    fn no_predicate_keeps_everything_in_order() {
        let records = vec![raw("x", json!({})), raw("y", json!({}))];
        let out = normalizer().normalize_all(&records, None);
        let ids: Vec<&str> = out.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y"]);
    }
}
