use crate::activity::tags;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesConfig {
    /// Source-language label → canonical tag.
    #[serde(default = "default_translations")]
    pub translations: BTreeMap<String, String>,
    /// Tags that have their own page, in navigation order.
    #[serde(default = "default_known_pages")]
    pub known_pages: Vec<String>,
}

fn default_translations() -> BTreeMap<String, String> {
    [
        ("签到", tags::CHECK_IN),
        ("银行", tags::BANK),
        ("视频", tags::VIDEO),
        ("购物", tags::SHOPPING),
        ("每日任务", tags::DAILY_TASK),
        ("支付", tags::PAYMENT),
        ("存款", tags::DEPOSIT),
        ("生活", tags::LIFE),
        ("美食", tags::FOOD),
    ]
    .into_iter()
    .map(|(label, tag)| (label.to_string(), tag.to_string()))
    .collect()
}

fn default_known_pages() -> Vec<String> {
    [tags::BANK, tags::CHECK_IN, tags::VIDEO, tags::SHOPPING]
        .into_iter()
        .map(str::to_string)
        .collect()
}

impl Default for CategoriesConfig {
    fn default() -> Self {
        Self {
            translations: default_translations(),
            known_pages: default_known_pages(),
        }
    }
}
