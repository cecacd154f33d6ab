use serde::{Deserialize, Serialize};

/// Sentinel values substituted for absent fields at normalization time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DefaultsConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_link")]
    pub link: String,
    #[serde(default = "default_source_app")]
    pub source_app: String,
    #[serde(default = "default_target_app")]
    pub target_app: String,
}

fn default_name() -> String {
    "无标题活动".into()
}

fn default_description() -> String {
    "暂无描述".into()
}

fn default_icon() -> String {
    "❓".into()
}

fn default_link() -> String {
    "#".into()
}

fn default_source_app() -> String {
    "其他".into()
}

fn default_target_app() -> String {
    "目标 App".into()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            description: default_description(),
            icon: default_icon(),
            link: default_link(),
            source_app: default_source_app(),
            target_app: default_target_app(),
        }
    }
}
