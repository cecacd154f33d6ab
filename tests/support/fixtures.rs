use serde_json::{Value, json};

pub const TOKEN: &str = "pat-test-token";
pub const BASE_ID: &str = "appTEST";
pub const TABLE: &str = "Wisecompanion";

/// Airtable list response covering the awkward shapes seen in the table.
pub fn airtable_page() -> Value {
    json!({
        "records": [
            {
                "id": "recBank1",
                "createdTime": "2025-01-01T00:00:00.000Z",
                "fields": {
                    "Name": "储蓄卡每日签到",
                    "Category": ["银行", "每日任务"],
                    "SourceApp": "招商银行",
                    "DeepLink": "cmbmobilebank://checkin",
                    "EndDate": "2025-01-10",
                    "Status": "active"
                }
            },
            {
                "id": "recVideo1",
                "createdTime": "2025-01-01T00:00:00.000Z",
                "fields": {
                    "name": "看视频领金币",
                    "category": "视频",
                    "sourceApp": "抖音",
                    "Status": "active"
                }
            },
            {
                "id": "recBank2",
                "createdTime": "2025-01-02T00:00:00.000Z",
                "fields": {
                    "Category": ["银行", "支付"],
                    "SourceApp": " 建设银行 ",
                    "SpecialNote": "仅限龙卡",
                    "EndDate": "not a date",
                    "Status": "active"
                }
            },
            {
                "id": "recDraft",
                "createdTime": "2025-01-03T00:00:00.000Z",
                "fields": {
                    "Name": "草稿",
                    "Category": "新标签",
                    "Status": "draft"
                }
            }
        ]
    })
}
