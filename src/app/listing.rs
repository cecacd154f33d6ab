use crate::activity::{CanonicalActivity, countdown_state};
use chrono::NaiveDateTime;
use std::fmt::Write;

/// One block per activity, with its countdown evaluated at `now`.
pub fn render_activities(activities: &[CanonicalActivity], now: NaiveDateTime) -> String {
    if activities.is_empty() {
        return "no activities match\n".to_string();
    }

    let mut out = String::new();
    for a in activities {
        let countdown = countdown_state(a.end_date.as_deref(), now);
        let _ = writeln!(out, "{} {}  [{}] {}", a.icon, a.name, a.source_app, countdown);
        let _ = writeln!(out, "    {}", a.description);
        if let Some(note) = &a.special_note {
            let _ = writeln!(out, "    ! {note}");
        }
        if let Some(steps) = &a.steps_text {
            let _ = writeln!(out, "    steps: {steps}");
        }
        let _ = writeln!(out, "    {} → {}", a.target_app, a.link);
    }
    out
}

pub fn render_apps(apps: &[String]) -> String {
    if apps.is_empty() {
        return "no source apps\n".to_string();
    }
    let mut out = String::new();
    for app in apps {
        let _ = writeln!(out, "{app}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity() -> CanonicalActivity {
        CanonicalActivity {
            id: "rec1".into(),
            name: "每日签到".into(),
            description: "领积分".into(),
            icon: "🎁".into(),
            link: "cmbmobilebank://".into(),
            categories: vec!["Bank".into()],
            source_app: "招商银行".into(),
            target_app: "掌上生活".into(),
            special_note: Some("限新用户".into()),
            end_date: Some("2025-01-10".into()),
            steps_text: None,
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2025-01-10T09:00:00", "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn empty_listing_says_so() {
        assert_eq!(render_activities(&[], now()), "no activities match\n");
    }

    #[test]
    fn listing_shows_countdown_note_and_link() {
        let out = render_activities(&[activity()], now());
        assert!(out.contains("每日签到"));
        assert!(out.contains("最后一天"));
        assert!(out.contains("! 限新用户"));
        assert!(out.contains("掌上生活 → cmbmobilebank://"));
        assert!(!out.contains("steps:"));
    }

    #[test]
    fn apps_one_per_line() {
        let apps = vec!["招商银行".to_string(), "建设银行".to_string()];
        assert_eq!(render_apps(&apps), "招商银行\n建设银行\n");
        assert_eq!(render_apps(&[]), "no source apps\n");
    }
}
