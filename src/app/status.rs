use crate::config::Config;
use crate::store::{ActivityStore, LoadStatus};

pub fn render_status(config: &Config, artifact: &str, store: &ActivityStore) -> String {
    let config_source = config
        .config_path
        .as_ref()
        .map_or_else(|| "(defaults)".to_string(), |p| p.display().to_string());
    let token = if config.airtable.token.is_some() {
        "set"
    } else {
        "missing"
    };

    let mut lines = vec![
        "◆ wisecompanion status".to_string(),
        String::new(),
        format!("version     {}", env!("CARGO_PKG_VERSION")),
        format!("config      {config_source}"),
        String::new(),
        format!(
            "airtable    {}/{}/{}",
            config.airtable.api_base_url,
            config.airtable.base_id.as_deref().unwrap_or("(no base id)"),
            config.airtable.table
        ),
        format!("token       {token}"),
        format!(
            "filter      {}",
            config.airtable.filter_formula.as_deref().unwrap_or("(none)")
        ),
        format!("output      {}", config.artifact_path().display()),
        format!(
            "retries     {} attempts, {}ms base, x{}",
            config.reliability.max_attempts,
            config.reliability.base_delay_ms,
            config.reliability.backoff_multiplier
        ),
        String::new(),
        format!("artifact    {artifact}"),
    ];

    match store.status() {
        LoadStatus::NotLoaded => lines.push("activities  not loaded".to_string()),
        LoadStatus::Ready { count, loaded_at } => {
            lines.push(format!("activities  {count} (loaded {})", loaded_at.to_rfc3339()));
            for tag in &config.categories.known_pages {
                lines.push(format!("  {tag:<10}{}", store.by_category(tag).len()));
            }
        }
        LoadStatus::Failed { error, .. } => lines.push(format!("activities  unavailable: {error}")),
    }

    lines.join("\n")
}
