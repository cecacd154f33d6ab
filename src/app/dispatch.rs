use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::error::Result;
use crate::normalizer::Normalizer;
use crate::store::{ActivityStore, PageRoute, source_from_config};
use anyhow::Context;
use chrono::Local;
use tracing::info;

use super::listing::{render_activities, render_apps};
use super::status::render_status;

/// Load the store once for a read command. A failed load is an error, never
/// an empty listing.
async fn load_store(config: &Config, location: Option<&str>) -> Result<ActivityStore> {
    let store = ActivityStore::from_config(config);
    let source = source_from_config(config, location)?;
    store
        .load(source.as_ref())
        .await
        .with_context(|| format!("could not load activities from {}", source.describe()))?;
    Ok(store)
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Fetch => {
            let normalizer = Normalizer::from_config(&config)?;
            let report = normalizer
                .run()
                .await
                .context("normalization failed; existing artifact left untouched")?;
            info!(
                fetched = report.fetched,
                written = report.written,
                "fetch complete"
            );
            println!(
                "wrote {} activities to {}",
                report.written,
                report.path.display()
            );
            Ok(())
        }

        Commands::List {
            source,
            page,
            category,
            sub,
            app,
        } => {
            let store = load_store(&config, source.as_deref()).await?;
            let activities = match (page, category, sub, app) {
                (_, Some(tag), Some(sub), _) => store.by_category_and_subcategory(&tag, &sub),
                (_, Some(tag), None, Some(app)) => store.by_source_app(&tag, &app),
                (_, Some(tag), None, None) => store.by_category(&tag),
                (Some(fragment), None, _, _) => store.for_route(&PageRoute::from_fragment(
                    &fragment,
                    &config.categories.known_pages,
                )),
                (None, None, _, _) => store.for_route(&PageRoute::Home),
            };
            print!("{}", render_activities(&activities, Local::now().naive_local()));
            Ok(())
        }

        Commands::Apps { source, category } => {
            let store = load_store(&config, source.as_deref()).await?;
            print!("{}", render_apps(&store.distinct_source_apps(&category)));
            Ok(())
        }

        Commands::Status { source } => {
            let store = ActivityStore::from_config(&config);
            let artifact = source_from_config(&config, source.as_deref())?;
            // A failed load is reported in the status output itself.
            let _ = store.load(artifact.as_ref()).await;
            println!("{}", render_status(&config, artifact.describe().as_str(), &store));
            Ok(())
        }
    }
}
