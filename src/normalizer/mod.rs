//! Publish step: upstream records → canonical activities → artifact on disk.

pub mod airtable;

pub use airtable::AirtableSource;

use crate::activity::{RawRecord, RecordNormalizer, RecordPredicate, field_equals};
use crate::artifact;
use crate::config::Config;
use crate::error::{ConfigError, NormalizeError};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

/// Anything that can hand over one batch of raw records.
pub trait RecordSource: Send + Sync {
    fn fetch_records(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawRecord>, NormalizeError>> + Send + '_>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeReport {
    pub fetched: usize,
    pub written: usize,
    pub path: PathBuf,
}

/// Runs one publish cycle.
///
/// The artifact is only replaced after the fetch and parse succeeded, so a
/// failing upstream leaves the last good snapshot in place.
pub struct Normalizer {
    source: Box<dyn RecordSource>,
    records: RecordNormalizer,
    predicate: Option<RecordPredicate>,
    artifact_path: PathBuf,
}

impl Normalizer {
    pub fn new(
        source: Box<dyn RecordSource>,
        records: RecordNormalizer,
        artifact_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source,
            records,
            predicate: None,
            artifact_path: artifact_path.into(),
        }
    }

    /// Wire an Airtable-backed normalizer from config.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.validate_for_fetch()?;
        let source = AirtableSource::from_config(&config.airtable)?;
        let mut normalizer = Self::new(
            Box::new(source),
            RecordNormalizer::from_config(config),
            config.artifact_path(),
        );
        if let Some(filter) = &config.record_filter {
            normalizer = normalizer.with_predicate(field_equals(filter));
        }
        Ok(normalizer)
    }

    pub fn with_predicate(mut self, predicate: RecordPredicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }

    pub async fn run(&self) -> Result<NormalizeReport, NormalizeError> {
        let raw = match self.source.fetch_records().await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(
                    path = %self.artifact_path.display(),
                    error = %e,
                    "fetch failed, keeping existing artifact"
                );
                return Err(e);
            }
        };

        let activities = self.records.normalize_all(&raw, self.predicate.as_ref());
        if activities.is_empty() {
            tracing::warn!(fetched = raw.len(), "upstream produced no activities");
        }

        artifact::write(&self.artifact_path, &activities)?;
        tracing::info!(
            fetched = raw.len(),
            written = activities.len(),
            path = %self.artifact_path.display(),
            "artifact written"
        );

        Ok(NormalizeReport {
            fetched: raw.len(),
            written: activities.len(),
            path: self.artifact_path.clone(),
        })
    }
}
