//! In-memory activity cache fed from the published artifact.

pub mod query;
pub mod retry;
pub mod source;

pub use query::{ALL_APPS, ActivityQuery, PageRoute, is_all_apps};
pub use retry::RetryPolicy;
pub use source::{
    ArtifactSource, FetchFuture, FileArtifactSource, HttpArtifactSource, source_from_config,
};

use crate::activity::{CanonicalActivity, CountdownState, countdown_state};
use crate::artifact;
use crate::error::LoadError;
use arc_swap::ArcSwap;
use chrono::{DateTime, NaiveDateTime, Utc};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Outcome of the most recent load, kept apart from "zero results".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    NotLoaded,
    Ready {
        count: usize,
        loaded_at: DateTime<Utc>,
    },
    /// The last load failed; `retained` activities from an earlier load are
    /// still being served.
    Failed { error: String, retained: usize },
}

/// One consistent view: the activities and the status that produced them.
#[derive(Debug)]
pub struct StoreSnapshot {
    pub activities: Arc<Vec<CanonicalActivity>>,
    pub status: LoadStatus,
}

impl StoreSnapshot {
    fn empty() -> Self {
        Self {
            activities: Arc::new(Vec::new()),
            status: LoadStatus::NotLoaded,
        }
    }
}

/// Shared activity cache.
///
/// Wraps the snapshot in an `ArcSwap`: readers never block, and a successful
/// load swaps the whole snapshot in one store. Clones share the same cache.
#[derive(Clone)]
pub struct ActivityStore {
    inner: Arc<ArcSwap<StoreSnapshot>>,
    policy: RetryPolicy,
    lenient: bool,
}

impl ActivityStore {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(StoreSnapshot::empty())),
            policy,
            lenient: false,
        }
    }

    pub fn with_lenient_matching(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(RetryPolicy::from_config(&config.reliability))
            .with_lenient_matching(config.store.lenient_matching)
    }

    /// Current snapshot. Lock-free.
    pub fn snapshot(&self) -> Arc<StoreSnapshot> {
        self.inner.load_full()
    }

    pub fn status(&self) -> LoadStatus {
        self.inner.load().status.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.load().activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub async fn load(&self, source: &dyn ArtifactSource) -> Result<usize, LoadError> {
        self.load_with_cancel(source, &CancellationToken::new())
            .await
    }

    /// Fetch, validate and swap in the artifact.
    ///
    /// Transport failures are retried per the policy; a malformed body is not.
    /// On any failure the previous activities stay in place.
    pub async fn load_with_cancel(
        &self,
        source: &dyn ArtifactSource,
        cancel: &CancellationToken,
    ) -> Result<usize, LoadError> {
        let label = source.describe();
        let result = match self.policy.run(&label, cancel, || source.fetch()).await {
            Ok(body) => artifact::parse(&body).map_err(LoadError::from),
            Err(e) => Err(e),
        };

        match result {
            Ok(activities) => {
                let count = activities.len();
                self.inner.store(Arc::new(StoreSnapshot {
                    activities: Arc::new(activities),
                    status: LoadStatus::Ready {
                        count,
                        loaded_at: Utc::now(),
                    },
                }));
                tracing::info!(source = label.as_str(), count, "activities loaded");
                Ok(count)
            }
            Err(e) => {
                let previous = self.inner.load_full();
                self.inner.store(Arc::new(StoreSnapshot {
                    activities: Arc::clone(&previous.activities),
                    status: LoadStatus::Failed {
                        error: e.to_string(),
                        retained: previous.activities.len(),
                    },
                }));
                tracing::error!(source = label.as_str(), error = %e, "activity load failed");
                Err(e)
            }
        }
    }

    /// Replace the cache directly, e.g. with activities built in-process.
    pub fn replace(&self, activities: Vec<CanonicalActivity>) {
        let count = activities.len();
        self.inner.store(Arc::new(StoreSnapshot {
            activities: Arc::new(activities),
            status: LoadStatus::Ready {
                count,
                loaded_at: Utc::now(),
            },
        }));
    }

    fn query<T>(&self, f: impl FnOnce(ActivityQuery<'_>) -> T) -> T {
        let snapshot = self.inner.load();
        f(ActivityQuery::new(&snapshot.activities, self.lenient))
    }

    pub fn by_category(&self, tag: &str) -> Vec<CanonicalActivity> {
        self.query(|q| q.by_category(tag).into_iter().cloned().collect())
    }

    pub fn by_category_and_subcategory(&self, tag: &str, sub_tag: &str) -> Vec<CanonicalActivity> {
        self.query(|q| {
            q.by_category_and_subcategory(tag, sub_tag)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    pub fn by_source_app(&self, tag: &str, app: &str) -> Vec<CanonicalActivity> {
        self.query(|q| q.by_source_app(tag, app).into_iter().cloned().collect())
    }

    pub fn distinct_source_apps(&self, tag: &str) -> Vec<String> {
        self.query(|q| {
            q.distinct_source_apps(tag)
                .into_iter()
                .map(str::to_string)
                .collect()
        })
    }

    pub fn for_route(&self, route: &PageRoute) -> Vec<CanonicalActivity> {
        self.query(|q| q.for_route(route).into_iter().cloned().collect())
    }

    /// Countdown of a cached activity, or `None` when the id is unknown.
    pub fn countdown(&self, id: &str, now: NaiveDateTime) -> Option<CountdownState> {
        let snapshot = self.inner.load();
        snapshot
            .activities
            .iter()
            .find(|a| a.id == id)
            .map(|a| countdown_state(a.end_date.as_deref(), now))
    }
}
