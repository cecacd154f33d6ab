use crate::config::Config;
use crate::error::{ConfigError, UpstreamFetchError};
use reqwest::Client;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use url::Url;

pub type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, UpstreamFetchError>> + Send + 'a>>;

/// Where the store reads the published artifact from.
pub trait ArtifactSource: Send + Sync {
    /// Human-readable location, used in logs.
    fn describe(&self) -> String;

    fn fetch(&self) -> FetchFuture<'_>;
}

/// Plain GET against the static host serving the artifact. No auth.
pub struct HttpArtifactSource {
    client: Client,
    url: Url,
}

impl HttpArtifactSource {
    pub fn new(url: &str, timeout_secs: u64) -> Result<Self, ConfigError> {
        let url = Url::parse(url)
            .map_err(|e| ConfigError::Validation(format!("store.artifact_url: {e}")))?;
        Ok(Self {
            client: crate::http::build_client(timeout_secs),
            url,
        })
    }
}

impl ArtifactSource for HttpArtifactSource {
    fn describe(&self) -> String {
        self.url.to_string()
    }

    fn fetch(&self) -> FetchFuture<'_> {
        Box::pin(async move {
            let response = self
                .client
                .get(self.url.clone())
                .send()
                .await?
                .error_for_status()?;
            Ok(response.text().await?)
        })
    }
}

pub struct FileArtifactSource {
    path: PathBuf,
}

impl FileArtifactSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ArtifactSource for FileArtifactSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> FetchFuture<'_> {
        Box::pin(async move { Ok(tokio::fs::read_to_string(&self.path).await?) })
    }
}

/// Pick the artifact source: an explicit override, `store.artifact_url`, or the
/// local artifact path. Values starting with `http://` or `https://` are fetched.
pub fn source_from_config(
    config: &Config,
    location: Option<&str>,
) -> Result<Box<dyn ArtifactSource>, ConfigError> {
    let location = location.or(config.store.artifact_url.as_deref());
    match location {
        Some(loc) if loc.starts_with("http://") || loc.starts_with("https://") => Ok(Box::new(
            HttpArtifactSource::new(loc, config.store.timeout_secs)?,
        )),
        Some(loc) => Ok(Box::new(FileArtifactSource::new(
            shellexpand::tilde(loc).into_owned(),
        ))),
        None => Ok(Box::new(FileArtifactSource::new(config.artifact_path()))),
    }
}
