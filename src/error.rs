use std::path::PathBuf;

use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `wisecompanion`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; the binary wraps them in `anyhow` for
/// context chains.
#[derive(Debug, Error)]
pub enum WiseError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Normalizer ──────────────────────────────────────────────────────
    #[error("normalize: {0}")]
    Normalize(#[from] NormalizeError),

    // ── Activity store ──────────────────────────────────────────────────
    #[error("load: {0}")]
    Load(#[from] LoadError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Upstream errors ─────────────────────────────────────────────────────────

/// The remote source (Airtable or the artifact host) could not be read.
#[derive(Debug, Error)]
pub enum UpstreamFetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("upstream returned status {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for UpstreamFetchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Status {
                status: status.as_u16(),
                detail: status.canonical_reason().unwrap_or("unknown").to_string(),
            },
            None => Self::Network(err.to_string()),
        }
    }
}

// ─── Data format errors ──────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum DataFormatError {
    #[error("invalid json: {0}")]
    InvalidJson(String),

    #[error("expected a top-level json array")]
    NotAnArray,

    #[error("unexpected shape: {0}")]
    WrongShape(String),
}

// ─── Artifact errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to write artifact {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize activities: {0}")]
    Serialize(String),
}

// ─── Normalizer errors ───────────────────────────────────────────────────────

/// Fatal outcomes of a normalization run. None of them touch the artifact.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("upstream fetch failed: {0}")]
    Upstream(#[from] UpstreamFetchError),

    #[error("data format: {0}")]
    DataFormat(#[from] DataFormatError),

    #[error("artifact: {0}")]
    Artifact(#[from] ArtifactError),
}

// ─── Store load errors ───────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("gave up after {attempts} attempt(s): {last}")]
    Exhausted { attempts: u32, last: UpstreamFetchError },

    #[error("data format: {0}")]
    DataFormat(#[from] DataFormatError),

    #[error("load cancelled")]
    Cancelled,
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, WiseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_displays_correctly() {
        let err = WiseError::Config(ConfigError::Validation("max_attempts".into()));
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn upstream_status_displays_detail() {
        let err = NormalizeError::Upstream(UpstreamFetchError::Status {
            status: 403,
            detail: "INVALID_PERMISSIONS_OR_MODEL_NOT_FOUND".into(),
        });
        let rendered = err.to_string();
        assert!(rendered.contains("403"));
        assert!(rendered.contains("INVALID_PERMISSIONS"));
    }

    #[test]
    fn exhausted_load_reports_attempts() {
        let err = LoadError::Exhausted {
            attempts: 3,
            last: UpstreamFetchError::Network("connection refused".into()),
        };
        assert!(err.to_string().contains("3 attempt(s)"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn anyhow_interop() {
        let anyhow_err = anyhow::anyhow!("something went wrong");
        let wise_err: WiseError = anyhow_err.into();
        assert!(wise_err.to_string().contains("something went wrong"));
    }

    #[test]
    fn not_an_array_is_distinct_from_invalid_json() {
        let a = DataFormatError::NotAnArray.to_string();
        let b = DataFormatError::InvalidJson("eof".into()).to_string();
        assert_ne!(a, b);
    }
}
