#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

pub mod activity;
pub mod app;
pub mod artifact;
pub mod cli;
pub mod config;
pub mod error;
#[doc(hidden)]
pub mod http;
pub mod normalizer;
pub mod store;

pub use activity::{CanonicalActivity, CountdownState, RawRecord, countdown_state};
pub use config::Config;
pub use error::{
    ConfigError, DataFormatError, LoadError, NormalizeError, UpstreamFetchError, WiseError,
};
pub use normalizer::Normalizer;
pub use store::{ActivityStore, LoadStatus, RetryPolicy};
