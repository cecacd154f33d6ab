use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("wisecompanion/", env!("CARGO_PKG_VERSION"));

pub fn build_client(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(USER_AGENT)
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .unwrap_or_else(|_| Client::new())
}
