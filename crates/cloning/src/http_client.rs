use std::time::Duration;

use axum::http;
use reqwest::Client;

/// HTTP client for provider calls, bounded by `timeout` per request
pub fn http_client(timeout: Duration) -> anyhow::Result<Client> {
    let mut headers = http::HeaderMap::new();
    headers.insert(http::header::CONNECTION, http::HeaderValue::from_static("keep-alive"));

    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .pool_idle_timeout(Some(Duration::from_secs(5)))
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .default_headers(headers)
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build provider HTTP client: {e}"))
}
