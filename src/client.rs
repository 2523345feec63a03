//! Rate-limited client for the booking API.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio::time::{sleep, Instant};

use crate::error::WatchError;

/// Issues GET requests with an enforced minimum spacing between calls.
///
/// This is a smoothing throttle, not a token bucket: a caller arriving before
/// the interval has elapsed is suspended for the remainder, and there is no
/// burst allowance. One network round trip per call, no retry.
pub struct DoctolibClient {
    http: Client,
    base_url: String,
    spacing: Duration,
    last_call: Option<Instant>,
}

impl DoctolibClient {
    pub fn new(base_url: impl Into<String>, spacing: Duration) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            spacing,
            last_call: None,
        }
    }

    /// GET `path` with `query` appended and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &mut self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, WatchError> {
        self.throttle().await;

        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|source| WatchError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(WatchError::Http { status, url });
        }

        response
            .json()
            .await
            .map_err(|source| WatchError::Transport { url, source })
    }

    async fn throttle(&mut self) {
        if let Some(last) = self.last_call {
            let elapsed = last.elapsed();
            if elapsed < self.spacing {
                sleep(self.spacing - elapsed).await;
            }
        }
        self.last_call = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::GET, MockServer};
    use serde_json::json;

    #[tokio::test]
    async fn test_decodes_json_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/availabilities.json")
                .query_param("total_only", "yes");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "total": 7 }));
        });

        let mut client = DoctolibClient::new(server.base_url(), Duration::from_millis(0));
        let body: serde_json::Value = client
            .get_json("/availabilities.json", &[("total_only", "yes")])
            .await
            .expect("should decode body");

        assert_eq!(body["total"], 7);
        mock.assert();
    }

    #[tokio::test]
    async fn test_non_2xx_is_http_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/booking/gone.json");
            then.status(404);
        });

        let mut client = DoctolibClient::new(server.base_url(), Duration::from_millis(0));
        let result: Result<serde_json::Value, _> = client.get_json("/booking/gone.json", &[]).await;

        match result {
            Err(WatchError::Http { status, url }) => {
                assert_eq!(status.as_u16(), 404);
                assert!(url.ends_with("/booking/gone.json"));
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_enforces_call_spacing() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/ping.json");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({}));
        });

        let spacing = Duration::from_millis(100);
        let mut client = DoctolibClient::new(server.base_url(), spacing);

        let started = std::time::Instant::now();
        for _ in 0..3 {
            let _: serde_json::Value = client
                .get_json("/ping.json", &[])
                .await
                .expect("should succeed");
        }

        // First call is free, the next two must each wait out the interval.
        assert!(started.elapsed() >= spacing * 2);
    }
}
