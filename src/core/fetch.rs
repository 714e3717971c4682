use crate::core::ConfigProvider;
use crate::utils::error::{Result, SyncError};
use reqwest::Client;
use std::time::Duration;

/// Single-shot downloader for the repeater dataset. No retries.
pub struct HttpFetcher {
    client: Client,
    endpoint: String,
}

impl HttpFetcher {
    pub fn new(endpoint: impl Into<String>, timeout_seconds: Option<u64>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(config.endpoint(), config.timeout_seconds())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 取回原始內容，不解析 JSON
    pub async fn fetch(&self) -> Result<Vec<u8>> {
        tracing::debug!("Making API request to: {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(SyncError::FetchStatusError {
                url: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_fetch_returns_body_verbatim() {
        let server = MockServer::start();
        // 故意給非 JSON 內容，確認不做驗證
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/repeaters/v1");
            then.status(200).body("not json at all");
        });

        let fetcher = HttpFetcher::new(server.url("/api/repeaters/v1"), None).unwrap();
        let body = fetcher.fetch().await.unwrap();

        api_mock.assert();
        assert_eq!(body, b"not json at all");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404).body("gone");
        });

        let fetcher = HttpFetcher::new(server.url("/missing"), Some(5)).unwrap();
        let err = fetcher.fetch().await.unwrap_err();

        api_mock.assert();
        match err {
            SyncError::FetchStatusError { status, url } => {
                assert_eq!(status, 404);
                assert!(url.ends_with("/missing"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_api_error() {
        // 保留埠 9 通常無人監聽
        let fetcher = HttpFetcher::new("http://127.0.0.1:9/", Some(2)).unwrap();
        let err = fetcher.fetch().await.unwrap_err();
        assert!(matches!(err, SyncError::ApiError(_)));
    }
}
