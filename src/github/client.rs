use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::github::fetcher::{Page, PageFetcher};
use crate::github::rate_limiter::RateLimitStatus;

pub struct GitHubClient {
    client: Client,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = &config.github_token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("token {}", token))?,
            );
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("contribfeed/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for GitHubClient {
    async fn fetch_page(&self, url: &str) -> Result<Page> {
        tracing::debug!("Fetching: {}", url);
        let response = self.client.get(url).send().await?;

        if let Some(status) = RateLimitStatus::from_headers(response.headers()) {
            status.record(url);
        }

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::RepoNotFound(url.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::GitHubApi(format!(
                "Failed to fetch {}: {} - {}",
                url, status, body
            )));
        }

        let link = response
            .headers()
            .get(header::LINK)
            .map(|v| {
                v.to_str().map(str::to_string).map_err(|_| {
                    Error::MalformedPaginationLink("link header is not valid UTF-8".to_string())
                })
            })
            .transpose()?;

        // Empty repositories answer 204 with no body.
        if status == StatusCode::NO_CONTENT {
            return Ok(Page {
                contributors: Vec::new(),
                link,
            });
        }

        let body = response.bytes().await?;
        let contributors = serde_json::from_slice(&body)?;

        Ok(Page { contributors, link })
    }
}
