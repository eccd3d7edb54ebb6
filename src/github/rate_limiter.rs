use reqwest::header::HeaderMap;

const LOW_REMAINING_THRESHOLD: u32 = 10;

/// Rate limit budget reported by GitHub on a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    pub remaining: u32,
    pub reset_at: Option<u64>,
}

impl RateLimitStatus {
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let remaining = headers
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())?;

        let reset_at = headers
            .get("x-ratelimit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        Some(Self {
            remaining,
            reset_at,
        })
    }

    pub fn is_low(&self) -> bool {
        self.remaining < LOW_REMAINING_THRESHOLD
    }

    /// Logs the budget. Nothing waits on it; the handler does a single attempt per page.
    pub fn record(&self, url: &str) {
        if self.is_low() {
            tracing::warn!(
                "GitHub rate limit nearly exhausted: {} requests left (resets at {:?}) after {}",
                self.remaining,
                self.reset_at,
                url
            );
        } else {
            tracing::debug!("Rate limit remaining: {}", self.remaining);
        }
    }
}
