pub mod client;
pub mod fetcher;
pub mod paginator;
pub mod rate_limiter;

#[cfg(test)]
pub(crate) mod mock;

pub use client::GitHubClient;
pub use fetcher::{Page, PageFetcher};
pub use paginator::{resolve_last_page, Pagination, PaginationError, Paginator};
pub use rate_limiter::RateLimitStatus;
