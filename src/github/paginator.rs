use futures::stream::{self, StreamExt};
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::error::{Error, Result};
use crate::github::fetcher::PageFetcher;
use crate::models::Contributor;

lazy_static! {
    // Greedy prefix so the capture ends at the last `page=` parameter, never at `per_page=`.
    static ref LAST_PAGE_RE: std::result::Result<Regex, regex::Error> =
        Regex::new(r"<([^>]*[?&])page=(\d+)[^>]*>");
}

/// Where the last page lives, as advertised by the `Link` header of page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page_count: u32,
    /// Last-page URL up to and including the separator before `page=`.
    pub base_url: String,
}

impl Pagination {
    pub fn page_url(&self, page: u32) -> String {
        format!("{}page={}", self.base_url, page)
    }

    pub fn remaining_pages(&self) -> impl Iterator<Item = u32> {
        2..=self.page_count
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaginationError {
    /// Single-page listing; not a failure.
    #[error("no rel=\"last\" pagination link")]
    NoPaginationLink,

    #[error("{0}")]
    MalformedPaginationLink(String),
}

pub fn resolve_last_page(link_header: Option<&str>) -> std::result::Result<Pagination, PaginationError> {
    let last = link_header
        .and_then(|header| header.split(',').find(|rel| rel.contains("\"last\"")))
        .ok_or(PaginationError::NoPaginationLink)?;

    let re = LAST_PAGE_RE.as_ref().map_err(|e| {
        PaginationError::MalformedPaginationLink(format!("link pattern failed to compile: {}", e))
    })?;

    let captures = re.captures(last).ok_or_else(|| {
        PaginationError::MalformedPaginationLink(format!(
            "no page number in last relation: {}",
            last.trim()
        ))
    })?;

    let page_count: u32 = captures[2].parse().map_err(|_| {
        PaginationError::MalformedPaginationLink(format!(
            "page number out of range: {}",
            &captures[2]
        ))
    })?;

    if page_count == 0 {
        return Err(PaginationError::MalformedPaginationLink(
            "last page is 0".to_string(),
        ));
    }

    Ok(Pagination {
        page_count,
        base_url: captures[1].to_string(),
    })
}

pub struct Paginator<'a> {
    fetcher: &'a dyn PageFetcher,
    max_concurrent: Option<usize>,
}

impl<'a> Paginator<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher, max_concurrent: Option<usize>) -> Self {
        Self {
            fetcher,
            max_concurrent,
        }
    }

    /// Fetches page 1 from `first_url`, then every page its `Link` header
    /// advertises. Results are in completion order, not page order.
    pub async fn fetch_all(&self, first_url: &str) -> Result<Vec<Contributor>> {
        let first = self.fetcher.fetch_page(first_url).await?;
        let mut contributors = first.contributors;

        match resolve_last_page(first.link.as_deref()) {
            Ok(pagination) => {
                tracing::info!("Contributors span {} pages", pagination.page_count);
                contributors.extend(self.fetch_remaining(&pagination).await?);
            }
            Err(PaginationError::NoPaginationLink) => {
                tracing::debug!("Single page of contributors");
            }
            Err(PaginationError::MalformedPaginationLink(reason)) => {
                return Err(Error::MalformedPaginationLink(reason));
            }
        }

        Ok(contributors)
    }

    /// Fetches pages `2..=page_count` concurrently. The first failing page
    /// aborts the whole fetch.
    pub async fn fetch_remaining(&self, pagination: &Pagination) -> Result<Vec<Contributor>> {
        if pagination.page_count <= 1 {
            return Ok(Vec::new());
        }

        let limit = self
            .max_concurrent
            .unwrap_or((pagination.page_count - 1) as usize)
            .max(1);
        let fetcher = self.fetcher;

        let mut in_flight = stream::iter(pagination.remaining_pages())
            .map(|page| {
                let url = pagination.page_url(page);
                async move { (page, fetcher.fetch_page(&url).await) }
            })
            .buffer_unordered(limit);

        let mut contributors = Vec::new();
        while let Some((page, result)) = in_flight.next().await {
            let fetched = result?;
            tracing::debug!("Page {} returned {} contributors", page, fetched.contributors.len());
            contributors.extend(fetched.contributors);
        }

        Ok(contributors)
    }
}
