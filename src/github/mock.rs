//! In-memory `PageFetcher` for unit tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::Barrier;

use crate::error::{Error, Result};
use crate::github::fetcher::{Page, PageFetcher};
use crate::models::Contributor;

#[derive(Default)]
pub struct InMemoryPageFetcher {
    pages: HashMap<String, Page>,
    failures: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl InMemoryPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, contributors: Vec<Contributor>, link: Option<&str>) -> Self {
        self.pages.insert(
            url.to_string(),
            Page {
                contributors,
                link: link.map(str::to_string),
            },
        );
        self
    }

    pub fn with_failure(mut self, url: &str, message: &str) -> Self {
        self.failures.insert(url.to_string(), message.to_string());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for InMemoryPageFetcher {
    async fn fetch_page(&self, url: &str) -> Result<Page> {
        self.requested.lock().unwrap().push(url.to_string());

        if let Some(message) = self.failures.get(url) {
            return Err(Error::GitHubApi(message.clone()));
        }

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| Error::RepoNotFound(url.to_string()))
    }
}

/// Holds every fetch at a barrier until `gate` fetches are running at once,
/// and records the highest number seen in flight.
pub struct GatedPageFetcher {
    barrier: Barrier,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl GatedPageFetcher {
    pub fn new(gate: usize) -> Self {
        Self {
            barrier: Barrier::new(gate),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for GatedPageFetcher {
    async fn fetch_page(&self, url: &str) -> Result<Page> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let released = tokio::time::timeout(Duration::from_secs(5), self.barrier.wait()).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if released.is_err() {
            return Err(Error::GitHubApi(format!("{} was never joined by the other fetches", url)));
        }

        let page: u64 = url
            .rsplit('=')
            .next()
            .and_then(|n| n.parse().ok())
            .unwrap_or(0);
        Ok(Page {
            contributors: vec![named("paged", page, page)],
            link: None,
        })
    }
}

pub fn named(login: &str, id: u64, contributions: u64) -> Contributor {
    Contributor::Named {
        login: login.to_string(),
        id,
        avatar_url: format!("https://avatars.githubusercontent.com/u/{}?v=4", id),
        html_url: format!("https://github.com/{}", login),
        contributions,
    }
}

pub fn anonymous(name: &str, contributions: u64) -> Contributor {
    Contributor::Anonymous {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        contributions,
    }
}
