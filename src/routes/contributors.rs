use chrono::Utc;
use serde::Serialize;

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::github::{PageFetcher, Paginator};
use crate::models::{Contributor, Feed, FeedItem};

#[derive(Debug, Clone, Serialize)]
pub struct RadarRule {
    pub source: &'static [&'static str],
    pub target: &'static str,
}

/// Static description of the route, for whatever router mounts it.
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub example: &'static str,
    pub categories: &'static [&'static str],
    pub parameters: &'static [(&'static str, &'static str)],
    pub radar: &'static [RadarRule],
    pub maintainers: &'static [&'static str],
    pub require_config: bool,
}

pub const ROUTE: Route = Route {
    path: "/contributors/:user/:repo/:order?/:anon?",
    name: "Repo Contributors",
    example: "/github/contributors/DIYgod/RSSHub",
    categories: &["programming"],
    parameters: &[
        ("user", "User name"),
        ("repo", "Repo name"),
        (
            "order",
            "Sort order by commit numbers, desc and asc (descending by default)",
        ),
        (
            "anon",
            "Show anonymous users. Defaults to no, use any values for yes.",
        ),
    ],
    radar: &[RadarRule {
        source: &[
            "github.com/:user/:repo/graphs/contributors",
            "github.com/:user/:repo",
        ],
        target: "/contributors/:user/:repo",
    }],
    maintainers: &["zoenglinghou"],
    require_config: false,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// `asc` sorts ascending; anything else, including nothing, sorts descending.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteParams {
    pub user: String,
    pub repo: String,
    pub order: SortOrder,
    pub anon: bool,
}

impl RouteParams {
    pub fn new(user: &str, repo: &str, order: Option<&str>, anon: Option<&str>) -> Self {
        Self {
            user: user.to_string(),
            repo: repo.to_string(),
            order: SortOrder::from_param(order),
            anon: anon.map(|v| !v.is_empty()).unwrap_or(false),
        }
    }

    /// Parses `/contributors/:user/:repo/:order?/:anon?`, optionally under `/github`.
    pub fn from_path(path: &str) -> Result<Self> {
        let trimmed = path.trim_matches('/');
        let mut segments: Vec<&str> = trimmed.split('/').collect();

        if segments.first() == Some(&"github") {
            segments.remove(0);
        }

        if segments.first() != Some(&"contributors") {
            return Err(Error::InvalidRoute(format!(
                "{} does not match {}",
                path, ROUTE.path
            )));
        }

        let params = &segments[1..];
        if params.len() < 2 || params.len() > 4 || params.iter().any(|s| s.is_empty()) {
            return Err(Error::InvalidRoute(format!(
                "{} does not match {}",
                path, ROUTE.path
            )));
        }

        Ok(Self::new(
            params[0],
            params[1],
            params.get(2).copied(),
            params.get(3).copied(),
        ))
    }

    pub fn first_page_url(&self, api_url: &str) -> String {
        format!(
            "{}/repos/{}/{}/contributors?{}",
            api_url,
            self.user,
            self.repo,
            if self.anon { "anon=1" } else { "" }
        )
    }
}

/// Sorts by contribution count, descending unless `order` is ascending.
pub fn sort_contributors(mut contributors: Vec<Contributor>, order: SortOrder) -> Vec<Contributor> {
    contributors.sort_by_key(Contributor::contributions);
    if order != SortOrder::Asc {
        contributors.reverse();
    }
    contributors
}

pub async fn handle(
    fetcher: &dyn PageFetcher,
    settings: &Settings,
    params: &RouteParams,
) -> Result<Feed> {
    let RouteParams { user, repo, .. } = params;
    tracing::info!("Building contributors feed for {}/{}", user, repo);

    let url = params.first_page_url(&settings.api_url);
    let contributors = Paginator::new(fetcher, settings.max_concurrent_pages)
        .fetch_all(&url)
        .await?;
    tracing::info!("Fetched {} contributors for {}/{}", contributors.len(), user, repo);

    let items = sort_contributors(contributors, params.order)
        .iter()
        .map(FeedItem::from)
        .collect();

    Ok(Feed {
        title: format!("{}/{} Contributors", user, repo),
        link: format!("{}/{}/{}/graphs/contributors", settings.site_url, user, repo),
        description: format!("New contributors for {}/{}", user, repo),
        items,
        generated_at: Utc::now(),
    })
}
