pub mod config;
pub mod error;
pub mod github;
pub mod models;
pub mod routes;

pub use config::{Config, Settings};
pub use error::{Error, Result};
pub use github::GitHubClient;
pub use models::{Contributor, Feed, FeedItem};
pub use routes::{RouteParams, SortOrder};
