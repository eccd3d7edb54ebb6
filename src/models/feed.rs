use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::contributor::Contributor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub guid: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feed {
    pub title: String,
    pub link: String,
    pub description: String,
    pub items: Vec<FeedItem>,
    pub generated_at: DateTime<Utc>,
}

impl From<&Contributor> for FeedItem {
    fn from(contributor: &Contributor) -> Self {
        match contributor {
            Contributor::Anonymous {
                name,
                email,
                contributions,
            } => FeedItem {
                title: format!("Contributor: {}", name),
                description: format!(
                    "<p>Anonymous contributor</p><p>Name: {}</p><p>E-mail: {}</p><p>Contributions: {}</p>",
                    name, email, contributions
                ),
                link: None,
                // Not unique when two anonymous entries share a name.
                guid: format!("anon-{}", name),
            },
            Contributor::Named {
                login,
                id,
                avatar_url,
                html_url,
                contributions,
            } => FeedItem {
                title: format!("Contributor: {}", login),
                description: format!(
                    "<img src=\"{}\"></img><p><a href=\"{}\">{}</a></p><p>Contributions: {}</p>",
                    avatar_url, html_url, login, contributions
                ),
                link: Some(html_url.clone()),
                guid: id.to_string(),
            },
        }
    }
}
