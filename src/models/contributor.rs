use serde::Deserialize;

/// One entry of `GET /repos/{owner}/{repo}/contributors`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawContributor")]
pub enum Contributor {
    Named {
        login: String,
        id: u64,
        avatar_url: String,
        html_url: String,
        contributions: u64,
    },
    Anonymous {
        name: String,
        email: String,
        contributions: u64,
    },
}

impl Contributor {
    pub fn contributions(&self) -> u64 {
        match self {
            Contributor::Named { contributions, .. }
            | Contributor::Anonymous { contributions, .. } => *contributions,
        }
    }
}

// Wire shape. GitHub tags anonymous entries with `"type": "Anonymous"`;
// everything else (`User`, `Bot`, `Organization`) carries a login and id.
#[derive(Deserialize)]
struct RawContributor {
    #[serde(rename = "type")]
    kind: String,
    contributions: u64,
    login: Option<String>,
    id: Option<u64>,
    avatar_url: Option<String>,
    html_url: Option<String>,
    name: Option<String>,
    email: Option<String>,
}

impl TryFrom<RawContributor> for Contributor {
    type Error = String;

    fn try_from(raw: RawContributor) -> std::result::Result<Self, Self::Error> {
        if raw.kind == "Anonymous" {
            return Ok(Contributor::Anonymous {
                name: raw.name.ok_or("anonymous contributor without name")?,
                email: raw.email.unwrap_or_default(),
                contributions: raw.contributions,
            });
        }

        let login = raw
            .login
            .ok_or_else(|| format!("{} contributor without login", raw.kind))?;
        Ok(Contributor::Named {
            id: raw
                .id
                .ok_or_else(|| format!("contributor {} without id", login))?,
            avatar_url: raw.avatar_url.unwrap_or_default(),
            html_url: raw.html_url.unwrap_or_default(),
            login,
            contributions: raw.contributions,
        })
    }
}
