use clap::Parser;
use tracing_subscriber::EnvFilter;

use contribfeed::routes::{self, ROUTE};
use contribfeed::{Config, Feed, GitHubClient, RouteParams, Settings};

#[derive(Parser, Debug)]
#[command(name = "contribfeed")]
#[command(version)]
#[command(about = "Build a feed of a GitHub repository's contributors")]
struct Args {
    /// Repository owner
    #[arg(required_unless_present_any = ["route", "describe"])]
    user: Option<String>,

    /// Repository name
    #[arg(required_unless_present_any = ["route", "describe"])]
    repo: Option<String>,

    /// Request path instead of user/repo, e.g. /contributors/DIYgod/RSSHub/asc
    #[arg(long, conflicts_with_all = ["user", "repo", "order", "anon"])]
    route: Option<String>,

    /// Sort order by commit count: asc, or anything else for descending
    #[arg(long)]
    order: Option<String>,

    /// Include anonymous contributors (any value)
    #[arg(long)]
    anon: Option<String>,

    /// Output format (json, text)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Print the route description as JSON and exit
    #[arg(long)]
    describe: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the feed
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("contribfeed=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();

    if args.describe {
        println!("{}", serde_json::to_string_pretty(&ROUTE)?);
        return Ok(());
    }

    let params = match (&args.route, &args.user, &args.repo) {
        (Some(path), _, _) => RouteParams::from_path(path)?,
        (None, Some(user), Some(repo)) => {
            RouteParams::new(user, repo, args.order.as_deref(), args.anon.as_deref())
        }
        _ => anyhow::bail!("either --route or both user and repo are required"),
    };

    let config = Config::from_env()?;
    if config.github_token.is_none() {
        tracing::debug!("No GITHUB_ACCESS_TOKEN set, using unauthenticated requests");
    }

    let client = GitHubClient::new(&config)?;
    let settings = Settings::from(&config);

    let feed = routes::handle(&client, &settings, &params).await?;

    output_feed(&feed, &args)?;

    Ok(())
}

fn output_feed(feed: &Feed, args: &Args) -> anyhow::Result<()> {
    let output = match args.format.as_str() {
        "json" => serde_json::to_string_pretty(feed)?,
        _ => format_text(feed),
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn format_text(feed: &Feed) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n=== {} ===\n", feed.title));
    output.push_str(&format!("{}\n", feed.description));
    output.push_str(&format!("{}\n\n", feed.link));

    for item in &feed.items {
        output.push_str(&format!("- {} [{}]\n", item.title, item.guid));
        if let Some(ref link) = item.link {
            output.push_str(&format!("  {}\n", link));
        }
        output.push_str(&format!("  {}\n", item.description));
    }

    output.push_str(&format!(
        "\n{} contributors, generated on {}\n",
        feed.items.len(),
        feed.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}
