use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use events_client::{ApiConfig, EventsApi, EventsClient};
use serde::Serialize;
use shared::protocol::{EventsNowParams, ListEventsParams, SortOrder};

#[derive(Parser, Debug)]
struct Cli {
    /// Events API base URL. Defaults to APP__API_URL / API_URL or the hosted API.
    #[arg(long)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Default)]
struct AreaFilter {
    #[arg(long)]
    region: Option<String>,
    #[arg(long)]
    county: Option<String>,
    #[arg(long)]
    area: Option<String>,
    #[arg(long)]
    place_like: Option<String>,
    #[arg(long)]
    limit: Option<u32>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List events from /v1/events.
    Events {
        #[command(flatten)]
        filter: AreaFilter,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        q: Option<String>,
        #[arg(long)]
        sort: Option<SortOrder>,
        #[arg(long)]
        cursor: Option<String>,
    },
    /// List outages in progress from /v1/events/now.
    Now {
        #[command(flatten)]
        filter: AreaFilter,
    },
    /// Print the reconciled active/upcoming lists shown on the landing page.
    Alerts,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let config = cli
        .api_url
        .map(ApiConfig::new)
        .unwrap_or_else(ApiConfig::from_env);
    let client = EventsClient::new(config);

    match cli.command {
        Command::Events {
            filter,
            from,
            to,
            q,
            sort,
            cursor,
        } => {
            let params = ListEventsParams {
                from,
                to,
                region: filter.region,
                county: filter.county,
                area: filter.area,
                place_like: filter.place_like,
                q,
                sort,
                limit: filter.limit,
                cursor,
            };
            print_json(&client.fetch_events(&params).await?)?;
        }
        Command::Now { filter } => {
            let params = EventsNowParams {
                region: filter.region,
                county: filter.county,
                area: filter.area,
                place_like: filter.place_like,
                limit: filter.limit,
            };
            print_json(&client.fetch_events_now(&params).await?)?;
        }
        Command::Alerts => {
            let (now, upcoming) = alerts::fetch_feeds(&client).await?;
            let reconciled = alerts::reconcile(now.items, upcoming.items, alerts::local_today());
            print_json(&alerts::AlertsView::from(&reconciled))?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
