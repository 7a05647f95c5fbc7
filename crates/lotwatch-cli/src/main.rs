mod feed;
mod render;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lotwatch_core::{parse_coordinate, LatLng, Query, Session, SortKey};
use tracing_subscriber::EnvFilter;

use crate::render::{Terminal, View};

#[derive(Debug, Parser)]
#[command(name = "lotwatch")]
#[command(about = "Live carpark availability from LTA DataMall")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List carparks matching a search, lot type and sort order
    List {
        /// Case-insensitive substring matched against name and area
        #[arg(long)]
        search: Option<String>,
        /// Only show carparks with this lot type (e.g. C, Y, H)
        #[arg(long)]
        lot_type: Option<String>,
        /// Sort order
        #[arg(long, default_value_t = SortKey::LotsDesc)]
        sort: SortKey,
        #[command(flatten)]
        origin: Origin,
        #[command(flatten)]
        source: FeedSource,
    },
    /// Show the details of a single carpark
    Show {
        /// Carpark id as reported by DataMall
        id: String,
        #[command(flatten)]
        origin: Origin,
        #[command(flatten)]
        source: FeedSource,
    },
    /// List the distinct lot types present in the feed
    LotTypes {
        #[command(flatten)]
        source: FeedSource,
    },
}

#[derive(Debug, Clone, Args)]
struct FeedSource {
    /// Read the feed from a JSON file instead of fetching it
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct Origin {
    /// Your position as "<lat> <lng>", used for distances
    #[arg(long, value_parser = parse_near)]
    near: Option<LatLng>,
}

fn parse_near(raw: &str) -> Result<LatLng, String> {
    parse_coordinate(raw).ok_or_else(|| format!("expected \"<lat> <lng>\", got '{raw}'"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::List {
            search,
            lot_type,
            sort,
            origin,
            source,
        } => {
            let query = Query {
                search_text: search.unwrap_or_default(),
                lot_type_filter: lot_type.filter(|t| !t.is_empty()),
                sort_key: sort,
            };
            let mut session = load_session(&source, &origin).await?;
            session.set_query(query);
            session.subscribe(Box::new(Terminal::new(View::List)));
        }
        Commands::Show { id, origin, source } => {
            let mut session = load_session(&source, &origin).await?;
            session.select(&id, false)?;
            session.subscribe(Box::new(Terminal::new(View::Detail)));
        }
        Commands::LotTypes { source } => {
            let session = load_session(&source, &Origin { near: None }).await?;
            print!("{}", render::format_lot_types(&session.store().lot_types()));
        }
    }

    Ok(())
}

/// Build a session from the configured feed source, with the user position
/// applied when one was given.
async fn load_session(source: &FeedSource, origin: &Origin) -> anyhow::Result<Session> {
    let feed = feed::load(source.file.as_deref()).await?;
    let mut session = Session::new();
    session.load(&feed)?;
    if let Some(position) = origin.near {
        session.set_user_position(position);
    }
    tracing::debug!(carparks = session.store().len(), "feed loaded");
    Ok(session)
}
