mod cmd;
mod input;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "bucket-timeline",
    about = "Bucket timeline — proxy the bucket API and project buckets onto a status timeline",
    version,
    propagate_version = true
)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the proxy and timeline web UI
    Serve {
        /// Port to listen on (0 = OS-assigned)
        #[arg(long, env = "PORT")]
        port: Option<u16>,

        /// Bearer token for the upstream bucket API
        #[arg(long, env = "API_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Upstream bucket list URL
        #[arg(long, env = "BUCKETS_UPSTREAM_URL")]
        upstream_url: Option<String>,

        /// Open the timeline in a browser once listening
        #[arg(long)]
        open: bool,
    },

    /// Project buckets onto timeline groups and items
    Project {
        /// Bucket JSON file ("-" for stdin); fetched from upstream when omitted
        #[arg(long, short)]
        input: Option<PathBuf>,

        /// Bearer token, only needed when fetching from upstream
        #[arg(long, env = "API_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Upstream bucket list URL
        #[arg(long, env = "BUCKETS_UPSTREAM_URL")]
        upstream_url: Option<String>,
    },

    /// Summarize the actions of a cluster of items
    Cluster {
        /// Bucket JSON file ("-" for stdin)
        #[arg(long, short)]
        input: PathBuf,

        /// Member item ids, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<String>,
    },
}

fn main() {
    // A local .env may supply API_TOKEN and friends.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Serve {
            port,
            token,
            upstream_url,
            open,
        } => cmd::serve::run(token, upstream_url, port, open),
        Commands::Project {
            input,
            token,
            upstream_url,
        } => cmd::project::run(input.as_deref(), token, upstream_url, cli.json),
        Commands::Cluster { input, ids } => cmd::cluster::run(&input, &ids, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
