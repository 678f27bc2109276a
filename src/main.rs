//! CLI entry point for spacetraveling

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spacetraveling::{Blog, SourceKind};

#[derive(Parser)]
#[command(name = "spacetraveling")]
#[command(version)]
#[command(about = "Shape headless content API posts into view models and listings", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Where to read content from
    #[arg(short, long, global = true, value_enum, default_value = "local")]
    source: Source,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Source {
    /// JSON documents in the content directory
    Local,
    /// The content API configured in _config.yml
    Api,
}

impl From<Source> for SourceKind {
    fn from(source: Source) -> Self {
        match source {
            Source::Local => SourceKind::Local,
            Source::Api => SourceKind::Api,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List posts
    #[command(alias = "ls")]
    List {
        /// Number of "load more" pages to fetch after the first one
        #[arg(short, long, default_value = "0")]
        more: usize,

        /// Print the accumulated listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build a post page and print it as JSON
    Post {
        /// Post uid
        uid: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "spacetraveling=debug,info"
    } else {
        "spacetraveling=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::List { more, json } => {
            let blog = Blog::new(&base_dir)?;
            let source = blog.source(cli.source.into())?;
            tracing::info!("Listing posts ({} extra pages)", more);
            spacetraveling::commands::list::run(&blog, source.as_ref(), more, json).await?;
        }

        Commands::Post { uid } => {
            let blog = Blog::new(&base_dir)?;
            let source = blog.source(cli.source.into())?;
            tracing::info!("Building post {}", uid);
            spacetraveling::commands::post::run(&blog, source.as_ref(), &uid).await?;
        }

        Commands::Version => {
            println!("spacetraveling version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
