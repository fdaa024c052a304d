//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::commands::new::NewPost;
use folio::content::PostFilter;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Markdown-backed content for a portfolio site", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts, tags or categories
    #[command(alias = "ls")]
    List {
        /// Type of content to list (post, tag, category)
        #[arg(default_value = "post")]
        r#type: String,

        /// Restrict to `featured`, a category id, or `all`
        #[arg(short, long, default_value = "all")]
        filter: PostFilter,
    },

    /// Show a single post
    Show {
        /// Post id (file name without .md)
        id: String,

        /// Print the post as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// File name (without .md); derived from the title by default
        #[arg(long)]
        id: Option<String>,

        /// Category of the post
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Mark the post as featured
        #[arg(long)]
        featured: bool,
    },

    /// Serve posts as a JSON API
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::List { r#type, filter } => {
            let folio = folio::Folio::new(&base_dir)?;
            folio::commands::list::run(&folio, &r#type, &filter)?;
        }

        Commands::Show { id, json } => {
            let folio = folio::Folio::new(&base_dir)?;
            if !folio::commands::show::run(&folio, &id, json)? {
                std::process::exit(1);
            }
        }

        Commands::New {
            title,
            id,
            category,
            featured,
        } => {
            let folio = folio::Folio::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            let path = folio::commands::new::create_post(
                &folio,
                &NewPost {
                    title: &title,
                    id: id.as_deref(),
                    category: category.as_deref(),
                    featured,
                },
            )?;
            println!("Created: {:?}", path);
        }

        Commands::Serve { port, ip } => {
            let folio = folio::Folio::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| folio.config.server.ip.clone());
            let port = port.unwrap_or(folio.config.server.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio::server::start(&folio, &ip, port).await?;
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
