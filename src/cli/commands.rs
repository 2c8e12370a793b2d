use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use serde_json::json;

use crate::api;
use crate::config::ServiceConfig;
use crate::models::SessionIdentity;
use crate::resolver::PathResolver;
use crate::service::SessionMessagesService;
use crate::store::{JsonSessionStore, SessionStore};

#[derive(Parser)]
#[command(name = "session-transcripts")]
#[command(version = "0.1.0")]
#[command(about = "Serve Claude Code session transcripts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to listen on
        #[arg(long)]
        bind: Option<SocketAddr>,
        /// JSON session catalog to serve
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Print the most recent messages of a session as JSON
    Show {
        #[command(flatten)]
        session: SessionArgs,
        /// Number of messages to keep
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print where a session's transcript resolves to
    Resolve {
        #[command(flatten)]
        session: SessionArgs,
    },
}

#[derive(Args)]
pub struct SessionArgs {
    /// Project id or path the transcript directory is derived from
    #[arg(long)]
    pub project: String,
    /// Primary session id
    #[arg(long)]
    pub session: String,
    /// Alternate session id tried when the primary has no transcript
    #[arg(long = "alt-session")]
    pub alt_session: Option<String>,
}

impl SessionArgs {
    fn identity(&self) -> Result<SessionIdentity> {
        Ok(SessionIdentity::new(&self.project, &self.session, self.alt_session.clone())?)
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { bind, catalog }) => {
            let mut config = ServiceConfig::from_env()?;
            if let Some(bind) = bind {
                config.bind = bind;
            }
            if catalog.is_some() {
                config.catalog = catalog;
            }
            serve(&config).await?;
        }
        Some(Commands::Show { session, limit }) => {
            show_messages(&ServiceConfig::from_env()?, &session, limit).await?;
        }
        Some(Commands::Resolve { session }) => {
            show_location(&ServiceConfig::from_env()?, &session)?;
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

async fn serve(config: &ServiceConfig) -> Result<()> {
    let store: Arc<dyn SessionStore> = match &config.catalog {
        Some(path) => Arc::new(JsonSessionStore::load(path)?),
        None => Arc::new(JsonSessionStore::empty()),
    };
    api::serve(config, store).await
}

async fn show_messages(config: &ServiceConfig, args: &SessionArgs, limit: Option<usize>) -> Result<()> {
    let limit = limit.unwrap_or(config.default_limit);
    if limit == 0 || limit > config.max_limit {
        bail!("--limit must be between 1 and {}", config.max_limit);
    }

    let service = SessionMessagesService::from_config(config);
    let messages = service.get_messages(&args.identity()?, None, limit).await?;

    let output = serde_json::to_string_pretty(&messages).context("Failed to serialize messages")?;
    println!("{}", output);
    Ok(())
}

fn show_location(config: &ServiceConfig, args: &SessionArgs) -> Result<()> {
    let resolver = PathResolver::with_strategies(&config.projects_root, config.lookup_order.clone());
    let location = resolver.resolve(&args.identity()?)?;

    let output = json!({
        "matched_by": location.matched_by,
        "path": location.path.as_ref().map(|p| p.display().to_string()),
    });
    println!("{}", serde_json::to_string_pretty(&output).context("Failed to serialize location")?);
    Ok(())
}
