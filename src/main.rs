use brevo_dash::app::{App, Repos};
use brevo_dash::brevo::BrevoClient;
use brevo_dash::cache::{Collection, SqliteStore};
use brevo_dash::config::Config;
use brevo_dash::logging;
use chrono::Duration;
use clap::{Parser, ValueEnum};
use color_eyre::Result;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "brevo-dash")]
#[command(about = "A terminal dashboard for Brevo campaigns and contacts")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/brevo-dash/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Print a collection as JSON and exit instead of starting the dashboard
  #[arg(long, value_enum)]
  dump: Option<DumpTarget>,

  /// Ignore cached data and refetch (with --dump)
  #[arg(long, requires = "dump")]
  refresh: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DumpTarget {
  Campaigns,
  Contacts,
}

impl From<DumpTarget> for Collection {
  fn from(target: DumpTarget) -> Self {
    match target {
      DumpTarget::Campaigns => Collection::Campaigns,
      DumpTarget::Contacts => Collection::Contacts,
    }
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  let _log_guard = logging::init(&logging::default_log_dir()?)?;

  let config = Config::load(args.config.as_deref())?;

  let store = match &config.cache.path {
    Some(path) => SqliteStore::open(path)?,
    None => SqliteStore::open_default()?,
  };
  let client = BrevoClient::new(&config)?;
  let repos = Repos::new(store, client, &config);

  info!(url = %config.brevo.url, "Starting brevo-dash");

  if let Some(target) = args.dump {
    return dump(&repos, target.into(), args.refresh).await;
  }

  let mut app = App::new(&config, repos, Collection::Campaigns);
  app.run().await?;

  Ok(())
}

async fn dump(repos: &Repos, collection: Collection, refresh: bool) -> Result<()> {
  let json = match collection {
    Collection::Campaigns => {
      let ttl = if refresh { Duration::zero() } else { repos.campaigns.ttl() };
      serde_json::to_string_pretty(&repos.campaigns.get_with_ttl(ttl).await?)?
    }
    Collection::Contacts => {
      let ttl = if refresh { Duration::zero() } else { repos.contacts.ttl() };
      serde_json::to_string_pretty(&repos.contacts.get_with_ttl(ttl).await?)?
    }
  };

  println!("{}", json);
  Ok(())
}
