use clap::Parser;
use mattermost_user_deleter::api::DeleterApi;
use mattermost_user_deleter::commands::{CmdMessage, MessageLevel};
use mattermost_user_deleter::config::DeleterConfig;
use mattermost_user_deleter::directory::ldap::LdapDirectory;
use mattermost_user_deleter::error::Result;
use mattermost_user_deleter::mattermost::MattermostCli;
use mattermost_user_deleter::store::mysql::MySqlStore;
use std::io;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod args;
use args::Cli;

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    if let Err(e) = run(&cli) {
        error!("{}", e);
        if e.is_connection_failure() {
            error!("no users were deleted");
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = DeleterConfig::load(&cli.config)?;
    debug!("loaded {}", cli.config.display());

    let store = MySqlStore::connect(&config.database)?;
    let directory = LdapDirectory::connect(&config.directory)?;
    let deleter = MattermostCli::from_root(&cli.mattermost_root);
    debug!("using mattermost CLI at {}", deleter.path().display());

    if cli.dry_run {
        info!("dry run, no users will be deleted");
    }

    let mut api = DeleterApi::new(store, directory, deleter);
    let result = api.purge(cli.dry_run)?;
    log_messages(&result.messages);
    Ok(())
}

/// Log to stdout, `info` by default, `debug` with `--debug`. `RUST_LOG` wins.
fn setup_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stdout))
        .init();
}

fn log_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info | MessageLevel::Success => info!("{}", message.content),
            MessageLevel::Warning => warn!("{}", message.content),
        }
    }
}
