//! `user-directory` entry-point: loads settings, wires adapters and runs one
//! command.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use clap::Parser;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use user_directory::config::DirectorySettings;
use user_directory::domain::{
    CommentThreadService, UserDirectoryService, UserStore, write_strategy_for,
};
use user_directory::inbound::cli::{Cli, CliContext, run};
use user_directory::outbound::jsonplaceholder::JsonPlaceholderHttpSource;
use user_directory::outbound::notifications::TracingNotificationSink;

/// Application bootstrap.
#[tokio::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::try_parse().map_err(io::Error::other)?;
    let settings = DirectorySettings::load_from_iter([OsString::from("user-directory")])
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;

    let base_url = settings.base_url().map_err(io::Error::other)?;
    let timeout = settings.request_timeout().map_err(io::Error::other)?;
    let mode = settings.write_mode().map_err(io::Error::other)?;

    let source = Arc::new(
        JsonPlaceholderHttpSource::new(base_url, timeout)
            .map_err(|error| io::Error::other(format!("build HTTP client: {error}")))?,
    );
    let notifier = Arc::new(TracingNotificationSink::new(
        settings.assume_yes || cli.assume_yes(),
    ));
    let store = Arc::new(UserStore::new());

    let context = CliContext {
        users: UserDirectoryService::new(
            store,
            Arc::clone(&source),
            Arc::clone(&notifier),
            write_strategy_for(mode, Arc::clone(&source)),
        ),
        comments: CommentThreadService::new(source, notifier),
        search: settings.search_options(),
    };

    let output = run(&context, cli.command)
        .await
        .map_err(io::Error::other)?;
    let rendered = serde_json::to_string_pretty(&output)
        .map_err(|error| io::Error::other(format!("encode output: {error}")))?;
    println!("{rendered}");
    Ok(())
}
