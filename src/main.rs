mod api;
mod cache;
mod dashboard;
mod models;
mod types;
mod upload;

use std::io::{stderr, stdout, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::api::ApiClient;
use crate::cache::QueryCache;
use crate::dashboard::{Dashboard, Key, UiEvent};
use crate::upload::SelectedFile;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    //NOTE: A single optional positional argument is not worth pulling in the clap crate for.
    let args: Vec<String> = std::env::args().collect();
    let log_level = args.get(1)
        .map(|s| parse_log_level(s)).unwrap_or(LevelFilter::ERROR);

    setup_logging(log_level);

    let base_url = std::env::var("API_URL")
        .unwrap_or_else(|_| ApiClient::DEFAULT_BASE_URL.to_string());
    info!("Using backend at {base_url}");

    let api = Arc::new(ApiClient::with_base_url(base_url));
    let cache = Arc::new(QueryCache::new(api.clone()));
    let mut dashboard = Dashboard::new(api, cache);

    run_event_loop(&mut dashboard).await
}

async fn run_event_loop(dashboard: &mut Dashboard<ApiClient>) -> Result<()> {
    let mut lines = BufReader::new(stdin()).lines();

    render(dashboard)?;

    while let Some(line) = lines.next_line().await? {
        let command = line.trim();

        if command.is_empty() {
            continue;
        }

        if command == "quit" {
            break;
        }

        match parse_command(command).await {
            Ok(Some(event)) => dashboard.handle(event).await,
            Ok(None) => {}
            Err(error) => eprintln!("{error}")
        }

        render(dashboard)?;
    }

    Ok(())
}

/// Maps a stdin command onto a UI event. `show` maps to no event at all:
/// the loop re-renders after every command anyway.
async fn parse_command(command: &str) -> Result<Option<UiEvent>> {
    let (verb, argument) = match command.split_once(' ') {
        Some((verb, argument)) => (verb, Some(argument.trim())),
        None => (command, None)
    };

    let event = match verb {
        "open" => UiEvent::OpenDialog,
        "choose" | "drop" => {
            let Some(path) = argument else {
                anyhow::bail!("Usage: {verb} <path>");
            };

            let file = SelectedFile::from_path(Path::new(path)).await?;

            if verb == "choose" {
                UiEvent::FileChosen(file)
            } else {
                UiEvent::FileDropped(file)
            }
        }
        "drag-over" => UiEvent::DragOver,
        "drag-leave" => UiEvent::DragLeave,
        "remove" => UiEvent::RemoveFile,
        "submit" => UiEvent::Submit,
        "cancel" => UiEvent::CancelDialog,
        "esc" => UiEvent::KeyPressed(Key::Escape),
        "show" => return Ok(None),
        _ => anyhow::bail!("Unknown command: {command} (try open/choose/drop/drag-over/drag-leave/remove/submit/cancel/esc/show/quit)")
    };

    Ok(Some(event))
}

fn render(dashboard: &mut Dashboard<ApiClient>) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    writeln!(output, "{}", dashboard.render())?;
    output.flush()?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: Stdout carries the rendered dashboard, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}
