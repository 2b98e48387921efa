//! Aggregator-RS: best-match lookups for chat bots
//!
//! Reads commands from stdin, one per line, and prints replies to stdout.

use anyhow::Result;
use aggregator_rs::{
    config,
    delivery::{DeliverySink, StdoutSink},
    network::HttpClient,
    sources::SourceLoader,
    Dispatcher,
};
use std::borrow::Cow;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Destination used when a line does not name one
const DEFAULT_DESTINATION: &str = "stdout";

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().skip(1).any(|a| a == "-h" || a == "--help") {
        print_usage();
        return Ok(());
    }

    // Load configuration
    let settings_path = config::locate();
    let settings = config::load(settings_path.as_deref())?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Aggregator-RS v{}", aggregator_rs::VERSION);
    match settings_path {
        Some(ref path) => info!("Loaded settings from: {}", path.display()),
        None => info!("No settings file found, using defaults"),
    }

    // Initialize HTTP client
    let client = HttpClient::with_settings(&settings.outgoing)?;
    info!("HTTP client initialized");

    // Load sources
    let registry = SourceLoader::new(&settings)
        .on_loaded(|sources| {
            for source in sources {
                info!("Source '{}': {} - {}", source.key, source.readable_name, source.description);
            }
        })
        .load()?;

    let dispatcher = Dispatcher::new(Arc::new(registry), client);
    let sink: Arc<dyn DeliverySink> = Arc::new(StdoutSink);

    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut buf = Vec::new();
    let mut tasks = JoinSet::new();

    while let Some(line) = read_line(&mut stdin, &mut buf).await? {
        let Some((destination, command, args)) = split_line(&line) else {
            continue;
        };

        let dispatcher = dispatcher.clone();
        let sink = sink.clone();
        tasks.spawn(async move {
            if !dispatcher
                .handle(sink.as_ref(), &destination, &command, &args)
                .await
            {
                debug!("Ignoring unknown command: {}", command);
            }
        });

        reap_finished(&mut tasks);
    }

    while tasks.join_next().await.is_some() {}

    Ok(())
}

/// Drop the handles of lookups that already completed
fn reap_finished(tasks: &mut JoinSet<()>) -> usize {
    let mut reaped = 0;
    while tasks.try_join_next().is_some() {
        reaped += 1;
    }
    reaped
}

/// Read one line, replacing invalid UTF-8 instead of failing
async fn read_line<R>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    if reader.read_until(b'\n', buf).await? == 0 {
        return Ok(None);
    }

    let line = String::from_utf8_lossy(&buf[..]);
    if let Cow::Owned(_) = line {
        warn!("Input line is not valid UTF-8, replacing invalid bytes");
    }
    Ok(Some(line.into_owned()))
}

/// Split `[#destination] <command> [args]` into its parts
fn split_line(line: &str) -> Option<(String, String, String)> {
    let mut rest = line.trim();

    let mut destination = DEFAULT_DESTINATION;
    if rest.starts_with('#') {
        let (dest, tail) = rest.split_once(char::is_whitespace)?;
        destination = dest;
        rest = tail.trim_start();
    }

    if rest.is_empty() {
        return None;
    }

    let (command, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    Some((destination.to_string(), command.to_string(), args.to_string()))
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
Aggregator-RS v{}
Best-match lookups against encyclopedia, package and dictionary sources

USAGE:
    aggregator-rs < commands.txt

COMMANDS (one per line, optionally prefixed with #destination):
    find <source> <terms> [@ user]   Look up terms in a source
    <source> <terms> [@ user]        Same, using the source key as command
    lssources                        List configured sources

ENVIRONMENT VARIABLES:
    AGGREGATOR_SETTINGS_PATH     Path to settings.yml
    AGGREGATOR_DEBUG             Enable debug logging (true/false)
    AGGREGATOR_LOG_LEVEL         Log filter when RUST_LOG is unset
    AGGREGATOR_REQUEST_TIMEOUT   Default source timeout in seconds
"#,
        aggregator_rs::VERSION
    );
}
