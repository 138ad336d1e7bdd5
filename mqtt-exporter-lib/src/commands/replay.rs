use super::Host;
use super::common::{ConfigArgs, LogLevel, init_logging, report_failure};
use crate::Result;
use crate::config::Config;
use crate::dispatch::{Dispatcher, Message, MessageSender};
use crate::export::render_text;
use crate::store::{ObservationStore, Observer, Sweeper};
use bytes::Bytes;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ohno::{IntoAppError, app_err};
use serde::Deserialize;
use std::fs;
use std::io::{Read, Write};
use std::sync::Arc;

const LOG_TARGET: &str = "    replay";

#[derive(Parser, Debug)]
pub struct ReplayArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// File of recorded messages, one JSON object with `topic` and `payload` per line (default is stdin)
    #[arg(long, short = 'i', value_name = "PATH")]
    pub input: Option<Utf8PathBuf>,

    /// Write the metrics exposition to a file instead of the terminal
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: LogLevel,
}

/// One recorded message.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecordedMessage {
    topic: String,
    payload: RecordedPayload,
}

/// Text payloads are replayed verbatim, anything else as its JSON encoding.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordedPayload {
    Text(String),
    Json(serde_json::Value),
}

impl From<RecordedPayload> for Bytes {
    fn from(payload: RecordedPayload) -> Self {
        match payload {
            RecordedPayload::Text(text) => Self::from(text),
            RecordedPayload::Json(value) => Self::from(value.to_string()),
        }
    }
}

/// Replay recorded messages through a fresh store and render what it would export.
pub async fn replay_messages<H: Host>(host: &mut H, args: &ReplayArgs) -> Result<()> {
    init_logging(args.log_level);

    let text = report_failure(host, "Replay", replay(args).await)?;
    match &args.output {
        Some(path) => {
            report_failure(
                host,
                "Replay",
                fs::write(path, &text).into_app_err_with(|| format!("writing metrics to '{path}'")),
            )?;
        }
        None => {
            let _ = write!(host.output(), "{text}");
        }
    }

    Ok(())
}

async fn replay(args: &ReplayArgs) -> Result<String> {
    let (config, source) = Config::load(Utf8Path::new("."), args.config.path())?;
    log::debug!(target: LOG_TARGET, "Using configuration {source:?}");

    let catalog = Arc::new(config.catalog()?);
    let store = Arc::new(ObservationStore::new(Arc::clone(&catalog)));
    let sweeper = Sweeper::spawn(&store, config.cache.sweep_interval);

    let observer: Arc<dyn Observer> = Arc::<ObservationStore>::clone(&store);
    let dispatcher = Dispatcher::from_catalog(&catalog, &observer);
    let (tx, rx) = Dispatcher::channel();
    let dispatch_task = tokio::spawn(async move { dispatcher.run(rx).await });

    let input = read_input(args.input.as_deref())?;
    let sent = send_lines(&input, &tx)?;
    drop(tx);

    let observations = dispatch_task.await.into_app_err("dispatcher task failed")?;
    drop(sweeper);
    let _ = store.sweep();

    log::info!(target: LOG_TARGET, "Replayed {sent} message(s) into {observations} observation(s), {} live", store.len());
    render_text(&store)
}

fn read_input(path: Option<&Utf8Path>) -> Result<String> {
    if let Some(path) = path {
        return fs::read_to_string(path).into_app_err_with(|| format!("reading recorded messages from '{path}'"));
    }

    let mut text = String::new();
    let _ = std::io::stdin()
        .read_to_string(&mut text)
        .into_app_err("reading recorded messages from stdin")?;
    Ok(text)
}

/// Queue every well-formed line, returning how many were sent. Blank lines are skipped and
/// malformed lines are logged and skipped.
fn send_lines(input: &str, tx: &MessageSender) -> Result<usize> {
    let mut sent = 0;
    for (index, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<RecordedMessage>(line) {
            Ok(recorded) => {
                tx.send(Message::new(recorded.topic, recorded.payload))?;
                sent += 1;
            }
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Skipping malformed recorded message on line {}: {e}", index + 1);
            }
        }
    }

    if sent == 0 && !input.trim().is_empty() {
        return Err(app_err!("no recorded message could be read from the input"));
    }

    Ok(sent)
}
