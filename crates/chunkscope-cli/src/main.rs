//! Terminal front-end for the chunking service.

use anyhow::{bail, Context};
use chunkscope_client::ChunkClient;
use chunkscope_common::config::ClientConfig;
use chunkscope_common::telemetry;
use chunkscope_common::types::{ChunkParams, Strategy};
use chunkscope_session::render::render;
use chunkscope_session::{Action, Phase, SessionHandle, ViewState};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "chunkscope")]
#[command(about = "See how a PDF gets split by different chunking strategies")]
#[command(version)]
struct Cli {
    /// Base URL of the chunking service (overrides CHUNKSCOPE_SERVER_URL)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upload a PDF, chunk it once and print the result
    Chunk {
        pdf: PathBuf,
        #[command(flatten)]
        params: ParamArgs,
    },
    /// Upload a PDF and re-chunk it interactively from stdin
    Explore {
        pdf: PathBuf,
        #[command(flatten)]
        params: ParamArgs,
    },
}

#[derive(Args)]
struct ParamArgs {
    /// fixed, sentence, paragraph or sliding
    #[arg(long, default_value = "fixed", value_parser = parse_strategy)]
    strategy: Strategy,
    #[arg(long, default_value_t = chunkscope_common::types::DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,
    #[arg(long, default_value_t = chunkscope_common::types::DEFAULT_OVERLAP)]
    overlap: usize,
}

impl ParamArgs {
    fn params(&self) -> ChunkParams {
        ChunkParams {
            strategy: self.strategy,
            chunk_size: self.chunk_size,
            overlap: self.overlap,
        }
    }
}

fn parse_strategy(s: &str) -> Result<Strategy, String> {
    s.parse::<Strategy>()
        .map_err(|_| format!("expected one of: fixed, sentence, paragraph, sliding (got {s})"))
}

/// One line typed during `explore`.
#[derive(Debug, PartialEq)]
enum Input {
    Apply(Action),
    Show,
    Quit,
}

fn parse_input(line: &str) -> Result<Input, String> {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or("show");
    let arg = words.next();

    let number = |arg: Option<&str>| -> Result<usize, String> {
        arg.ok_or_else(|| format!("{command} needs a value"))?
            .parse::<usize>()
            .map_err(|e| format!("{command}: {e}"))
    };

    match command {
        "strategy" => {
            let name = arg.ok_or("strategy needs a value")?;
            Ok(Input::Apply(Action::StrategyChanged(parse_strategy(name)?)))
        }
        "size" => Ok(Input::Apply(Action::ChunkSizeChanged(number(arg)?))),
        "overlap" => Ok(Input::Apply(Action::OverlapChanged(number(arg)?))),
        "retry" => Ok(Input::Apply(Action::Retry)),
        "show" => Ok(Input::Show),
        "quit" | "exit" => Ok(Input::Quit),
        other => Err(format!(
            "unknown command '{other}' (strategy <name>, size <n>, overlap <n>, retry, show, quit)"
        )),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env().context("failed to load client config")?;
    if let Some(server) = cli.server {
        config.server_url = server;
    }
    let client = ChunkClient::from_config(&config)?;
    tracing::debug!(server = client.base_url(), "Using chunking service");

    match cli.command {
        Command::Chunk { pdf, params } => {
            let session = start(client, &pdf, params.params()).await?;
            let view = session.settled().await?;
            print!("{}", render(&view));
            if let Some(message) = failure(&view) {
                bail!("{message}");
            }
        }
        Command::Explore { pdf, params } => {
            let session = start(client, &pdf, params.params()).await?;
            let view = session.settled().await?;
            print!("{}", render(&view));
            explore(&session).await?;
        }
    }

    Ok(())
}

async fn start(client: ChunkClient, pdf: &Path, params: ChunkParams) -> anyhow::Result<SessionHandle> {
    let bytes = tokio::fs::read(pdf)
        .await
        .with_context(|| format!("failed to read {}", pdf.display()))?;
    let filename = pdf
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| pdf.display().to_string());

    let session = SessionHandle::spawn(Arc::new(client), params);
    session.upload(&filename, bytes).await?;
    Ok(session)
}

/// The error to exit with, if the run produced nothing to show.
fn failure(view: &ViewState) -> Option<&str> {
    match view.phase {
        Phase::Success => None,
        _ => Some(view.error.as_deref().unwrap_or("no chunks produced")),
    }
}

async fn explore(session: &SessionHandle) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Ok(Input::Quit) => break,
            Ok(Input::Show) => print!("{}", render(&session.snapshot())),
            Ok(Input::Apply(action)) => {
                session.dispatch(action).await?;
                let view = session.settled().await?;
                print!("{}", render(&view));
            }
            Err(message) => eprintln!("{message}"),
        }
    }

    Ok(())
}
