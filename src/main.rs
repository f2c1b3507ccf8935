mod core;
mod features;
mod modules;
mod shared;

use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::core::config::Config;
use crate::features::portal::commands::Command;
use crate::features::portal::controller::{ConfirmPrompt, Portal};
use crate::features::portal::view;
use crate::modules::api::DocumentServiceClient;

fn main() -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("Document service at {}", config.api.base_url);

    let api = Arc::new(DocumentServiceClient::new(&config.api));

    // Notification expiry timers report back through this channel and are
    // applied whenever the loop is between commands.
    let (timer_tx, mut timer_rx) = mpsc::unbounded_channel();

    let mut portal = Portal::new(
        api,
        Box::new(StdinConfirm),
        config.downloads.clone(),
        timer_tx,
    );

    println!("HealthDocs Portal - type 'help' for commands.");

    portal.handle(Command::Refresh).await;

    loop {
        while let Ok(command) = timer_rx.try_recv() {
            portal.handle(command).await;
        }

        print!("{}", view::render_text(&portal.page()));
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = read_line().await? else {
            break;
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }

        match parse_line(&line) {
            Ok(ParsedLine::Command(command)) => portal.handle(command).await,
            Ok(ParsedLine::Export(path)) => {
                std::fs::write(&path, view::render_page(&portal.page()))?;
                println!("Wrote {}", path.display());
            }
            Ok(ParsedLine::Help) => print_help(),
            Ok(ParsedLine::Quit) => break,
            Err(message) => println!("{}", message),
        }
    }

    Ok(())
}

/// Asks the delete question on the terminal.
struct StdinConfirm;

impl ConfirmPrompt for StdinConfirm {
    fn confirm(&self, message: &str) -> bool {
        print!("{} [y/N] ", message);
        if std::io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if std::io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

async fn read_line() -> anyhow::Result<Option<String>> {
    let line = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        let read = std::io::stdin().read_line(&mut line)?;
        Ok::<_, std::io::Error>(if read == 0 { None } else { Some(line) })
    })
    .await??;
    Ok(line)
}

enum ParsedLine {
    Command(Command),
    Export(PathBuf),
    Help,
    Quit,
}

fn parse_line(line: &str) -> Result<ParsedLine, String> {
    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or("");
    let rest: Vec<&str> = parts.collect();

    match verb {
        "list" | "refresh" => Ok(ParsedLine::Command(Command::Refresh)),
        "select" => {
            if rest.is_empty() {
                return Err("usage: select <path>".to_string());
            }
            Ok(ParsedLine::Command(Command::SelectFile(PathBuf::from(
                rest.join(" "),
            ))))
        }
        "remove" => Ok(ParsedLine::Command(Command::RemoveSelection)),
        "upload" | "submit" => Ok(ParsedLine::Command(Command::Submit)),
        "download" => parse_id(&rest, "download").map(|id| ParsedLine::Command(Command::Download(id))),
        "delete" => parse_id(&rest, "delete").map(|id| ParsedLine::Command(Command::Delete(id))),
        "export" => Ok(ParsedLine::Export(PathBuf::from(
            rest.first().copied().unwrap_or("portal.html"),
        ))),
        "help" => Ok(ParsedLine::Help),
        "quit" | "exit" => Ok(ParsedLine::Quit),
        other => Err(format!("Unknown command: {} (try 'help')", other)),
    }
}

fn parse_id(rest: &[&str], verb: &str) -> Result<i64, String> {
    rest.first()
        .and_then(|raw| raw.parse().ok())
        .ok_or_else(|| format!("usage: {} <id>", verb))
}

fn print_help() {
    println!("Commands:");
    println!("  list              reload the document list");
    println!("  select <path>     stage a PDF for upload");
    println!("  remove            drop the staged file");
    println!("  upload            upload the staged file");
    println!("  download <id>     save a document to the download directory");
    println!("  delete <id>       delete a document (asks for confirmation)");
    println!("  export [path]     write the page snapshot as HTML");
    println!("  quit              leave");
}
