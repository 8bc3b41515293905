use clap::Parser;
use futures::FutureExt;
use natega::headless::{self, OutputFormat};
use natega_core::config::Config;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "natega", version, about = "Exam results lookup by student name")]
struct Cli {
    /// Write debug logs (to /tmp/natega-debug.log in TUI mode, stderr otherwise).
    #[arg(long)]
    debug: bool,

    /// Archive location: an http:// or https:// URL, or a local path. Overrides `[source] location`.
    #[arg(long, value_name = "URL|PATH")]
    source: Option<String>,

    /// Dataset entry inside the archive. Overrides `[source] entry`.
    #[arg(long, value_name = "NAME")]
    entry: Option<String>,

    /// Run one search without the TUI, print the results and exit.
    #[arg(long, short)]
    query: Option<String>,

    /// Output format for --query.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, requires = "query")]
    format: OutputFormat,
}

fn env_filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_env("RUST_LOG")
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "warn" }))
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.query.is_some() {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter(cli.debug))
            .init();
    } else if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/natega-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(env_filter(true))
            .init();
        tracing::info!("natega debug log started (tail -f /tmp/natega-debug.log)");
    }

    let mut config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "could not load config, using defaults");
        Config::defaults()
    });
    if let Some(location) = cli.source {
        config.source.location = location;
    }
    if let Some(entry) = cli.entry {
        config.source.entry = entry;
    }

    match cli.query {
        Some(query) => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let mut stdout = std::io::stdout().lock();
            let outcome =
                runtime.block_on(headless::run_with_config(&config, &query, cli.format, &mut stdout));
            match outcome {
                Ok(()) => Ok(ExitCode::SUCCESS),
                Err(err) => {
                    tracing::error!(error = %err, "headless run failed");
                    eprintln!("{err}");
                    Ok(ExitCode::from(err.exit_code()))
                }
            }
        }
        None => {
            let loader = Arc::new(natega_source::loader_from_config(&config.source)?);
            let load: natega_tui::LoadFn = Box::new(move || {
                let loader = Arc::clone(&loader);
                async move { loader.load().await }.boxed()
            });
            natega_tui::run(config, load)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
