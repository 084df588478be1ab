//! roast - terminal chat client for football banter

mod config;
mod ui;
mod utils;

use anyhow::Context;
use clap::Parser;
use roast_core::{ChatEvent, ExchangeConfig, ExchangeController, ExchangeStatus, TranscriptStore};
use std::time::Duration;
use tokio::sync::broadcast;

/// roast - trade football takes with a remote pundit
#[derive(Parser, Debug)]
#[command(name = "roast")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Chat endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Give up on a reply after this many milliseconds (default: 30000)
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Text sent automatically on startup (default: "Hello")
    #[arg(long)]
    greeting: Option<String>,

    /// Send a single message, print the reply and exit
    #[arg(short = 'c', long)]
    command: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Disable TUI mode (use simple stdin/stdout)
    #[arg(long)]
    no_tui: bool,

    /// Initialize config file
    #[arg(long)]
    init_config: bool,
}

/// Effective settings after merging CLI flags over the config file
#[derive(Debug, Clone, PartialEq, Eq)]
struct Settings {
    endpoint: String,
    timeout: Duration,
    greeting: String,
    use_tui: bool,
}

impl Settings {
    fn exchange_config(&self) -> ExchangeConfig {
        ExchangeConfig {
            timeout: self.timeout,
            greeting: self.greeting.clone(),
        }
    }
}

impl Args {
    /// Merge with the config file (CLI takes precedence)
    fn settings(&self, cfg: &config::Config) -> Settings {
        let endpoint = self
            .endpoint
            .clone()
            .or(cfg.endpoint.clone())
            .unwrap_or_else(|| roast_core::HttpChatService::DEFAULT_ENDPOINT.to_string());

        let timeout = self
            .timeout_ms
            .or(cfg.timeout_ms)
            .map(Duration::from_millis)
            .unwrap_or(ExchangeConfig::DEFAULT_TIMEOUT);

        let greeting = self
            .greeting
            .clone()
            .or(cfg.greeting.clone())
            .unwrap_or_else(|| ExchangeConfig::DEFAULT_GREETING.to_string());

        let use_tui = !self.no_tui && cfg.tui.unwrap_or(true);

        Settings {
            endpoint,
            timeout,
            greeting,
            use_tui,
        }
    }
}

/// Install the tracing subscriber.
///
/// Nothing is logged unless `--verbose` is given or `RUST_LOG` is set. While
/// the TUI owns the terminal, log lines go to a file instead of stderr.
fn init_tracing(verbose: bool, to_file: bool) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if verbose => EnvFilter::new("roast=debug"),
        Err(_) => return Ok(()),
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if to_file {
        let dir = config::Config::config_dir();
        std::fs::create_dir_all(&dir)?;
        let path = dir.join("roast.log");
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        builder
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init();
    } else {
        builder.with_writer(std::io::stderr).init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize config and exit
    if args.init_config {
        match config::Config::init() {
            Ok(path) => {
                println!("Config file created at: {}", path.display());
                println!("\nExample config:\n{}", config::example_config());
            }
            Err(e) => {
                eprintln!("Error creating config: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let cfg = config::Config::load();
    let settings = args.settings(&cfg);
    let tui_mode = args.command.is_none() && settings.use_tui;

    init_tracing(args.verbose, tui_mode)?;

    let controller = ExchangeController::http(&settings.endpoint, settings.exchange_config())
        .context("invalid configuration")?;
    tracing::debug!(
        endpoint = %settings.endpoint,
        timeout_ms = settings.timeout.as_millis() as u64,
        "client configured"
    );

    // Non-interactive mode
    if let Some(command) = args.command {
        return run_command(&controller, &command).await;
    }

    if tui_mode {
        return ui::run_tui(&controller).await;
    }

    run_interactive(&controller).await
}

/// Send one message without the greeting and print what came back
async fn run_command(controller: &ExchangeController, command: &str) -> anyhow::Result<()> {
    let mut store = TranscriptStore::new();
    let status = controller.submit(&mut store, command).await;

    if status == ExchangeStatus::Skipped {
        anyhow::bail!("nothing to send: message is blank");
    }

    if let Some(message) = store.last() {
        println!("{}", utils::format_message(message));
    }

    if status.is_failure() {
        std::process::exit(1);
    }
    Ok(())
}

/// Print every non-user message appended since the last call
fn print_replies(events: &mut broadcast::Receiver<ChatEvent>) {
    while let Ok(event) = events.try_recv() {
        if let ChatEvent::MessageAppended { message, .. } = event {
            if !message.is_user {
                println!("{}", utils::format_message(&message));
            }
        }
    }
}

/// Line-oriented chat over stdin/stdout
async fn run_interactive(controller: &ExchangeController) -> anyhow::Result<()> {
    use std::io::{self, IsTerminal, Write};

    let mut store = TranscriptStore::new();
    let mut events = store.subscribe();

    if io::stderr().is_terminal() {
        eprintln!(
            "{} - {}",
            roast_tui::widgets::header::TITLE,
            roast_tui::widgets::header::TAGLINE
        );
        eprintln!();
    }

    controller.greet(&mut store).await;
    print_replies(&mut events);

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            // EOF
            break;
        }

        let text = input.trim_end_matches(['\r', '\n']);
        controller.submit(&mut store, text).await;
        print_replies(&mut events);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::Config;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["roast"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_defaults_without_config() {
        let settings = args(&[]).settings(&Config::default());
        assert_eq!(settings.endpoint, "https://comp-eb.onrender.com/chat");
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(settings.greeting, "Hello");
        assert!(settings.use_tui);
    }

    #[test]
    fn test_config_fills_in() {
        let cfg = Config {
            endpoint: Some("http://localhost:9000/chat".into()),
            timeout_ms: Some(500),
            greeting: Some("Oi".into()),
            tui: Some(false),
        };
        let settings = args(&[]).settings(&cfg);
        assert_eq!(settings.endpoint, "http://localhost:9000/chat");
        assert_eq!(settings.timeout, Duration::from_millis(500));
        assert_eq!(settings.greeting, "Oi");
        assert!(!settings.use_tui);
    }

    #[test]
    fn test_flags_override_config() {
        let cfg = Config {
            endpoint: Some("http://localhost:9000/chat".into()),
            timeout_ms: Some(500),
            greeting: Some("Oi".into()),
            tui: Some(true),
        };
        let settings = args(&[
            "--endpoint",
            "http://127.0.0.1:1/chat",
            "--timeout-ms",
            "1500",
            "--greeting",
            "Evening",
            "--no-tui",
        ])
        .settings(&cfg);
        assert_eq!(settings.endpoint, "http://127.0.0.1:1/chat");
        assert_eq!(settings.timeout, Duration::from_millis(1500));
        assert_eq!(settings.greeting, "Evening");
        assert!(!settings.use_tui);
    }

    #[test]
    fn test_command_flag() {
        let parsed = args(&["-c", "Messi > Ronaldo"]);
        assert_eq!(parsed.command.as_deref(), Some("Messi > Ronaldo"));
    }

    #[test]
    fn test_exchange_config_from_settings() {
        let config = args(&["--timeout-ms", "250"])
            .settings(&Config::default())
            .exchange_config();
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert!(config.validate().is_ok());
    }
}
