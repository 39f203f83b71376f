use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

use arcade_calculator_core::config::AppConfig;
use arcade_calculator_core::history::{ProfileHistory, SavedProfile};
use arcade_calculator_core::matcher::annotate;
use arcade_calculator_core::models::{GameStatus, ResultData};
use arcade_calculator_core::{ArcadeService, monitoring, output};

mod server;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

#[derive(Debug, Parser)]
#[command(name = "arcade-calc", version, about = "Arcade points calculator")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(long, global = true, default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a public profile for the current season
    Calc {
        /// Public profile URL (prompted for when omitted)
        url: Option<String>,

        /// Season year to count (default from config)
        #[arg(long)]
        season: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Also list active games and mark the completed ones
        #[arg(long, default_value_t = false)]
        games: bool,

        /// Do not record this profile in the history
        #[arg(long, default_value_t = false)]
        no_history: bool,
    },
    /// List active arcade games with access codes
    Games {
        /// Mark games already completed by this profile
        #[arg(long)]
        profile: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Manage previously scored profiles
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Serve the calculate and games endpoints over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,

        /// Prometheus exporter port
        #[arg(long, default_value_t = 9898)]
        metrics_port: u16,
    },
}

#[derive(Debug, Subcommand)]
enum HistoryAction {
    List {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    Remove {
        url: String,
    },
    Clear,
}

fn wants_json(command: &Command) -> bool {
    match command {
        Command::Calc { format, .. } | Command::Games { format, .. } => {
            *format == OutputFormat::Json
        }
        Command::History {
            action: HistoryAction::List { format },
        } => *format == OutputFormat::Json,
        _ => false,
    }
}

fn prompt_for_url(history: &ProfileHistory) -> Result<String> {
    if !history.is_empty() {
        println!("Recent profiles:");
        for (i, p) in history.entries().iter().enumerate().take(5) {
            println!("  {}. {} ({})", i + 1, p.name, p.url);
        }
        println!();
    }

    if std::io::stdin().is_terminal() && std::io::stdout().is_terminal() {
        let ans = inquire::Text::new("Profile URL:")
            .with_placeholder("https://www.skills.google/public_profiles/...")
            .prompt();
        match ans {
            Ok(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
            _ => anyhow::bail!("URL is required"),
        }
    } else {
        use std::io::{self, Write};
        print!("Profile URL: ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        let s = line.trim().to_string();
        if s.is_empty() {
            anyhow::bail!("URL is required");
        }
        Ok(s)
    }
}

async fn load_history(config: &AppConfig) -> (Option<PathBuf>, ProfileHistory) {
    let Some(path) = config.history_file() else {
        return (None, ProfileHistory::new());
    };
    match ProfileHistory::load_from_file(&path).await {
        Ok(h) => (Some(path), h),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring unreadable profile history");
            (Some(path), ProfileHistory::new())
        }
    }
}

async fn remember(config: &AppConfig, url: &str, result: &ResultData) {
    let (path, mut history) = load_history(config).await;
    let Some(path) = path else {
        return;
    };
    let added = history.record(SavedProfile {
        name: result.user.name.clone(),
        avatar: result.user.avatar.clone(),
        url: url.to_string(),
    });
    if added && let Err(e) = history.save_to_file(&path).await {
        warn!(path = %path.display(), error = %e, "Failed to save profile history");
    }
}

async fn run_calc(
    service: &ArcadeService,
    url: Option<String>,
    season: &str,
    format: OutputFormat,
    with_games: bool,
    no_history: bool,
) -> Result<()> {
    let url = match url {
        Some(u) => u,
        None => {
            let (_, history) = load_history(service.config()).await;
            prompt_for_url(&history)?
        }
    };
    let url = url.trim().to_string();

    let result = service.calculate_for_season(Some(&url), season).await?;

    if !no_history {
        remember(service.config(), &url, &result).await;
    }

    let games: Option<Vec<GameStatus>> = if with_games {
        match service.games_for(&result.badges).await {
            Ok(g) => Some(g),
            Err(e) => {
                warn!(error = %e, "Active games unavailable");
                Some(Vec::new())
            }
        }
    } else {
        None
    };

    match format {
        OutputFormat::Json => {
            let mut value = serde_json::to_value(&result)?;
            if let (Some(games), Some(obj)) = (&games, value.as_object_mut()) {
                obj.insert("games".to_string(), serde_json::to_value(games)?);
            }
            output::print_pretty_json(&value);
        }
        OutputFormat::Table => {
            output::print_report_table(&result, season);
            if let Some(games) = &games {
                println!("\nActive arcade games:");
                output::print_games_table(games);
            }
        }
    }
    Ok(())
}

async fn run_games(
    service: &ArcadeService,
    profile: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let with_profile = profile.is_some();
    let badges = match profile {
        Some(url) => service.calculate(Some(&url)).await?.badges,
        None => Vec::new(),
    };
    let games = service.active_games().await?;

    match format {
        OutputFormat::Json if !with_profile => output::print_pretty_json(&games),
        OutputFormat::Json => output::print_pretty_json(&annotate(games, &badges)),
        OutputFormat::Table => output::print_games_table(&annotate(games, &badges)),
    }
    Ok(())
}

async fn run_history(config: &AppConfig, action: HistoryAction) -> Result<()> {
    let (path, mut history) = load_history(config).await;
    match action {
        HistoryAction::List { format } => match format {
            OutputFormat::Json => output::print_pretty_json(&history),
            OutputFormat::Table => output::print_history(history.entries()),
        },
        HistoryAction::Remove { url } => {
            if !history.remove(&url) {
                println!("No saved profile for {url}");
                return Ok(());
            }
            let path = path.context("no history location available")?;
            history.save_to_file(&path).await?;
            println!("Removed {url}");
        }
        HistoryAction::Clear => {
            history.clear();
            if let Some(path) = path {
                history.save_to_file(&path).await?;
            }
            println!("History cleared.");
        }
    }
    Ok(())
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if wants_json(&cli.command) && !cli.debug {
        monitoring::init_tracing_json();
    } else {
        monitoring::init_tracing(cli.debug);
    }

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Command::Calc {
        season: Some(season),
        ..
    } = &cli.command
    {
        config.season = season.clone();
        config.validate()?;
    }

    match cli.command {
        Command::Calc {
            url,
            format,
            games,
            no_history,
            ..
        } => {
            let season = config.season.clone();
            let service = ArcadeService::from_config(config)?;
            run_calc(&service, url, &season, format, games, no_history).await
        }
        Command::Games { profile, format } => {
            let service = ArcadeService::from_config(config)?;
            run_games(&service, profile, format).await
        }
        Command::History { action } => run_history(&config, action).await,
        Command::Serve { addr, metrics_port } => {
            monitoring::init_metrics_exporter(metrics_port)?;
            let service = Arc::new(ArcadeService::from_config(config)?);
            server::serve(service, addr).await
        }
    }
}
