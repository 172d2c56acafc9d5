use anyhow::Context;
use clap::{Parser, Subcommand};
use lex_harness::{replay, run_stress, Script};
use lex_views::ViewsConfig;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "lexdesk", version, about = "lexdesk view-state harness")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply a JSON action script and print the final states
    Replay {
        /// Script file
        script: PathBuf,

        /// Print a text summary instead of JSON
        #[arg(long)]
        summary: bool,
    },
    /// Hammer the documents store from several threads
    Stress {
        /// Writer threads
        #[arg(long, default_value_t = 4)]
        threads: usize,

        /// Selections per thread
        #[arg(long, default_value_t = 1000)]
        updates: usize,
    },
    /// Print the default configuration as TOML
    Defaults,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Replay { script, summary } => {
            let script = Script::load(&script)
                .with_context(|| format!("loading script {}", script.display()))?;
            let report = replay(&script, config)?;
            if summary {
                println!("{}", report.generate_text());
            } else {
                println!("{}", report.to_json()?);
            }
        }
        Command::Stress { threads, updates } => {
            let report = run_stress(config, threads, updates);
            println!("Stress Report:");
            println!("  Threads: {}", report.threads);
            println!("  Updates: {}", report.expected());
            println!("  Selected: {}", report.selected);
            println!("  Notifications: {}", report.notifications);
            println!("  Time: {}ms", report.elapsed_ms);
            println!("  Success: {}", report.success);
            if !report.success {
                std::process::exit(1);
            }
        }
        Command::Defaults => {
            print!("{}", ViewsConfig::default().to_toml_string()?);
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ViewsConfig> {
    match path {
        Some(path) => ViewsConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(ViewsConfig::default()),
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
