use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber;
use std::fs;
use std::path::{Path, PathBuf};

mod domain;
mod application;
mod infrastructure;
mod checks;

use application::render::ReportRenderer;
use application::services::{LintOptions, LintService, ScaffoldService};
use domain::entities::{Verdict, Version};
use domain::traits::KnownRepositories;
use infrastructure::config::LintConfig;
use infrastructure::index::{IndexDb, RemoteIndex};

const EXIT_OK: i32 = 0;
const EXIT_FAIL: i32 = 1;
const EXIT_ERROR: i32 = 2;

#[derive(Parser)]
#[command(name = "pumpkin-lint")]
#[command(about = "Conformance linter for pumpkin.py plugin repositories", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a plugin repository for conformance
    Check {
        /// Repository root to check
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Report format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,

        /// Skip the remote half of the name collision check
        #[arg(long)]
        offline: bool,
    },
    /// Scaffold a new plugin repository
    Init {
        /// Repository name
        name: String,

        /// Starter module name
        #[arg(short, long, default_value = "example")]
        module: String,

        /// Parent directory for the new repository
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
    /// Manage the known repositories index
    Index {
        #[command(subcommand)]
        command: IndexCommands,
    },
    /// Show version
    Version,
}

#[derive(Subcommand)]
enum IndexCommands {
    /// Register a repository name and version
    Add { name: String, version: String },
    /// Remove a repository from the index
    Remove { name: String },
    /// List all registered repositories
    List,
    /// Merge entries from a remote JSON index
    Pull { url: String },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    // Initialize logging; reports go to stdout, logs to stderr
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Check {
            path,
            config,
            format,
            output,
            strict,
            offline,
        } => run_check(
            &path,
            config.as_deref(),
            format,
            output.as_deref(),
            strict,
            offline,
        ),
        Commands::Init { name, module, dir } => run_init(&name, &module, &dir),
        Commands::Index { command } => run_index(command),
        Commands::Version => {
            println!("pumpkin-lint v{}", env!("CARGO_PKG_VERSION"));
            EXIT_OK
        }
    };

    std::process::exit(code);
}

fn run_check(
    path: &Path,
    config_path: Option<&Path>,
    format: OutputFormat,
    output: Option<&Path>,
    strict: bool,
    offline: bool,
) -> i32 {
    let config = match LintConfig::resolve(config_path, path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load config: {}", e);
            return EXIT_ERROR;
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            return EXIT_ERROR;
        }
    };

    let service = LintService::new(config);
    let options = LintOptions { strict, offline };
    let report = match rt.block_on(service.lint(path, &options)) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Lint run failed: {}", e);
            return EXIT_ERROR;
        }
    };

    let rendered = match format {
        OutputFormat::Text => ReportRenderer::render_text(&report),
        OutputFormat::Json => match ReportRenderer::render_json(&report) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to render report: {}", e);
                return EXIT_ERROR;
            }
        },
    };

    match output {
        Some(file) => {
            if let Err(e) = fs::write(file, &rendered) {
                tracing::error!("Failed to write report to {}: {}", file.display(), e);
                return EXIT_ERROR;
            }
        }
        None => print!("{}", rendered),
    }

    match report.verdict {
        Verdict::Pass => EXIT_OK,
        Verdict::Fail => EXIT_FAIL,
    }
}

fn run_init(name: &str, module: &str, dir: &Path) -> i32 {
    match ScaffoldService::new().init(name, module, dir) {
        Ok(target) => {
            println!("Created new plugin repository at {}", target.display());
            EXIT_OK
        }
        Err(e) => {
            tracing::error!("Scaffolding failed: {}", e);
            EXIT_ERROR
        }
    }
}

fn run_index(command: IndexCommands) -> i32 {
    let config = match LintConfig::resolve(None, Path::new(".")) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load config: {}", e);
            return EXIT_ERROR;
        }
    };

    let db = match IndexDb::new(&config.index.path) {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(
                "Failed to open index at {}: {}",
                config.index.path.display(),
                e
            );
            return EXIT_ERROR;
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            return EXIT_ERROR;
        }
    };

    rt.block_on(async {
        match command {
            IndexCommands::Add { name, version } => {
                if version.parse::<Version>().is_err() {
                    tracing::error!("{} is not a valid semantic version", version);
                    return EXIT_ERROR;
                }
                match db.register(&name, &version).await {
                    Ok(()) => {
                        println!("Registered {} {}", name, version);
                        EXIT_OK
                    }
                    Err(e) => {
                        tracing::error!("Failed to register {}: {}", name, e);
                        EXIT_ERROR
                    }
                }
            }
            IndexCommands::Remove { name } => match db.remove(&name).await {
                Ok(()) => {
                    println!("Removed {}", name);
                    EXIT_OK
                }
                Err(e) => {
                    tracing::error!("Failed to remove {}: {}", name, e);
                    EXIT_ERROR
                }
            },
            IndexCommands::List => match db.all().await {
                Ok(repos) => {
                    if repos.is_empty() {
                        println!("Index is empty");
                    }
                    for repo in repos {
                        match repo.registered_at {
                            Some(at) => println!("{}  {}  ({})", repo.name, repo.version, at),
                            None => println!("{}  {}", repo.name, repo.version),
                        }
                    }
                    EXIT_OK
                }
                Err(e) => {
                    tracing::error!("Failed to list index: {}", e);
                    EXIT_ERROR
                }
            },
            IndexCommands::Pull { url } => {
                let entries = match RemoteIndex::new(&url).fetch().await {
                    Ok(entries) => entries,
                    Err(e) => {
                        tracing::error!("Failed to fetch remote index: {}", e);
                        return EXIT_ERROR;
                    }
                };
                let total = entries.len();
                match db.merge(entries).await {
                    Ok(added) => {
                        println!("Merged {} of {} entries from {}", added, total, url);
                        EXIT_OK
                    }
                    Err(e) => {
                        tracing::error!("Failed to merge remote index: {}", e);
                        EXIT_ERROR
                    }
                }
            }
        }
    })
}
