use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::{Write, stdin, stdout};
use std::path::{Path, PathBuf};
use treefm::config::AppConfig;
use treefm::context::AppContext;
use treefm::core::{ConfirmDelete, DeleteOutcome, EntryOps, TransferOrchestrator};
use treefm::logging::{self, LogConfig};

#[derive(Parser)]
#[command(name = "treefm")]
#[command(about = "File tree panel: registered roots and file management", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    overrides: ConfigArgs,
}

#[derive(Args, Serialize)]
struct ConfigArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long, global = true)]
    verbose: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long, global = true)]
    json_logs: Option<bool>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered roots
    Roots,
    /// Register a folder as a browsing root
    Add { path: PathBuf },
    /// Remove a folder from the registered roots
    Unlink { path: PathBuf },
    /// List the children of a directory
    Ls { path: PathBuf },
    /// Copy an entry into a directory
    Copy {
        source: PathBuf,
        target_dir: PathBuf,
    },
    /// Move an entry into a directory
    Move {
        source: PathBuf,
        target_dir: PathBuf,
    },
    /// Create an empty file in a directory
    NewFile { dir: PathBuf, name: String },
    /// Create a folder in a directory
    NewDir { dir: PathBuf, name: String },
    /// Rename an entry in place
    Rename { path: PathBuf, new_name: String },
    /// Delete an entry (asks first unless --yes)
    Rm {
        path: PathBuf,
        #[arg(long)]
        yes: bool,
    },
    /// Show an entry in the OS file manager
    Reveal { path: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::new(Some(&cli.overrides))?;
    logging::init(LogConfig {
        json: config.json_logs,
        verbose: config.verbose,
    });

    let ctx = AppContext::new(config);

    match cli.command {
        Commands::Roots => {
            for root in ctx.list_roots().await? {
                println!("{}", root.display());
            }
        }
        Commands::Add { path } => {
            ctx.registry.add(&absolute(&path)?).await?;
        }
        Commands::Unlink { path } => {
            ctx.registry.remove(&absolute(&path)?).await?;
        }
        Commands::Ls { path } => {
            for child in ctx.list_children(&absolute(&path)?).await? {
                let marker = if child.is_dir { "d" } else { "-" };
                println!("{marker} {}", child.path.display());
            }
        }
        Commands::Copy { source, target_dir } => {
            let mut orchestrator = TransferOrchestrator::new(ctx.refresh.clone());
            orchestrator.mark_for_copy(&absolute(&source)?);
            if let Some(dest) = orchestrator.paste_into(&absolute(&target_dir)?).await? {
                println!("{}", dest.display());
            }
        }
        Commands::Move { source, target_dir } => {
            let mut orchestrator = TransferOrchestrator::new(ctx.refresh.clone());
            orchestrator.mark_for_cut(&absolute(&source)?);
            if let Some(dest) = orchestrator.paste_into(&absolute(&target_dir)?).await? {
                println!("{}", dest.display());
            }
        }
        Commands::NewFile { dir, name } => {
            let ops = EntryOps::new(ctx.refresh.clone());
            let created = ops.create_file(&absolute(&dir)?, &name).await?;
            println!("{}", created.display());
        }
        Commands::NewDir { dir, name } => {
            let ops = EntryOps::new(ctx.refresh.clone());
            let created = ops.create_dir(&absolute(&dir)?, &name).await?;
            println!("{}", created.display());
        }
        Commands::Rename { path, new_name } => {
            let ops = EntryOps::new(ctx.refresh.clone());
            let renamed = ops.rename(&absolute(&path)?, &new_name).await?;
            println!("{}", renamed.display());
        }
        Commands::Rm { path, yes } => {
            let ops = EntryOps::new(ctx.refresh.clone());
            let path = absolute(&path)?;
            let outcome = if yes {
                ops.delete(&path, &AlwaysConfirm).await?
            } else {
                ops.delete(&path, &PromptConfirm).await?
            };
            if outcome == DeleteOutcome::Declined {
                println!("Not deleted.");
            }
        }
        Commands::Reveal { path } => {
            let path = absolute(&path)?;
            // Folders open themselves; files open their containing folder.
            let target = if tokio::fs::metadata(&path).await.map(|m| m.is_dir()).unwrap_or(false) {
                path
            } else {
                path.parent().map(Path::to_path_buf).unwrap_or(path)
            };
            open_in_file_manager(&target)?;
        }
    }

    Ok(())
}

#[cfg(target_os = "macos")]
const FILE_MANAGER_CMD: &str = "open";
#[cfg(windows)]
const FILE_MANAGER_CMD: &str = "explorer";
#[cfg(all(unix, not(target_os = "macos")))]
const FILE_MANAGER_CMD: &str = "xdg-open";

fn open_in_file_manager(dir: &Path) -> Result<()> {
    std::process::Command::new(FILE_MANAGER_CMD)
        .arg(dir)
        .spawn()
        .with_context(|| format!("Failed to open {} in the file manager", dir.display()))?;
    Ok(())
}

/// The core works on absolute paths only; resolve CLI input up front.
fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path)
        .with_context(|| format!("Failed to resolve path {}", path.display()))
}

/// Approves every delete; backs `--yes`.
struct AlwaysConfirm;

#[async_trait]
impl ConfirmDelete for AlwaysConfirm {
    async fn confirm(&self, _path: &Path) -> bool {
        true
    }
}

/// Asks on stdin before approving a delete.
struct PromptConfirm;

#[async_trait]
impl ConfirmDelete for PromptConfirm {
    async fn confirm(&self, path: &Path) -> bool {
        print!("Delete {}? [y/N] ", path.display());
        if stdout().flush().is_err() {
            return false;
        }
        let mut input = String::new();
        if stdin().read_line(&mut input).is_err() {
            return false;
        }
        input.trim().eq_ignore_ascii_case("y")
    }
}
