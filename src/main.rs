//! `ele` command line
//!
//! Usage:
//!   ele                          # interactive editor (same as `ele shell`)
//!   ele list                     # list loaded blueprints
//!   ele build --output track.xml # turn a project file into track XML

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ele::blueprint::BlueprintLibrary;
use ele::config::EditorConfig;
use ele::shell::Shell;
use ele::track::{load_project, write_track_xml, Track};

/// Extended Liftoff Editor
#[derive(Parser)]
#[command(name = "ele")]
#[command(about = "Place blueprint instances into Liftoff tracks")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ./ele.ron, then the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Blueprint template directory
    #[arg(short, long, global = true)]
    blueprints: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive editor
    Shell,
    /// List loaded blueprints
    List,
    /// Load a project file and write the track XML
    Build {
        /// Project file to read
        #[arg(short, long)]
        project: Option<PathBuf>,

        /// Track XML to write
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut config = EditorConfig::resolve(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(dir) = cli.blueprints {
        config.blueprints_dir = dir;
    }

    let mut library = BlueprintLibrary::with_dir(&config.blueprints_dir);
    library
        .discover()
        .with_context(|| format!("Failed to read {}", config.blueprints_dir.display()))?;

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let stdin = io::stdin();
            let mut shell = Shell::new(&library, config, stdin.lock(), io::stdout());
            shell.run().context("Terminal I/O failed")?;
        }
        Commands::List => list(&library),
        Commands::Build { project, output } => {
            let project = project.unwrap_or(config.project_file);
            let output = output.unwrap_or(config.track_file);
            build(&library, config.initial_instance_id, &project, &output)?;
        }
    }

    Ok(())
}

fn list(library: &BlueprintLibrary) {
    for (name, blueprint) in library.iter() {
        match library.preview(name) {
            Some(p) => println!("{:<20} {:>4} items  {}x{}", name, blueprint.len(), p.width, p.height),
            None => println!("{:<20} {:>4} items", name, blueprint.len()),
        }
    }
}

fn build(library: &BlueprintLibrary, counter: u64, project: &Path, output: &Path) -> Result<()> {
    let mut track = Track::with_instance_counter(counter);
    load_project(&mut track, library, project)
        .with_context(|| format!("Failed to load project {}", project.display()))?;
    write_track_xml(&track, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(
        "Built {} instances, last instance id {}",
        track.len(),
        track.instance_counter()
    );
    Ok(())
}
