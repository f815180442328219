use anyhow::Context;
use clap::{Parser, Subcommand};
use dragcut::{compile, init_logging, next_output_path, write_program, CompileOptions, CurveFile};
use dragcut_core::shared;
use dragcut_settings::JobConfig;
use dragcut_toolpath::MotionHistory;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "dragcut")]
#[command(about = "Compile vector artwork into drag-knife G-code")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a curve file into a G-code program
    Compile {
        /// Curve file (JSON, curves grouped by role)
        input: PathBuf,

        /// Job configuration (TOML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file, defaults to the next free <stem>_<n>.gcode beside the input
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep curves in file order
        #[arg(long)]
        no_sequence: bool,

        /// Record the motion history and log a summary
        #[arg(long)]
        history: bool,
    },

    /// Write the default job configuration
    InitConfig {
        /// Destination, defaults to the user configuration directory
        path: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    info!("dragcut {} ({})", dragcut::VERSION, dragcut::BUILD_DATE);

    let cli = Cli::parse();
    match cli.command {
        Commands::Compile {
            input,
            config,
            output,
            no_sequence,
            history,
        } => run_compile(&input, config.as_deref(), output, no_sequence, history),
        Commands::InitConfig { path } => {
            let path = path
                .or_else(JobConfig::default_path)
                .context("No configuration directory available, pass a path")?;
            JobConfig::default().save_to_file(&path)?;
            info!("Wrote default configuration to {}", path.display());
            Ok(())
        }
    }
}

fn run_compile(
    input: &Path,
    config: Option<&Path>,
    output: Option<PathBuf>,
    no_sequence: bool,
    history: bool,
) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let curves = CurveFile::load(input)?;
    info!(
        "Loaded {} curves in {} roles from {}",
        curves.curve_count(),
        curves.roles.len(),
        input.display()
    );

    let recorder = history.then(|| shared(MotionHistory::new()));
    let program = compile(
        curves,
        &config,
        CompileOptions {
            no_sequence,
            stamp: true,
            history: recorder.clone(),
        },
    )?;

    if let Some(recorder) = recorder {
        let history = recorder.borrow();
        info!(
            "History: {} moves, {} rotations, travel {:.1} mm",
            history.len(),
            history.orientation.len(),
            history.travel_length()
        );
        for tool in history.cuts.keys() {
            info!("  T{}: cut {:.1} mm", tool, history.cut_length(*tool));
        }
    }

    let path = output.unwrap_or_else(|| next_output_path(input));
    write_program(&path, &program)
}

fn load_config(path: Option<&Path>) -> anyhow::Result<JobConfig> {
    if let Some(path) = path {
        return JobConfig::load_from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()));
    }
    match JobConfig::default_path().filter(|p| p.exists()) {
        Some(path) => {
            info!("Using configuration {}", path.display());
            JobConfig::load_from_file(&path)
                .with_context(|| format!("Failed to load {}", path.display()))
        }
        None => Ok(JobConfig::default()),
    }
}
