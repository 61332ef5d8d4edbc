//! squish CLI — simulation, validation, and inspection.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "squish")]
#[command(version, about = "squish — XPBD soft-body simulation engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation from a scene file.
    Simulate {
        /// Path to the scene file.
        scene: String,

        /// Simulation duration in seconds.
        #[arg(short, long, default_value_t = 2.0)]
        duration: f32,

        /// Sub-steps per frame.
        #[arg(short, long, default_value_t = squish_types::constants::DEFAULT_SUBSTEPS)]
        substeps: u32,

        /// Emit per-frame telemetry via tracing.
        #[arg(short, long)]
        verbose: bool,

        /// Write the final state (positions, velocities, metrics) to
        /// a TOML file.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate a tet-mesh file.
    Validate {
        /// Path to the mesh file.
        path: String,
    },

    /// Inspect a tet-mesh file: constraint and cluster statistics.
    Info {
        /// Path to the mesh file.
        path: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            scene,
            duration,
            substeps,
            verbose,
            output,
        } => commands::simulate(&scene, duration, substeps, verbose, output.as_deref()),
        Commands::Validate { path } => commands::validate(&path),
        Commands::Info { path } => commands::info(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
