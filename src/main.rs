// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use recorder_settings::config::default_settings_path;
use recorder_settings::service::drain_intents;
use recorder_settings::{RecorderServiceHandle, SettingsStore, terminal};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "recorder-settings")]
#[command(about = "Settings dialogs for the screen recorder")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Settings file (default: ~/.config/recorder-settings/settings.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current settings
    Show,

    /// List available resolutions
    Resolutions,

    /// Set the audio source
    SetAudio {
        /// 'mic' or 'mute'
        source: String,
    },

    /// Set the recording resolution
    SetResolution {
        /// Catalog index (from 'resolutions') or label such as "720p"
        resolution: String,
    },

    /// Restore default settings
    Reset,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=recorder_settings=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let store = SettingsStore::initialize(cli.config.or_else(default_settings_path))?;

    match cli.command {
        Some(Commands::Show) => cli::show_settings(&store),
        Some(Commands::Resolutions) => cli::list_resolutions(&store),
        Some(Commands::SetAudio { source }) => cli::set_audio(&store, &source),
        Some(Commands::SetResolution { resolution }) => cli::set_resolution(&store, &resolution),
        Some(Commands::Reset) => cli::reset(&store),
        None => run_dialog(store),
    }
}

fn run_dialog(store: SettingsStore) -> Result<(), Box<dyn std::error::Error>> {
    let (service, mut intents) = RecorderServiceHandle::channel();

    terminal::run(store, service)?;

    // The recorder service runs in-process here; hand it what the session sent.
    drain_intents(&mut intents);
    Ok(())
}
