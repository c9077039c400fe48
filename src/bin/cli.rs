//! vbxlink CLI Binary
//!
//! Creates, inspects, and edits device configuration images offline.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use vbxlink::settings::{DeviceConfig, RecordingPlan, Schedule};
use vbxlink::VbxError;

/// vbxlink configuration tool
#[derive(Parser, Debug)]
#[command(name = "vbxlink-cli")]
#[command(about = "Inspect and edit VBX recorder configuration images")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a config image with default settings
    Init {
        /// Path of the image to create
        path: PathBuf,
    },

    /// Print the settings stored in a config image
    Dump {
        /// Path of the image to read
        path: PathBuf,

        /// Print as JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Update hotspot settings in a config image
    SetHotspot {
        /// Path of the image to edit
        path: PathBuf,

        #[arg(long)]
        ssid: Option<String>,

        #[arg(long)]
        password: Option<String>,

        #[arg(long)]
        enabled: Option<bool>,
    },

    /// Set the single-file recording duration (seconds)
    SetDuration {
        /// Path of the image to edit
        path: PathBuf,

        seconds: u32,
    },

    /// Append a recording window to the schedule
    AddPlan {
        /// Path of the image to edit
        path: PathBuf,

        /// Unix timestamp at which recording starts
        start: i64,

        /// Recording duration in seconds
        duration: u32,
    },

    /// Remove all schedule entries
    ClearSchedule {
        /// Path of the image to edit
        path: PathBuf,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vbxlink=debug"));

    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();

    if let Err(e) = run(args.command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(command: Command) -> vbxlink::Result<()> {
    match command {
        Command::Init { path } => {
            let config = DeviceConfig::default();
            config.save(&path)?;
            tracing::info!("Default config image written to {}", path.display());
        }

        Command::Dump { path, json } => {
            let config = DeviceConfig::load(&path)?;

            if json {
                let rendered = serde_json::to_string_pretty(&config)
                    .map_err(|e| VbxError::Serialization(e.to_string()))?;
                println!("{}", rendered);
            } else {
                dump(&config);
            }
        }

        Command::SetHotspot {
            path,
            ssid,
            password,
            enabled,
        } => {
            edit(&path, |config| {
                if let Some(ssid) = ssid {
                    config.hotspot.ssid = ssid;
                }
                if let Some(password) = password {
                    config.hotspot.password = password;
                }
                if let Some(enabled) = enabled {
                    config.hotspot.enabled = enabled;
                }
                Ok(())
            })?;
        }

        Command::SetDuration { path, seconds } => {
            edit(&path, |config| {
                config.recording.single_file_duration = seconds;
                Ok(())
            })?;
        }

        Command::AddPlan {
            path,
            start,
            duration,
        } => {
            edit(&path, |config| {
                let mut entries = config.recording.schedule.entries().to_vec();
                entries.push(RecordingPlan {
                    start_timestamp: start,
                    duration,
                });

                config.recording.schedule = Schedule::new(entries)?;
                Ok(())
            })?;
        }

        Command::ClearSchedule { path } => {
            edit(&path, |config| {
                config.recording.schedule = Schedule::empty();
                Ok(())
            })?;
        }
    }

    Ok(())
}

/// Load an image, apply a change, and write it back
fn edit<F>(path: &Path, apply: F) -> vbxlink::Result<()>
where
    F: FnOnce(&mut DeviceConfig) -> vbxlink::Result<()>,
{
    let mut config = DeviceConfig::load(path)?;
    apply(&mut config)?;
    config.save(path)?;

    tracing::info!("Config image updated at {}", path.display());

    Ok(())
}

fn dump(config: &DeviceConfig) {
    println!("Device Configuration:");
    println!("  Hotspot Enabled: {}", if config.hotspot.enabled { "Yes" } else { "No" });
    println!("  Hotspot SSID: {}", config.hotspot.ssid);
    println!("  Hotspot Password: {}", config.hotspot.password);
    println!("  Recording Base Name: {}", config.recording.base_name);
    println!(
        "  Recording Single File Duration: {}",
        config.recording.single_file_duration
    );
    println!("  Recording Schedule:");

    for (i, plan) in config.recording.schedule.entries().iter().enumerate() {
        println!(
            "    [{}] Start Timestamp: {}, Duration: {}",
            i, plan.start_timestamp, plan.duration
        );
    }
}
