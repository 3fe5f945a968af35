// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for headless settings changes
//!
//! This module provides command-line functionality for:
//! - Showing the current settings
//! - Listing the resolution catalog
//! - Changing audio source and resolution
//! - Resetting to defaults

use recorder_settings::{AudioSource, Resolution, Settings, SettingsStore};

/// Print the current settings
pub fn show_settings(store: &SettingsStore) -> Result<(), Box<dyn std::error::Error>> {
    print!("{}", format_settings(&store.snapshot()));
    if let Some(path) = store.path() {
        println!("  File:       {}", path.display());
    }
    Ok(())
}

/// List the resolution catalog
pub fn list_resolutions(store: &SettingsStore) -> Result<(), Box<dyn std::error::Error>> {
    println!("Available resolutions:");
    println!();
    print!("{}", format_resolutions(&store.snapshot()));
    Ok(())
}

/// Set the audio source from a command-line value
pub fn set_audio(store: &SettingsStore, value: &str) -> Result<(), Box<dyn std::error::Error>> {
    let audio_source = AudioSource::from_arg(value)
        .ok_or_else(|| format!("Unknown audio source '{}' (expected 'mic' or 'mute')", value))?;

    store.set_audio_source(audio_source)?;
    println!("Audio: {}", audio_source);
    Ok(())
}

/// Set the resolution by catalog index or label
pub fn set_resolution(
    store: &SettingsStore,
    value: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = store.resolutions();
    let index = find_resolution(&catalog, value).ok_or_else(|| {
        format!(
            "Unknown resolution '{}' (run 'resolutions' to list the catalog)",
            value
        )
    })?;

    let resolution = store.set_resolution_index(index)?;
    println!("Resolution: {}", resolution.picker_label());
    Ok(())
}

/// Restore default settings
pub fn reset(store: &SettingsStore) -> Result<(), Box<dyn std::error::Error>> {
    store.reset()?;
    println!("Settings reset to defaults.");
    Ok(())
}

fn format_settings(settings: &Settings) -> String {
    let resolution = settings.effective_resolution();
    let (long, short) = resolution.landscape_dimensions();
    let origin = if settings.resolution().is_some() {
        ""
    } else {
        " (default)"
    };

    format!(
        "  Audio:      {}\n  Resolution: {} ({}x{}){}\n  Frame rate: {} fps\n",
        settings.audio_source(),
        resolution.label,
        long,
        short,
        origin,
        settings.frame_rate()
    )
}

fn format_resolutions(settings: &Settings) -> String {
    let current = settings.effective_resolution();
    let default = settings.default_resolution();

    settings
        .resolutions()
        .iter()
        .enumerate()
        .map(|(index, r)| {
            let mut line = format!("  [{}] {}", index, r.picker_label());
            if r == current {
                line.push_str(" *");
            }
            if r == default {
                line.push_str(" (default)");
            }
            line.push('\n');
            line
        })
        .collect()
}

/// Find a catalog entry by index ("1") or label ("720p", case-insensitive)
fn find_resolution(catalog: &[Resolution], value: &str) -> Option<usize> {
    let value = value.trim();
    if let Ok(index) = value.parse::<usize>() {
        return (index < catalog.len()).then_some(index);
    }
    catalog
        .iter()
        .position(|r| r.label.eq_ignore_ascii_case(value))
}
