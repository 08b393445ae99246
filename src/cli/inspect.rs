//! Inspect command: resolved view of an overlay file.

// Allow format! appended to String - more readable for building lines
#![allow(clippy::format_push_string)]

use crate::cli::common::{load_overlays, print_json, CliError, CliResult};
use crate::models::{InputOverlay, ResolvedOverlay};
use clap::Args;
use std::path::PathBuf;

/// Show overlays with all defaults applied
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Path to overlay config file
    #[arg(short, long, value_name = "FILE")]
    pub overlay: PathBuf,

    /// Only show one overlay, by name or ordinal
    #[arg(short, long, value_name = "NAME|INDEX")]
    pub layout: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self) -> CliResult<()> {
        let overlays = load_overlays(&self.overlay)?;

        match &self.layout {
            Some(selector) => {
                let (index, overlay) = overlays.find(selector).ok_or_else(|| {
                    CliError::validation(format!(
                        "No overlay named '{selector}' ({} overlays)",
                        overlays.len()
                    ))
                })?;
                let resolved = overlay.resolve();

                if self.json {
                    print_json(&resolved)?;
                } else {
                    print_overlay(index, &resolved);
                }
            }
            None => {
                if self.json {
                    let resolved: Vec<ResolvedOverlay> =
                        overlays.iter().map(|o| o.resolve()).collect();
                    print_json(&resolved)?;
                } else {
                    print_summary(&overlays);
                }
            }
        }

        Ok(())
    }
}

fn print_summary(overlays: &InputOverlay) {
    println!("Overlays: {}", overlays.len());
    for (index, overlay) in overlays.iter().enumerate() {
        println!(
            "  {index}: {:<24} {:>3} descriptors  {}",
            overlay.name.as_deref().unwrap_or("<unnamed>"),
            overlay.regions.len(),
            if overlay.is_normalized() {
                "normalized"
            } else {
                "absolute"
            }
        );
    }
}

fn print_overlay(index: usize, overlay: &ResolvedOverlay) {
    println!("Overlay {index}:");
    println!(
        "  Name:         {}",
        overlay.name.as_deref().unwrap_or("<unnamed>")
    );
    if let Some(image) = &overlay.image {
        println!("  Image:        {image}");
    }
    println!("  Image Rect:   {}", overlay.image_rect);
    println!("  Aspect Ratio: {}", overlay.aspect_ratio);
    println!("  Fullscreen:   {}", overlay.fullscreen);
    println!("  Normalized:   {}", overlay.normalized);
    println!("  Descriptors:  {}", overlay.regions.len());

    for region in &overlay.regions {
        let mut line = format!(
            "    {:>3}  {:<16} ({}, {})  {} {}x{}  alpha {} range {}",
            region.index,
            region.button,
            region.x,
            region.y,
            region.hitbox,
            region.rx,
            region.ry,
            region.alpha_mod,
            region.range_mod
        );
        if let Some(target) = &region.next_target {
            line.push_str(&format!("  -> {target}"));
        }
        if region.moveable {
            line.push_str("  [moveable]");
        }
        println!("{line}");
    }
}
