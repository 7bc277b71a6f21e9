// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! VANTA - Video ANnotation and Timed Authoring
//!
//! A cross-platform desktop application for reviewing video with timed
//! overlay drawings, chapter timestamps, focus highlights, and
//! audio/video filter settings, exported as a single JSON configuration.

mod app;
mod editor;
mod io;
mod models;
mod render;
mod ui;
mod util;

use anyhow::Result;
use app::VantaApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("VANTA - Video Annotation and Timed Authoring"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "VANTA",
        options,
        Box::new(|_cc| Ok(Box::new(VantaApp::new()))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
