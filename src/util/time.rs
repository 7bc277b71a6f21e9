// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Clock string parsing and formatting.
//!
//! Timestamps travel through the config file as `MM:SS` or `HH:MM:SS`
//! strings; everything internal works in seconds.

use anyhow::{bail, Result};

/// Parse a `MM:SS` or `HH:MM:SS` clock string into seconds.
pub fn parse_clock(text: &str) -> Result<f64> {
    let parts: Vec<&str> = text.split(':').collect();
    let numbers: Result<Vec<u32>, _> = parts.iter().map(|p| p.trim().parse::<u32>()).collect();
    let numbers = match numbers {
        Ok(n) => n,
        Err(_) => bail!("invalid clock string: {text:?}"),
    };

    match numbers.as_slice() {
        [h, m, s] => Ok((h * 3600 + m * 60 + s) as f64),
        [m, s] => Ok((m * 60 + s) as f64),
        _ => bail!("invalid clock string: {text:?}"),
    }
}

/// Format seconds as `MM:SS`, minutes unbounded.
pub fn format_mmss(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Format seconds as `HH:MM:SS`.
pub fn format_hms(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}
