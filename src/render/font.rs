// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! System font lookup for text rasterization.
//!
//! Text shapes render with whatever sans-serif face the system offers.
//! Lookup happens once; a machine with no usable font degrades text
//! rendering (see `crate::render`) instead of failing.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::{Font, Scale};
use std::{fs, sync::OnceLock};

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        db
    })
}

/// The face used for all text shapes, resolved once per process.
pub fn default_font() -> Option<&'static Font<'static>> {
    static FONT: OnceLock<Option<Font<'static>>> = OnceLock::new();
    FONT
        .get_or_init(|| {
            let font = load_sans_serif();
            if font.is_none() {
                log::warn!("No usable system font found; text shapes will render as outlines");
            }
            font
        })
        .as_ref()
}

fn load_sans_serif() -> Option<Font<'static>> {
    let families = [Family::SansSerif, Family::Serif, Family::Monospace];
    let query = Query {
        families: &families,
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    let id = db().query(&query)?;
    let face = db().face(id)?;

    match &face.source {
        fontdb::Source::File(path) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::SharedFile(path, _) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::Binary(bytes) => Font::try_from_vec(bytes.as_ref().as_ref().to_vec()),
    }
}

/// Measure a single-line text run at `size` px. Falls back to a width
/// heuristic when no font is available, so layout stays deterministic.
pub fn measure_text(text: &str, size: f32) -> (f32, f32) {
    match default_font() {
        Some(font) => {
            let scale = Scale::uniform(size);
            let width: f32 = font
                .glyphs_for(text.chars())
                .map(|glyph| glyph.scaled(scale).h_metrics().advance_width)
                .sum();
            (width, size)
        }
        None => (0.6 * size * text.chars().count() as f32, size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_is_monotonic_in_length() {
        let (short, _) = measure_text("hi", 16.0);
        let (long, _) = measure_text("hi there", 16.0);
        assert!(long > short);
    }

    #[test]
    fn test_measure_height_is_font_size() {
        let (_, h) = measure_text("anything", 24.0);
        assert_eq!(h, 24.0);
    }

    #[test]
    fn test_measure_empty_is_zero_width() {
        let (w, _) = measure_text("", 16.0);
        assert_eq!(w, 0.0);
    }
}
