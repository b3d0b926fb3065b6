// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! SVG badge rendering.
//!
//! Every renderer is a pure function of its model and a
//! [`ThemeDescriptor`]. Coordinates are written with fixed precision so that
//! identical inputs always produce byte-identical documents, and every piece
//! of user-controlled text passes through [`escape_xml`].

mod error;
mod languages;
mod stats;
mod streak;
mod trophies;

use std::{borrow::Cow, fmt::Write as _};

pub use error::render_error_card;
pub use languages::render_languages_card;
pub use stats::render_stats_card;
pub use streak::render_streak_card;
pub use trophies::render_trophies_card;

use crate::theme::{ThemeDescriptor, ThemeStyle};

/// Fixed canvas of a badge in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width:  u32,
    pub height: u32
}

/// Writes the XML prologue, shared definitions and the themed background.
///
/// The background uses a diagonal gradient between the two theme colors;
/// `glass` themes render it semi-transparent and `neon` themes register the
/// `glow` filter used by [`headline_paint`].
fn open_document(buffer: &mut String, canvas: Canvas, label: &str, theme: &ThemeDescriptor) {
    let Canvas {
        width,
        height
    } = canvas;
    let escaped_label = escape_xml(label);

    let _ = writeln!(
        buffer,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\" role=\"img\" aria-label=\"{escaped_label}\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    );
    let _ = writeln!(buffer, "  <title>{escaped_label}</title>");
    let _ = writeln!(
        buffer,
        "  <defs>\n    <linearGradient id=\"bg-gradient\" x1=\"0%\" y1=\"0%\" x2=\"100%\" y2=\"100%\">\n      <stop offset=\"0%\" stop-color=\"{}\"/>\n      <stop offset=\"100%\" stop-color=\"{}\"/>\n    </linearGradient>",
        theme.background[0], theme.background[1],
    );
    if theme.style == ThemeStyle::Neon {
        buffer.push_str(
            "    <filter id=\"glow\">\n      <feGaussianBlur in=\"SourceGraphic\" stdDeviation=\"2\"/>\n    </filter>\n"
        );
    }
    buffer.push_str("  </defs>\n");

    let opacity = if theme.style == ThemeStyle::Glass {
        " fill-opacity=\"0.6\""
    } else {
        ""
    };
    let _ = writeln!(
        buffer,
        "  <rect x=\"0.5\" y=\"0.5\" width=\"{}\" height=\"{}\" rx=\"15\" ry=\"15\" fill=\"url(#bg-gradient)\"{opacity} stroke=\"{}\" stroke-width=\"1\"/>",
        width - 1,
        height - 1,
        theme.border,
    );
}

fn close_document(buffer: &mut String) {
    buffer.push_str("</svg>\n");
}

/// Paint attributes for headline text.
///
/// Neon themes recolor headlines to the accent color and apply the glow
/// filter; every other style uses the plain text color.
fn headline_paint(theme: &ThemeDescriptor) -> String {
    match theme.style {
        ThemeStyle::Neon => format!("fill=\"{}\" filter=\"url(#glow)\"", theme.accent),
        ThemeStyle::Clean | ThemeStyle::Glass | ThemeStyle::Tech => {
            format!("fill=\"{}\"", theme.text)
        }
    }
}

/// Color used for emphasized values.
fn value_color(theme: &ThemeDescriptor) -> &'static str {
    if theme.style == ThemeStyle::Neon {
        theme.accent
    } else {
        theme.text
    }
}

/// Formats a coordinate or percentage with one decimal place.
fn fixed(value: f64) -> String {
    format!("{value:.1}")
}

/// Escapes the five XML special characters, borrowing when none occur.
pub fn escape_xml(value: &str) -> Cow<'_, str> {
    if value
        .chars()
        .any(|character| matches!(character, '&' | '<' | '>' | '\"' | '\''))
    {
        let mut escaped = String::with_capacity(value.len());
        for character in value.chars() {
            match character {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '\"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&apos;"),
                other => escaped.push(other)
            }
        }
        Cow::Owned(escaped)
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme;

    #[test]
    fn escape_xml_handles_all_special_characters() {
        let input = "&<>\"'normal";
        let result = escape_xml(input);
        assert_eq!(result, "&amp;&lt;&gt;&quot;&apos;normal");
    }

    #[test]
    fn escape_xml_returns_borrowed_when_no_escaping_needed() {
        let input = "no special characters";
        match escape_xml(input) {
            Cow::Borrowed(s) => assert_eq!(s, input),
            Cow::Owned(_) => panic!("expected borrowed variant")
        }
    }

    #[test]
    fn glass_background_is_translucent() {
        let mut buffer = String::new();
        let canvas = Canvas {
            width:  100,
            height: 50
        };
        open_document(&mut buffer, canvas, "label", theme::lookup("glass"));
        assert!(buffer.contains("fill-opacity=\"0.6\""));

        let mut flat = String::new();
        open_document(&mut flat, canvas, "label", theme::lookup("dracula"));
        assert!(!flat.contains("fill-opacity=\"0.6\""));
    }

    #[test]
    fn neon_registers_glow_filter_and_recolors_headlines() {
        let neon = theme::lookup("neon");
        let mut buffer = String::new();
        open_document(
            &mut buffer,
            Canvas {
                width:  100,
                height: 50
            },
            "label",
            neon
        );
        assert!(buffer.contains("<filter id=\"glow\">"));
        assert_eq!(headline_paint(neon), "fill=\"#00ffff\" filter=\"url(#glow)\"");
        assert_eq!(headline_paint(theme::default_theme()), "fill=\"#c9d1d9\"");
    }

    #[test]
    fn fixed_uses_one_decimal() {
        assert_eq!(fixed(33.333_333), "33.3");
        assert_eq!(fixed(100.0), "100.0");
    }
}
