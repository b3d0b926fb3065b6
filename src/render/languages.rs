// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

use std::fmt::Write as _;

use super::{Canvas, close_document, escape_xml, fixed, headline_paint, open_document};
use crate::{model::LanguageUsage, theme::ThemeDescriptor};

const CANVAS: Canvas = Canvas {
    width:  480,
    height: 300
};

/// Number of languages shown on the chart.
pub const LANGUAGE_LIMIT: usize = 6;

const BAR_WIDTH: f64 = 420.0;
const FIRST_ROW_Y: usize = 75;
const ROW_STEP: usize = 40;

/// Renders the 480x300 language chart with up to six labeled bars.
///
/// Percentages are shares of every counted repository with a primary
/// language, so the visible rows may sum to less than 100. An empty usage
/// table renders a single "No languages detected" line.
pub fn render_languages_card(languages: &LanguageUsage, theme: &ThemeDescriptor) -> String {
    let mut buffer = String::with_capacity(2048);

    open_document(&mut buffer, CANVAS, "Top Languages", theme);
    let _ = writeln!(buffer, "  <g font-family=\"{}\">", theme.font);
    let _ = writeln!(
        buffer,
        "    <text x=\"25\" y=\"40\" font-size=\"18\" font-weight=\"bold\" {}>Top Languages</text>",
        headline_paint(theme),
    );

    let shares = languages.shares(LANGUAGE_LIMIT);
    if shares.is_empty() {
        let _ = writeln!(
            buffer,
            "    <text x=\"25\" y=\"{FIRST_ROW_Y}\" font-size=\"14\" fill=\"{}\" opacity=\"0.7\">No languages detected</text>",
            theme.text,
        );
    }

    for (index, (name, percent)) in shares.iter().enumerate() {
        let y = FIRST_ROW_Y + index * ROW_STEP;
        let name = escape_xml(name);
        let width = fixed(percent / 100.0 * BAR_WIDTH);
        let _ = writeln!(
            buffer,
            "    <text x=\"25\" y=\"{y}\" font-size=\"13\" fill=\"{text}\">{name}</text>\n    <text x=\"445\" y=\"{y}\" font-size=\"12\" text-anchor=\"end\" fill=\"{text}\" opacity=\"0.8\">{percent:.1}%</text>\n    <rect x=\"25\" y=\"{bar_y}\" width=\"420\" height=\"6\" rx=\"3\" fill=\"{text}\" fill-opacity=\"0.1\"/>\n    <rect x=\"25\" y=\"{bar_y}\" width=\"{width}\" height=\"6\" rx=\"3\" fill=\"{accent}\"/>",
            text = theme.text,
            accent = theme.accent,
            bar_y = y + 8,
        );
    }

    buffer.push_str("  </g>\n");
    close_document(&mut buffer);
    buffer
}
