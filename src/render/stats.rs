// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

use std::fmt::Write as _;

use super::{Canvas, close_document, escape_xml, headline_paint, open_document, value_color};
use crate::{model::UserStats, theme::ThemeDescriptor};

const CANVAS: Canvas = Canvas {
    width:  480,
    height: 220
};

/// Placeholder shown when the commit total is unknown.
const UNKNOWN_VALUE: &str = "??";

struct StatCell {
    icon:  &'static str,
    label: &'static str,
    value: String
}

/// Renders the 480x220 summary card: display name, subtitle and a 2x2 grid
/// of stars, commits, repositories and followers.
pub fn render_stats_card(stats: &UserStats, theme: &ThemeDescriptor) -> String {
    let mut buffer = String::with_capacity(2048);
    let display_name = escape_xml(stats.display_name());
    let label = format!("{}'s GitHub stats", stats.display_name());

    open_document(&mut buffer, CANVAS, &label, theme);
    let _ = writeln!(buffer, "  <g font-family=\"{}\">", theme.font);
    let _ = writeln!(
        buffer,
        "    <text x=\"25\" y=\"40\" font-size=\"22\" font-weight=\"bold\" {}>{display_name}</text>",
        headline_paint(theme),
    );
    let _ = writeln!(
        buffer,
        "    <text x=\"25\" y=\"65\" font-size=\"12\" fill=\"{}\" opacity=\"0.7\">GitHub Stats</text>",
        theme.text,
    );

    let cells = [
        StatCell {
            icon:  "\u{2605}",
            label: "Total Stars",
            value: stats.total_stars.to_string()
        },
        StatCell {
            icon:  "\u{25c9}",
            label: "Total Commits",
            value: stats
                .total_commits
                .map_or_else(|| UNKNOWN_VALUE.to_owned(), |commits| commits.to_string())
        },
        StatCell {
            icon:  "\u{25a4}",
            label: "Public Repos",
            value: stats.public_repos.to_string()
        },
        StatCell {
            icon:  "\u{263a}",
            label: "Followers",
            value: stats.followers.to_string()
        }
    ];

    for (index, cell) in cells.iter().enumerate() {
        let x = 25 + (index % 2) * 220;
        let y = 100 + (index / 2) * 55;
        let _ = writeln!(
            buffer,
            "    <g transform=\"translate({x} {y})\">\n      <rect width=\"200\" height=\"45\" rx=\"8\" fill=\"{accent}\" fill-opacity=\"0.1\"/>\n      <text x=\"15\" y=\"30\" font-size=\"18\" fill=\"{accent}\">{icon}</text>\n      <text x=\"45\" y=\"20\" font-size=\"11\" fill=\"{text}\" opacity=\"0.8\">{label}</text>\n      <text x=\"45\" y=\"38\" font-size=\"16\" font-weight=\"bold\" fill=\"{value_fill}\">{value}</text>\n    </g>",
            accent = theme.accent,
            icon = cell.icon,
            text = theme.text,
            label = cell.label,
            value_fill = value_color(theme),
            value = cell.value,
        );
    }

    buffer.push_str("  </g>\n");
    close_document(&mut buffer);
    buffer
}
