// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

use std::{f64::consts::PI, fmt::Write as _};

use chrono::NaiveDate;

use super::{Canvas, close_document, fixed, headline_paint, open_document, value_color};
use crate::{model::StreakStats, theme::ThemeDescriptor};

const CANVAS: Canvas = Canvas {
    width:  495,
    height: 195
};

const RING_CENTER_X: f64 = 247.5;
const RING_CENTER_Y: f64 = 80.0;
const RING_RADIUS: f64 = 35.0;

const MUTED: &str = "#88898b";
const START_PLACEHOLDER: &str = "Jan 1";
const END_PLACEHOLDER: &str = "Dec 31";

fn format_date(date: Option<NaiveDate>, placeholder: &str) -> String {
    date.map_or_else(
        || placeholder.to_owned(),
        |date| date.format("%b %-d, %Y").to_string()
    )
}

/// Share of the ring filled by the current streak, measured against the
/// longest streak and clamped to `0.0..=1.0`.
fn ring_fill(stats: &StreakStats) -> f64 {
    if stats.longest_streak == 0 {
        return 0.0;
    }
    (stats.current_streak as f64 / stats.longest_streak as f64).clamp(0.0, 1.0)
}

/// Renders the 495x195 three-column streak panel.
///
/// The left column holds the contribution total, the center a ring gauge
/// with the current streak and the right column the longest streak. Missing
/// dates render as `Jan 1` and `Dec 31`.
pub fn render_streak_card(stats: &StreakStats, theme: &ThemeDescriptor) -> String {
    let mut buffer = String::with_capacity(3072);
    let start = format_date(stats.start_date, START_PLACEHOLDER);
    let end = format_date(stats.end_date, END_PLACEHOLDER);
    let values = value_color(theme);

    open_document(&mut buffer, CANVAS, "GitHub contribution streak", theme);
    let _ = writeln!(buffer, "  <g font-family=\"{}\">", theme.font);

    for x in [165, 330] {
        let _ = writeln!(
            buffer,
            "    <line x1=\"{x}\" y1=\"30\" x2=\"{x}\" y2=\"165\" stroke=\"{}\" stroke-width=\"1\"/>",
            theme.border,
        );
    }

    let _ = writeln!(
        buffer,
        "    <g text-anchor=\"middle\" transform=\"translate(82.5 0)\">\n      <text y=\"70\" font-size=\"28\" font-weight=\"bold\" fill=\"{values}\">{total}</text>\n      <text y=\"105\" font-size=\"14\" fill=\"{text}\">Total Contributions</text>\n      <text y=\"130\" font-size=\"12\" fill=\"{MUTED}\">{start} - Present</text>\n    </g>",
        total = stats.total_contributions,
        text = theme.text,
    );

    let circumference = 2.0 * PI * RING_RADIUS;
    let offset = circumference * (1.0 - ring_fill(stats));
    let _ = writeln!(
        buffer,
        "    <circle cx=\"{cx}\" cy=\"{cy}\" r=\"{r}\" fill=\"none\" stroke=\"{text}\" stroke-opacity=\"0.1\" stroke-width=\"4\"/>\n    <circle cx=\"{cx}\" cy=\"{cy}\" r=\"{r}\" fill=\"none\" stroke=\"{streak}\" stroke-width=\"4\" stroke-linecap=\"round\" stroke-dasharray=\"{dash}\" stroke-dashoffset=\"{offset}\" transform=\"rotate(-90 {cx} {cy})\"/>",
        cx = fixed(RING_CENTER_X),
        cy = fixed(RING_CENTER_Y),
        r = fixed(RING_RADIUS),
        text = theme.text,
        streak = theme.streak,
        dash = fixed(circumference),
        offset = fixed(offset),
    );
    let _ = writeln!(
        buffer,
        "    <g text-anchor=\"middle\" transform=\"translate({cx} 0)\">\n      <text y=\"{flame_y}\" font-size=\"20\">\u{1f525}</text>\n      <text y=\"{value_y}\" font-size=\"28\" font-weight=\"bold\" {headline}>{current}</text>\n      <text y=\"130\" font-size=\"14\" font-weight=\"bold\" fill=\"{streak}\">Current Streak</text>\n      <text y=\"155\" font-size=\"12\" fill=\"{MUTED}\">{end}</text>\n    </g>",
        cx = fixed(RING_CENTER_X),
        flame_y = fixed(RING_CENTER_Y - 40.0),
        value_y = fixed(RING_CENTER_Y + 10.0),
        headline = headline_paint(theme),
        current = stats.current_streak,
        streak = theme.streak,
    );

    let _ = writeln!(
        buffer,
        "    <g text-anchor=\"middle\" transform=\"translate(412.5 0)\">\n      <text y=\"70\" font-size=\"28\" font-weight=\"bold\" fill=\"{values}\">{longest}</text>\n      <text y=\"105\" font-size=\"14\" fill=\"{text}\">Longest Streak</text>\n      <text y=\"130\" font-size=\"12\" fill=\"{MUTED}\">{start} - {end}</text>\n    </g>",
        longest = stats.longest_streak,
        text = theme.text,
    );

    buffer.push_str("  </g>\n");
    close_document(&mut buffer);
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme;

    fn stats() -> StreakStats {
        StreakStats {
            total_contributions: 10,
            current_streak:      2,
            longest_streak:      4,
            start_date:          NaiveDate::from_ymd_opt(2024, 1, 1),
            end_date:            NaiveDate::from_ymd_opt(2024, 1, 4)
        }
    }

    #[test]
    fn renders_three_columns_with_dates() {
        let svg = render_streak_card(&stats(), theme::default_theme());
        assert!(svg.contains("width=\"495\" height=\"195\""));
        assert!(svg.contains(">10</text>"));
        assert!(svg.contains("Jan 1, 2024 - Present"));
        assert!(svg.contains("Jan 1, 2024 - Jan 4, 2024"));
        assert!(svg.contains("Current Streak"));
        assert!(svg.contains("Longest Streak"));
    }

    #[test]
    fn ring_offset_reflects_current_over_longest() {
        let svg = render_streak_card(&stats(), theme::default_theme());
        assert!(svg.contains("stroke-dasharray=\"219.9\""));
        assert!(svg.contains("stroke-dashoffset=\"110.0\""));
        assert!(svg.contains("stroke=\"#ff8c00\""));
    }

    #[test]
    fn empty_stats_use_placeholder_dates_and_empty_ring() {
        let svg = render_streak_card(&StreakStats::default(), theme::default_theme());
        assert!(svg.contains("Jan 1 - Present"));
        assert!(svg.contains("Jan 1 - Dec 31"));
        assert!(svg.contains("stroke-dashoffset=\"219.9\""));
    }

    #[test]
    fn ring_fill_is_clamped() {
        let mut odd = stats();
        odd.current_streak = 9;
        assert_eq!(ring_fill(&odd), 1.0);
        assert_eq!(ring_fill(&StreakStats::default()), 0.0);
    }

    #[test]
    fn rendering_is_deterministic() {
        let first = render_streak_card(&stats(), theme::lookup("gruvbox"));
        let second = render_streak_card(&stats(), theme::lookup("gruvbox"));
        assert_eq!(first, second);
    }
}
