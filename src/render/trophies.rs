// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

use std::fmt::Write as _;

use super::{Canvas, close_document, escape_xml, fixed, open_document};
use crate::{
    achievement::{Achievement, Rank},
    theme::ThemeDescriptor
};

pub const COLUMNS: usize = 6;
const CANVAS_WIDTH: u32 = 800;
const ROW_HEIGHT: u32 = 150;
const CARD_WIDTH: f64 = CANVAS_WIDTH as f64 / COLUMNS as f64;
const CARD_HEIGHT: f64 = 140.0;
const CARD_MARGIN: f64 = 5.0;
const PROGRESS_WIDTH: f64 = 95.0;
/// Horizontal room kept free on both sides of centered card text.
const TEXT_PADDING: f64 = 6.0;
/// Average advance of a glyph in the card fonts, in em.
const GLYPH_WIDTH_EM: f64 = 0.55;

/// Widest line of text a card can hold.
fn text_budget() -> f64 {
    CARD_WIDTH - 2.0 * (CARD_MARGIN + TEXT_PADDING)
}

/// Estimated rendered width of `text` at `font_size` pixels.
fn estimated_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * GLYPH_WIDTH_EM * font_size
}

/// Extra attributes that squeeze `text` into the card when it would
/// otherwise spill into the neighbouring column.
fn fit_to_card(text: &str, font_size: f64) -> String {
    if estimated_width(text, font_size) <= text_budget() {
        return String::new();
    }
    format!(
        " textLength=\"{}\" lengthAdjust=\"spacingAndGlyphs\"",
        fixed(text_budget())
    )
}

/// Trophy color for a rank family.
fn rank_color(rank: Rank) -> &'static str {
    match rank {
        Rank::Sss | Rank::Ss | Rank::S => "#ffd700",
        Rank::A | Rank::B => "#c0c0c0",
        Rank::C => "#cd7f32",
        Rank::NotAchieved | Rank::Unknown => "#6e7681"
    }
}

/// Height of the trophy grid for `count` cards.
pub fn grid_canvas(count: usize) -> Canvas {
    let rows = count.div_ceil(COLUMNS).max(1);
    Canvas {
        width:  CANVAS_WIDTH,
        height: ROW_HEIGHT * rows as u32
    }
}

/// Renders achievements as a grid of six columns, one 150px row per six
/// cards.
///
/// Achieved ranks draw a progress bar toward the next tier. Unknown ranks
/// are dimmed; not-achieved ranks draw a neutral trophy with `?`.
pub fn render_trophies_card(achievements: &[Achievement], theme: &ThemeDescriptor) -> String {
    let mut buffer = String::with_capacity(1024 + achievements.len() * 1024);

    open_document(
        &mut buffer,
        grid_canvas(achievements.len()),
        "GitHub trophies",
        theme
    );
    let _ = writeln!(buffer, "  <g font-family=\"{}\" text-anchor=\"middle\">", theme.font);

    for (index, achievement) in achievements.iter().enumerate() {
        let column = index % COLUMNS;
        let row = index / COLUMNS;
        let x = column as f64 * CARD_WIDTH;
        let y = row as f64 * f64::from(ROW_HEIGHT);
        write_card(&mut buffer, achievement, x, y, theme);
    }

    buffer.push_str("  </g>\n");
    close_document(&mut buffer);
    buffer
}

fn write_card(buffer: &mut String, achievement: &Achievement, x: f64, y: f64, theme: &ThemeDescriptor) {
    let color = rank_color(achievement.rank);
    let inner_width = CARD_WIDTH - 2.0 * CARD_MARGIN;
    let center = CARD_WIDTH / 2.0;
    let dimmed = if achievement.rank == Rank::Unknown {
        " opacity=\"0.4\""
    } else {
        ""
    };

    let _ = writeln!(
        buffer,
        "    <g transform=\"translate({x} {y})\"{dimmed}>\n      <rect x=\"{margin}\" y=\"{margin}\" width=\"{inner_width}\" height=\"{height}\" rx=\"8\" fill=\"{accent}\" fill-opacity=\"0.05\" stroke=\"{border}\"/>\n      <text x=\"{center}\" y=\"22\" font-size=\"12\" font-weight=\"bold\" fill=\"{text}\"{name_fit}>{name}</text>\n      <path transform=\"translate({cup_x} 32)\" d=\"M4 0h16v6a8 8 0 0 1-16 0z M10 14h4v6h-4z M6 20h12v3H6z\" fill=\"{color}\"/>\n      <text x=\"{center}\" y=\"82\" font-size=\"18\" font-weight=\"bold\" fill=\"{color}\">{rank}</text>\n      <text x=\"{center}\" y=\"100\" font-size=\"10\" fill=\"{text}\"{subtitle_fit}>{subtitle}</text>\n      <text x=\"{center}\" y=\"114\" font-size=\"9\" fill=\"{text}\" opacity=\"0.7\"{description_fit}>{description}</text>",
        x = fixed(x),
        y = fixed(y),
        margin = fixed(CARD_MARGIN),
        inner_width = fixed(inner_width),
        height = fixed(CARD_HEIGHT),
        accent = theme.accent,
        border = theme.border,
        center = fixed(center),
        text = theme.text,
        name = escape_xml(achievement.name),
        name_fit = fit_to_card(achievement.name, 12.0),
        cup_x = fixed(center - 12.0),
        rank = achievement.rank.label(),
        subtitle = escape_xml(achievement.subtitle),
        subtitle_fit = fit_to_card(achievement.subtitle, 10.0),
        description = escape_xml(&achievement.description),
        description_fit = fit_to_card(&achievement.description, 9.0),
    );

    if let Some(progress) = achievement.progress.filter(|_| achievement.rank.is_achieved()) {
        let bar_x = center - PROGRESS_WIDTH / 2.0;
        let _ = writeln!(
            buffer,
            "      <rect x=\"{bar_x}\" y=\"124\" width=\"{track}\" height=\"4\" rx=\"2\" fill=\"{text}\" fill-opacity=\"0.1\"/>\n      <rect x=\"{bar_x}\" y=\"124\" width=\"{filled}\" height=\"4\" rx=\"2\" fill=\"{color}\"/>",
            bar_x = fixed(bar_x),
            track = fixed(PROGRESS_WIDTH),
            text = theme.text,
            filled = fixed(PROGRESS_WIDTH * progress.clamp(0.0, 1.0)),
        );
    }

    buffer.push_str("    </g>\n");
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;
    use crate::{achievement::evaluate_achievements, model::UserStats, theme};

    fn achievement(name: &'static str, rank: Rank, progress: Option<f64>) -> Achievement {
        Achievement {
            name,
            subtitle: "Subtitle",
            description: format!("{name} description"),
            value: Some(3),
            rank,
            progress
        }
    }

    fn twelve() -> Vec<Achievement> {
        (0..12)
            .map(|index| {
                let rank = match index % 4 {
                    0 => Rank::Sss,
                    1 => Rank::B,
                    2 => Rank::NotAchieved,
                    _ => Rank::Unknown
                };
                let progress = rank.is_achieved().then_some(0.5);
                achievement("Trophy", rank, progress)
            })
            .collect()
    }

    #[test]
    fn twelve_trophies_fill_two_rows() {
        let svg = render_trophies_card(&twelve(), theme::default_theme());
        assert!(svg.contains("width=\"800\" height=\"300\""));
        assert!(svg.contains("translate(666.7 150.0)"));
        assert!(!svg.contains("translate(0.0 300.0)"));
    }

    #[test]
    fn canvas_grows_by_row() {
        assert_eq!(grid_canvas(0).height, 150);
        assert_eq!(grid_canvas(6).height, 150);
        assert_eq!(grid_canvas(7).height, 300);
    }

    #[test]
    fn ranks_use_tier_colors_and_labels() {
        let svg = render_trophies_card(&twelve(), theme::default_theme());
        assert!(svg.contains("fill=\"#ffd700\">SSS</text>"));
        assert!(svg.contains("fill=\"#c0c0c0\">B</text>"));
        assert!(svg.contains("fill=\"#6e7681\">?</text>"));
        assert!(svg.contains("fill=\"#6e7681\">-</text>"));
    }

    #[test]
    fn unknown_cards_are_dimmed_and_skip_progress() {
        let svg = render_trophies_card(
            &[achievement("Orgs", Rank::Unknown, None)],
            theme::default_theme()
        );
        assert!(svg.contains("opacity=\"0.4\""));
        assert!(!svg.contains("y=\"124\""));
    }

    #[test]
    fn achieved_cards_draw_progress() {
        let svg = render_trophies_card(
            &[achievement("Stars", Rank::A, Some(0.5))],
            theme::default_theme()
        );
        assert!(svg.contains("width=\"47.5\" height=\"4\""));
    }

    #[test]
    fn descriptions_are_escaped() {
        let mut trophy = achievement("Stars", Rank::C, Some(0.1));
        trophy.description = "<b>&".to_owned();
        let svg = render_trophies_card(&[trophy], theme::default_theme());
        assert!(svg.contains("&lt;b&gt;&amp;"));
    }

    fn prolific_stats() -> UserStats {
        UserStats {
            username:      "prolific".to_owned(),
            name:          None,
            followers:     48_213,
            following:     12,
            public_repos:  112,
            total_stars:   12_640,
            total_forks:   3_100,
            total_commits: Some(98_765),
            total_issues:  10_450,
            total_prs:     22_310,
            created_at:    Utc.with_ymd_and_hms(2008, 2, 1, 0, 0, 0).unwrap(),
            organizations: 14
        }
    }

    #[test]
    fn card_text_of_large_profiles_fits_within_card() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");
        let achievements = evaluate_achievements(&prolific_stats(), today).into_logged("test");
        assert_eq!(achievements.len(), 12);

        for achievement in &achievements {
            for (text, size) in [
                (achievement.name, 12.0),
                (achievement.subtitle, 10.0),
                (achievement.description.as_str(), 9.0)
            ] {
                assert!(
                    estimated_width(text, size) <= text_budget(),
                    "{text:?} is {:.1}px wide, card allows {:.1}px",
                    estimated_width(text, size),
                    text_budget()
                );
            }
        }

        let svg = render_trophies_card(&achievements, theme::default_theme());
        assert!(!svg.contains("textLength"));
    }

    #[test]
    fn overlong_text_is_compressed_to_card_width() {
        let mut trophy = achievement("Stars", Rank::S, Some(1.0));
        trophy.description = "18446744073709551615 stars across every repository".to_owned();
        let svg = render_trophies_card(&[trophy], theme::default_theme());
        assert!(svg.contains(&format!(
            "textLength=\"{}\" lengthAdjust=\"spacingAndGlyphs\"",
            fixed(text_budget())
        )));
        assert!(text_budget() < CARD_WIDTH - 2.0 * CARD_MARGIN);
    }
}
