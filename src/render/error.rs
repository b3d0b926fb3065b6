// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

use std::fmt::Write as _;

use super::{Canvas, close_document, escape_xml, open_document};
use crate::theme::ThemeDescriptor;

const CANVAS: Canvas = Canvas {
    width:  480,
    height: 120
};

/// Renders a small card that carries `message` in place of a badge.
///
/// Used whenever a badge cannot be produced so that embedding pages still
/// receive a valid image.
pub fn render_error_card(message: &str, theme: &ThemeDescriptor) -> String {
    let mut buffer = String::with_capacity(1024);
    let escaped = escape_xml(message);

    open_document(&mut buffer, CANVAS, message, theme);
    let _ = writeln!(
        buffer,
        "  <g font-family=\"{font}\">\n    <text x=\"25\" y=\"45\" font-size=\"18\" font-weight=\"bold\" fill=\"#f85149\">Badge unavailable</text>\n    <text x=\"25\" y=\"80\" font-size=\"14\" fill=\"{text}\">{escaped}</text>\n  </g>",
        font = theme.font,
        text = theme.text,
    );
    close_document(&mut buffer);
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme;

    #[test]
    fn error_card_shows_escaped_message() {
        let svg = render_error_card("User '<x>' not found", theme::default_theme());
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("User &apos;&lt;x&gt;&apos; not found"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
