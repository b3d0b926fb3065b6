// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Theme registry.
//!
//! Themes live in a static table that is never mutated, so lookups need no
//! synchronization. Unknown names resolve to the `default` theme.

use serde::Serialize;

/// Rendering flavor attached to a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize,)]
#[serde(rename_all = "snake_case")]
pub enum ThemeStyle
{
    /// Flat fills.
    Clean,
    /// Glow filter and accent-colored headlines.
    Neon,
    /// Semi-transparent background.
    Glass,
    /// Flat fills with a technical font.
    Tech,
}

/// Immutable palette and style for a named theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize,)]
pub struct ThemeDescriptor
{
    pub name:       &'static str,
    /// Gradient stops from top-left to bottom-right.
    pub background: [&'static str; 2],
    pub text:       &'static str,
    pub accent:     &'static str,
    pub border:     &'static str,
    /// Color of the current-streak ring and caption.
    pub streak:     &'static str,
    pub font:       &'static str,
    pub style:      ThemeStyle,
}

const SANS: &str = "'Segoe UI', Ubuntu, Sans-Serif";
const MONO: &str = "Courier, monospace";

static THEMES: [ThemeDescriptor; 15] = [
    ThemeDescriptor {
        name:       "default",
        background: ["#0d1117", "#161b22",],
        text:       "#c9d1d9",
        accent:     "#58a6ff",
        border:     "#30363d",
        streak:     "#ff8c00",
        font:       SANS,
        style:      ThemeStyle::Clean,
    },
    ThemeDescriptor {
        name:       "light",
        background: ["#ffffff", "#f6f8fa",],
        text:       "#24292f",
        accent:     "#0969da",
        border:     "#d0d7de",
        streak:     "#0969da",
        font:       SANS,
        style:      ThemeStyle::Clean,
    },
    ThemeDescriptor {
        name:       "neon",
        background: ["#000000", "#1a1a1a",],
        text:       "#ffffff",
        accent:     "#00ffff",
        border:     "#00ffff",
        streak:     "#00ffff",
        font:       MONO,
        style:      ThemeStyle::Neon,
    },
    ThemeDescriptor {
        name:       "glass",
        background: ["#ffffff", "#ffffff",],
        text:       "#ffffff",
        accent:     "#ffffff",
        border:     "rgba(255, 255, 255, 0.2)",
        streak:     "#ffffff",
        font:       SANS,
        style:      ThemeStyle::Glass,
    },
    ThemeDescriptor {
        name:       "cyberpunk",
        background: ["#2b213a", "#2b213a",],
        text:       "#fcee0a",
        accent:     "#ff003c",
        border:     "#05d9e8",
        streak:     "#ff003c",
        font:       "'Orbitron', sans-serif",
        style:      ThemeStyle::Tech,
    },
    ThemeDescriptor {
        name:       "dracula",
        background: ["#282a36", "#343746",],
        text:       "#f8f8f2",
        accent:     "#bd93f9",
        border:     "#6272a4",
        streak:     "#ff79c6",
        font:       SANS,
        style:      ThemeStyle::Clean,
    },
    ThemeDescriptor {
        name:       "monokai",
        background: ["#272822", "#3e3d32",],
        text:       "#f8f8f2",
        accent:     "#a6e22e",
        border:     "#75715e",
        streak:     "#fd971f",
        font:       MONO,
        style:      ThemeStyle::Clean,
    },
    ThemeDescriptor {
        name:       "nord",
        background: ["#2e3440", "#3b4252",],
        text:       "#eceff4",
        accent:     "#88c0d0",
        border:     "#4c566a",
        streak:     "#88c0d0",
        font:       SANS,
        style:      ThemeStyle::Clean,
    },
    ThemeDescriptor {
        name:       "solarized_light",
        background: ["#fdf6e3", "#eee8d5",],
        text:       "#657b83",
        accent:     "#268bd2",
        border:     "#93a1a1",
        streak:     "#cb4b16",
        font:       SANS,
        style:      ThemeStyle::Clean,
    },
    ThemeDescriptor {
        name:       "solarized_dark",
        background: ["#002b36", "#073642",],
        text:       "#839496",
        accent:     "#268bd2",
        border:     "#586e75",
        streak:     "#cb4b16",
        font:       SANS,
        style:      ThemeStyle::Clean,
    },
    ThemeDescriptor {
        name:       "cobalt",
        background: ["#002240", "#193549",],
        text:       "#ffffff",
        accent:     "#ffc600",
        border:     "#0d3a58",
        streak:     "#ff9d00",
        font:       MONO,
        style:      ThemeStyle::Tech,
    },
    ThemeDescriptor {
        name:       "synthwave",
        background: ["#2b213a", "#241b2f",],
        text:       "#f92aad",
        accent:     "#ff71ce",
        border:     "#72f1b8",
        streak:     "#fede5d",
        font:       SANS,
        style:      ThemeStyle::Neon,
    },
    ThemeDescriptor {
        name:       "high_contrast",
        background: ["#000000", "#000000",],
        text:       "#ffffff",
        accent:     "#ffff00",
        border:     "#ffffff",
        streak:     "#ffff00",
        font:       SANS,
        style:      ThemeStyle::Clean,
    },
    ThemeDescriptor {
        name:       "gruvbox",
        background: ["#282828", "#3c3836",],
        text:       "#ebdbb2",
        accent:     "#fe8019",
        border:     "#504945",
        streak:     "#fabd2f",
        font:       SANS,
        style:      ThemeStyle::Clean,
    },
    ThemeDescriptor {
        name:       "tokyonight",
        background: ["#1a1b27", "#24283b",],
        text:       "#a9b1d6",
        accent:     "#7aa2f7",
        border:     "#414868",
        streak:     "#bb9af7",
        font:       SANS,
        style:      ThemeStyle::Clean,
    },
];

/// Returns the theme registered under `name`, or the default theme.
///
/// Matching ignores ASCII case and surrounding whitespace.
///
/// # Example
///
/// ```
/// use readme_stats::theme;
///
/// assert_eq!(theme::lookup("Dracula",).name, "dracula");
/// assert_eq!(theme::lookup("no-such-theme",).name, "default");
/// ```
pub fn lookup(name: &str,) -> &'static ThemeDescriptor
{
    let wanted = name.trim();
    THEMES.iter().find(|theme| theme.name.eq_ignore_ascii_case(wanted,),).unwrap_or(default_theme(),)
}

/// The fallback theme.
pub fn default_theme() -> &'static ThemeDescriptor
{
    &THEMES[0]
}

/// Registered theme names in registry order.
pub fn names() -> impl Iterator<Item = &'static str,>
{
    THEMES.iter().map(|theme| theme.name,)
}

#[cfg(test)]
mod tests
{
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn registry_contains_every_documented_theme()
    {
        let registered: Vec<&str,> = names().collect();
        assert_eq!(registered, [
            "default",
            "light",
            "neon",
            "glass",
            "cyberpunk",
            "dracula",
            "monokai",
            "nord",
            "solarized_light",
            "solarized_dark",
            "cobalt",
            "synthwave",
            "high_contrast",
            "gruvbox",
            "tokyonight",
        ]);
    }

    #[test]
    fn theme_names_are_unique()
    {
        let unique: HashSet<&str,> = names().collect();
        assert_eq!(unique.len(), THEMES.len());
    }

    #[test]
    fn unknown_and_empty_names_fall_back_to_default()
    {
        assert_eq!(lookup("unknown",), default_theme());
        assert_eq!(lookup("",), default_theme());
        assert_eq!(lookup("default",), default_theme());
    }

    #[test]
    fn lookup_ignores_case_and_whitespace()
    {
        assert_eq!(lookup("  Solarized_Dark ",).name, "solarized_dark");
    }

    #[test]
    fn palettes_carry_signature_colors()
    {
        assert_eq!(lookup("dracula",).background[0], "#282a36");
        assert_eq!(lookup("monokai",).background[0], "#272822");
        assert_eq!(lookup("nord",).accent, "#88c0d0");
        assert_eq!(lookup("neon",).style, ThemeStyle::Neon);
        assert_eq!(lookup("glass",).style, ThemeStyle::Glass);
    }

    #[test]
    fn registry_is_shareable_across_threads()
    {
        let handles: Vec<_,> = ["nord", "neon", "missing"]
            .into_iter()
            .map(|name| std::thread::spawn(move || lookup(name,).name,),)
            .collect();
        let resolved: Vec<&str,> =
            handles.into_iter().map(|handle| handle.join().expect("thread panicked",),).collect();
        assert_eq!(resolved, ["nord", "neon", "default"]);
    }
}
