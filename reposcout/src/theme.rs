//! Color theme system for reposcout.
//!
//! A `Theme` holds named `ratatui::style::Color` fields covering every UI
//! surface reposcout renders. Two built-in themes are provided:
//!
//! - `dark` — ANSI 16 colors (`Color::Cyan`, `Color::DarkGray`, etc.) so it
//!   works on any terminal including 256-color SSH sessions with no truecolor
//!   support.
//! - `catppuccin_mocha` — Catppuccin Mocha palette in RGB; requires truecolor.
//!
//! The language-bar palette is shared by both themes: it mirrors the
//! GitHub-style hue table used for repository language charts.

use ratatui::style::Color;

/// Segment colors for the language bar and legend, assigned by rank.
///
/// Index is the language's position in the descending share order, modulo the
/// palette length, so the same payload always colors the same way.
pub const LANGUAGE_PALETTE: [Color; 14] = [
    Color::Rgb(0x31, 0x78, 0xc6), // TypeScript blue
    Color::Rgb(0xf1, 0xe0, 0x5a), // JavaScript yellow
    Color::Rgb(0xe3, 0x4c, 0x26), // HTML orange
    Color::Rgb(0x56, 0x3d, 0x7c), // CSS purple
    Color::Rgb(0x38, 0x4d, 0x54), // Dockerfile slate
    Color::Rgb(0x89, 0xe0, 0x51), // Shell green
    Color::Rgb(0x70, 0x15, 0x16), // Ruby dark red
    Color::Rgb(0xb0, 0x72, 0x19), // Java brown
    Color::Rgb(0x2b, 0x74, 0x89), // Python blue
    Color::Rgb(0x00, 0xad, 0xd8), // Go cyan
    Color::Rgb(0x51, 0x2b, 0xd4), // C# violet
    Color::Rgb(0xa9, 0x7b, 0xff), // Kotlin purple
    Color::Rgb(0xda, 0x5b, 0x0b), // Jupyter orange
    Color::Rgb(0x4f, 0x5d, 0x95), // PHP indigo
];

/// Returns the palette color for a language at descending-share rank `index`.
pub fn language_color(index: usize) -> Color {
    LANGUAGE_PALETTE[index % LANGUAGE_PALETTE.len()]
}

/// All color values used across reposcout's UI surfaces.
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    /// Border color for the currently focused panel.
    pub border_active: Color,
    /// Border color for unfocused panels.
    pub border_inactive: Color,

    // Result cards
    /// Project name on a card.
    pub card_title: Color,
    /// Card description text.
    pub card_description: Color,
    /// Star count.
    pub stat_stars: Color,
    /// Fork count.
    pub stat_forks: Color,
    /// Watcher count.
    pub stat_watchers: Color,
    /// Checkbox mark for cards queued for processing.
    pub checked_mark: Color,
    /// Checkbox mark for unchecked cards.
    pub unchecked_mark: Color,

    // Detail pane
    /// Section heading text (Languages, Analysis, Category, Report).
    pub section_heading: Color,
    /// Field labels (Stars, Created, Description, ...).
    pub field_label: Color,
    /// Field values and free text.
    pub field_value: Color,
    /// Tag chips in the category section.
    pub tag: Color,
    /// Filled rating stars in the report section.
    pub rating_star: Color,

    // Messages
    /// Panel-local error text.
    pub error: Color,
    /// Placeholder and empty-state text.
    pub placeholder: Color,
    /// Loading spinner and in-flight text.
    pub loading: Color,
    /// Success text (processing confirmation).
    pub success: Color,

    // Search bar
    /// Query text while editing.
    pub search_input: Color,
    /// Search bar border while editing.
    pub search_active: Color,

    // Status bar
    /// Status bar background.
    pub status_bar_bg: Color,
    /// Status bar foreground.
    pub status_bar_fg: Color,
    /// Mode indicator color in NORMAL mode.
    pub status_mode_normal: Color,
    /// Mode indicator color in SEARCH mode.
    pub status_mode_search: Color,

    // General
    /// Application background, used when clearing overlay areas.
    pub background: Color,
}

impl Theme {
    /// Returns the built-in dark theme using ANSI 16 colors.
    ///
    /// Works on all terminals: 16-color, 256-color, and truecolor.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            card_title: Color::White,
            card_description: Color::Gray,
            stat_stars: Color::Yellow,
            stat_forks: Color::Blue,
            stat_watchers: Color::Magenta,
            checked_mark: Color::Green,
            unchecked_mark: Color::DarkGray,

            section_heading: Color::Cyan,
            field_label: Color::Yellow,
            field_value: Color::Reset,
            tag: Color::Blue,
            rating_star: Color::Yellow,

            error: Color::Red,
            placeholder: Color::DarkGray,
            loading: Color::Cyan,
            success: Color::Green,

            search_input: Color::White,
            search_active: Color::Yellow,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode_normal: Color::Cyan,
            status_mode_search: Color::Yellow,

            background: Color::Reset,
        }
    }

    /// Returns the Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Requires a truecolor terminal; colors degrade to the nearest ANSI
    /// approximation elsewhere. Palette source:
    /// <https://github.com/catppuccin/catppuccin>, Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161); // #a6e3a1
        let red = Color::Rgb(243, 139, 168); // #f38ba8
        let yellow = Color::Rgb(249, 226, 175); // #f9e2af
        let blue = Color::Rgb(137, 180, 250); // #89b4fa
        let teal = Color::Rgb(148, 226, 213); // #94e2d5
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let mauve = Color::Rgb(203, 166, 247); // #cba6f7
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface1 = Color::Rgb(69, 71, 90); // #45475a
        let base = Color::Rgb(30, 30, 46); // #1e1e2e
        let text = Color::Rgb(205, 214, 244); // #cdd6f4
        let subtext = Color::Rgb(166, 173, 200); // #a6adc8

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            card_title: text,
            card_description: subtext,
            stat_stars: yellow,
            stat_forks: blue,
            stat_watchers: mauve,
            checked_mark: green,
            unchecked_mark: overlay1,

            section_heading: teal,
            field_label: yellow,
            field_value: text,
            tag: blue,
            rating_star: yellow,

            error: red,
            placeholder: overlay1,
            loading: teal,
            success: green,

            search_input: text,
            search_active: yellow,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_mode_normal: lavender,
            status_mode_search: yellow,

            background: base,
        }
    }

    /// Resolves a theme name string to the corresponding built-in theme.
    ///
    /// Unknown names fall back to `dark()` so a typo in config never prevents
    /// startup.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!(theme = other, "unknown theme name, using 'dark'");
                Self::dark()
            }
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_theme_name_falls_back_to_dark() {
        let theme = Theme::from_name("solarized-nope");
        let dark = Theme::dark();
        assert_eq!(theme.border_active, dark.border_active);
        assert_eq!(theme.background, dark.background);
    }

    #[test]
    fn language_colors_wrap_around_the_palette() {
        assert_eq!(language_color(0), LANGUAGE_PALETTE[0]);
        assert_eq!(language_color(14), LANGUAGE_PALETTE[0]);
        assert_eq!(language_color(15), LANGUAGE_PALETTE[1]);
    }
}
