//! Centralized theme configuration for all UI components.
//!
//! All colors and styles are defined here. Render files use
//! `theme::module::CONSTANT` and never hardcode `Color::*` values.
//!
//! Theme: Galaxy - Purple/pink accents with deep space blue background

use ratatui::style::{Color, Modifier, Style};

/// Core color palette - shared base colors.
pub mod palette {
    use super::*;

    // Text colors - softer than pure white
    pub const TEXT: Color = Color::Rgb(236, 236, 244);
    pub const TEXT_DIM: Color = Color::Rgb(90, 92, 119);
    pub const TEXT_MUTED: Color = Color::Rgb(130, 133, 158);

    // Background colors - deep space blue tints
    pub const BG_DARK: Color = Color::Rgb(26, 26, 46);
    pub const BG_HOVER: Color = Color::Rgb(45, 45, 72);

    // Accent colors
    pub const CYAN: Color = Color::Rgb(0, 217, 255);
    pub const YELLOW: Color = Color::Rgb(255, 217, 61);
    pub const GREEN: Color = Color::Rgb(107, 203, 119);
    pub const PINK: Color = Color::Rgb(255, 107, 157);
    pub const RED: Color = Color::Rgb(224, 108, 117);
    pub const PURPLE: Color = Color::Rgb(189, 147, 249);

    pub const CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);
}

/// Search input field
pub mod input {
    use super::*;

    pub const BORDER_FOCUSED: Color = palette::CYAN;
    pub const BORDER_UNFOCUSED: Color = palette::TEXT_DIM;
    pub const TEXT: Color = palette::TEXT;
    pub const PLACEHOLDER: Color = palette::TEXT_DIM;
    pub const LOADING: Color = palette::YELLOW;
    pub const CURSOR: Style = palette::CURSOR;
}

/// Recent searches and suggestions dropdown
pub mod dropdown {
    use super::*;

    pub const BORDER: Color = palette::CYAN;
    pub const BACKGROUND: Color = palette::BG_DARK;

    pub const SECTION_RECENT: Style = Style::new()
        .fg(palette::PURPLE)
        .add_modifier(Modifier::BOLD);
    pub const SECTION_SUGGESTIONS: Style = Style::new()
        .fg(palette::GREEN)
        .add_modifier(Modifier::BOLD);

    pub const PRIMARY: Color = palette::TEXT;
    pub const SECONDARY: Color = palette::TEXT_MUTED;

    pub const ITEM_SELECTED_BG: Color = palette::BG_HOVER;
    pub const ITEM_SELECTED_INDICATOR: Color = palette::CYAN;
}

/// Map pane
pub mod map {
    use super::*;

    pub const BORDER: Color = palette::TEXT_DIM;
    pub const TITLE: Color = palette::TEXT;
    pub const COASTLINE: Color = palette::TEXT_MUTED;
    pub const MARKER: Color = palette::PINK;
    pub const LABEL: Color = palette::TEXT;
    pub const RESOLVING: Color = palette::YELLOW;
}

/// Status line below the map
pub mod status {
    use super::*;

    pub const COORDINATE: Color = palette::CYAN;
    pub const TEXT: Color = palette::TEXT_MUTED;
}

/// Help line at the bottom of the screen
pub mod help_line {
    use super::*;

    pub const KEY: Color = palette::CYAN;
    pub const DESCRIPTION: Color = palette::TEXT_DIM;
    pub const SEPARATOR: Color = palette::TEXT_DIM;
}

/// Notification colors
pub mod notification {
    use super::*;

    pub struct NotificationColors {
        pub fg: Color,
        pub bg: Color,
        pub border: Color,
    }

    pub const WARNING: NotificationColors = NotificationColors {
        fg: palette::BG_DARK,
        bg: palette::YELLOW,
        border: palette::YELLOW,
    };

    pub const ERROR: NotificationColors = NotificationColors {
        fg: palette::TEXT,
        bg: palette::RED,
        border: Color::Rgb(255, 140, 150),
    };
}
