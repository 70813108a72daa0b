//! # Palette
//!
//! Colours for each theme, taken from a gray/green scale so the dark and
//! light variants keep the same contrast relationships.
//!
//! Components never branch on the theme themselves; they receive a `Palette`
//! prop and pick the colour for their role.

use ratatui::style::{Color, Modifier, Style};

use crate::core::message::Role;
use crate::core::theme::Theme;

const GRAY_50: Color = Color::Rgb(249, 250, 251);
const GRAY_100: Color = Color::Rgb(243, 244, 246);
const GRAY_200: Color = Color::Rgb(229, 231, 235);
const GRAY_300: Color = Color::Rgb(209, 213, 219);
const GRAY_400: Color = Color::Rgb(156, 163, 175);
const GRAY_500: Color = Color::Rgb(107, 114, 128);
const GRAY_600: Color = Color::Rgb(75, 85, 99);
const GRAY_700: Color = Color::Rgb(55, 65, 81);
const GRAY_800: Color = Color::Rgb(31, 41, 55);
const GRAY_900: Color = Color::Rgb(17, 24, 39);
const GREEN_500: Color = Color::Rgb(34, 197, 94);
const GREEN_600: Color = Color::Rgb(22, 163, 74);
const WHITE: Color = Color::Rgb(255, 255, 255);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Page background behind the message list.
    pub background: Color,
    /// Sidebar and header background.
    pub panel: Color,
    pub border: Color,
    pub heading: Color,
    pub text: Color,
    pub muted: Color,
    pub faint: Color,
    /// Background of the message under the mouse.
    pub hover: Color,
    pub assistant_avatar: Color,
    pub user_avatar: Color,
    pub input_background: Color,
    pub input_text: Color,
    pub input_border: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: GRAY_900,
                panel: GRAY_800,
                border: GRAY_700,
                heading: GRAY_200,
                text: GRAY_300,
                muted: GRAY_400,
                faint: GRAY_500,
                hover: GRAY_800,
                assistant_avatar: GREEN_600,
                user_avatar: GRAY_600,
                input_background: GRAY_800,
                input_text: GRAY_200,
                input_border: GRAY_700,
            },
            Theme::Light => Self {
                background: GRAY_50,
                panel: WHITE,
                border: GRAY_200,
                heading: GRAY_800,
                text: GRAY_700,
                muted: GRAY_600,
                faint: GRAY_400,
                hover: GRAY_100,
                assistant_avatar: GREEN_500,
                user_avatar: GRAY_400,
                input_background: WHITE,
                input_text: GRAY_900,
                input_border: GRAY_300,
            },
        }
    }

    pub fn avatar(&self, role: Role) -> Color {
        match role {
            Role::Assistant => self.assistant_avatar,
            Role::User => self.user_avatar,
        }
    }

    /// Avatar badge: white glyph on the role colour.
    pub fn avatar_style(&self, role: Role) -> Style {
        Style::default()
            .fg(WHITE)
            .bg(self.avatar(role))
            .add_modifier(Modifier::BOLD)
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn panel_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.panel)
    }
}

/// Glyph on the theme toggle: a sun while dark (switch to light), a moon while light.
pub fn toggle_glyph(theme: Theme) -> &'static str {
    match theme {
        Theme::Dark => "☀",
        Theme::Light => "☾",
    }
}
