//! Color and glyph conventions for the terminal UI.

use ratatui::style::{Color, Modifier, Style};

pub const PLAYER_GLYPH: &str = "@";
pub const NPC_GLYPH: &str = "N";
pub const EXIT_GLYPH: &str = ">";
pub const WALL_GLYPH: &str = "#";
pub const FLOOR_GLYPH: &str = ".";

pub fn player() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

pub fn npc() -> Style {
    Style::default().fg(Color::LightRed)
}

pub fn exit() -> Style {
    Style::default().fg(Color::Green)
}

pub fn wall() -> Style {
    Style::default().fg(Color::Gray)
}

pub fn floor() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn title() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

pub fn hint() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn selected() -> Style {
    Style::default().fg(Color::Black).bg(Color::Yellow)
}

/// Green through red as the bar empties.
pub fn health(current: u32, maximum: u32) -> Style {
    if maximum == 0 {
        return Style::default().fg(Color::Gray);
    }
    let percent = (current * 100) / maximum;
    let color = match percent {
        75..=100 => Color::Green,
        50..=74 => Color::Yellow,
        25..=49 => Color::LightRed,
        _ => Color::Red,
    };
    Style::default().fg(color)
}

pub fn mana(current: u32, maximum: u32) -> Style {
    if maximum == 0 {
        return Style::default().fg(Color::Gray);
    }
    let percent = (current * 100) / maximum;
    let color = match percent {
        50..=100 => Color::Cyan,
        25..=49 => Color::Blue,
        _ => Color::DarkGray,
    };
    Style::default().fg(color)
}
