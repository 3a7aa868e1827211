//! Terminal styles.
//!
//! Rendering code asks for a style by what the text *is* (an id, a timestamp,
//! a completed item), never by color, so the palette can change in one place.
//! `console` drops the escape codes by itself when stdout is not a terminal.

use console::Style;

pub fn title() -> Style {
    Style::new().bold()
}

pub fn id() -> Style {
    Style::new().yellow()
}

/// Timestamps and other metadata.
pub fn time() -> Style {
    Style::new().color256(246).italic()
}

pub fn muted() -> Style {
    Style::new().dim()
}

pub fn done() -> Style {
    Style::new().green()
}

pub fn success() -> Style {
    Style::new().green()
}

pub fn warning() -> Style {
    Style::new().yellow()
}

pub fn error() -> Style {
    Style::new().red()
}

/// Bar color for a mood value on the 1..=5 scale.
pub fn mood(value: u8) -> Style {
    match value {
        1 => Style::new().red(),
        2 => Style::new().color256(208),
        3 => Style::new().yellow(),
        4 => Style::new().color256(112),
        _ => Style::new().green(),
    }
}
