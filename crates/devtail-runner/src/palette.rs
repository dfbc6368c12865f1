//! Terminal colors for service tags

use colored::{Color, Colorize};

/// Fixed palette, assigned round-robin by spawn order
pub const SERVICE_COLORS: &[Color] = &[
    Color::Blue,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::Red,
];

pub fn color_for(index: usize) -> Color {
    SERVICE_COLORS[index % SERVICE_COLORS.len()]
}

/// Colorized `[name]` tag for terminal echo
pub fn service_tag(name: &str, index: usize) -> String {
    format!("[{}]", name).color(color_for(index)).to_string()
}
