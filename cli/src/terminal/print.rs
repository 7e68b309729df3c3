use std::fmt::Display;

use crate::terminal::colors;
use colored::*;
use tracing::info;
use unicode_width::UnicodeWidthStr;

/// Width every framed line is padded to.
pub const LINE_WIDTH: usize = 64;

/// Events on this target are printed verbatim, without a level symbol.
pub const PRINT_TARGET: &str = "portr::print";

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, "{msg}");
}

pub fn banner(no_banner: bool, q_level: u8) {
    if no_banner || q_level > 0 {
        return;
    }
    print(&banner_line());
}

fn banner_line() -> String {
    let title: String = format!(" portr {} · tcp connect scan ", env!("CARGO_PKG_VERSION"));
    let fill: usize = LINE_WIDTH.saturating_sub(UnicodeWidthStr::width(title.as_str()));
    let left: usize = fill / 2;

    format!(
        "{}{}{}",
        "━".repeat(left).color(colors::SEPARATOR),
        title.color(colors::PRIMARY).bold(),
        "━".repeat(fill - left).color(colors::SEPARATOR)
    )
}

/// Section title, e.g. `── STARTING SCAN ──`.
pub fn header(title: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }
    print(&header_line(title));
}

fn header_line(title: &str) -> String {
    let label: String = format!(" {} ", title.to_uppercase());
    let fill: usize = LINE_WIDTH.saturating_sub(label.chars().count());
    let left: usize = fill / 2;

    format!(
        "{}{}{}",
        "─".repeat(left).color(colors::SEPARATOR),
        label.color(colors::PRIMARY),
        "─".repeat(fill - left).color(colors::SEPARATOR)
    )
}

pub fn separator() {
    print(&"━".repeat(LINE_WIDTH).color(colors::SEPARATOR).to_string());
}

/// Prints `key.... value` rows with the values lined up in one column.
pub fn key_value_block<V: Display>(rows: &[(&str, V)]) {
    for line in key_value_lines(rows) {
        print_status(line);
    }
}

fn key_value_lines<V: Display>(rows: &[(&str, V)]) -> Vec<String> {
    let width: usize = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);

    rows.iter()
        .map(|(key, value)| {
            let dots: String = ".".repeat(width + 2 - key.len());
            format!(
                "{}{} {}",
                key.color(colors::PRIMARY),
                format!("{dots}:").color(colors::SEPARATOR),
                value.to_string().color(colors::TEXT_DEFAULT)
            )
        })
        .collect()
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    print(&format!(
        "{} {}",
        ">".color(colors::SEPARATOR),
        msg.as_ref().color(colors::TEXT_DEFAULT)
    ));
}

pub fn centerln(msg: &str) {
    let pad: usize = LINE_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2;
    print(&format!("{}{msg}", " ".repeat(pad)));
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
