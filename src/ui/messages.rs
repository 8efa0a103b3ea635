use std::fmt;

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_BLUE, BOLD, ICON_INFO, RESET, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_GREEN, BOLD, ICON_OK, RESET, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_YELLOW, BOLD, ICON_WARN, RESET, msg);
}

/// Blocking notification for failures the user has to acknowledge.
///
/// Rendered as a framed block on stderr so it stands out from the
/// regular session output. The icon sits left of the frame because its
/// terminal width varies.
pub fn alert<T: fmt::Display>(title: &str, msg: T) {
    let body = msg.to_string();
    for (i, line) in frame_lines(title, &body).iter().enumerate() {
        let icon = if i == 1 { ICON_ERR } else { "  " };
        eprintln!("{}{}{} {}{}", FG_RED, BOLD, icon, line, RESET);
    }
}

/// Box drawing for [`alert`]; every line has the same char count.
fn frame_lines(title: &str, body: &str) -> Vec<String> {
    let inner = body.chars().count().max(title.chars().count());
    let rule = "─".repeat(inner + 2);
    vec![
        format!("┌{rule}┐"),
        format!("│ {title:<inner$} │"),
        format!("│ {body:<inner$} │"),
        format!("└{rule}┘"),
    ]
}

/// Optional: formatted section header
pub fn header<T: fmt::Display>(msg: T) {
    println!(
        "{}{}====================== {}\n{}",
        FG_BLUE, BOLD, msg, RESET
    );
}
