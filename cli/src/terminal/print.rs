use std::fmt::Display;

use colored::*;

use crate::terminal::colors;

pub const TOTAL_WIDTH: usize = 64;

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    println!("{line}");
}

pub fn separator() {
    println!("{}", "─".repeat(TOTAL_WIDTH).bright_black());
}

/// Group heading: `[idx] name`.
pub fn tree_head(idx: usize, name: &str) {
    let idx_str: String = format!("[{}]", idx.to_string().color(colors::ACCENT));
    println!(
        "{} {}",
        idx_str.color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    );
}

/// One `├─ key: value` detail line under a tree head.
pub fn tree_detail<V>(key: &str, value: V, last: bool)
where
    V: Display,
{
    let branch = if last { "└─" } else { "├─" };
    println!(
        "  {} {}{} {}",
        branch.color(colors::SEPARATOR),
        key.color(colors::PRIMARY),
        ":".color(colors::SEPARATOR),
        value
    );
}

pub fn status<T: AsRef<str>>(msg: T) {
    let prefix: ColoredString = ">".color(colors::SEPARATOR);
    println!("{} {}", prefix, msg.as_ref().color(colors::TEXT_DEFAULT));
}
