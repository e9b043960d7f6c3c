use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

use crate::terminal::colors;

/// Event formatter matching the tree output: a right-aligned level column,
/// a branch glyph, and the event target at debug verbosity and below.
pub struct AtlasFormatter;

fn level_text(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "trace",
        Level::DEBUG => "debug",
        Level::INFO => "info",
        Level::WARN => "warn",
        Level::ERROR => "error",
    }
}

/// Pads before coloring; escape codes would defeat the width specifier.
fn level_tag(level: &Level) -> ColoredString {
    let padded = format!("{:>5}", level_text(level));
    match *level {
        Level::TRACE => padded.dimmed(),
        Level::DEBUG => padded.blue(),
        Level::INFO => padded.color(colors::PRIMARY),
        Level::WARN => padded.color(colors::ACCENT).bold(),
        Level::ERROR => padded.color(colors::OFFLINE).bold(),
    }
}

impl<S, N> FormatEvent<S, N> for AtlasFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        write!(
            writer,
            "{} {} ",
            level_tag(meta.level()),
            "│".color(colors::SEPARATOR)
        )?;
        if *meta.level() >= Level::DEBUG {
            write!(writer, "{} ", meta.target().color(colors::SEPARATOR))?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(AtlasFormatter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_level_has_a_text() {
        assert_eq!(level_text(&Level::TRACE), "trace");
        assert_eq!(level_text(&Level::DEBUG), "debug");
        assert_eq!(level_text(&Level::INFO), "info");
        assert_eq!(level_text(&Level::WARN), "warn");
        assert_eq!(level_text(&Level::ERROR), "error");
    }

    #[test]
    fn level_columns_align() {
        let widths: Vec<usize> = [Level::TRACE, Level::INFO, Level::ERROR]
            .iter()
            .map(|l| format!("{:>5}", level_text(l)).len())
            .collect();
        assert!(widths.iter().all(|w| *w == 5));
    }
}
