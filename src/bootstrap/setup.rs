//! Startup tasks: console logger.

use std::io::Write;

use anstyle::Style;
use anyhow::{Context, Result};
use env_logger::{Builder, Target};
use log::Level;
use log::kv::Key;

/// Width of the `[1/2]` step column; untagged info lines are indented by it.
const STEP_COLUMN_WIDTH: usize = 6;

// ────────────────────────────────────────────────────────────────
// Logger Initialization
// ────────────────────────────────────────────────────────────────

/// Tag printed in front of a record: `[n/m]` for steps, `[WARN]`/`[ERROR]`
/// for problems, blank padding for detail lines under a step.
fn line_tag(level: Level, step: Option<&str>) -> String {
    match (level, step) {
        (Level::Info, Some(step)) => format!("[{}]", step),
        (Level::Info, None) => " ".repeat(STEP_COLUMN_WIDTH),
        (level, _) => format!("[{}]", level),
    }
}

/// Initialize the console logger writing to stdout.
pub fn initialize_logger() -> Result<()> {
    Builder::new()
        .format(|buf, record| {
            let step = record
                .key_values()
                .get(Key::from("step"))
                .map(|v| v.to_string());
            let tag = line_tag(record.level(), step.as_deref());

            let tag_style = match record.level() {
                Level::Info if step.is_some() => Style::new().bold(),
                Level::Info => Style::new(),
                level => buf.default_level_style(level),
            };

            let duration = record
                .key_values()
                .get(Key::from("duration"))
                .map(|v| format!(" ({})", v))
                .unwrap_or_default();

            let message = format!("{}", record.args());
            let mut lines = message.lines();

            if let Some(first_line) = lines.next() {
                writeln!(
                    buf,
                    "{}{}{} {}{}",
                    tag_style.render(),
                    tag,
                    tag_style.render_reset(),
                    first_line,
                    duration
                )?;
            }

            // Indent continuation lines under the message column
            let indent = " ".repeat(tag.len() + 1);
            for line in lines {
                writeln!(buf, "{}{}", indent, line)?;
            }

            Ok(())
        })
        .target(Target::Stdout)
        .filter(None, log::LevelFilter::Info)
        .parse_default_env()
        .try_init()
        .context("Failed to initialize logger")
}
