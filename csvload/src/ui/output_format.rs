// csvload/src/ui/output_format.rs
//! Coloured status lines.
//!
//! Every printer takes the writer and a `supports_color` flag so callers decide, per
//! stream, whether ANSI codes are emitted.

use owo_colors::{AnsiColors, OwoColorize};
use std::io::{self, Write};

use is_terminal::IsTerminal;

/// The kind of a status line, which picks its label and colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warn,
    Error,
}

impl MessageKind {
    fn label(self) -> &'static str {
        match self {
            MessageKind::Info => "INFO",
            MessageKind::Success => "OK",
            MessageKind::Warn => "WARN",
            MessageKind::Error => "ERROR",
        }
    }

    fn color(self) -> AnsiColors {
        match self {
            MessageKind::Info => AnsiColors::Cyan,
            MessageKind::Success => AnsiColors::Green,
            MessageKind::Warn => AnsiColors::Yellow,
            MessageKind::Error => AnsiColors::Red,
        }
    }
}

/// Writes `[LABEL] message`, coloured when `supports_color` is set.
pub fn print_message<W: Write>(writer: &mut W, kind: MessageKind, message: &str, supports_color: bool) -> io::Result<()> {
    let label = format!("[{}]", kind.label());
    if supports_color {
        writeln!(writer, "{} {}", label.color(kind.color()).bold(), message)
    } else {
        writeln!(writer, "{} {}", label, message)
    }
}

/// Validity marker used in reports.
pub fn validity_marker(valid: bool) -> &'static str {
    if valid { "✓" } else { "✗" }
}

/// Prints a status line to stderr.
pub fn status(kind: MessageKind, message: impl AsRef<str>) {
    let stderr = io::stderr();
    let supports_color = stderr.is_terminal();
    let _ = print_message(&mut stderr.lock(), kind, message.as_ref(), supports_color);
}
