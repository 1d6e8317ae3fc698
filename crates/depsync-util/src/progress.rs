//! Cargo-style status lines on stderr.
//!
//! Reports go to stdout; everything printed here is progress chatter that
//! must not end up in redirected report output.

use std::io::Write;

use console::Style;

#[derive(Clone, Copy)]
enum Tone {
    Action,
    Info,
    Warn,
}

impl Tone {
    fn style(self) -> Style {
        match self {
            Tone::Action => Style::new().green().bold(),
            Tone::Info => Style::new().cyan().bold(),
            Tone::Warn => Style::new().yellow().bold(),
        }
    }
}

fn emit(tone: Tone, label: &str, message: &str) {
    let _ = writeln!(
        std::io::stderr(),
        "{:>12} {message}",
        tone.style().apply_to(label),
    );
}

/// Print a status line: `    Scanning 12 manifests under /repo`
///
/// The `label` is right-aligned to 12 columns in bold green.
pub fn status(label: &str, message: &str) {
    emit(Tone::Action, label, message);
}

/// Like [`status`] but bold cyan, for informational messages.
pub fn status_info(label: &str, message: &str) {
    emit(Tone::Info, label, message);
}

/// Like [`status`] but bold yellow, for conditions the user should look at.
pub fn status_warn(label: &str, message: &str) {
    emit(Tone::Warn, label, message);
}
