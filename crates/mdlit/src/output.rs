//! Status lines on stderr. Stdout is reserved for HTML and resolver output.

use std::fmt::Display;
use std::path::Path;

use console::{Style, Term};

pub(crate) struct Output {
    term: Term,
    done: Style,
    notice: Style,
    failure: Style,
    quiet: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            done: Style::new().green(),
            notice: Style::new().yellow(),
            failure: Style::new().red().bold(),
            quiet: Style::new().dim(),
        }
    }

    /// Report a rendered output file.
    pub(crate) fn wrote(&self, path: &Path) {
        self.line(&self.done, format_args!("Wrote {}", path.display()));
    }

    /// Explain that network lookups were skipped.
    pub(crate) fn offline_hint(&self) {
        self.line(
            &self.notice,
            "Network lookups are disabled; only platform URLs resolve.",
        );
    }

    /// Show what an unresolved mention falls back to.
    pub(crate) fn fallback(&self, icon: &str, label: &str) {
        self.line(
            &self.quiet,
            format_args!("Mentions of this URL render as: {icon} {label}"),
        );
    }

    /// Report a failed command.
    pub(crate) fn error(&self, err: &dyn Display) {
        self.line(&self.failure, format_args!("Error: {err}"));
    }

    fn line(&self, style: &Style, msg: impl Display) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }
}
