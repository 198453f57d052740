//! Console output for CLI workflows.

use dialoguer::console::Term;
use std::io::{self, IsTerminal, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Verbosity-aware console writer with colored markers.
///
/// Regular messages go to stdout and warnings go to stderr. Quiet mode
/// suppresses both. Color is only emitted when the stream is a terminal.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }

    /// Plain line.
    pub fn println(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(stdout(), "{message}")
    }

    /// Detail shown only with `--verbose`.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.is_verbose() {
            return Ok(());
        }
        writeln!(stdout(), "  {message}")
    }

    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        marked(&mut stdout(), Color::Cyan, "→", message)
    }

    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        marked(&mut stdout(), Color::Green, "✓", message)
    }

    pub fn warn(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut err = stderr();
        writeln!(err)?;
        marked(&mut err, Color::Yellow, "Warning:", message)
    }

    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut out = stdout();
        writeln!(out)?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        writeln!(out, "{title}")?;
        writeln!(out, "{}", "=".repeat(title.chars().count()))?;
        out.reset()
    }

    pub fn indent(&self, message: &str) -> io::Result<()> {
        self.println(&format!("    {message}"))
    }

    /// Prints `message` and waits for a single key press.
    ///
    /// Skipped in quiet mode. Returns immediately when stdin is not a terminal.
    pub fn pause(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(stdout(), "{message}")?;
        Term::stdout().read_key().map(|_| ())
    }
}

fn choice(is_terminal: bool) -> ColorChoice {
    if is_terminal {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

fn stdout() -> StandardStream {
    StandardStream::stdout(choice(io::stdout().is_terminal()))
}

fn stderr() -> StandardStream {
    StandardStream::stderr(choice(io::stderr().is_terminal()))
}

/// `marker message`, with the marker bold and colored.
fn marked(out: &mut impl WriteColor, color: Color, marker: &str, message: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(out, "{marker}")?;
    out.reset()?;
    writeln!(out, " {message}")
}
