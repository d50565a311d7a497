//! Human-facing diagnostics for the command line.
//!
//! Every line the tool prints about itself is prefixed with `~`. Warnings use
//! a fixed block format and are also recorded, so callers can tell how many
//! problems a scan ran into.

use std::error::Error;
use std::io::{self, Write};

/// Prefix for every console line.
pub const MARKER: &str = "~";

/// Where console output goes.
#[derive(Debug)]
enum Sink {
    Stderr,
    Buffer(Vec<u8>),
}

/// Diagnostics channel owned by the top-level context.
#[derive(Debug)]
pub struct Console {
    sink: Sink,
    warnings: Vec<String>,
}

impl Console {
    /// A console writing to standard error.
    pub fn stderr() -> Self {
        Self {
            sink: Sink::Stderr,
            warnings: Vec::new(),
        }
    }

    /// A console keeping its output in memory.
    pub fn buffered() -> Self {
        Self {
            sink: Sink::Buffer(Vec::new()),
            warnings: Vec::new(),
        }
    }

    /// Render a warning message as a console block.
    pub fn format_warning(message: &str) -> String {
        format!("{m}\n{m} {message}\n{m}\n", m = MARKER)
    }

    /// Emit a non-fatal warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.write(&Self::format_warning(&message));
        self.warnings.push(message);
    }

    /// Print one marker-prefixed line. An empty line prints the bare marker.
    pub fn line(&mut self, text: &str) {
        if text.is_empty() {
            self.write(&format!("{}\n", MARKER));
        } else {
            self.write(&format!("{} {}\n", MARKER, text));
        }
    }

    /// Print an error followed by its chain of causes.
    pub fn error_with_causes(&mut self, err: &(dyn Error + 'static)) {
        self.line(&err.to_string());
        let mut source = err.source();
        while let Some(cause) = source {
            self.line(&format!("    caused by: {}", cause));
            source = cause.source();
        }
    }

    /// Warnings emitted so far, oldest first.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Output captured by a buffered console. Empty for standard error.
    pub fn contents(&self) -> String {
        match &self.sink {
            Sink::Stderr => String::new(),
            Sink::Buffer(buf) => String::from_utf8_lossy(buf).into_owned(),
        }
    }

    fn write(&mut self, text: &str) {
        // Diagnostics are best effort; a closed stderr must not abort a scan.
        let _ = match &mut self.sink {
            Sink::Stderr => io::stderr().lock().write_all(text.as_bytes()),
            Sink::Buffer(buf) => buf.write_all(text.as_bytes()),
        };
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::stderr()
    }
}

/// Render an error and its causes on one line, `outer: inner: root`.
pub fn error_chain(err: &(dyn Error + 'static)) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
